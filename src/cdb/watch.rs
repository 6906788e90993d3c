use {super::ClauseId, crate::types::*};

/// API for 'watcher list' like `register` and `relocate`.
pub trait WatchDBIF {
    /// make a new 'watch', and add it to this watcher list.
    fn register(&mut self, blocker: Lit, c: ClauseId);
    /// rename every clause id by `table`, dropping watches to reclaimed clauses.
    fn relocate(&mut self, table: &[ClauseId]);
}

/// 'Watch literal' structure
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub struct Watch {
    /// a cache of a literal in the clause
    pub blocker: Lit,
    /// ClauseId
    pub c: ClauseId,
}

impl WatchDBIF for Vec<Watch> {
    fn register(&mut self, blocker: Lit, c: ClauseId) {
        self.push(Watch { blocker, c });
    }
    fn relocate(&mut self, table: &[ClauseId]) {
        self.retain_mut(|w| {
            w.c = table[usize::from(w.c)];
            !w.c.is_none()
        });
    }
}
