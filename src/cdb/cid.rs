use std::fmt;

/// Clause identifier, or clause index, starting with one.
/// Note: ids are re-assigned after 'garbage collection'; callers hold
/// a [`ClauseHandle`] instead.
#[derive(Clone, Copy, Default, Eq, Hash, Ord, PartialEq, PartialOrd)]
pub struct ClauseId {
    /// a sequence number.
    pub ordinal: u32,
}

impl From<usize> for ClauseId {
    #[inline]
    fn from(u: usize) -> ClauseId {
        ClauseId { ordinal: u as u32 }
    }
}

impl From<ClauseId> for usize {
    #[inline]
    fn from(cid: ClauseId) -> usize {
        cid.ordinal as usize
    }
}

impl fmt::Debug for ClauseId {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}C", self.ordinal)
    }
}

impl fmt::Display for ClauseId {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}C", self.ordinal)
    }
}

impl ClauseId {
    /// return `true` if this is the dummy id, used in a reason slot or no conflict path.
    #[inline]
    pub fn is_none(&self) -> bool {
        self.ordinal == 0
    }
}

/// Stable name of an original clause, returned by
/// [`add_clause`](`crate::solver::SatSolverIF::add_clause`).
/// It survives garbage collection, unlike [`ClauseId`].
#[derive(Clone, Copy, Eq, Hash, Ord, PartialEq, PartialOrd)]
pub struct ClauseHandle {
    pub(crate) serial: u32,
}

impl fmt::Debug for ClauseHandle {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}H", self.serial)
    }
}

impl fmt::Display for ClauseHandle {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}H", self.serial)
    }
}
