use {
    super::{Clause, ClauseHandle},
    crate::types::*,
    std::{
        fmt,
        ops::{Index, IndexMut, Range, RangeFrom},
        slice::Iter,
    },
};

/// API for Clause, providing literal accessors.
pub trait ClauseIF {
    /// return true if it contains no literals.
    fn is_empty(&self) -> bool;
    /// return true if it's marked to be reclaimed.
    fn is_dead(&self) -> bool;
    /// return the first literal; the implied one if it's a reason.
    fn lit0(&self) -> Lit;
    /// return the second literal.
    fn lit1(&self) -> Lit;
    /// return `true` if the clause contains the literal.
    fn contains(&self, lit: Lit) -> bool;
    /// return an iterator over its literals.
    fn iter(&self) -> Iter<'_, Lit>;
    /// return the number of literals.
    fn len(&self) -> usize;
}

impl Default for Clause {
    fn default() -> Clause {
        Clause {
            lits: vec![],
            activity: 0.0,
            handle: None,
            flags: FlagClause::empty(),
        }
    }
}

impl Index<usize> for Clause {
    type Output = Lit;
    #[inline]
    fn index(&self, i: usize) -> &Lit {
        &self.lits[i]
    }
}

impl IndexMut<usize> for Clause {
    #[inline]
    fn index_mut(&mut self, i: usize) -> &mut Lit {
        &mut self.lits[i]
    }
}

impl Index<Range<usize>> for Clause {
    type Output = [Lit];
    #[inline]
    fn index(&self, r: Range<usize>) -> &[Lit] {
        &self.lits[r]
    }
}

impl Index<RangeFrom<usize>> for Clause {
    type Output = [Lit];
    #[inline]
    fn index(&self, r: RangeFrom<usize>) -> &[Lit] {
        &self.lits[r]
    }
}

impl<'a> IntoIterator for &'a Clause {
    type Item = &'a Lit;
    type IntoIter = Iter<'a, Lit>;
    fn into_iter(self) -> Self::IntoIter {
        self.lits.iter()
    }
}

impl From<&Clause> for Vec<i32> {
    fn from(c: &Clause) -> Vec<i32> {
        c.lits.iter().map(|l| i32::from(*l)).collect::<Vec<i32>>()
    }
}

impl ClauseIF for Clause {
    fn is_empty(&self) -> bool {
        self.lits.is_empty()
    }
    fn is_dead(&self) -> bool {
        self.flags.contains(FlagClause::DEAD)
    }
    #[inline]
    fn lit0(&self) -> Lit {
        self.lits[0]
    }
    #[inline]
    fn lit1(&self) -> Lit {
        self.lits[1]
    }
    fn contains(&self, lit: Lit) -> bool {
        self.lits.contains(&lit)
    }
    fn iter(&self) -> Iter<'_, Lit> {
        self.lits.iter()
    }
    fn len(&self) -> usize {
        self.lits.len()
    }
}

impl FlagIF for Clause {
    type FlagType = FlagClause;
    #[inline]
    fn is(&self, flag: Self::FlagType) -> bool {
        self.flags.contains(flag)
    }
    #[inline]
    fn set(&mut self, f: Self::FlagType, b: bool) {
        self.flags.set(f, b);
    }
    #[inline]
    fn turn_off(&mut self, flag: Self::FlagType) {
        self.flags.remove(flag);
    }
    #[inline]
    fn turn_on(&mut self, flag: Self::FlagType) {
        self.flags.insert(flag);
    }
}

impl fmt::Display for Clause {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let st = |flag, mes| if self.is(flag) { mes } else { "" };
        write!(
            f,
            "{{{:?}{}{}}}",
            i32s(&self.lits),
            st(FlagClause::LEARNT, ", learnt"),
            st(FlagClause::DEAD, ", dead"),
        )
    }
}

impl Clause {
    /// make a clause which owns `lits`.
    pub(crate) fn new(lits: Vec<Lit>, learnt: bool, handle: Option<ClauseHandle>) -> Clause {
        let mut flags = FlagClause::empty();
        flags.set(FlagClause::LEARNT, learnt);
        Clause {
            lits,
            activity: 0.0,
            handle,
            flags,
        }
    }
    /// return `true` if some literal is satisfied under `model`, indexed by `VarId`.
    pub fn is_satisfied_under(&self, model: &[Option<bool>]) -> bool {
        self.lits
            .iter()
            .any(|l| model.get(l.vi()).copied().flatten() == Some(bool::from(*l)))
    }
}
