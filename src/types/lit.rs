use {
    crate::types::VarId,
    std::{
        fmt,
        ops::{Index, IndexMut, Not},
    },
};

/// Literal encoded on `u32` as:
///
/// - the Literal corresponding to a positive occurrence of *variable `n` is `2 * n + 1` and
/// - that for the negative one is `2 * n`.
///
/// Since `VarId` starts with one, ordinals 0 and 1 never denote a valid literal.
///
/// # Examples
///
/// ```
/// use bsat::types::*;
/// assert_eq!(2usize, Lit::from(-1i32).into());
/// assert_eq!(3usize, Lit::from( 1i32).into());
/// assert_eq!(4usize, Lit::from(-2i32).into());
/// assert_eq!(5usize, Lit::from( 2i32).into());
/// assert_eq!( 1i32, Lit::from( 1i32).into());
/// assert_eq!(-1i32, Lit::from(-1i32).into());
/// assert_eq!( 2i32, Lit::from( 2i32).into());
/// assert_eq!(-2i32, Lit::from(-2i32).into());
/// ```
#[derive(Clone, Copy, Default, Eq, Hash, Ord, PartialEq, PartialOrd)]
pub struct Lit {
    /// literal encoded into folded u32
    ordinal: u32,
}

impl fmt::Display for Lit {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}L", i32::from(self))
    }
}

impl fmt::Debug for Lit {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}L", i32::from(self))
    }
}

/// convert literals to `[i32]` (for debug).
pub fn i32s(v: &[Lit]) -> Vec<i32> {
    v.iter().map(|l| i32::from(*l)).collect::<Vec<_>>()
}

impl From<(VarId, bool)> for Lit {
    /// make a literal from a var and its polarity: `true` for a positive one.
    #[inline]
    fn from((vi, b): (VarId, bool)) -> Self {
        Lit {
            ordinal: ((vi as u32) << 1) | (b as u32),
        }
    }
}

impl From<usize> for Lit {
    #[inline]
    fn from(l: usize) -> Self {
        Lit { ordinal: l as u32 }
    }
}

impl From<i32> for Lit {
    #[inline]
    fn from(x: i32) -> Self {
        Lit {
            ordinal: (if x < 0 { -2 * x } else { 2 * x + 1 }) as u32,
        }
    }
}

impl From<Lit> for bool {
    /// - negative Lit (= even u32) => false
    /// - positive Lit (= odd u32)  => true
    #[inline]
    fn from(l: Lit) -> bool {
        (l.ordinal & 1) != 0
    }
}

impl From<Lit> for usize {
    #[inline]
    fn from(l: Lit) -> usize {
        l.ordinal as usize
    }
}

impl From<Lit> for i32 {
    #[inline]
    fn from(l: Lit) -> i32 {
        if l.ordinal % 2 == 0 {
            -((l.ordinal >> 1) as i32)
        } else {
            (l.ordinal >> 1) as i32
        }
    }
}

impl From<&Lit> for i32 {
    #[inline]
    fn from(l: &Lit) -> i32 {
        i32::from(*l)
    }
}

impl Not for Lit {
    type Output = Lit;
    #[inline]
    fn not(self) -> Self {
        Lit {
            ordinal: self.ordinal ^ 1,
        }
    }
}

impl<T> Index<Lit> for Vec<T> {
    type Output = T;
    #[inline]
    fn index(&self, l: Lit) -> &Self::Output {
        &self[usize::from(l)]
    }
}

impl<T> IndexMut<Lit> for Vec<T> {
    #[inline]
    fn index_mut(&mut self, l: Lit) -> &mut Self::Output {
        &mut self[usize::from(l)]
    }
}

/// # Examples
///
/// ```
/// use bsat::types::*;
/// assert_eq!(Lit::from(1i32), Lit::from_assign(1, true));
/// assert_eq!(Lit::from(-2i32), Lit::from_assign(2, false));
/// assert_eq!(1, Lit::from_assign(1, true).vi());
/// assert_eq!(1, Lit::from_assign(1, false).vi());
/// assert_eq!(2, Lit::from_assign(2, true).vi());
/// assert_eq!(Lit::from( 1i32), !Lit::from(-1i32));
/// assert_eq!(Lit::from(-1i32), !Lit::from( 1i32));
/// assert_eq!(Lit::from( 2i32), !Lit::from(-2i32));
/// ```
impl Lit {
    /// make a literal which is satisfied by assigning `b` to `vi`.
    #[inline]
    pub fn from_assign(vi: VarId, b: bool) -> Lit {
        Lit::from((vi, b))
    }
    /// convert to `bool`.
    #[inline]
    pub fn as_bool(&self) -> bool {
        self.ordinal & 1 == 1
    }
    /// convert to `VarId`.
    #[inline]
    pub fn vi(self) -> VarId {
        (self.ordinal >> 1) as VarId
    }
    /// return `true` if this is the dummy literal.
    #[inline]
    pub fn is_none(&self) -> bool {
        self.ordinal < 2
    }
}
