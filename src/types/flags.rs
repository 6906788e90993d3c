use bitflags::bitflags;

/// API for object properties.
pub trait FlagIF {
    type FlagType;
    /// return true if the flag in on.
    fn is(&self, flag: Self::FlagType) -> bool;
    /// set the flag.
    fn set(&mut self, f: Self::FlagType, b: bool);
    /// toggle the flag off.
    fn turn_off(&mut self, flag: Self::FlagType);
    /// toggle the flag on.
    fn turn_on(&mut self, flag: Self::FlagType);
}

bitflags! {
    /// Misc flags used by [`Clause`](`crate::cdb::Clause`).
    #[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord)]
    pub struct FlagClause: u8 {
        /// a clause is a generated clause by conflict analysis and is removable.
        const LEARNT       = 0b0000_0001;
        /// a clause is dead; its slot will be reclaimed by garbage collection.
        const DEAD         = 0b0000_0010;
        /// used in conflict analysis since the last reduction.
        const USED         = 0b0000_0100;
    }
}

bitflags! {
    /// Misc flags used by [`Var`](`crate::assign::Var`).
    #[derive(Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord)]
    pub struct FlagVar: u8 {
        /// the previous assigned value of a Var.
        const PHASE        = 0b0000_0001;
        /// a var is checked during in the current conflict analysis.
        const CA_SEEN      = 0b0000_0010;
    }
}
