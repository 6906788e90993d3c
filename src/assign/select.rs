/// Decision var selection
use {
    super::{AssignStack, VarHeapIF, VarOrderIF},
    crate::types::*,
};

/// API for var selection, depending on an internal heap.
pub trait VarSelectIF {
    /// select a new decision variable; `None` if every var is assigned.
    /// The polarity is the saved phase, or `false`.
    fn select_decision_literal(&mut self) -> Option<Lit>;
}

impl VarSelectIF for AssignStack {
    fn select_decision_literal(&mut self) -> Option<Lit> {
        let vi = self.select_var()?;
        Some(Lit::from_assign(vi, self.var[vi].is(FlagVar::PHASE)))
    }
}

impl AssignStack {
    /// select a decision var
    fn select_var(&mut self) -> Option<VarId> {
        while !self.var_order.is_empty() {
            let vi = self.get_heap_root();
            if var_assign!(self, vi).is_none() {
                return Some(vi);
            }
        }
        None
    }
}

#[cfg(test)]
mod tests {
    use {
        super::*,
        crate::assign::{PropagateIF, VarActivityIF},
    };

    #[test]
    fn test_decision_selection() {
        let mut asg = AssignStack::instantiate(&Config::default(), &CNFDescription::from(3));
        asg.assign_at_root_level(Lit::from(-1i32)).expect("consistent");
        asg.bump_activity(3);
        // the most active one, negative by default
        assert_eq!(asg.select_decision_literal(), Some(Lit::from(-3i32)));
        asg.assign_by_decision(Lit::from(-3i32));
        // var 1 is assigned and skipped
        assert_eq!(asg.select_decision_literal(), Some(Lit::from(-2i32)));
        asg.assign_by_decision(Lit::from(2i32));
        assert_eq!(asg.select_decision_literal(), None);
        // backjumping puts them back in order
        asg.cancel_until(0);
        // 3 was saved as false, 2 as true
        assert_eq!(asg.select_decision_literal(), Some(Lit::from(-3i32)));
        assert_eq!(asg.select_decision_literal(), Some(Lit::from(2i32)));
    }
}
