/// Var rewarding based on VSIDS
use {
    super::{AssignStack, VarHeapIF},
    crate::types::*,
    tracing::debug,
};

const SCALE: f64 = 1e-100;
const SCALE_MAX: f64 = 1e100;

/// API for var rewarding.
pub trait VarActivityIF {
    /// return var's activity.
    fn activity(&self, vi: VarId) -> f64;
    /// increase var's activity by the current step.
    fn bump_activity(&mut self, vi: VarId);
    /// increase the step, which is equivalent to decaying all activities.
    fn decay_activity(&mut self);
}

impl VarActivityIF for AssignStack {
    #[inline]
    fn activity(&self, vi: VarId) -> f64 {
        self.var[vi].activity
    }
    fn bump_activity(&mut self, vi: VarId) {
        let v = &mut self.var[vi];
        v.activity += self.activity_inc;
        if SCALE_MAX < v.activity {
            debug!("rescaling var activity");
            for v in &mut self.var[1..] {
                v.activity *= SCALE;
            }
            self.activity_inc *= SCALE;
        }
        self.update_heap(vi);
    }
    fn decay_activity(&mut self) {
        self.activity_inc /= self.activity_decay;
    }
}
