//! Crate `restart` provides restart heuristics.
use {
    crate::{config::RestartSchedule, primitive::LubySeries, types::*},
    std::fmt,
};

/// API for [`restart`](`crate::solver::RestartIF::restart`).
pub trait RestartIF: Instantiate + PropertyDereference<property::Tusize, u64> {
    /// check the restart condition; call it after each conflict.
    fn restart(&mut self) -> bool;
    /// return the current span, the number of conflicts between restarts.
    fn span(&self) -> usize;
}

/// Restart scheduler
#[derive(Clone, Debug)]
pub struct Restarter {
    enable: bool,
    schedule: RestartSchedule,
    luby: LubySeries,
    /// the base span
    step: usize,
    /// the multiplier for the geometric schedule
    inc: f64,
    /// the span in the current cycle
    span: f64,
    /// the number of conflicts since the last restart
    after_restart: usize,

    //
    //## statistics
    //
    num_restart: u64,
}

impl Default for Restarter {
    fn default() -> Self {
        const STEP: usize = 100;
        Restarter {
            enable: true,
            schedule: RestartSchedule::default(),
            luby: LubySeries::default(),
            step: STEP,
            inc: 1.5,
            span: STEP as f64,
            after_restart: 0,
            num_restart: 0,
        }
    }
}

impl Instantiate for Restarter {
    fn instantiate(config: &Config, _: &CNFDescription) -> Self {
        let mut rst = Restarter {
            enable: !config.without_restart,
            schedule: config.rst_schedule,
            step: config.rst_step.max(1),
            inc: config.rst_inc.max(1.0),
            ..Restarter::default()
        };
        rst.shift();
        rst
    }
    fn handle(&mut self, e: SolverEvent) {
        match e {
            SolverEvent::Conflict => self.after_restart += 1,
            SolverEvent::Restart => {
                self.after_restart = 0;
                self.num_restart += 1;
                self.shift();
            }
            _ => (),
        }
    }
}

impl fmt::Display for Restarter {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        if self.enable {
            write!(f, "{}[span:{}]", self.schedule, self.span())
        } else {
            write!(f, "Restart(deactivated)")
        }
    }
}

impl RestartIF for Restarter {
    fn restart(&mut self) -> bool {
        self.enable && self.span() <= self.after_restart
    }
    fn span(&self) -> usize {
        self.span as usize
    }
}

impl Restarter {
    /// calculate and set up the next span.
    fn shift(&mut self) {
        self.span = match self.schedule {
            RestartSchedule::Luby => (self.step * self.luby.next_unchecked()) as f64,
            RestartSchedule::Geometric if 0 < self.num_restart => self.span * self.inc,
            RestartSchedule::Geometric | RestartSchedule::Fixed => self.step as f64,
        };
    }
}

pub mod property {
    use super::Restarter;
    use crate::types::*;

    #[derive(Clone, Copy, Debug, Eq, PartialEq)]
    pub enum Tusize {
        NumRestart,
        Span,
    }

    impl PropertyDereference<Tusize, u64> for Restarter {
        #[inline]
        fn derefer(&self, k: Tusize) -> u64 {
            match k {
                Tusize::NumRestart => self.num_restart,
                Tusize::Span => self.span as u64,
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn spans(config: &Config, n: usize) -> Vec<usize> {
        let mut rst = Restarter::instantiate(config, &CNFDescription::default());
        let mut v = Vec::new();
        for _ in 0..n {
            v.push(rst.span());
            while !rst.restart() {
                rst.handle(SolverEvent::Conflict);
            }
            rst.handle(SolverEvent::Restart);
        }
        v
    }

    #[test]
    fn test_luby_schedule() {
        let config = Config {
            rst_step: 10,
            ..Config::default()
        };
        assert_eq!(spans(&config, 8), vec![10, 10, 20, 10, 10, 20, 40, 10]);
    }

    #[test]
    fn test_geometric_schedule() {
        let config = Config {
            rst_schedule: RestartSchedule::Geometric,
            rst_step: 100,
            rst_inc: 2.0,
            ..Config::default()
        };
        assert_eq!(spans(&config, 4), vec![100, 200, 400, 800]);
    }

    #[test]
    fn test_fixed_schedule() {
        let config = Config {
            rst_schedule: RestartSchedule::Fixed,
            rst_step: 7,
            ..Config::default()
        };
        assert_eq!(spans(&config, 3), vec![7, 7, 7]);
        let mut rst = Restarter::instantiate(&config, &CNFDescription::default());
        for _ in 0..6 {
            rst.handle(SolverEvent::Conflict);
        }
        assert!(!rst.restart());
        rst.handle(SolverEvent::Conflict);
        assert!(rst.restart());
    }

    #[test]
    fn test_restart_disabled() {
        let config = Config {
            without_restart: true,
            rst_step: 1,
            ..Config::default()
        };
        let mut rst = Restarter::instantiate(&config, &CNFDescription::default());
        for _ in 0..1000 {
            rst.handle(SolverEvent::Conflict);
        }
        assert!(!rst.restart());
        assert_eq!(format!("{rst}"), "Restart(deactivated)");
    }
}
