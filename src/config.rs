/// Module `config` provides solver's configuration.
use std::fmt;

/// Restart scheduling policies
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub enum RestartSchedule {
    /// `rst_step` times the Luby series
    #[default]
    Luby,
    /// `rst_step` times a power of `rst_inc`
    Geometric,
    /// every `rst_step` conflicts
    Fixed,
}

impl fmt::Display for RestartSchedule {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            RestartSchedule::Luby => write!(f, "Luby"),
            RestartSchedule::Geometric => write!(f, "geometric"),
            RestartSchedule::Fixed => write!(f, "fixed"),
        }
    }
}

/// Solver's parameters.
///
/// # Example
///
/// ```
/// use bsat::config::{Config, RestartSchedule};
/// let config = Config {
///     rst_schedule: RestartSchedule::Geometric,
///     use_phase_saving: false,
///     ..Config::default()
/// };
/// assert!(config.use_bin_shortcut);
/// ```
#[derive(Clone, Debug)]
pub struct Config {
    //
    //## clause DB
    //
    /// Propagate binary clauses through direct links
    pub use_bin_shortcut: bool,

    /// Soft limit of #clauses (0 for no limit)
    pub clause_limit: usize,

    /// Disable clause reduction
    pub without_reduce: bool,

    /// #conflicts until the first reduction
    pub cdb_reduce_first: usize,

    /// Increment of the interval between reductions
    pub cdb_reduce_inc: usize,

    /// Fraction of removable learnts deleted at each reduction
    pub cdb_reduce_ratio: f64,

    /// Decay rate of clause activity
    pub cla_decay: f64,

    //
    //## var selection
    //
    /// Decay rate of var activity
    pub var_decay: f64,

    /// Reuse the last assigned value as the next decision polarity
    pub use_phase_saving: bool,

    //
    //## restarter
    //
    /// Restart schedule
    pub rst_schedule: RestartSchedule,

    /// #conflicts between restarts (base span)
    pub rst_step: usize,

    /// Span multiplier for the geometric schedule
    pub rst_inc: f64,

    /// Disable restarts
    pub without_restart: bool,

    //
    //## budget
    //
    /// Default wall-clock limit in sec. of a solve call (0 for no limit)
    pub timeout: f64,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            use_bin_shortcut: true,
            clause_limit: 0,
            without_reduce: false,
            cdb_reduce_first: 2000,
            cdb_reduce_inc: 300,
            cdb_reduce_ratio: 0.5,
            cla_decay: 0.999,
            var_decay: 0.95,
            use_phase_saving: true,
            rst_schedule: RestartSchedule::Luby,
            rst_step: 100,
            rst_inc: 1.5,
            without_restart: false,
            timeout: 0.0,
        }
    }
}
