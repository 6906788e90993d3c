/// Luby series used by restart scheduling
pub mod luby;

pub use self::luby::*;
