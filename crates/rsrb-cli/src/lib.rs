/// rsrb runner
///
/// Loads a script from disk and executes it with the rsrb interpreter.

pub mod driver;
pub mod error;

pub use driver::{RunOptions, RunOutcome, Runner};
pub use error::{Result, RunError};
