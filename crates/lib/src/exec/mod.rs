//! External process execution.

pub mod cmd;
pub mod types;

pub use cmd::{execute, run_verbose};
pub use types::{ExecContext, ExecError};
