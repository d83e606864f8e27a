//! Tab-separated reading utilities.

mod reader;
mod row;

pub use reader::{TsvHeaders, TsvReader};
pub use row::TsvRow;
