//! Core result model shared by the specgate checkers.
//!
//! Both engines (fixture classification and contract conformance) produce a
//! [`ResultSet`]; counts and the process exit status are always folded from
//! its entries.

pub mod exit;
pub mod model;

pub use exit::ExitStatus;
pub use model::{CheckEntry, CheckMode, Counts, Group, ResultSet, Status};
