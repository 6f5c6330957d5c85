//! File transfer directory storage
//!
//! Handles quota accounting, path containment and the add/remove operations.

pub mod operations;
pub mod results;
pub mod transfer_dir;
pub mod usage;
pub mod validation;

pub use results::{AddResult, RemoveResult};
pub use transfer_dir::TransferDir;
