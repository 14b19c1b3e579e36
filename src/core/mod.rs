//! This module contains the core datatypes of the library.

mod case;
mod outbreak;
mod traversal;

pub use case::{Case, CaseKey};
pub use outbreak::{Horizon, Outbreak, STALL_ROUNDS, SpreadReport, Termination};
pub use traversal::{Postorder, Preorder};
