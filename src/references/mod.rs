//! Shared and weak handles to the cases of a transmission tree.
//!
//! Children are held through strong handles by their donor, while every case
//! refers back to its donor through a weak handle. Dropping the index case
//! therefore drops the whole tree.
mod cell;

pub use cell::{CaseRef, CaseWeak};
