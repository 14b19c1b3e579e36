//! Statistics and metric trait implementations

pub mod cases;

pub use cases::CaseStatistics;
