//! Footflow Store - Feedback log adapters
//!
//! This crate provides adapter implementations of the feedback log port.

pub mod csv_file;
pub mod memory;

pub use csv_file::CsvFeedbackLog;
pub use memory::MemoryFeedbackLog;
