//! Port trait definitions
//!
//! These traits define the interfaces that adapters must implement.

pub mod feedback;

pub use feedback::FeedbackLog;
