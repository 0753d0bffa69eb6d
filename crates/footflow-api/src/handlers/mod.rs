mod catalog;
mod feedback;
mod health;
mod map;

pub use catalog::{get_availability, list_authorities, list_demands};
pub use feedback::submit_feedback;
pub use health::health_check;
pub use map::get_map;
