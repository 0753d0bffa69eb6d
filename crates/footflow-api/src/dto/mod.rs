mod request;
mod response;

pub use request::{AvailabilityQuery, MapQuery};
pub use response::{
    AvailabilityResponse, CategoryAvailability, DemandInfo, FeedbackResponse, HealthResponse,
};
