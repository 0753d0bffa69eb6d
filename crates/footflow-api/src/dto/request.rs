use serde::Deserialize;

/// Selection for the map endpoint
#[derive(Debug, Deserialize)]
pub struct MapQuery {
    pub authority: String,
    pub demand: String,
}

#[derive(Debug, Deserialize)]
pub struct AvailabilityQuery {
    pub authority: String,
}
