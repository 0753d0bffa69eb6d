//! GeoJSON dataset reader

use geojson::{FeatureCollection, GeoJson};
use std::fs;
use std::path::Path;

use crate::error::{FootflowError, Result};

/// Read a GeoJSON file as a feature collection. A lone feature is wrapped
/// in a collection; a bare geometry is rejected.
pub fn read_feature_collection(path: &Path) -> Result<FeatureCollection> {
    let content = fs::read_to_string(path)?;

    let geojson: GeoJson = content.parse().map_err(|e| FootflowError::Parse {
        path: path.to_path_buf(),
        reason: format!("Failed to parse GeoJSON: {}", e),
    })?;

    match geojson {
        GeoJson::FeatureCollection(fc) => Ok(fc),
        GeoJson::Feature(feature) => Ok(FeatureCollection {
            bbox: None,
            features: vec![feature],
            foreign_members: None,
        }),
        GeoJson::Geometry(_) => Err(FootflowError::Parse {
            path: path.to_path_buf(),
            reason: "Expected a FeatureCollection, found a bare geometry".to_string(),
        }),
    }
}
