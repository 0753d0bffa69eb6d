//! Dataset loading
//!
//! Demand and boundary datasets are read as GeoJSON feature collections and
//! checked against the schema declared for their category before anything is
//! drawn, so a missing attribute surfaces at load time rather than mid-render.

use std::path::Path;
use std::time::Instant;

use crate::error::Result;
use crate::models::{BoundaryLayer, DemandCategory, DemandLayer, LayerSpec};

pub mod geojson;
pub mod schema;

pub use schema::{AttributeKind, DatasetSchema};

/// Loads the two datasets behind a resolved selection
#[derive(Debug, Clone, Copy, Default)]
pub struct DatasetLoader;

impl DatasetLoader {
    /// Load an authority boundary
    pub fn load_boundary(&self, path: &Path) -> Result<BoundaryLayer> {
        let collection = geojson::read_feature_collection(path)?;
        let schema = DatasetSchema::boundary();
        let areas = schema.outline_features(&dataset_name(path), &collection)?;
        Ok(BoundaryLayer { areas })
    }

    /// Load a demand dataset with the schema of its category
    pub fn load_demand(&self, path: &Path, category: DemandCategory) -> Result<DemandLayer> {
        let started = Instant::now();
        let collection = geojson::read_feature_collection(path)?;
        let schema = DatasetSchema::for_category(category);
        let name = dataset_name(path);

        let layer = match category {
            DemandCategory::Bus => DemandLayer::Bus(schema.bus_stops(&name, &collection)?),
            DemandCategory::Residential => {
                DemandLayer::Residential(schema.residential_areas(&name, &collection)?)
            }
            DemandCategory::Education | DemandCategory::Rail => DemandLayer::Outline {
                category,
                features: schema.outline_features(&name, &collection)?,
            },
        };

        tracing::info!(
            dataset = %name,
            category = %category,
            features = layer.len(),
            elapsed_ms = started.elapsed().as_millis() as u64,
            "Loaded demand layer"
        );

        Ok(layer)
    }

    /// Load both datasets named by a layer spec
    pub fn load(&self, spec: &LayerSpec) -> Result<(BoundaryLayer, DemandLayer)> {
        let boundary = self.load_boundary(&spec.boundary_path)?;
        let demand = self.load_demand(&spec.demand_path, spec.category)?;
        Ok((boundary, demand))
    }
}

fn dataset_name(path: &Path) -> String {
    path.file_stem()
        .and_then(|s| s.to_str())
        .unwrap_or("unnamed")
        .to_string()
}
