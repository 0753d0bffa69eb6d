use geojson::{Geometry, JsonObject};
use serde::Serialize;
use std::path::PathBuf;

use super::authority::Authority;
use super::demand::{DemandCategory, GeometryKind};
use super::recipe::{BoundaryStyle, RenderRecipe};

/// Resolved description of what to load and how to style it for a selection
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LayerSpec {
    pub authority: Authority,
    pub category: DemandCategory,
    pub demand_path: PathBuf,
    pub boundary_path: PathBuf,
    pub geometry: GeometryKind,
    pub recipe: RenderRecipe,
    pub boundary_style: BoundaryStyle,
}

/// Authority outline polygons
#[derive(Debug, Clone)]
pub struct BoundaryLayer {
    pub areas: Vec<OutlineFeature>,
}

/// A feature drawn without attribute-driven styling
#[derive(Debug, Clone)]
pub struct OutlineFeature {
    pub geometry: Geometry,
    pub properties: JsonObject,
}

/// A bus stop with its service-frequency demand figures
#[derive(Debug, Clone, PartialEq)]
pub struct BusStop {
    pub stop_name: String,
    pub stop_lat: f64,
    pub stop_lon: f64,
    pub weekly_demand: f64,
    pub daily_demand: f64,
    pub hourly_demand: f64,
}

/// A building footprint with its residential density
#[derive(Debug, Clone)]
pub struct ResidentialArea {
    pub geometry: Geometry,
    pub residents_per_m2: f64,
    pub properties: JsonObject,
}

/// A demand dataset after schema validation
#[derive(Debug, Clone)]
pub enum DemandLayer {
    Bus(Vec<BusStop>),
    Residential(Vec<ResidentialArea>),
    Outline {
        category: DemandCategory,
        features: Vec<OutlineFeature>,
    },
}

impl DemandLayer {
    pub fn category(&self) -> DemandCategory {
        match self {
            DemandLayer::Bus(_) => DemandCategory::Bus,
            DemandLayer::Residential(_) => DemandCategory::Residential,
            DemandLayer::Outline { category, .. } => *category,
        }
    }

    pub fn len(&self) -> usize {
        match self {
            DemandLayer::Bus(stops) => stops.len(),
            DemandLayer::Residential(areas) => areas.len(),
            DemandLayer::Outline { features, .. } => features.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
