//! Typed attribute schemas per dataset kind.

use geojson::{Feature, FeatureCollection, Geometry, JsonObject, JsonValue};

use crate::error::{FootflowError, Result};
use crate::models::recipe::RESIDENTS_ATTRIBUTE;
use crate::models::{BusStop, DemandCategory, GeometryKind, OutlineFeature, ResidentialArea};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AttributeKind {
    Number,
    Text,
}

/// Geometry and attributes a dataset must carry
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DatasetSchema {
    pub geometry: GeometryKind,
    pub attributes: Vec<(&'static str, AttributeKind)>,
}

impl DatasetSchema {
    pub fn boundary() -> Self {
        Self {
            geometry: GeometryKind::Polygons,
            attributes: Vec::new(),
        }
    }

    pub fn for_category(category: DemandCategory) -> Self {
        let attributes = match category {
            DemandCategory::Bus => vec![
                ("stop_name", AttributeKind::Text),
                ("stop_lat", AttributeKind::Number),
                ("stop_lon", AttributeKind::Number),
                ("weekly_demand", AttributeKind::Number),
                ("daily_demand", AttributeKind::Number),
                ("hourly_demand", AttributeKind::Number),
            ],
            DemandCategory::Residential => vec![(RESIDENTS_ATTRIBUTE, AttributeKind::Number)],
            DemandCategory::Education | DemandCategory::Rail => Vec::new(),
        };

        Self {
            geometry: category.geometry_kind(),
            attributes,
        }
    }

    /// Validate one feature, returning its geometry and properties
    pub fn check<'a>(
        &self,
        dataset: &str,
        index: usize,
        feature: &'a Feature,
    ) -> Result<(&'a Geometry, Option<&'a JsonObject>)> {
        let mismatch = |reason: String| FootflowError::SchemaMismatch {
            dataset: dataset.to_string(),
            feature: index,
            reason,
        };

        let geometry = feature
            .geometry
            .as_ref()
            .ok_or_else(|| mismatch("feature has no geometry".to_string()))?;

        let geometry_type = geometry.value.type_name();
        if !self.geometry.accepts(geometry_type) {
            return Err(mismatch(format!(
                "expected {:?} geometry, found {}",
                self.geometry, geometry_type
            )));
        }

        let properties = feature.properties.as_ref();
        for (name, kind) in &self.attributes {
            let value = properties
                .and_then(|props| attribute(props, name))
                .ok_or_else(|| mismatch(format!("missing attribute '{}'", name)))?;

            let matches = match kind {
                AttributeKind::Number => value.as_f64().is_some(),
                AttributeKind::Text => value.is_string(),
            };
            if !matches {
                return Err(mismatch(format!(
                    "attribute '{}' should be {:?}, found {}",
                    name, kind, value
                )));
            }
        }

        Ok((geometry, properties))
    }

    pub fn bus_stops(&self, dataset: &str, collection: &FeatureCollection) -> Result<Vec<BusStop>> {
        collection
            .features
            .iter()
            .enumerate()
            .map(|(index, feature)| {
                let (_, properties) = self.check(dataset, index, feature)?;
                let props = properties.cloned().unwrap_or_default();
                Ok(BusStop {
                    stop_name: text(&props, "stop_name"),
                    stop_lat: number(&props, "stop_lat"),
                    stop_lon: number(&props, "stop_lon"),
                    weekly_demand: number(&props, "weekly_demand"),
                    daily_demand: number(&props, "daily_demand"),
                    hourly_demand: number(&props, "hourly_demand"),
                })
            })
            .collect()
    }

    pub fn residential_areas(
        &self,
        dataset: &str,
        collection: &FeatureCollection,
    ) -> Result<Vec<ResidentialArea>> {
        collection
            .features
            .iter()
            .enumerate()
            .map(|(index, feature)| {
                let (geometry, properties) = self.check(dataset, index, feature)?;
                let props = properties.cloned().unwrap_or_default();
                Ok(ResidentialArea {
                    geometry: geometry.clone(),
                    residents_per_m2: number(&props, RESIDENTS_ATTRIBUTE),
                    properties: props,
                })
            })
            .collect()
    }

    pub fn outline_features(
        &self,
        dataset: &str,
        collection: &FeatureCollection,
    ) -> Result<Vec<OutlineFeature>> {
        collection
            .features
            .iter()
            .enumerate()
            .map(|(index, feature)| {
                let (geometry, properties) = self.check(dataset, index, feature)?;
                Ok(OutlineFeature {
                    geometry: geometry.clone(),
                    properties: properties.cloned().unwrap_or_default(),
                })
            })
            .collect()
    }
}

/// Attribute lookup ignoring surrounding whitespace in column names
fn attribute<'a>(properties: &'a JsonObject, name: &str) -> Option<&'a JsonValue> {
    properties
        .get(name)
        .or_else(|| properties.iter().find(|(key, _)| key.trim() == name).map(|(_, v)| v))
}

// Only called after `check` has confirmed the attribute and its type.
fn number(properties: &JsonObject, name: &str) -> f64 {
    attribute(properties, name).and_then(JsonValue::as_f64).unwrap_or_default()
}

fn text(properties: &JsonObject, name: &str) -> String {
    attribute(properties, name)
        .and_then(JsonValue::as_str)
        .unwrap_or_default()
        .to_string()
}
