//! Rendering recipes: how each demand category is drawn on the map.

use serde::{Deserialize, Serialize};

use super::demand::DemandCategory;

/// Class lower edges for residents per m2, starting at the minimum
pub const DEFAULT_BREAKS: [f64; 4] = [0.0, 0.01, 0.03131349379808141, 0.05138331924456558];

/// Bus marker radius is weekly demand divided by this
pub const DEFAULT_RADIUS_DIVISOR: f64 = 40.0;

pub const RESIDENTS_ATTRIBUTE: &str = "residents per m2";

pub const BOUNDARY_COLOR: &str = "red";
pub const MARKER_COLOR: &str = "blue";
pub const OUTLINE_COLOR: &str = "#3388ff";
pub const CHOROPLETH_RAMP: &str = "Blues";

/// How choropleth classes are derived
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ClassificationStrategy {
    /// Static class edges, independent of the data
    FixedBreaks(Vec<f64>),
    /// `k` classes holding roughly equal numbers of features
    Quantiles(usize),
}

impl Default for ClassificationStrategy {
    fn default() -> Self {
        ClassificationStrategy::FixedBreaks(DEFAULT_BREAKS.to_vec())
    }
}

/// Per-stop circle markers sized by weekly demand
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MarkerRecipe {
    pub radius_divisor: f64,
    pub color: String,
    pub fill_opacity: f64,
    pub stroke: bool,
    pub popup_max_width: u32,
}

impl MarkerRecipe {
    /// Marker radius for a stop; zero demand gives a zero radius
    pub fn radius(&self, weekly_demand: f64) -> f64 {
        weekly_demand / self.radius_divisor
    }
}

impl Default for MarkerRecipe {
    fn default() -> Self {
        Self {
            radius_divisor: DEFAULT_RADIUS_DIVISOR,
            color: MARKER_COLOR.to_string(),
            fill_opacity: 0.85,
            stroke: false,
            popup_max_width: 300,
        }
    }
}

/// Area fill classified on a numeric attribute
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChoroplethRecipe {
    pub attribute: String,
    pub strategy: ClassificationStrategy,
    pub color_ramp: String,
    pub legend_title: String,
    pub layer_name: String,
}

impl ChoroplethRecipe {
    pub fn residents(strategy: ClassificationStrategy) -> Self {
        Self {
            attribute: RESIDENTS_ATTRIBUTE.to_string(),
            strategy,
            color_ramp: CHOROPLETH_RAMP.to_string(),
            legend_title: RESIDENTS_ATTRIBUTE.to_string(),
            layer_name: "Residential Demand".to_string(),
        }
    }
}

/// Uniform outline with no attribute classification
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OutlineRecipe {
    pub color: String,
    pub zoom_to_layer: bool,
}

/// Style of the authority boundary drawn under every demand layer
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BoundaryStyle {
    pub layer_name: String,
    pub color: String,
}

impl Default for BoundaryStyle {
    fn default() -> Self {
        Self {
            layer_name: "boundary".to_string(),
            color: BOUNDARY_COLOR.to_string(),
        }
    }
}

/// Visual encoding for a demand layer
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "encoding", rename_all = "snake_case")]
pub enum RenderRecipe {
    Markers(MarkerRecipe),
    Choropleth(ChoroplethRecipe),
    Outline(OutlineRecipe),
}

/// The configurable constants behind recipe selection
#[derive(Debug, Clone, PartialEq)]
pub struct RecipeBook {
    pub radius_divisor: f64,
    pub classification: ClassificationStrategy,
    pub outline_color: String,
}

impl Default for RecipeBook {
    fn default() -> Self {
        Self {
            radius_divisor: DEFAULT_RADIUS_DIVISOR,
            classification: ClassificationStrategy::default(),
            outline_color: OUTLINE_COLOR.to_string(),
        }
    }
}

impl RecipeBook {
    /// Select the recipe for a category. Total over all categories.
    pub fn recipe_for(&self, category: DemandCategory) -> RenderRecipe {
        match category {
            DemandCategory::Bus => RenderRecipe::Markers(MarkerRecipe {
                radius_divisor: self.radius_divisor,
                ..MarkerRecipe::default()
            }),
            DemandCategory::Residential => {
                RenderRecipe::Choropleth(ChoroplethRecipe::residents(self.classification.clone()))
            }
            DemandCategory::Education | DemandCategory::Rail => {
                RenderRecipe::Outline(OutlineRecipe {
                    color: self.outline_color.clone(),
                    zoom_to_layer: true,
                })
            }
        }
    }
}

/// Recipe for a category using the default constants
pub fn recipe_for(category: DemandCategory) -> RenderRecipe {
    RecipeBook::default().recipe_for(category)
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_recipe_per_category() {
        assert!(matches!(recipe_for(DemandCategory::Bus), RenderRecipe::Markers(_)));
        assert!(matches!(recipe_for(DemandCategory::Residential), RenderRecipe::Choropleth(_)));
        assert!(matches!(recipe_for(DemandCategory::Education), RenderRecipe::Outline(_)));
        assert!(matches!(recipe_for(DemandCategory::Rail), RenderRecipe::Outline(_)));
    }

    #[test]
    fn test_recipe_is_stable_across_calls() {
        for category in DemandCategory::ALL {
            assert_eq!(recipe_for(category), recipe_for(category));
        }
    }

    #[test]
    fn test_bus_radius_scale() {
        let recipe = MarkerRecipe::default();
        assert_eq!(recipe.radius(400.0), 10.0);
        assert_eq!(recipe.radius(0.0), 0.0);
    }

    #[test]
    fn test_book_carries_classification() {
        let book = RecipeBook {
            classification: ClassificationStrategy::Quantiles(3),
            ..RecipeBook::default()
        };
        match book.recipe_for(DemandCategory::Residential) {
            RenderRecipe::Choropleth(recipe) => {
                assert_eq!(recipe.strategy, ClassificationStrategy::Quantiles(3));
                assert_eq!(recipe.attribute, "residents per m2");
            }
            other => panic!("unexpected recipe {:?}", other),
        }
    }

    #[test]
    fn test_outline_zooms_to_layer() {
        match recipe_for(DemandCategory::Rail) {
            RenderRecipe::Outline(recipe) => assert!(recipe.zoom_to_layer),
            other => panic!("unexpected recipe {:?}", other),
        }
    }

    proptest! {
        #[test]
        fn prop_radius_is_monotonic(a in 0.0f64..1.0e6, b in 0.0f64..1.0e6) {
            let recipe = MarkerRecipe::default();
            let (low, high) = if a <= b { (a, b) } else { (b, a) };
            prop_assert!(recipe.radius(low) <= recipe.radius(high));
            prop_assert_eq!(recipe.radius(high), high / 40.0);
        }
    }
}
