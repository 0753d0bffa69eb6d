//! Map assembly: turn a resolved selection and its loaded layers into a
//! renderable map description.

use geo::{BoundingRect, Geometry as GeoGeometry, GeometryCollection, Rect};
use geojson::{Feature, FeatureCollection, Geometry, JsonObject, JsonValue, Value};
use serde::{Deserialize, Serialize};
use serde_json::json;

use crate::classify::{blues, Classification};
use crate::error::Result;
use crate::models::{
    Authority, BoundaryLayer, BusStop, ChoroplethRecipe, DemandCategory, DemandLayer, LayerSpec,
    MarkerRecipe, OutlineFeature, OutlineRecipe, RenderRecipe, ResidentialArea,
};

/// Initial map center (lat, lon) when the viewport is fixed
pub const DEFAULT_CENTER: [f64; 2] = [51.5074, 0.1278];
pub const DEFAULT_ZOOM: u8 = 10;
pub const BASEMAP: &str = "OpenStreetMap";

/// How the initial viewport is chosen
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum ViewportMode {
    /// Always open on the default center and zoom
    #[default]
    Fixed,
    /// Center on the selected authority's boundary
    #[serde(alias = "boundary")]
    FitBoundary,
}

#[derive(Debug, Clone, PartialEq)]
pub struct MapSettings {
    pub viewport: ViewportMode,
    pub center: [f64; 2],
    pub zoom: u8,
    pub basemap: String,
    pub width: u32,
    pub height: u32,
}

impl Default for MapSettings {
    fn default() -> Self {
        Self {
            viewport: ViewportMode::Fixed,
            center: DEFAULT_CENTER,
            zoom: DEFAULT_ZOOM,
            basemap: BASEMAP.to_string(),
            width: 700,
            height: 600,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum LayerKind {
    Boundary,
    Markers,
    Choropleth,
    Outline,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Legend {
    pub title: String,
    pub upper_bounds: Vec<f64>,
    pub colors: Vec<String>,
}

/// One drawable layer; features carry their own `style` property
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MapLayer {
    pub name: String,
    pub kind: LayerKind,
    pub popups: bool,
    pub zoom_to_layer: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub extent: Option<[f64; 4]>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub legend: Option<Legend>,
    pub features: FeatureCollection,
}

/// Complete map description for one selection, in draw order
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MapView {
    pub authority: Authority,
    pub category: DemandCategory,
    pub basemap: String,
    /// (lat, lon)
    pub center: [f64; 2],
    pub zoom: u8,
    pub width: u32,
    pub height: u32,
    pub layers: Vec<MapLayer>,
}

#[derive(Debug, Clone, Default)]
pub struct MapAssembler {
    settings: MapSettings,
}

impl MapAssembler {
    pub fn new(settings: MapSettings) -> Self {
        Self { settings }
    }

    /// Build the map: boundary first, then the demand layer per its recipe
    pub fn assemble(
        &self,
        spec: &LayerSpec,
        boundary: BoundaryLayer,
        demand: DemandLayer,
    ) -> Result<MapView> {
        let boundary_extent = extent(boundary.areas.iter().map(|a| &a.geometry));
        let (center, zoom) = match (self.settings.viewport, boundary_extent) {
            (ViewportMode::FitBoundary, Some(rect)) => fit(&rect),
            _ => (self.settings.center, self.settings.zoom),
        };

        let boundary_layer = MapLayer {
            name: spec.boundary_style.layer_name.clone(),
            kind: LayerKind::Boundary,
            popups: true,
            zoom_to_layer: false,
            extent: boundary_extent.map(bbox),
            legend: None,
            features: outline_collection(&boundary.areas, &spec.boundary_style.color),
        };

        let demand_layer = match (&spec.recipe, demand) {
            (RenderRecipe::Markers(recipe), DemandLayer::Bus(stops)) => {
                marker_layer(recipe, &stops)
            }
            (RenderRecipe::Choropleth(recipe), DemandLayer::Residential(areas)) => {
                choropleth_layer(recipe, &areas)?
            }
            (RenderRecipe::Outline(recipe), DemandLayer::Outline { features, .. }) => {
                outline_layer(recipe, spec.category, &features)
            }
            (recipe, layer) => {
                tracing::warn!(
                    category = %layer.category(),
                    ?recipe,
                    "Recipe does not match loaded layer, drawing boundary only"
                );
                return Ok(self.view(spec, center, zoom, vec![boundary_layer]));
            }
        };

        Ok(self.view(spec, center, zoom, vec![boundary_layer, demand_layer]))
    }

    fn view(&self, spec: &LayerSpec, center: [f64; 2], zoom: u8, layers: Vec<MapLayer>) -> MapView {
        MapView {
            authority: spec.authority,
            category: spec.category,
            basemap: self.settings.basemap.clone(),
            center,
            zoom,
            width: self.settings.width,
            height: self.settings.height,
            layers,
        }
    }
}

fn marker_layer(recipe: &MarkerRecipe, stops: &[BusStop]) -> MapLayer {
    let features = stops
        .iter()
        .map(|stop| {
            let mut properties = JsonObject::new();
            properties.insert("stop_name".to_string(), json!(stop.stop_name));
            properties.insert("weekly_demand".to_string(), json!(stop.weekly_demand));
            properties.insert("daily_demand".to_string(), json!(stop.daily_demand));
            properties.insert("hourly_demand".to_string(), json!(stop.hourly_demand));
            properties.insert("radius".to_string(), json!(recipe.radius(stop.weekly_demand)));
            properties.insert("popup".to_string(), json!(bus_popup(stop)));
            properties.insert("popup_max_width".to_string(), json!(recipe.popup_max_width));
            properties.insert(
                "style".to_string(),
                json!({
                    "color": recipe.color,
                    "fill": true,
                    "fill_color": recipe.color,
                    "fill_opacity": recipe.fill_opacity,
                    "stroke": recipe.stroke,
                }),
            );
            feature(Geometry::new(Value::Point(vec![stop.stop_lon, stop.stop_lat])), properties)
        })
        .collect();

    MapLayer {
        name: DemandCategory::Bus.filename().to_string(),
        kind: LayerKind::Markers,
        popups: true,
        zoom_to_layer: false,
        extent: None,
        legend: None,
        features: collection(features),
    }
}

/// Popup html for a bus stop marker
pub fn bus_popup(stop: &BusStop) -> String {
    format!(
        "Stop Name: {} <br> Weekly Demand: {} <br> Daily Demand: {} <br> Hourly Demand: {}",
        stop.stop_name, stop.weekly_demand, stop.daily_demand, stop.hourly_demand
    )
}

fn choropleth_layer(recipe: &ChoroplethRecipe, areas: &[ResidentialArea]) -> Result<MapLayer> {
    let values: Vec<f64> = areas.iter().map(|a| a.residents_per_m2).collect();
    let classes: Classification = recipe.strategy.classify(&values)?;
    let colors = blues(classes.class_count());

    let features = areas
        .iter()
        .map(|area| {
            let class = classes.class_of(area.residents_per_m2);
            let fill = colors.get(class).cloned().unwrap_or_default();
            let mut properties = area.properties.clone();
            properties.insert("class".to_string(), json!(class));
            properties.insert(
                "style".to_string(),
                json!({ "fill_color": fill, "fill_opacity": 0.7, "color": fill, "weight": 1 }),
            );
            feature(area.geometry.clone(), properties)
        })
        .collect();

    Ok(MapLayer {
        name: recipe.layer_name.clone(),
        kind: LayerKind::Choropleth,
        popups: true,
        zoom_to_layer: false,
        extent: None,
        legend: Some(Legend {
            title: recipe.legend_title.clone(),
            upper_bounds: classes.upper_bounds,
            colors,
        }),
        features: collection(features),
    })
}

fn outline_layer(
    recipe: &OutlineRecipe,
    category: DemandCategory,
    features: &[OutlineFeature],
) -> MapLayer {
    let layer_extent = if recipe.zoom_to_layer {
        extent(features.iter().map(|f| &f.geometry)).map(bbox)
    } else {
        None
    };

    MapLayer {
        name: category.filename().to_string(),
        kind: LayerKind::Outline,
        popups: true,
        zoom_to_layer: recipe.zoom_to_layer,
        extent: layer_extent,
        legend: None,
        features: outline_collection(features, &recipe.color),
    }
}

fn outline_collection(features: &[OutlineFeature], color: &str) -> FeatureCollection {
    collection(
        features
            .iter()
            .map(|f| {
                let mut properties = f.properties.clone();
                properties
                    .insert("style".to_string(), json!({ "color": color, "fill_color": color }));
                feature(f.geometry.clone(), properties)
            })
            .collect(),
    )
}

fn feature(geometry: Geometry, properties: JsonObject) -> Feature {
    Feature {
        bbox: None,
        geometry: Some(geometry),
        id: None,
        properties: Some(properties),
        foreign_members: None,
    }
}

fn collection(features: Vec<Feature>) -> FeatureCollection {
    FeatureCollection {
        bbox: None,
        features,
        foreign_members: None,
    }
}

/// Bounding rectangle of a set of geometries; geometries that cannot be
/// converted are skipped
fn extent<'a>(geometries: impl Iterator<Item = &'a Geometry>) -> Option<Rect<f64>> {
    let converted: Vec<GeoGeometry<f64>> = geometries
        .filter_map(|g| GeoGeometry::<f64>::try_from(g.value.clone()).ok())
        .collect();
    GeometryCollection::new_from(converted).bounding_rect()
}

fn bbox(rect: Rect<f64>) -> [f64; 4] {
    [rect.min().x, rect.min().y, rect.max().x, rect.max().y]
}

/// Center and zoom that frame a rectangle in a web-mercator tile pyramid
fn fit(rect: &Rect<f64>) -> ([f64; 2], u8) {
    let center = rect.center();
    let span = rect.width().max(rect.height());
    let zoom = if span <= 0.0 {
        DEFAULT_ZOOM
    } else {
        (360.0 / span).log2().floor().clamp(1.0, 18.0) as u8
    };
    ([center.y, center.x], zoom)
}

impl MapView {
    /// Demand layer, if one was drawn
    pub fn demand_layer(&self) -> Option<&MapLayer> {
        self.layers.iter().find(|l| l.kind != LayerKind::Boundary)
    }
}

/// Style object attached to a feature by the assembler
pub fn feature_style(feature: &Feature) -> Option<&JsonValue> {
    feature.properties.as_ref().and_then(|p| p.get("style"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{recipe_for, BoundaryStyle, ClassificationStrategy};
    use std::path::PathBuf;

    fn square(x: f64, y: f64, size: f64) -> Geometry {
        Geometry::new(Value::Polygon(vec![vec![
            vec![x, y],
            vec![x + size, y],
            vec![x + size, y + size],
            vec![x, y + size],
            vec![x, y],
        ]]))
    }

    fn spec(category: DemandCategory) -> LayerSpec {
        LayerSpec {
            authority: Authority::new("York").unwrap(),
            category,
            demand_path: PathBuf::from("York/demand.geojson"),
            boundary_path: PathBuf::from("York/boundary.geojson"),
            geometry: category.geometry_kind(),
            recipe: recipe_for(category),
            boundary_style: BoundaryStyle::default(),
        }
    }

    fn york_boundary() -> BoundaryLayer {
        BoundaryLayer {
            areas: vec![OutlineFeature {
                geometry: square(-1.2, 53.9, 0.2),
                properties: JsonObject::new(),
            }],
        }
    }

    fn stop(name: &str, weekly: f64) -> BusStop {
        BusStop {
            stop_name: name.to_string(),
            stop_lat: 53.96,
            stop_lon: -1.08,
            weekly_demand: weekly,
            daily_demand: weekly / 7.0,
            hourly_demand: 1.0,
        }
    }

    #[test]
    fn test_bus_map_has_boundary_then_markers() {
        let assembler = MapAssembler::default();
        let stops = vec![stop("Rougier St", 400.0)];
        let view = assembler
            .assemble(&spec(DemandCategory::Bus), york_boundary(), DemandLayer::Bus(stops))
            .unwrap();

        assert_eq!(view.center, DEFAULT_CENTER);
        assert_eq!(view.zoom, 10);
        assert_eq!(view.basemap, "OpenStreetMap");
        assert_eq!(view.layers.len(), 2);
        assert_eq!(view.layers[0].kind, LayerKind::Boundary);
        assert_eq!(view.layers[1].kind, LayerKind::Markers);
        assert!(view.layers.iter().all(|l| l.popups));

        let marker = &view.layers[1].features.features[0];
        let props = marker.properties.as_ref().unwrap();
        assert_eq!(props["radius"], json!(10.0));
        assert!(props["popup"].as_str().unwrap().contains("Stop Name: Rougier St"));

        let boundary_style = feature_style(&view.layers[0].features.features[0]).unwrap();
        assert_eq!(boundary_style["color"], json!("red"));
    }

    #[test]
    fn test_residential_map_is_classified() {
        let areas = [0.005, 0.02, 0.06]
            .iter()
            .enumerate()
            .map(|(i, v)| ResidentialArea {
                geometry: square(i as f64, 0.0, 1.0),
                residents_per_m2: *v,
                properties: JsonObject::new(),
            })
            .collect();

        let view = MapAssembler::default()
            .assemble(
                &spec(DemandCategory::Residential),
                york_boundary(),
                DemandLayer::Residential(areas),
            )
            .unwrap();

        let layer = view.demand_layer().unwrap();
        assert_eq!(layer.kind, LayerKind::Choropleth);
        assert_eq!(layer.name, "Residential Demand");

        let classes: Vec<u64> = layer
            .features
            .features
            .iter()
            .map(|f| f.properties.as_ref().unwrap()["class"].as_u64().unwrap())
            .collect();
        assert_eq!(classes, vec![0, 1, 3]);

        let legend = layer.legend.as_ref().unwrap();
        assert_eq!(legend.title, "residents per m2");
        assert_eq!(legend.colors.len(), legend.upper_bounds.len());
    }

    #[test]
    fn test_quantile_recipe_is_honoured() {
        let mut residential = spec(DemandCategory::Residential);
        if let RenderRecipe::Choropleth(recipe) = &mut residential.recipe {
            recipe.strategy = ClassificationStrategy::Quantiles(3);
        }
        let areas = (1..=6)
            .map(|i| ResidentialArea {
                geometry: square(i as f64, 0.0, 1.0),
                residents_per_m2: i as f64,
                properties: JsonObject::new(),
            })
            .collect();

        let view = MapAssembler::default()
            .assemble(&residential, york_boundary(), DemandLayer::Residential(areas))
            .unwrap();

        assert_eq!(view.demand_layer().unwrap().legend.as_ref().unwrap().upper_bounds.len(), 3);
    }

    #[test]
    fn test_outline_layer_zooms_to_extent() {
        let features = vec![OutlineFeature {
            geometry: square(-1.1, 53.95, 0.05),
            properties: JsonObject::new(),
        }];
        let view = MapAssembler::default()
            .assemble(
                &spec(DemandCategory::Rail),
                york_boundary(),
                DemandLayer::Outline {
                    category: DemandCategory::Rail,
                    features,
                },
            )
            .unwrap();

        let layer = view.demand_layer().unwrap();
        assert_eq!(layer.name, "rail_demands");
        assert!(layer.zoom_to_layer);
        let [min_x, min_y, max_x, max_y] = layer.extent.unwrap();
        assert!((min_x + 1.1).abs() < 1e-9 && (max_y - 54.0).abs() < 1e-9);
        assert!(min_y < max_y && min_x < max_x);
    }

    #[test]
    fn test_fit_boundary_viewport() {
        let assembler = MapAssembler::new(MapSettings {
            viewport: ViewportMode::FitBoundary,
            ..MapSettings::default()
        });
        let view = assembler
            .assemble(&spec(DemandCategory::Bus), york_boundary(), DemandLayer::Bus(vec![]))
            .unwrap();

        assert!((view.center[0] - 54.0).abs() < 1e-9);
        assert!((view.center[1] + 1.1).abs() < 1e-9);
        assert_eq!(view.zoom, 10);
    }

    #[test]
    fn test_map_view_serializes_to_json() {
        let stops = vec![stop("A", 40.0)];
        let view = MapAssembler::default()
            .assemble(&spec(DemandCategory::Bus), york_boundary(), DemandLayer::Bus(stops))
            .unwrap();

        let json = serde_json::to_value(&view).unwrap();
        assert_eq!(json["authority"], json!("York"));
        assert_eq!(json["category"], json!("bus"));
        assert_eq!(json["layers"][1]["features"]["type"], json!("FeatureCollection"));
    }
}
