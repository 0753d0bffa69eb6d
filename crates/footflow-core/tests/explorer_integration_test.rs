//! Integration tests for the resolve → load → assemble pipeline
//!
//! These tests build a small data directory on disk and run selections
//! against it the way the API and CLI do.

use footflow_core::error::FootflowError;
use footflow_core::map::{LayerKind, MapSettings};
use footflow_core::models::{Authority, ClassificationStrategy, DemandCategory, RecipeBook};
use footflow_core::resolver::NO_DATA_MESSAGE;
use footflow_core::{Exploration, Explorer, LayerResolver};
use proptest::prelude::*;
use std::fs;
use std::path::Path;
use tempfile::TempDir;

const BOUNDARY: &str = r#"{
    "type": "FeatureCollection",
    "features": [{
        "type": "Feature",
        "geometry": { "type": "Polygon", "coordinates": [[[-1.2,53.9],[-1.0,53.9],[-1.0,54.1],[-1.2,54.1],[-1.2,53.9]]] },
        "properties": { "name": "York" }
    }]
}"#;

const BUS: &str = r#"{
    "type": "FeatureCollection",
    "features": [
        {
            "type": "Feature",
            "geometry": { "type": "Point", "coordinates": [-1.09, 53.96] },
            "properties": {
                "stop_name": "Rougier Street", "stop_lat": 53.96, "stop_lon": -1.09,
                "weekly_demand": 400, "daily_demand": 57, "hourly_demand": 3
            }
        },
        {
            "type": "Feature",
            "geometry": { "type": "Point", "coordinates": [-1.05, 53.95] },
            "properties": {
                "stop_name": "Heslington", "stop_lat": 53.95, "stop_lon": -1.05,
                "weekly_demand": 0, "daily_demand": 0, "hourly_demand": 0
            }
        }
    ]
}"#;

fn residential(values: &[f64]) -> String {
    let features: Vec<String> = values
        .iter()
        .enumerate()
        .map(|(i, v)| {
            let x = -1.1 + i as f64 * 0.001;
            format!(
                r#"{{"type":"Feature","geometry":{{"type":"Polygon","coordinates":[[[{x},53.9],[{x2},53.9],[{x2},53.901],[{x},53.9]]]}},"properties":{{"residents per m2 ":{v}}}}}"#,
                x = x,
                x2 = x + 0.0005,
                v = v
            )
        })
        .collect();
    format!(r#"{{"type":"FeatureCollection","features":[{}]}}"#, features.join(","))
}

fn write(dir: &Path, authority: &str, stem: &str, content: &str) {
    let authority_dir = dir.join(authority);
    fs::create_dir_all(&authority_dir).unwrap();
    fs::write(authority_dir.join(format!("{}.geojson", stem)), content).unwrap();
}

fn york_data() -> TempDir {
    let dir = tempfile::tempdir().unwrap();
    write(dir.path(), "York", "boundary", BOUNDARY);
    write(dir.path(), "York", "bus_demands", BUS);
    let densities = residential(&[0.005, 0.02, 0.06]);
    write(dir.path(), "York", "localmap_with_residential_demands", &densities);
    dir
}

fn explorer(dir: &Path) -> Explorer {
    Explorer::new(LayerResolver::new(dir, "geojson"), MapSettings::default())
}

#[test]
fn test_bus_selection_draws_markers() {
    let dir = york_data();
    let york = Authority::new("York").unwrap();

    let exploration = explorer(dir.path()).explore(&york, DemandCategory::Bus).unwrap();
    let view = match exploration {
        Exploration::Map(view) => view,
        other => panic!("expected a map, got {:?}", other),
    };

    assert_eq!(view.layers[0].kind, LayerKind::Boundary);
    let markers = view.demand_layer().unwrap();
    assert_eq!(markers.kind, LayerKind::Markers);

    let radii: Vec<f64> = markers
        .features
        .features
        .iter()
        .map(|f| f.properties.as_ref().unwrap()["radius"].as_f64().unwrap())
        .collect();
    assert_eq!(radii, vec![10.0, 0.0]);
}

#[test]
fn test_residential_fixed_breaks() {
    let dir = york_data();
    let york = Authority::new("York").unwrap();

    let exploration = explorer(dir.path()).explore(&york, DemandCategory::Residential).unwrap();
    let Exploration::Map(view) = exploration else {
        panic!("expected a map");
    };

    let classes: Vec<u64> = view
        .demand_layer()
        .unwrap()
        .features
        .features
        .iter()
        .map(|f| f.properties.as_ref().unwrap()["class"].as_u64().unwrap())
        .collect();
    assert_eq!(classes, vec![0, 1, 3]);
}

#[test]
fn test_residential_quantiles_from_recipe_book() {
    let dir = york_data();
    let york = Authority::new("York").unwrap();
    let resolver = LayerResolver::new(dir.path(), "geojson").with_recipes(RecipeBook {
        classification: ClassificationStrategy::Quantiles(3),
        ..RecipeBook::default()
    });

    let Exploration::Map(view) = Explorer::new(resolver, MapSettings::default())
        .explore(&york, DemandCategory::Residential)
        .unwrap()
    else {
        panic!("expected a map");
    };

    let legend = view.demand_layer().unwrap().legend.clone().unwrap();
    assert_eq!(legend.upper_bounds.len(), 3);
    assert_eq!(legend.upper_bounds.last().copied(), Some(0.06));
}

#[test]
fn test_missing_dataset_is_no_data() {
    let dir = york_data();
    let york = Authority::new("York").unwrap();

    let exploration = explorer(dir.path()).explore(&york, DemandCategory::Rail).unwrap();
    assert_eq!(
        exploration,
        Exploration::NoData {
            message: NO_DATA_MESSAGE.to_string(),
        }
    );
}

#[test]
fn test_unknown_authority_directory_is_no_data() {
    let dir = york_data();
    let bolton = Authority::new("Bolton").unwrap();

    let exploration = explorer(dir.path()).explore(&bolton, DemandCategory::Bus).unwrap();
    assert!(matches!(exploration, Exploration::NoData { .. }));
}

#[test]
fn test_schema_mismatch_fails_fast() {
    let dir = york_data();
    write(dir.path(), "York", "bus_demands", &BUS.replace("\"weekly_demand\": 400, ", ""));
    let york = Authority::new("York").unwrap();

    let err = explorer(dir.path()).explore(&york, DemandCategory::Bus).unwrap_err();
    assert!(matches!(err, FootflowError::SchemaMismatch { feature: 0, .. }));
}

#[test]
fn test_reselecting_yields_identical_spec() {
    let dir = york_data();
    let resolver = LayerResolver::new(dir.path(), "geojson");
    let york = Authority::new("York").unwrap();

    for category in [DemandCategory::Bus, DemandCategory::Residential] {
        let first = resolver.resolve(&york, category).unwrap();
        let second = resolver.resolve(&york, category).unwrap();
        assert_eq!(first, second);
        assert!(first.demand_path.is_file() && first.boundary_path.is_file());
    }
}

proptest! {
    #[test]
    fn prop_resolution_matches_disk(present in proptest::collection::vec(any::<bool>(), 4)) {
        let dir = tempfile::tempdir().unwrap();
        write(dir.path(), "Charnwood", "boundary", BOUNDARY);
        for (category, keep) in DemandCategory::ALL.iter().zip(&present) {
            if *keep {
                write(dir.path(), "Charnwood", category.filename(), "{}");
            }
        }

        let resolver = LayerResolver::new(dir.path(), "geojson");
        let charnwood = Authority::new("Charnwood").unwrap();
        for (category, keep) in DemandCategory::ALL.iter().zip(&present) {
            prop_assert_eq!(resolver.resolve(&charnwood, *category).is_ok(), *keep);
        }
    }
}
