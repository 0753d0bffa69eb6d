//! Layer resolution: map a (local authority, demand category) selection to
//! dataset paths and a render recipe.

use serde::Serialize;
use std::path::{Path, PathBuf};
use thiserror::Error;

use crate::models::{Authority, BoundaryStyle, DemandCategory, LayerSpec, RecipeBook};

/// File stem of the boundary dataset in every authority directory
pub const BOUNDARY_FILENAME: &str = "boundary";

pub const NO_DATA_MESSAGE: &str = "No data found for the selected Local Authority and Demand";

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ResolutionError {
    #[error("No data found for the selected Local Authority and Demand ({authority}, {category})")]
    NoData {
        authority: Authority,
        category: DemandCategory,
    },
}

/// Which demand categories have data for an authority
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Availability {
    pub authority: Authority,
    pub has_boundary: bool,
    pub categories: Vec<(DemandCategory, bool)>,
}

impl Availability {
    pub fn available(&self) -> impl Iterator<Item = DemandCategory> + '_ {
        self.categories
            .iter()
            .filter(|(_, present)| self.has_boundary && *present)
            .map(|(category, _)| *category)
    }
}

/// Resolves selections against a data directory laid out as
/// `<data_dir>/<authority>/<dataset>.<extension>`
#[derive(Debug, Clone)]
pub struct LayerResolver {
    data_dir: PathBuf,
    extension: String,
    recipes: RecipeBook,
    boundary_style: BoundaryStyle,
}

impl LayerResolver {
    pub fn new(data_dir: impl Into<PathBuf>, extension: impl Into<String>) -> Self {
        Self {
            data_dir: data_dir.into(),
            extension: extension.into(),
            recipes: RecipeBook::default(),
            boundary_style: BoundaryStyle::default(),
        }
    }

    pub fn with_recipes(mut self, recipes: RecipeBook) -> Self {
        self.recipes = recipes;
        self
    }

    pub fn data_dir(&self) -> &Path {
        &self.data_dir
    }

    pub fn recipes(&self) -> &RecipeBook {
        &self.recipes
    }

    /// Path of a demand dataset, whether or not it exists
    pub fn demand_path(&self, authority: &Authority, category: DemandCategory) -> PathBuf {
        self.dataset_path(authority, category.filename())
    }

    /// Path of an authority's boundary dataset, whether or not it exists
    pub fn boundary_path(&self, authority: &Authority) -> PathBuf {
        self.dataset_path(authority, BOUNDARY_FILENAME)
    }

    fn dataset_path(&self, authority: &Authority, stem: &str) -> PathBuf {
        self.data_dir
            .join(authority.dir_name())
            .join(format!("{}.{}", stem, self.extension))
    }

    /// Resolve a selection.
    ///
    /// Both the demand dataset and the authority boundary must exist; otherwise
    /// the selection resolves to [`ResolutionError::NoData`] and nothing is drawn.
    pub fn resolve(
        &self,
        authority: &Authority,
        category: DemandCategory,
    ) -> Result<LayerSpec, ResolutionError> {
        let demand_path = self.demand_path(authority, category);
        let boundary_path = self.boundary_path(authority);

        if !demand_path.is_file() || !boundary_path.is_file() {
            tracing::debug!(
                authority = %authority,
                category = %category,
                demand_path = %demand_path.display(),
                boundary_exists = boundary_path.is_file(),
                "No data for selection"
            );
            return Err(ResolutionError::NoData {
                authority: *authority,
                category,
            });
        }

        tracing::debug!(
            authority = %authority,
            category = %category,
            demand_path = %demand_path.display(),
            "Resolved selection"
        );

        Ok(LayerSpec {
            authority: *authority,
            category,
            demand_path,
            boundary_path,
            geometry: category.geometry_kind(),
            recipe: self.recipes.recipe_for(category),
            boundary_style: self.boundary_style.clone(),
        })
    }

    /// Check which categories resolve for an authority
    pub fn availability(&self, authority: &Authority) -> Availability {
        let categories = DemandCategory::ALL
            .into_iter()
            .map(|category| (category, self.demand_path(authority, category).is_file()))
            .collect();

        Availability {
            authority: *authority,
            has_boundary: self.boundary_path(authority).is_file(),
            categories,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::RenderRecipe;
    use std::fs;
    use tempfile::TempDir;

    fn data_dir_with(authority: &str, stems: &[&str]) -> TempDir {
        let dir = tempfile::tempdir().unwrap();
        let authority_dir = dir.path().join(authority);
        fs::create_dir_all(&authority_dir).unwrap();
        for stem in stems {
            fs::write(authority_dir.join(format!("{}.geojson", stem)), "{}").unwrap();
        }
        dir
    }

    #[test]
    fn test_paths_follow_layout() {
        let resolver = LayerResolver::new("/data", "geojson");
        let york = Authority::new("York").unwrap();

        assert_eq!(
            resolver.demand_path(&york, DemandCategory::Residential),
            PathBuf::from("/data/York/localmap_with_residential_demands.geojson")
        );
        assert_eq!(resolver.boundary_path(&york), PathBuf::from("/data/York/boundary.geojson"));
    }

    #[test]
    fn test_resolve_present_dataset() {
        let dir = data_dir_with("Bolton", &["boundary", "bus_demands"]);
        let resolver = LayerResolver::new(dir.path(), "geojson");
        let bolton = Authority::new("Bolton").unwrap();

        let spec = resolver.resolve(&bolton, DemandCategory::Bus).unwrap();
        assert!(spec.demand_path.is_file());
        assert!(spec.boundary_path.is_file());
        assert!(matches!(spec.recipe, RenderRecipe::Markers(_)));
        assert_eq!(spec.boundary_style.color, "red");
    }

    #[test]
    fn test_resolve_missing_dataset_is_no_data() {
        let dir = data_dir_with("Bolton", &["boundary", "bus_demands"]);
        let resolver = LayerResolver::new(dir.path(), "geojson");
        let bolton = Authority::new("Bolton").unwrap();

        let err = resolver.resolve(&bolton, DemandCategory::Rail).unwrap_err();
        assert_eq!(
            err,
            ResolutionError::NoData {
                authority: bolton,
                category: DemandCategory::Rail,
            }
        );
        assert!(err.to_string().starts_with(NO_DATA_MESSAGE));
    }

    #[test]
    fn test_resolve_missing_boundary_is_no_data() {
        let dir = data_dir_with("Ealing", &["rail_demands"]);
        let resolver = LayerResolver::new(dir.path(), "geojson");
        let ealing = Authority::new("Ealing").unwrap();

        assert!(resolver.resolve(&ealing, DemandCategory::Rail).is_err());
    }

    #[test]
    fn test_availability() {
        let dir = data_dir_with("Hackney", &["boundary", "education_demand", "rail_demands"]);
        let resolver = LayerResolver::new(dir.path(), "geojson");
        let hackney = Authority::new("Hackney").unwrap();

        let availability = resolver.availability(&hackney);
        assert!(availability.has_boundary);
        let available: Vec<DemandCategory> = availability.available().collect();
        assert_eq!(available, vec![DemandCategory::Education, DemandCategory::Rail]);
    }
}
