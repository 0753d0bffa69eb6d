pub mod authority;
pub mod demand;
pub mod feedback;
pub mod layer;
pub mod recipe;

pub use authority::{Authority, AUTHORITIES};
pub use demand::{DemandCategory, GeometryKind};
pub use feedback::{FeedbackEntry, FeedbackForm};
pub use layer::{BoundaryLayer, BusStop, DemandLayer, LayerSpec, OutlineFeature, ResidentialArea};
pub use recipe::{
    recipe_for, BoundaryStyle, ChoroplethRecipe, ClassificationStrategy, MarkerRecipe,
    OutlineRecipe, RecipeBook, RenderRecipe,
};
