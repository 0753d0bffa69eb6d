//! Footflow Core - Domain models, layer resolution, and map assembly
//!
//! This crate contains the domain logic and port definitions for exploring
//! pre-computed footfall demand layers.

pub mod classify;
pub mod config;
pub mod error;
pub mod explorer;
pub mod feedback;
pub mod formats;
pub mod map;
pub mod models;
pub mod ports;
pub mod resolver;

pub use error::{FootflowError, Result};
pub use explorer::{Exploration, Explorer};
pub use resolver::{LayerResolver, ResolutionError};
