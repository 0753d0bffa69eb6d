//! One selection end to end: resolve, load, assemble.

use serde::Serialize;

use crate::error::Result;
use crate::formats::DatasetLoader;
use crate::map::{MapAssembler, MapSettings, MapView};
use crate::models::{Authority, DemandCategory};
use crate::resolver::{LayerResolver, ResolutionError, NO_DATA_MESSAGE};

/// What the host shows for a selection
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum Exploration {
    Map(Box<MapView>),
    NoData { message: String },
}

#[derive(Debug, Clone)]
pub struct Explorer {
    resolver: LayerResolver,
    loader: DatasetLoader,
    assembler: MapAssembler,
}

impl Explorer {
    pub fn new(resolver: LayerResolver, settings: MapSettings) -> Self {
        Self {
            resolver,
            loader: DatasetLoader,
            assembler: MapAssembler::new(settings),
        }
    }

    pub fn resolver(&self) -> &LayerResolver {
        &self.resolver
    }

    /// Run a selection. Missing data is a normal outcome; schema and parse
    /// failures are errors.
    pub fn explore(&self, authority: &Authority, category: DemandCategory) -> Result<Exploration> {
        tracing::info!(authority = %authority, category = %category, "Exploring selection");

        let spec = match self.resolver.resolve(authority, category) {
            Ok(spec) => spec,
            Err(ResolutionError::NoData { .. }) => {
                return Ok(Exploration::NoData {
                    message: NO_DATA_MESSAGE.to_string(),
                });
            }
        };

        let (boundary, demand) = self.loader.load(&spec)?;
        let view = self.assembler.assemble(&spec, boundary, demand)?;
        Ok(Exploration::Map(Box::new(view)))
    }
}
