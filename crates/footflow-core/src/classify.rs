//! Choropleth classification and the colour ramp used to fill classes.

use serde::Serialize;

use crate::error::{FootflowError, Result};
use crate::models::ClassificationStrategy;

/// Class upper bounds derived from a strategy and the data being drawn
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Classification {
    /// Inclusive upper bound of each class, ascending
    pub upper_bounds: Vec<f64>,
}

impl Classification {
    pub fn class_count(&self) -> usize {
        self.upper_bounds.len()
    }

    /// Index of the class holding `value`; values above every bound land in
    /// the top class
    pub fn class_of(&self, value: f64) -> usize {
        self.upper_bounds
            .iter()
            .position(|bound| value <= *bound)
            .unwrap_or_else(|| self.upper_bounds.len().saturating_sub(1))
    }
}

impl ClassificationStrategy {
    /// Reject strategies that cannot produce classes
    pub fn validate(&self) -> Result<()> {
        match self {
            ClassificationStrategy::FixedBreaks(breaks) => {
                if breaks.len() < 2 {
                    return Err(invalid("fixed breaks need at least two edges"));
                }
                if breaks.iter().any(|b| !b.is_finite()) {
                    return Err(invalid("fixed breaks must be finite numbers"));
                }
                if breaks.windows(2).any(|pair| pair[0] >= pair[1]) {
                    return Err(invalid("fixed breaks must be strictly ascending"));
                }
                Ok(())
            }
            ClassificationStrategy::Quantiles(0) => {
                Err(invalid("quantiles need at least one class"))
            }
            ClassificationStrategy::Quantiles(_) => Ok(()),
        }
    }

    /// Derive class bounds for the given attribute values
    pub fn classify(&self, values: &[f64]) -> Result<Classification> {
        self.validate()?;

        let max = values
            .iter()
            .copied()
            .filter(|v| v.is_finite())
            .fold(None, |acc: Option<f64>, v| Some(acc.map_or(v, |m| m.max(v))));

        let upper_bounds = match self {
            ClassificationStrategy::FixedBreaks(breaks) => {
                let mut bounds = breaks[1..].to_vec();
                if let (Some(max), Some(last)) = (max, bounds.last().copied()) {
                    if max > last {
                        bounds.push(max);
                    }
                }
                bounds
            }
            ClassificationStrategy::Quantiles(k) => {
                let mut sorted: Vec<f64> =
                    values.iter().copied().filter(|v| v.is_finite()).collect();
                sorted.sort_by(|a, b| a.total_cmp(b));
                let mut bounds: Vec<f64> = Vec::with_capacity(*k);
                if !sorted.is_empty() {
                    for i in 1..=*k {
                        let q = percentile(&sorted, i as f64 / *k as f64);
                        if bounds.last().map_or(true, |last| q > *last) {
                            bounds.push(q);
                        }
                    }
                }
                bounds
            }
        };

        Ok(Classification { upper_bounds })
    }
}

/// Linear interpolation between order statistics; `sorted` must be non-empty
fn percentile(sorted: &[f64], fraction: f64) -> f64 {
    let rank = fraction * (sorted.len() - 1) as f64;
    let lower = rank.floor() as usize;
    let upper = rank.ceil() as usize;
    let weight = rank - lower as f64;
    sorted[lower] + (sorted[upper] - sorted[lower]) * weight
}

fn invalid(reason: &str) -> FootflowError {
    FootflowError::ConfigInvalid {
        key: "classification".to_string(),
        reason: reason.to_string(),
    }
}

const BLUES_LIGHT: (u8, u8, u8) = (0xf7, 0xfb, 0xff);
const BLUES_DARK: (u8, u8, u8) = (0x08, 0x30, 0x6b);

/// Sample `count` colours from the light-to-dark Blues ramp
pub fn blues(count: usize) -> Vec<String> {
    (0..count)
        .map(|i| {
            let t = if count <= 1 { 1.0 } else { i as f64 / (count - 1) as f64 };
            let channel = |from: u8, to: u8| -> u8 {
                (from as f64 + (to as f64 - from as f64) * t).round() as u8
            };
            format!(
                "#{:02x}{:02x}{:02x}",
                channel(BLUES_LIGHT.0, BLUES_DARK.0),
                channel(BLUES_LIGHT.1, BLUES_DARK.1),
                channel(BLUES_LIGHT.2, BLUES_DARK.2),
            )
        })
        .collect()
}
