//! Procedural circle field
//!
//! The field is an unbounded stack of unit-height bands. Each band is
//! generated on first access from its own seeded RNG, then cached for the
//! rest of the session:
//! - Content depends only on (seed, band index), never on access order
//! - Asking for band `k >= 0` also materializes every band in `0..k`
//! - Asking for band `k < 0` also materializes every band in `k+1..0`

use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::circle::{Circle, CircleBatch};
use crate::consts::{BAND_MARGIN, CIRCLES_PER_BAND, MIN_CIRCLE_RADIUS};
use crate::error::ConfigError;

/// Per-band generation policy
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FieldConfig {
    /// Circles generated in every band
    pub circles_per_band: u32,
    /// Vertical offset of the first circle above the band's lower edge
    pub margin: f64,
}

impl Default for FieldConfig {
    fn default() -> Self {
        Self {
            circles_per_band: CIRCLES_PER_BAND,
            margin: BAND_MARGIN,
        }
    }
}

impl FieldConfig {
    /// Vertical distance between consecutive circles of a band
    pub fn spacing(&self) -> f64 {
        1.0 / self.circles_per_band as f64
    }

    /// Denser bands get smaller circles
    pub fn max_radius(&self) -> f64 {
        1.0 / (10.0 * self.circles_per_band as f64)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.circles_per_band == 0 {
            return Err(ConfigError::NoCirclesPerBand);
        }
        let max = self.max_radius();
        if max < MIN_CIRCLE_RADIUS {
            return Err(ConfigError::EmptyRadiusRange {
                min: MIN_CIRCLE_RADIUS,
                max,
            });
        }
        let spacing = self.spacing();
        if !(0.0..spacing).contains(&self.margin) {
            return Err(ConfigError::MarginOutOfBand {
                margin: self.margin,
                spacing,
            });
        }
        Ok(())
    }
}

/// Lazily generated, memoized circle bands
#[derive(Debug, Clone)]
pub struct CircleField {
    config: FieldConfig,
    seed: u64,
    /// Bands 0, 1, 2, ... in order
    ahead: Vec<CircleBatch>,
    /// Bands -1, -2, -3, ... in order
    behind: Vec<CircleBatch>,
}

impl CircleField {
    pub fn new(config: FieldConfig, seed: u64) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self {
            config,
            seed,
            ahead: Vec::new(),
            behind: Vec::new(),
        })
    }

    pub fn config(&self) -> &FieldConfig {
        &self.config
    }

    pub fn seed(&self) -> u64 {
        self.seed
    }

    /// Circles of band `index`, generating it (and every band between it and
    /// band 0) if needed
    pub fn band(&mut self, index: i64) -> &[Circle] {
        self.extend_to(index);
        self.cached(index).unwrap_or(&[])
    }

    /// Concatenation of the given bands, lowest index first
    pub fn bands(&mut self, first: i64, last: i64) -> Vec<Circle> {
        let mut circles = Vec::new();
        for index in first..=last {
            circles.extend_from_slice(self.band(index));
        }
        circles
    }

    /// Already generated band, without generating anything
    pub fn cached(&self, index: i64) -> Option<&[Circle]> {
        let batch = if index >= 0 {
            self.ahead.get(index as usize)
        } else {
            self.behind.get((-1 - index) as usize)
        };
        batch.map(Vec::as_slice)
    }

    /// Number of bands generated so far, in both directions
    pub fn generated_bands(&self) -> usize {
        self.ahead.len() + self.behind.len()
    }

    fn extend_to(&mut self, index: i64) {
        if index >= 0 {
            while (self.ahead.len() as i64) <= index {
                let next = self.ahead.len() as i64;
                let batch = self.generate_band(next);
                self.ahead.push(batch);
            }
        } else {
            while -(self.behind.len() as i64) > index {
                let next = -1 - self.behind.len() as i64;
                let batch = self.generate_band(next);
                self.behind.push(batch);
            }
        }
    }

    fn band_rng(&self, index: i64) -> Pcg32 {
        // Same mixing scheme for every band so content ignores access order
        let band_seed = (index as u64)
            .wrapping_mul(2654435761)
            .wrapping_add(self.seed);
        Pcg32::seed_from_u64(band_seed)
    }

    fn generate_band(&self, index: i64) -> CircleBatch {
        let mut rng = self.band_rng(index);
        let count = self.config.circles_per_band;
        let max_radius = self.config.max_radius();

        let batch: CircleBatch = (0..count)
            .map(|i| {
                let radius = rng.random_range(MIN_CIRCLE_RADIUS..=max_radius);
                let x = rng.random_range(radius..=1.0 - radius);
                let y = index as f64 + i as f64 / count as f64 + self.config.margin;
                Circle::new(x, y, radius)
            })
            .collect();

        log::debug!("Generated band {} with {} circles", index, batch.len());
        batch
    }
}
