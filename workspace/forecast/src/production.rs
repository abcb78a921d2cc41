//! Two-stage production inference.
//!
//! Stage 1 estimates the harvested extent from the sown extent and the
//! previous season's figures. Stage 2 feeds that estimate back through
//! the season's production model. Both stages run for both seasons and
//! the outputs are physical quantities, so negatives clamp to zero.

use common::{District, Season};
use tracing::debug;

use crate::error::Result;
use crate::model::{ModelSet, SeasonModels};

/// Everything the models need for one forecast.
#[derive(Debug, Clone, PartialEq)]
pub struct ForecastInput {
    pub year: i32,
    pub season: Season,
    pub district: District,
    pub sown_hect: f64,
    pub previous_yield: f64,
    pub previous_production: f64,
}

/// The two predicted quantities, rounded to two decimals.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Forecast {
    /// Hectares expected to be harvested.
    pub harvested_extent: f64,
    /// Metric tons expected in total.
    pub total_production: f64,
}

/// Runs the fitted per-season models.
#[derive(Debug, Clone)]
pub struct ProductionForecaster {
    models: ModelSet,
}

impl ProductionForecaster {
    pub fn new(models: ModelSet) -> Self {
        Self { models }
    }

    fn season_models(&self, season: Season) -> &SeasonModels {
        match season {
            Season::Maha => &self.models.maha,
            Season::Yala => &self.models.yala,
        }
    }

    /// Predicts harvested extent, then total production from it.
    pub fn forecast(&self, input: &ForecastInput) -> Result<Forecast> {
        let models = self.season_models(input.season);

        let extent_features = [
            input.year as f64,
            input.season.encoded() as f64,
            input.district.encoded() as f64,
            input.sown_hect,
            input.previous_yield,
            input.previous_production,
        ];
        let extent = models.extent.predict(&extent_features)?.max(0.0);
        debug!(
            season = %input.season,
            district = %input.district,
            extent,
            "stage 1 extent estimate"
        );

        // Stage 2 swaps the sown extent for the stage-1 estimate.
        let production_features = [
            input.year as f64,
            input.season.encoded() as f64,
            input.district.encoded() as f64,
            extent,
            input.previous_yield,
            input.previous_production,
        ];
        let production = models.production.predict(&production_features)?.max(0.0);
        debug!(
            season = %input.season,
            district = %input.district,
            production,
            "stage 2 production estimate"
        );

        Ok(Forecast {
            harvested_extent: round2(extent),
            total_production: round2(production),
        })
    }
}

fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}
