pub mod error;
pub mod model;
pub mod production;

pub use error::{ForecastError, Result};
pub use model::ModelSet;
pub use production::{Forecast, ForecastInput, ProductionForecaster};

/// Returns the forecaster backed by the coefficient bundle shipped with
/// the crate. Parse the bundle once at startup and share the instance.
pub fn default_forecaster() -> Result<ProductionForecaster> {
    Ok(ProductionForecaster::new(ModelSet::embedded()?))
}
