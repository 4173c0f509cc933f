mod ndfd;
mod open_meteo;
mod winds_aloft;

pub use ndfd::*;
pub use open_meteo::*;
pub use winds_aloft::*;

use log::{debug, warn};
use serde::{Deserialize, Serialize};
use time::OffsetDateTime;
use utoipa::ToSchema;

use crate::{SourceError, WeatherSource};

/// Gridded model forecasts for one point and time; each source is independent
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct ModelForecasts {
    pub open_meteo: Option<OpenMeteoForecast>,
    pub ndfd: Option<NdfdForecast>,
}

impl ModelForecasts {
    pub fn is_empty(&self) -> bool {
        self.open_meteo.is_none() && self.ndfd.is_none()
    }
}

pub async fn model_forecasts(
    source: &dyn WeatherSource,
    latitude: f64,
    longitude: f64,
    target: OffsetDateTime,
) -> ModelForecasts {
    let open_meteo = match source.hourly_series(latitude, longitude).await {
        Ok(series) => OpenMeteoForecast::from_series(&series, target),
        Err(e) => Err(e),
    };
    let open_meteo = match open_meteo {
        Ok(forecast) => Some(forecast),
        Err(e) => {
            log_absent("open-meteo", latitude, longitude, &e);
            None
        }
    };

    let ndfd = match source.ndfd_forecast(latitude, longitude, target).await {
        Ok(forecast) => Some(forecast),
        Err(e) => {
            log_absent("ndfd", latitude, longitude, &e);
            None
        }
    };

    ModelForecasts { open_meteo, ndfd }
}

/// Lapse-rate estimate at `altitude_m`, or the fixed fallback when none can be made
pub async fn winds_aloft(
    source: &dyn WeatherSource,
    latitude: f64,
    longitude: f64,
    altitude_m: i64,
    target: OffsetDateTime,
) -> WindsAloft {
    let estimate = match source.hourly_series(latitude, longitude).await {
        Ok(series) => WindsAloft::estimate(&series, altitude_m, target),
        Err(e) => Err(e),
    };
    match estimate {
        Ok(winds) => winds,
        Err(e) => {
            warn!(
                "error retrieving open-meteo data for winds aloft at ({}, {}): {}",
                latitude, longitude, e
            );
            WindsAloft::fallback()
        }
    }
}

fn log_absent(name: &str, latitude: f64, longitude: f64, err: &SourceError) {
    match err {
        SourceError::MissingHour(_) | SourceError::MissingField(_) => {
            debug!("{} has no usable data at ({}, {}): {}", name, latitude, longitude, err)
        }
        _ => warn!("{} request failed at ({}, {}): {}", name, latitude, longitude, err),
    }
}
