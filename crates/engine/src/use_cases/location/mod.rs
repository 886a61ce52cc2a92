//! Location use cases.

use std::sync::Arc;

use echoes_domain::{Coordinates, DomainError};

use crate::infrastructure::ports::{GeocodeError, GeocodingPort, PlaceDescription};

#[derive(Debug, thiserror::Error)]
pub enum LocationError {
    #[error("Invalid position: {0}")]
    InvalidPosition(#[from] DomainError),

    #[error("Geocoding failed: {0}")]
    Geocode(#[from] GeocodeError),
}

/// Put a name to a raw position. Advisory; never touches stored state.
pub struct DescribePosition {
    geocoder: Arc<dyn GeocodingPort>,
}

impl DescribePosition {
    pub fn new(geocoder: Arc<dyn GeocodingPort>) -> Self {
        Self { geocoder }
    }

    pub async fn execute(
        &self,
        latitude: f64,
        longitude: f64,
    ) -> Result<Option<PlaceDescription>, LocationError> {
        let position = Coordinates::new(latitude, longitude)?;
        let place = self.geocoder.reverse(position).await.inspect_err(|e| {
            tracing::warn!(latitude, longitude, error = %e, "Reverse geocoding failed");
        })?;
        Ok(place)
    }
}
