//! Nominatim reverse geocoding client.

use async_trait::async_trait;
use echoes_domain::Coordinates;
use reqwest::Client;
use serde::Deserialize;
use std::time::Duration;

use crate::infrastructure::ports::{GeocodeError, GeocodingPort, PlaceDescription};

/// Default public Nominatim instance.
pub const DEFAULT_NOMINATIM_URL: &str = "https://nominatim.openstreetmap.org";

// Nominatim's usage policy requires an identifying User-Agent.
const USER_AGENT: &str = concat!("echoes-engine/", env!("CARGO_PKG_VERSION"));

#[derive(Clone)]
pub struct NominatimClient {
    client: Client,
    base_url: String,
}

impl NominatimClient {
    pub fn new(base_url: &str) -> Self {
        let client = Client::builder()
            .timeout(Duration::from_secs(10))
            .user_agent(USER_AGENT)
            .build()
            .unwrap_or_else(|_| Client::new());

        Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }
}

impl Default for NominatimClient {
    fn default() -> Self {
        Self::new(DEFAULT_NOMINATIM_URL)
    }
}

#[async_trait]
impl GeocodingPort for NominatimClient {
    async fn reverse(
        &self,
        position: Coordinates,
    ) -> Result<Option<PlaceDescription>, GeocodeError> {
        let response = self
            .client
            .get(format!("{}/reverse", self.base_url))
            .query(&[
                ("format", "jsonv2".to_string()),
                ("lat", position.latitude.to_string()),
                ("lon", position.longitude.to_string()),
            ])
            .send()
            .await
            .map_err(|e| GeocodeError::RequestFailed(e.to_string()))?;

        if !response.status().is_success() {
            return Err(GeocodeError::RequestFailed(format!(
                "Nominatim returned {}",
                response.status()
            )));
        }

        let body = response
            .text()
            .await
            .map_err(|e| GeocodeError::RequestFailed(e.to_string()))?;
        parse_reverse(&body)
    }
}

/// Nominatim answers `{"error": "Unable to geocode"}` with status 200 for
/// positions it has nothing for (open sea); that is a miss, not a failure.
fn parse_reverse(body: &str) -> Result<Option<PlaceDescription>, GeocodeError> {
    let reply: ReverseReply =
        serde_json::from_str(body).map_err(|e| GeocodeError::InvalidResponse(e.to_string()))?;

    if reply.error.is_some() {
        return Ok(None);
    }
    let Some(display_name) = reply.display_name else {
        return Ok(None);
    };

    let address = reply.address.unwrap_or_default();
    let city = address
        .city
        .or(address.town)
        .or(address.village)
        .or(address.municipality);

    Ok(Some(PlaceDescription {
        display_name,
        city,
        country: address.country,
    }))
}

#[derive(Debug, Deserialize)]
struct ReverseReply {
    display_name: Option<String>,
    address: Option<ReverseAddress>,
    error: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
struct ReverseAddress {
    city: Option<String>,
    town: Option<String>,
    village: Option<String>,
    municipality: Option<String>,
    country: Option<String>,
}
