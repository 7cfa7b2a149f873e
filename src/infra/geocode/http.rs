use reqwest::header::USER_AGENT;
use serde::Deserialize;
use tracing::debug;

use crate::domain::entities::geo::{GeocodeHit, LatLng};
use crate::domain::errors::GeocodeError;

pub const NOMINATIM_URL: &str = "https://nominatim.openstreetmap.org/search";
pub const GOOGLE_GEOCODE_URL: &str = "https://maps.googleapis.com/maps/api/geocode/json";

const CLIENT_USER_AGENT: &str = concat!("store-locator/", env!("CARGO_PKG_VERSION"));

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GeocoderProvider {
    Nominatim { endpoint: String },
    Google { endpoint: String, api_key: String },
}

/// Free-text address lookup over HTTP, first match only.
#[derive(Debug, Clone)]
pub struct HttpGeocoder {
    client: reqwest::Client,
    provider: GeocoderProvider,
}

impl HttpGeocoder {
    pub fn new(provider: GeocoderProvider) -> Self {
        Self {
            client: reqwest::Client::new(),
            provider,
        }
    }

    pub async fn geocode(&self, address: &str) -> Result<GeocodeHit, GeocodeError> {
        let address = normalize_query(address)?;

        let request = match &self.provider {
            GeocoderProvider::Nominatim { endpoint } => self.client.get(endpoint).query(&[
                ("q", address),
                ("format", "jsonv2"),
                ("limit", "1"),
            ]),
            GeocoderProvider::Google { endpoint, api_key } => self
                .client
                .get(endpoint)
                .query(&[("address", address), ("key", api_key.as_str())]),
        };

        let body = request
            .header(USER_AGENT, CLIENT_USER_AGENT)
            .send()
            .await
            .and_then(reqwest::Response::error_for_status)
            .map_err(request_error)?
            .text()
            .await
            .map_err(request_error)?;
        debug!(bytes = body.len(), "geocoder responded");

        match self.provider {
            GeocoderProvider::Nominatim { .. } => parse_nominatim(&body),
            GeocoderProvider::Google { .. } => parse_google(&body),
        }
    }
}

pub fn normalize_query(address: &str) -> Result<&str, GeocodeError> {
    let address = address.trim();
    if address.is_empty() {
        return Err(GeocodeError::EmptyQuery);
    }
    Ok(address)
}

/// Drops the URL so an API key in the query string never reaches the UI.
fn request_error(err: reqwest::Error) -> GeocodeError {
    GeocodeError::Request(err.without_url().to_string())
}

#[derive(Debug, Deserialize)]
struct NominatimPlace {
    lat: String,
    lon: String,
    display_name: String,
}

pub fn parse_nominatim(body: &str) -> Result<GeocodeHit, GeocodeError> {
    let places: Vec<NominatimPlace> =
        serde_json::from_str(body).map_err(|err| GeocodeError::Response(err.to_string()))?;
    let place = places.into_iter().next().ok_or(GeocodeError::NotFound)?;

    let lat = place.lat.parse::<f64>().ok();
    let lng = place.lon.parse::<f64>().ok();
    let position = lat
        .zip(lng)
        .and_then(|(lat, lng)| LatLng::checked(lat, lng))
        .ok_or_else(|| {
            GeocodeError::Response(format!("invalid coordinates: {}, {}", place.lat, place.lon))
        })?;

    Ok(GeocodeHit {
        position,
        formatted_address: place.display_name,
    })
}

#[derive(Debug, Deserialize)]
struct GoogleResponse {
    status: String,
    #[serde(default)]
    results: Vec<GoogleResult>,
    #[serde(default)]
    error_message: Option<String>,
}

#[derive(Debug, Deserialize)]
struct GoogleResult {
    formatted_address: String,
    geometry: GoogleGeometry,
}

#[derive(Debug, Deserialize)]
struct GoogleGeometry {
    location: LatLng,
}

pub fn parse_google(body: &str) -> Result<GeocodeHit, GeocodeError> {
    let response: GoogleResponse =
        serde_json::from_str(body).map_err(|err| GeocodeError::Response(err.to_string()))?;

    match response.status.as_str() {
        "OK" => {}
        "ZERO_RESULTS" => return Err(GeocodeError::NotFound),
        other => {
            let detail = response.error_message.unwrap_or_default();
            return Err(GeocodeError::Response(format!("{other} {detail}").trim().to_string()));
        }
    }

    let result = response
        .results
        .into_iter()
        .next()
        .ok_or(GeocodeError::NotFound)?;
    let location = result.geometry.location;
    let position = LatLng::checked(location.lat, location.lng).ok_or_else(|| {
        GeocodeError::Response(format!("invalid coordinates: {}", location.display()))
    })?;

    Ok(GeocodeHit {
        position,
        formatted_address: result.formatted_address,
    })
}
