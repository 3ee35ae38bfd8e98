use serde::Deserialize;
use tracing::debug;

use crate::geocoder::{AddressCompleter, Geocoder, GeocodingError, MIN_QUERY_LEN, validate_address};
use async_trait::async_trait;
use wayroute_core::GeoPoint;

pub const NOMINATIM_API_URL: &str = "https://nominatim.openstreetmap.org";
pub const NOMINATIM_SEARCH_API_PATH: &str = "/search";

const NOMINATIM_URL_ENV_VAR: &str = "WAYROUTE_NOMINATIM_URL";

#[derive(Deserialize)]
struct SearchResult {
    /// Nominatim serializes coordinates as strings.
    lat: String,
    lon: String,

    #[serde(default)]
    name: Option<String>,

    display_name: String,
}

impl SearchResult {
    fn coordinate(&self) -> Result<GeoPoint, GeocodingError> {
        let lat = self.lat.parse::<f64>();
        let lng = self.lon.parse::<f64>();

        match (lat, lng) {
            (Ok(lat), Ok(lng)) => Ok(GeoPoint::new(lat, lng)),
            _ => Err(GeocodingError::IncompleteResponse),
        }
    }

    /// Title + subtitle joined by ", ". Nominatim's display name already
    /// starts with the place name for most result types.
    fn suggestion(&self) -> String {
        match self.name.as_deref() {
            Some(name) if !name.is_empty() && !self.display_name.starts_with(name) => {
                format!("{}, {}", name, self.display_name)
            }
            _ => self.display_name.clone(),
        }
    }
}

pub struct NominatimClientParams {
    pub base_url: String,
    pub user_agent: String,
    pub suggestion_limit: usize,
}

impl Default for NominatimClientParams {
    fn default() -> Self {
        Self {
            base_url: std::env::var(NOMINATIM_URL_ENV_VAR)
                .unwrap_or_else(|_| String::from(NOMINATIM_API_URL)),
            user_agent: format!("wayroute/{}", env!("CARGO_PKG_VERSION")),
            suggestion_limit: 5,
        }
    }
}

pub struct NominatimClient {
    params: NominatimClientParams,
    client: reqwest::Client,
}

impl NominatimClient {
    pub fn new(params: NominatimClientParams) -> Self {
        Self {
            params,
            client: reqwest::Client::new(),
        }
    }

    async fn search(&self, query: &str, limit: usize) -> Result<Vec<SearchResult>, GeocodingError> {
        let mut url = self.params.base_url.clone();
        url.push_str(NOMINATIM_SEARCH_API_PATH);

        debug!("Nominatim: searching for {:?}", query);

        let response = self
            .client
            .get(url)
            .header(reqwest::header::USER_AGENT, &self.params.user_agent)
            .query(&[
                ("q", query),
                ("format", "jsonv2"),
                ("limit", &limit.to_string()),
            ])
            .send()
            .await?;

        if !response.status().is_success() {
            let status = response.status().as_u16();
            let message = response.text().await.unwrap_or_default();
            return Err(GeocodingError::Api { status, message });
        }

        let results: Vec<SearchResult> = response.json().await?;
        Ok(results)
    }
}

impl Default for NominatimClient {
    fn default() -> Self {
        Self::new(NominatimClientParams::default())
    }
}

#[async_trait]
impl Geocoder for NominatimClient {
    async fn geocode(&self, address: &str) -> Result<GeoPoint, GeocodingError> {
        let query = validate_address(address)?;

        let results = self.search(query, 1).await?;

        match results.first() {
            Some(result) => result.coordinate(),
            None => Err(GeocodingError::NotFound),
        }
    }
}

#[async_trait]
impl AddressCompleter for NominatimClient {
    async fn complete(&self, query: &str) -> Result<Vec<String>, GeocodingError> {
        let trimmed = query.trim();
        if trimmed.chars().count() < MIN_QUERY_LEN {
            return Ok(Vec::new());
        }

        let results = self.search(trimmed, self.params.suggestion_limit).await?;
        Ok(results.iter().map(SearchResult::suggestion).collect())
    }
}
