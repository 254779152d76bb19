use crate::location::ReverseGeocoder;
use crate::models::GeocodeResponse;
use color_eyre::Result;
use reqwest::Client;

const OPENCAGE_ENDPOINT: &str = "https://api.opencagedata.com/geocode/v1/json";

/// Reverse-geocoding client backed by the OpenCage API.
pub struct OpenCageGeocoder {
    client: Client,
    api_key: String,
}

impl OpenCageGeocoder {
    pub fn new(api_key: String) -> Self {
        Self {
            client: Client::builder()
                .timeout(std::time::Duration::from_secs(10))
                .build()
                .unwrap(),
            api_key,
        }
    }
}

impl ReverseGeocoder for OpenCageGeocoder {
    async fn reverse(&self, latitude: f64, longitude: f64) -> Result<Option<String>> {
        let url = format!(
            "{OPENCAGE_ENDPOINT}?q={latitude}+{longitude}&key={key}",
            key = self.api_key
        );

        let res = self
            .client
            .get(url)
            .send()
            .await?
            .json::<GeocodeResponse>()
            .await?;

        Ok(res
            .results
            .unwrap_or_default()
            .into_iter()
            .next()
            .and_then(|result| result.components.place_name()))
    }
}
