use catalog_core::{Product, SearchFailure};
use catalog_logging::{catalog_debug, catalog_warn};
use futures_util::StreamExt;
use serde::Deserialize;
use url::Url;

use crate::{FailureKind, SearchSettings, TransportError};

/// The feed's only outbound dependency: search the catalog by keyword.
///
/// Implementations own transport, caching and parsing. The keyword arrives
/// exactly as the user typed it, possibly empty.
#[async_trait::async_trait]
pub trait ProductSearchPort: Send + Sync {
    async fn search(&self, keyword: &str) -> Result<Vec<Product>, SearchFailure>;
}

/// HTTP search against a `/sites/{site}/search?q=` catalog endpoint.
#[derive(Debug, Clone)]
pub struct ReqwestProductSearch {
    settings: SearchSettings,
    client: reqwest::Client,
}

impl ReqwestProductSearch {
    pub fn new(settings: SearchSettings) -> Result<Self, TransportError> {
        let client = reqwest::Client::builder()
            .connect_timeout(settings.connect_timeout)
            .timeout(settings.request_timeout)
            .build()
            .map_err(|err| TransportError::new(FailureKind::Network, err.to_string()))?;
        Ok(Self { settings, client })
    }

    pub fn settings(&self) -> &SearchSettings {
        &self.settings
    }

    fn search_url(&self, keyword: &str) -> Result<Url, TransportError> {
        let endpoint = format!(
            "{}/sites/{}/search",
            self.settings.base_url.trim_end_matches('/'),
            self.settings.site_id
        );
        let mut params = vec![("q", keyword.to_string())];
        if let Some(limit) = self.settings.result_limit {
            params.push(("limit", limit.to_string()));
        }
        Url::parse_with_params(&endpoint, &params)
            .map_err(|err| TransportError::new(FailureKind::InvalidUrl, err.to_string()))
    }

    async fn fetch_body(&self, url: Url) -> Result<Vec<u8>, TransportError> {
        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(map_reqwest_error)?;

        let status = response.status();
        if !status.is_success() {
            return Err(TransportError::new(
                FailureKind::HttpStatus(status.as_u16()),
                status.canonical_reason().unwrap_or_default(),
            ));
        }

        let max_bytes = self.settings.max_bytes;
        if let Some(content_len) = response.content_length() {
            if content_len > max_bytes {
                return Err(too_large(max_bytes, Some(content_len)));
            }
        }

        let mut body = Vec::new();
        let mut stream = response.bytes_stream();
        while let Some(chunk) = stream.next().await {
            let chunk = chunk.map_err(map_reqwest_error)?;
            let next_len = body.len() as u64 + chunk.len() as u64;
            if next_len > max_bytes {
                return Err(too_large(max_bytes, Some(next_len)));
            }
            body.extend_from_slice(&chunk);
        }
        Ok(body)
    }
}

#[async_trait::async_trait]
impl ProductSearchPort for ReqwestProductSearch {
    async fn search(&self, keyword: &str) -> Result<Vec<Product>, SearchFailure> {
        let url = self.search_url(keyword)?;
        catalog_debug!("GET {}", url);
        let body = self.fetch_body(url).await.inspect_err(|err| {
            catalog_warn!("Search request failed: {}", err);
        })?;
        let products = parse_search_response(&body)?;
        catalog_debug!("Search returned {} products ({} bytes)", products.len(), body.len());
        Ok(products)
    }
}

#[derive(Debug, Deserialize)]
struct SearchResponse {
    #[serde(default)]
    results: Vec<RawProduct>,
}

#[derive(Debug, Deserialize)]
struct RawProduct {
    #[serde(default)]
    title: String,
    #[serde(default)]
    price: Option<serde_json::Number>,
    #[serde(default)]
    available_quantity: i64,
    #[serde(default)]
    condition: String,
    #[serde(default)]
    permalink: String,
    #[serde(default)]
    thumbnail: String,
}

impl From<RawProduct> for Product {
    fn from(raw: RawProduct) -> Self {
        Product {
            title: raw.title,
            price: raw.price.as_ref().map_or(0, price_units),
            available_quantity: raw.available_quantity,
            condition: raw.condition,
            permalink: raw.permalink,
            thumbnail: raw.thumbnail,
        }
    }
}

/// Parses a search response body into products, preserving result order.
pub fn parse_search_response(body: &[u8]) -> Result<Vec<Product>, TransportError> {
    let response: SearchResponse = serde_json::from_slice(body)
        .map_err(|err| TransportError::new(FailureKind::InvalidResponse, err.to_string()))?;
    Ok(response.results.into_iter().map(Product::from).collect())
}

// Fractional prices are truncated toward zero.
fn price_units(price: &serde_json::Number) -> i64 {
    price
        .as_i64()
        .or_else(|| price.as_f64().map(|value| value.trunc() as i64))
        .unwrap_or_default()
}

fn too_large(max_bytes: u64, actual: Option<u64>) -> TransportError {
    TransportError::new(
        FailureKind::TooLarge { max_bytes, actual },
        "response too large",
    )
}

fn map_reqwest_error(err: reqwest::Error) -> TransportError {
    if err.is_timeout() {
        return TransportError::new(FailureKind::Timeout, err.to_string());
    }
    TransportError::new(FailureKind::Network, err.to_string())
}

#[cfg(test)]
mod tests {
    use super::{parse_search_response, ReqwestProductSearch};
    use crate::{FailureKind, SearchSettings};

    #[test]
    fn search_url_encodes_keyword_and_limit() {
        let search = ReqwestProductSearch::new(SearchSettings {
            base_url: "https://api.example.com/".to_string(),
            result_limit: Some(5),
            ..SearchSettings::default()
        })
        .unwrap();

        let url = search.search_url("galaxy j4+").unwrap();
        assert_eq!(
            url.as_str(),
            "https://api.example.com/sites/MLA/search?q=galaxy+j4%2B&limit=5"
        );
    }

    #[test]
    fn fractional_price_is_truncated() {
        let body = br#"{"results":[{"title":"a","price":1999.99,"available_quantity":3}]}"#;
        let products = parse_search_response(body).unwrap();
        assert_eq!(products[0].price, 1999);
        assert_eq!(products[0].available_quantity, 3);
        assert_eq!(products[0].condition, "");
    }

    #[test]
    fn null_price_defaults_to_zero() {
        let body = br#"{"results":[{"title":"a","price":null}]}"#;
        assert_eq!(parse_search_response(body).unwrap()[0].price, 0);
    }

    #[test]
    fn malformed_body_is_invalid_response() {
        let err = parse_search_response(b"<html>").unwrap_err();
        assert_eq!(err.kind, FailureKind::InvalidResponse);
    }
}
