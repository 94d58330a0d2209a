// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

use log::debug;
use url::Url;

use crate::error::FetchError;
use crate::http::HttpClient;

use super::model::{ApiResponse, SeriesData};

/// Endpoint template used when none is configured
pub const DEFAULT_ENDPOINT: &str =
    "https://appdata.richie.fi/books/feeds/v3/Nelonen/podcast_series/{guid}.json";

const GUID_PLACEHOLDER: &str = "{guid}";

/// URL template for the series API; `{guid}` is replaced per request
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SeriesEndpoint {
    template: String,
}

impl SeriesEndpoint {
    pub fn new(template: impl Into<String>) -> Self {
        Self {
            template: template.into(),
        }
    }

    pub fn template(&self) -> &str {
        &self.template
    }

    /// Build the request URL for a series
    pub fn url_for(&self, guid: &str) -> Result<Url, FetchError> {
        let url = self.template.replace(GUID_PLACEHOLDER, guid);
        Url::parse(&url).map_err(|e| FetchError::InvalidUrl { url, source: e })
    }
}

impl Default for SeriesEndpoint {
    fn default() -> Self {
        Self::new(DEFAULT_ENDPOINT)
    }
}

/// Decode an API envelope and check the series invariants
pub fn parse_series(bytes: &[u8], url: &Url) -> Result<SeriesData, FetchError> {
    let response: ApiResponse =
        serde_json::from_slice(bytes).map_err(|e| FetchError::Decode {
            url: url.to_string(),
            source: e,
        })?;

    response
        .data
        .validate()
        .map_err(|e| FetchError::Invalid {
            url: url.to_string(),
            source: e,
        })?;

    Ok(response.data)
}

/// Fetch and decode a series from the API
pub async fn fetch_series<C: HttpClient>(
    client: &C,
    endpoint: &SeriesEndpoint,
    guid: &str,
) -> Result<SeriesData, FetchError> {
    if guid.trim().is_empty() {
        return Err(FetchError::EmptyGuid);
    }

    let url = endpoint.url_for(guid)?;
    debug!("fetching series {guid} from {url}");

    let response = client
        .get(url.as_str())
        .await
        .map_err(|e| FetchError::RequestFailed {
            url: url.to_string(),
            source: e,
        })?;

    if !response.is_success() {
        return Err(FetchError::HttpStatus {
            url: url.to_string(),
            status: response.status,
        });
    }

    let series = parse_series(&response.body, &url)?;
    debug!(
        "decoded series '{}' with {} episodes",
        series.title,
        series.episodes.len()
    );

    Ok(series)
}

#[cfg(test)]
mod tests {
    use super::*;

    use std::sync::Mutex;

    use async_trait::async_trait;
    use bytes::Bytes;

    use crate::http::HttpResponse;

    struct MockHttpClient {
        status: u16,
        body: &'static str,
        requested: Mutex<Vec<String>>,
    }

    impl MockHttpClient {
        fn new(status: u16, body: &'static str) -> Self {
            Self {
                status,
                body,
                requested: Mutex::new(Vec::new()),
            }
        }
    }

    #[async_trait]
    impl HttpClient for MockHttpClient {
        async fn get(&self, url: &str) -> Result<HttpResponse, reqwest::Error> {
            self.requested.lock().unwrap().push(url.to_string());
            Ok(HttpResponse {
                status: self.status,
                body: Bytes::from_static(self.body.as_bytes()),
            })
        }
    }

    const SERIES_JSON: &str = r#"{"data": {"guid": "abc", "title": "Series", "episodes": [{"guid": "e1"}]}}"#;

    #[test]
    fn default_endpoint_substitutes_guid() {
        let url = SeriesEndpoint::default().url_for("abc-123").unwrap();
        assert_eq!(
            url.as_str(),
            "https://appdata.richie.fi/books/feeds/v3/Nelonen/podcast_series/abc-123.json"
        );
    }

    #[test]
    fn invalid_template_is_rejected() {
        let endpoint = SeriesEndpoint::new("not a url/{guid}");
        assert!(matches!(
            endpoint.url_for("abc"),
            Err(FetchError::InvalidUrl { .. })
        ));
    }

    #[tokio::test]
    async fn fetch_decodes_series() {
        let client = MockHttpClient::new(200, SERIES_JSON);
        let endpoint = SeriesEndpoint::new("https://api.example.com/series/{guid}.json");

        let series = fetch_series(&client, &endpoint, "abc").await.unwrap();

        assert_eq!(series.guid, "abc");
        assert_eq!(series.episodes.len(), 1);
        assert_eq!(
            client.requested.lock().unwrap().as_slice(),
            ["https://api.example.com/series/abc.json"]
        );
    }

    #[tokio::test]
    async fn fetch_fails_on_http_error() {
        let client = MockHttpClient::new(404, "Not Found");

        let result = fetch_series(&client, &SeriesEndpoint::default(), "abc").await;

        match result.unwrap_err() {
            FetchError::HttpStatus { status, .. } => assert_eq!(status, 404),
            other => panic!("Expected HttpStatus error, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn fetch_fails_on_invalid_json() {
        let client = MockHttpClient::new(200, "{\"data\": [");

        let result = fetch_series(&client, &SeriesEndpoint::default(), "abc").await;

        assert!(matches!(result, Err(FetchError::Decode { .. })));
    }

    #[tokio::test]
    async fn fetch_rejects_series_without_guid() {
        let client = MockHttpClient::new(200, r#"{"data": {"title": "Nameless"}}"#);

        let result = fetch_series(&client, &SeriesEndpoint::default(), "abc").await;

        assert!(matches!(result, Err(FetchError::Invalid { .. })));
    }

    #[tokio::test]
    async fn fetch_rejects_empty_guid_without_request() {
        let client = MockHttpClient::new(200, SERIES_JSON);

        let result = fetch_series(&client, &SeriesEndpoint::default(), " ").await;

        assert!(matches!(result, Err(FetchError::EmptyGuid)));
        assert!(client.requested.lock().unwrap().is_empty());
    }
}
