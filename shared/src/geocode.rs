//! 地理编码客户端 (Nominatim 兼容接口)

use crate::config::join;
use crate::error::{ClientError, ClientResult};
use crate::model::Location;
use crate::request::{HttpClient, HttpMethod, HttpRequest};
use serde::Deserialize;

/// 地址输入的防抖时长
pub const DEBOUNCE_MS: u64 = 300;
/// 输入框失焦后收起建议列表的延迟
pub const BLUR_HIDE_MS: u64 = 200;
/// 少于该字符数的查询不发请求
pub const MIN_QUERY_CHARS: usize = 3;

const SEARCH_LIMIT: u8 = 5;
const REVERSE_ZOOM: u8 = 18;

/// 搜索建议
#[derive(Debug, Clone, PartialEq)]
pub struct Suggestion {
    pub display_name: String,
    pub location: Location,
}

/// Nominatim 以字符串返回坐标
#[derive(Deserialize)]
struct RawPlace {
    display_name: String,
    lat: String,
    lon: String,
}

impl RawPlace {
    fn into_suggestion(self) -> Option<Suggestion> {
        let latitude = self.lat.parse().ok()?;
        let longitude = self.lon.parse().ok()?;
        Some(Suggestion {
            display_name: self.display_name,
            location: Location::new(latitude, longitude),
        })
    }
}

#[derive(Deserialize)]
struct ReversePlace {
    #[serde(default)]
    display_name: Option<String>,
}

pub fn should_search(query: &str) -> bool {
    query.chars().count() >= MIN_QUERY_CHARS
}

pub struct Geocoder<C> {
    client: C,
    base_url: String,
}

impl<C: HttpClient> Geocoder<C> {
    pub fn new(client: C, base_url: &str) -> Self {
        Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    pub fn search_url(&self, query: &str) -> String {
        join(
            &self.base_url,
            &format!(
                "/search?format=json&q={}&limit={}&addressdetails=1",
                url::form_urlencoded::byte_serialize(query.as_bytes()).collect::<String>(),
                SEARCH_LIMIT
            ),
        )
    }

    pub fn reverse_url(&self, location: Location) -> String {
        join(
            &self.base_url,
            &format!(
                "/reverse?format=json&lat={}&lon={}&zoom={}&addressdetails=1",
                location.latitude, location.longitude, REVERSE_ZOOM
            ),
        )
    }

    /// 地址搜索；过短的查询直接返回空列表
    pub async fn search(&self, query: &str) -> ClientResult<Vec<Suggestion>> {
        if !should_search(query) {
            return Ok(Vec::new());
        }

        let resp = self
            .client
            .send(HttpRequest::new(&self.search_url(query), HttpMethod::Get))
            .await?;
        if !resp.ok() {
            return Err(ClientError::from_status(resp.status, &resp.body));
        }

        let places: Vec<RawPlace> = resp.json()?;
        Ok(places
            .into_iter()
            .filter_map(RawPlace::into_suggestion)
            .collect())
    }

    /// 反向地理编码；无结果时返回 None
    pub async fn reverse(&self, location: Location) -> ClientResult<Option<String>> {
        let resp = self
            .client
            .send(HttpRequest::new(&self.reverse_url(location), HttpMethod::Get))
            .await?;
        if !resp.ok() {
            return Err(ClientError::from_status(resp.status, &resp.body));
        }

        let place: ReversePlace = resp.json()?;
        Ok(place.display_name.filter(|name| !name.is_empty()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::request::MockHttpClient;
    use serde_json::json;

    const BASE: &str = "https://geo.test";

    #[tokio::test]
    async fn short_queries_issue_no_request() {
        let geocoder = Geocoder::new(MockHttpClient::new(), BASE);

        let results = geocoder.search("ab").await.unwrap();

        assert!(results.is_empty());
        assert!(geocoder.client.requests.borrow().is_empty());
    }

    #[tokio::test]
    async fn search_encodes_the_query_and_parses_coordinates() {
        let geocoder = Geocoder::new(MockHttpClient::new(), BASE);
        let url = geocoder.search_url("1 Main St & 2nd");
        assert_eq!(
            url,
            "https://geo.test/search?format=json&q=1+Main+St+%26+2nd&limit=5&addressdetails=1"
        );
        geocoder.client.mock_response(
            &url,
            200,
            json!([
                { "display_name": "1 Main St", "lat": "37.5", "lon": "-122.25" },
                { "display_name": "broken", "lat": "n/a", "lon": "0" }
            ]),
        );

        let results = geocoder.search("1 Main St & 2nd").await.unwrap();

        assert_eq!(
            results,
            vec![Suggestion {
                display_name: "1 Main St".to_string(),
                location: Location::new(37.5, -122.25),
            }]
        );
    }

    #[tokio::test]
    async fn reverse_returns_the_display_name() {
        let geocoder = Geocoder::new(MockHttpClient::new(), BASE);
        let location = Location::new(12.5, 77.25);
        let url = geocoder.reverse_url(location);
        assert_eq!(
            url,
            "https://geo.test/reverse?format=json&lat=12.5&lon=77.25&zoom=18&addressdetails=1"
        );

        geocoder
            .client
            .mock_response(&url, 200, json!({ "display_name": "MG Road" }));
        assert_eq!(
            geocoder.reverse(location).await.unwrap().as_deref(),
            Some("MG Road")
        );

        geocoder
            .client
            .mock_response(&url, 200, json!({ "error": "Unable to geocode" }));
        assert_eq!(geocoder.reverse(location).await.unwrap(), None);
    }
}
