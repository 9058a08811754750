//! 后端请求入口
//!
//! 对应浏览器端的 authFetch：按端点声明附加身份头，
//! 对 401 执行登出（清空会话），并将非成功响应分类为 `ClientError`。

use crate::config::ServiceConfig;
use crate::error::{ClientError, ClientResult};
use crate::protocol::{ApiRequest, Identity};
use crate::request::{HttpClient, HttpMethod, HttpRequest};
use crate::session::SessionStore;
use crate::{HEADER_AUTHORIZATION, HEADER_CONTENT_TYPE, HEADER_DONOR_ID, HEADER_RECIPIENT_ID};

pub struct Gateway<C, S> {
    client: C,
    store: S,
    config: ServiceConfig,
}

impl<C: HttpClient, S: SessionStore> Gateway<C, S> {
    pub fn new(client: C, store: S, config: ServiceConfig) -> Self {
        Self {
            client,
            store,
            config,
        }
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn client(&self) -> &C {
        &self.client
    }

    pub fn config(&self) -> &ServiceConfig {
        &self.config
    }

    /// 构建 HTTP 请求（不发送）
    pub fn build<R: ApiRequest>(&self, req: &R) -> ClientResult<HttpRequest> {
        let url = self.config.url(R::SERVICE, R::PATH);
        let mut http =
            HttpRequest::new(&url, R::METHOD).with_header(HEADER_CONTENT_TYPE, "application/json");

        match R::IDENTITY {
            Identity::Anonymous => {}
            Identity::Donor => {
                if let Some(token) = self.store.access_token() {
                    http = http.with_header(HEADER_AUTHORIZATION, &format!("Bearer {}", token));
                }
                if let Some(donor_id) = self.store.donor_id() {
                    http = http.with_header(HEADER_DONOR_ID, &donor_id);
                }
            }
            Identity::Recipient => {
                if let Some(recipient_id) = self.store.recipient_id() {
                    http = http.with_header(HEADER_RECIPIENT_ID, &recipient_id);
                }
            }
        }

        if R::METHOD != HttpMethod::Get {
            let body =
                serde_json::to_string(req).map_err(|e| ClientError::Decode(e.to_string()))?;
            http = http.with_body(body);
        }

        if R::WITH_CREDENTIALS {
            http = http.with_credentials();
        }

        Ok(http)
    }

    /// 发送请求并解码响应
    pub async fn send<R: ApiRequest>(&self, req: &R) -> ClientResult<R::Response> {
        let http = self.build(req)?;
        log::debug!("{} {}", R::METHOD.as_str(), http.url);

        let resp = self.client.send(http).await?;

        if resp.ok() {
            return R::decode(&resp.body);
        }

        if resp.status == 401 && R::IDENTITY == Identity::Donor {
            log::warn!("{} returned 401, clearing session", R::PATH);
            self.store.clear();
            return Err(ClientError::Unauthorized);
        }

        let err = ClientError::from_status(resp.status, &resp.body);
        log::error!("{} failed: {}", R::PATH, err);
        Err(err)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::*;
    use crate::protocol::*;
    use crate::request::MockHttpClient;
    use crate::session::MemoryStore;
    use serde_json::json;

    fn gateway(store: MemoryStore) -> Gateway<MockHttpClient, MemoryStore> {
        Gateway::new(MockHttpClient::new(), store, ServiceConfig::default())
    }

    const DONOR_URL: &str = "http://localhost:8000/donor/v1/getDonor";

    #[tokio::test]
    async fn donor_requests_carry_bearer_and_donor_id() {
        let gw = gateway(MemoryStore::signed_in("7", "tok"));
        gw.client().mock_response(
            DONOR_URL,
            200,
            json!({
                "id": 7,
                "name": "Cafe",
                "address": "1 Main St",
                "location": { "latitude": 1.0, "longitude": 2.0 },
                "contact": { "email": "c@x.com", "phone": "1" }
            }),
        );

        let donor = gw.send(&GetDonorRequest).await.unwrap();
        assert_eq!(donor.name, "Cafe");

        let sent = gw.client().last_request();
        assert_eq!(sent.method, HttpMethod::Get);
        assert_eq!(sent.body, None);
        assert_eq!(sent.headers["Authorization"], "Bearer tok");
        assert_eq!(sent.headers["donor_id"], "7");
    }

    #[tokio::test]
    async fn unauthorized_clears_the_session() {
        let store = MemoryStore::signed_in("7", "expired");
        store.set(crate::STORAGE_RECIPIENT_ID, "3");
        let gw = gateway(store);
        gw.client()
            .mock_text(DONOR_URL, 401, r#"{"error":"token expired"}"#);

        let err = gw.send(&GetDonorRequest).await.unwrap_err();

        assert_eq!(err, ClientError::Unauthorized);
        assert!(gw.store().is_empty());
    }

    #[tokio::test]
    async fn anonymous_401_is_an_ordinary_server_error() {
        let gw = gateway(MemoryStore::signed_in("7", "tok"));
        gw.client().mock_text(
            "http://localhost:8000/auth/v1/login",
            401,
            r#"{"error":"Invalid credentials"}"#,
        );

        let err = gw
            .send(&LoginRequest {
                name: "a".to_string(),
                password: "b".to_string(),
            })
            .await
            .unwrap_err();

        assert_eq!(err.server_message_or("Login failed"), "Invalid credentials");
        assert!(gw.store().is_signed_in());
        assert!(!gw.client().last_request().headers.contains_key("Authorization"));
    }

    #[tokio::test]
    async fn recipient_conflict_surfaces_the_error_field() {
        let gw = gateway(MemoryStore::new());
        gw.client().mock_response(
            "http://localhost:9898/recipient/v1/addRecipient",
            409,
            json!({ "error": "Recipient with this email already exists" }),
        );

        let req = AddRecipientRequest {
            name: "Shelter".to_string(),
            address: "2 Side St".to_string(),
            location: Location::new(1.0, 2.0),
            status: "active".to_string(),
            timezone: "Asia/Kolkata".to_string(),
            accepted_types: vec![AcceptedType::default()],
            special_capabilities: vec![],
            storage_capabilities: vec!["dry".to_string()],
            open_hours: Default::default(),
            contact: Contact::default(),
            description: String::new(),
        };
        let err = gw.send(&req).await.unwrap_err();

        assert_eq!(err.to_string(), "Recipient with this email already exists");
        let sent = gw.client().last_request();
        assert!(sent.include_credentials);
        assert_eq!(sent.json_body()["name"], "Shelter");
    }

    #[tokio::test]
    async fn inventory_uses_the_stored_recipient_id() {
        let store = MemoryStore::new();
        store.set(crate::STORAGE_RECIPIENT_ID, "12");
        let gw = gateway(store);
        gw.client()
            .mock_response("http://localhost:8009/getInventoryDetail", 200, json!([]));

        let items = gw.send(&GetInventoryRequest).await.unwrap();

        assert!(items.is_empty());
        assert_eq!(gw.client().last_request().headers["recipient-id"], "12");
    }
}
