//! # Authenticated HTTP client
//!
//! [`ApiClient`] is the one place that talks HTTP. It never looks up the
//! session on its own: the caller hands it a [`SessionContext`] at
//! construction, and the client asks that context for the bearer token on each
//! request and tells it to [`expire`](SessionContext::expire) when the server
//! answers 401.
//!
//! ## Response mapping
//!
//! | Status | Result |
//! |--------|--------|
//! | 2xx | decoded JSON, raw bytes or `()` depending on the helper |
//! | 401 | `session.expire()`, then [`ApiError::Unauthorized`] |
//! | other | [`ApiError::Status`] with the FastAPI `detail` |
//!
//! No request is retried.

use std::cell::{Cell, RefCell};
use std::rc::Rc;

use reqwest::multipart::Form;
use reqwest::{Method, RequestBuilder, Response, StatusCode};
use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::error::{ApiError, Result};

/// Supplies the bearer token and receives session expiry.
pub trait SessionContext {
    fn token(&self) -> Option<String>;
    fn expire(&self);
}

/// A fixed token, for sign-in handshakes, tests and unauthenticated calls.
#[derive(Debug, Default)]
pub struct StaticSession {
    token: RefCell<Option<String>>,
    expired: Cell<bool>,
}

impl StaticSession {
    pub fn new(token: impl Into<String>) -> Self {
        Self {
            token: RefCell::new(Some(token.into())),
            expired: Cell::new(false),
        }
    }

    pub fn anonymous() -> Self {
        Self::default()
    }

    pub fn is_expired(&self) -> bool {
        self.expired.get()
    }
}

impl SessionContext for StaticSession {
    fn token(&self) -> Option<String> {
        self.token.borrow().clone()
    }

    fn expire(&self) {
        self.token.replace(None);
        self.expired.set(true);
    }
}

/// REST client bound to a base URL and a session context. Cheap to clone.
#[derive(Clone)]
pub struct ApiClient {
    http: reqwest::Client,
    base_url: Rc<str>,
    session: Rc<dyn SessionContext>,
}

impl std::fmt::Debug for ApiClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ApiClient")
            .field("base_url", &self.base_url)
            .finish_non_exhaustive()
    }
}

impl PartialEq for ApiClient {
    fn eq(&self, other: &Self) -> bool {
        self.base_url == other.base_url && Rc::ptr_eq(&self.session, &other.session)
    }
}

impl ApiClient {
    pub fn new(base_url: &str, session: Rc<dyn SessionContext>) -> Self {
        Self {
            http: reqwest::Client::new(),
            base_url: Rc::from(base_url.trim_end_matches('/')),
            session,
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn has_token(&self) -> bool {
        self.session.token().is_some()
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    /// Send a request with the session's token.
    pub(crate) async fn execute<F>(&self, method: Method, path: &str, configure: F) -> Result<Response>
    where
        F: FnOnce(RequestBuilder) -> RequestBuilder,
    {
        self.execute_with_token(method, path, self.session.token(), configure)
            .await
    }

    /// Send a request with an explicit token instead of the session's.
    pub(crate) async fn execute_with_token<F>(
        &self,
        method: Method,
        path: &str,
        token: Option<String>,
        configure: F,
    ) -> Result<Response>
    where
        F: FnOnce(RequestBuilder) -> RequestBuilder,
    {
        tracing::debug!("{} {}", method, path);

        let mut request = self.http.request(method.clone(), self.url(path));
        if let Some(token) = token {
            request = request.bearer_auth(token);
        }

        let response = configure(request).send().await?;
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }

        if status == StatusCode::UNAUTHORIZED {
            tracing::warn!("{} {} returned 401, clearing session", method, path);
            self.session.expire();
            return Err(ApiError::Unauthorized);
        }

        let body = response.text().await.unwrap_or_default();
        tracing::warn!("{} {} failed with {}", method, path, status);
        Err(ApiError::from_status(status, &body))
    }

    pub(crate) async fn get_json<T, Q>(&self, path: &str, query: &Q) -> Result<T>
    where
        T: DeserializeOwned,
        Q: Serialize + ?Sized,
    {
        let response = self.execute(Method::GET, path, |r| r.query(query)).await?;
        decode(response).await
    }

    pub(crate) async fn get<T: DeserializeOwned>(&self, path: &str) -> Result<T> {
        let response = self.execute(Method::GET, path, |r| r).await?;
        decode(response).await
    }

    pub(crate) async fn get_bytes<Q>(&self, path: &str, query: &Q) -> Result<Vec<u8>>
    where
        Q: Serialize + ?Sized,
    {
        let response = self.execute(Method::GET, path, |r| r.query(query)).await?;
        Ok(response.bytes().await?.to_vec())
    }

    pub(crate) async fn send_json<T, B>(&self, method: Method, path: &str, body: &B) -> Result<T>
    where
        T: DeserializeOwned,
        B: Serialize + ?Sized,
    {
        let response = self.execute(method, path, |r| r.json(body)).await?;
        decode(response).await
    }

    /// POST/PUT without a body, decoding the response.
    pub(crate) async fn send_empty<T: DeserializeOwned>(&self, method: Method, path: &str) -> Result<T> {
        let response = self.execute(method, path, |r| r).await?;
        decode(response).await
    }

    pub(crate) async fn send_multipart<T: DeserializeOwned>(&self, path: &str, form: Form) -> Result<T> {
        let response = self
            .execute(Method::POST, path, |r| r.multipart(form))
            .await?;
        decode(response).await
    }

    pub(crate) async fn delete(&self, path: &str) -> Result<()> {
        self.execute(Method::DELETE, path, |r| r).await?;
        Ok(())
    }
}

async fn decode<T: DeserializeOwned>(response: Response) -> Result<T> {
    let text = response.text().await?;
    // 204 and empty bodies decode as JSON null so `()` and `Option<_>` work.
    let body = if text.trim().is_empty() { "null" } else { &text };
    Ok(serde_json::from_str(body)?)
}

/// Wire query for the `skip`/`limit` pair most list endpoints accept.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize)]
pub struct Page {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub skip: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub limit: Option<u32>,
}

impl Page {
    pub fn limit(limit: u32) -> Self {
        Self {
            skip: None,
            limit: Some(limit),
        }
    }
}

#[cfg(test)]
pub(crate) mod test_support {
    use std::rc::Rc;

    use super::*;

    pub fn client(server: &wiremock::MockServer, token: Option<&str>) -> (ApiClient, Rc<StaticSession>) {
        let session = Rc::new(match token {
            Some(t) => StaticSession::new(t),
            None => StaticSession::anonymous(),
        });
        let client = ApiClient::new(&server.uri(), session.clone());
        (client, session)
    }
}

#[cfg(test)]
mod tests {
    use super::test_support::client;
    use super::*;
    use serde_json::json;
    use wiremock::matchers::{header, method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    #[derive(Debug, serde::Deserialize, PartialEq)]
    struct Item {
        id: i64,
    }

    #[tokio::test]
    async fn test_bearer_header_attached() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/items/1"))
            .and(header("authorization", "Bearer tok-abc"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({"id": 1})))
            .expect(1)
            .mount(&server)
            .await;

        let (client, _) = client(&server, Some("tok-abc"));
        let item: Item = client.get("/items/1").await.unwrap();
        assert_eq!(item, Item { id: 1 });
    }

    #[tokio::test]
    async fn test_query_omits_unset_fields() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/items"))
            .and(query_param("limit", "5"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!([{"id": 2}])))
            .mount(&server)
            .await;

        let (client, _) = client(&server, None);
        let items: Vec<Item> = client.get_json("/items", &Page::limit(5)).await.unwrap();
        assert_eq!(items, vec![Item { id: 2 }]);

        let requests = server.received_requests().await.unwrap();
        assert_eq!(requests[0].url.query(), Some("limit=5"));
        assert!(requests[0].headers.get("authorization").is_none());
    }

    #[tokio::test]
    async fn test_unauthorized_expires_session() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/auth/me"))
            .respond_with(ResponseTemplate::new(401).set_body_json(json!({"detail": "Could not validate credentials"})))
            .mount(&server)
            .await;

        let (client, session) = client(&server, Some("stale"));
        let err = client.get::<Item>("/auth/me").await.unwrap_err();
        assert_eq!(err, ApiError::Unauthorized);
        assert!(session.is_expired());
        assert!(!client.has_token());
    }

    #[tokio::test]
    async fn test_error_status_carries_detail() {
        let server = MockServer::start().await;
        Mock::given(method("DELETE"))
            .and(path("/items/9"))
            .respond_with(ResponseTemplate::new(404).set_body_json(json!({"detail": "Surat tidak ditemukan"})))
            .mount(&server)
            .await;

        let (client, session) = client(&server, Some("tok"));
        let err = client.delete("/items/9").await.unwrap_err();
        assert!(err.is_not_found());
        assert_eq!(err.user_message("Gagal"), "Surat tidak ditemukan");
        assert!(!session.is_expired());
    }

    #[tokio::test]
    async fn test_no_content_decodes_as_unit() {
        let server = MockServer::start().await;
        Mock::given(method("PUT"))
            .and(path("/items/read-all"))
            .respond_with(ResponseTemplate::new(204))
            .mount(&server)
            .await;

        let (client, _) = client(&server, Some("tok"));
        let result: Result<()> = client.send_empty(Method::PUT, "/items/read-all").await;
        assert!(result.is_ok());
    }

    #[tokio::test]
    async fn test_decode_error() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/items/1"))
            .respond_with(ResponseTemplate::new(200).set_body_string("not json"))
            .mount(&server)
            .await;

        let (client, _) = client(&server, None);
        let err = client.get::<Item>("/items/1").await.unwrap_err();
        assert!(matches!(err, ApiError::Decode(_)));
    }

    #[test]
    fn test_base_url_trailing_slash() {
        let client = ApiClient::new("http://localhost:8000/api/v1/", Rc::new(StaticSession::anonymous()));
        assert_eq!(client.base_url(), "http://localhost:8000/api/v1");
        assert_eq!(client.url("/surat-masuk"), "http://localhost:8000/api/v1/surat-masuk");
    }
}
