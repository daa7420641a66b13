//! HTTP client with one namespace per Resend resource group.
//!
//! Each operation performs exactly one request and resolves to the decoded
//! response body or a [`ClientError`]. Nothing is retried.

use std::fmt::{self, Debug, Formatter};
use std::time::Duration;

use reqwest::header::{AUTHORIZATION, HeaderMap, HeaderValue};
use reqwest::{Client, Method, Response, StatusCode};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use url::Url;

use crate::error::{APPLICATION_ERROR, ApiError, ApiResult, ClientError};
use crate::models::{
    CreateApiKeyRequest, CreateAudienceRequest, CreateBroadcastRequest, CreateContactRequest,
    CreateDomainRequest, SendBroadcastRequest, SendEmailRequest, UpdateBroadcastRequest,
    UpdateContactRequest, UpdateDomainRequest, UpdateEmailRequest,
};

/// Production endpoint of the Resend API.
pub const DEFAULT_BASE_URL: &str = "https://api.resend.com";
/// Default per-request timeout.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

const HEADER_IDEMPOTENCY_KEY: &str = "Idempotency-Key";
const USER_AGENT: &str = concat!("resend-cli/", env!("CARGO_PKG_VERSION"));
const NO_BODY: Option<&()> = None;

/// Opaque API credential. Never printed by `Debug`.
#[derive(Clone, PartialEq, Eq)]
pub struct ApiKey(String);

impl ApiKey {
    /// Wrap a raw token.
    #[must_use]
    pub fn new(raw: impl Into<String>) -> Self {
        Self(raw.into())
    }

    /// Borrow the raw token for use in an authorization header.
    #[must_use]
    pub fn expose(&self) -> &str {
        &self.0
    }
}

impl Debug for ApiKey {
    fn fmt(&self, formatter: &mut Formatter<'_>) -> fmt::Result {
        formatter.write_str("ApiKey(<redacted>)")
    }
}

/// Connection settings shared by every request.
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// Root URL requests are resolved against.
    pub base_url: Url,
    /// Per-request timeout.
    pub timeout: Duration,
}

impl ClientConfig {
    /// Build a configuration for the given base URL using the default timeout.
    #[must_use]
    pub const fn new(base_url: Url) -> Self {
        Self {
            base_url,
            timeout: DEFAULT_TIMEOUT,
        }
    }

    /// Override the per-request timeout.
    #[must_use]
    pub const fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }
}

/// Authenticated client for the Resend API.
#[derive(Clone)]
pub struct ResendClient {
    http: Client,
    base_url: Url,
}

impl Debug for ResendClient {
    fn fmt(&self, formatter: &mut Formatter<'_>) -> fmt::Result {
        formatter
            .debug_struct("ResendClient")
            .field("base_url", &self.base_url.as_str())
            .finish_non_exhaustive()
    }
}

impl ResendClient {
    /// Construct a client bound to `api_key`.
    ///
    /// # Errors
    ///
    /// Returns an error if the key cannot be encoded as a header, the base URL
    /// cannot carry paths, or the HTTP client fails to initialise.
    pub fn new(api_key: &ApiKey, config: &ClientConfig) -> ApiResult<Self> {
        if config.base_url.cannot_be_a_base() {
            return Err(ClientError::InvalidBaseUrl {
                base_url: config.base_url.to_string(),
            });
        }

        let mut authorization = HeaderValue::from_str(&format!("Bearer {}", api_key.expose()))
            .map_err(|_| ClientError::InvalidApiKey)?;
        authorization.set_sensitive(true);

        let mut default_headers = HeaderMap::new();
        default_headers.insert(AUTHORIZATION, authorization);

        let http = Client::builder()
            .timeout(config.timeout)
            .user_agent(USER_AGENT)
            .default_headers(default_headers)
            .build()
            .map_err(ClientError::Build)?;

        Ok(Self {
            http,
            base_url: config.base_url.clone(),
        })
    }

    /// Email operations.
    #[must_use]
    pub const fn emails(&self) -> Emails<'_> {
        Emails { client: self }
    }

    /// Domain operations.
    #[must_use]
    pub const fn domains(&self) -> Domains<'_> {
        Domains { client: self }
    }

    /// API key operations.
    #[must_use]
    pub const fn api_keys(&self) -> ApiKeys<'_> {
        ApiKeys { client: self }
    }

    /// Audience operations.
    #[must_use]
    pub const fn audiences(&self) -> Audiences<'_> {
        Audiences { client: self }
    }

    /// Contact operations.
    #[must_use]
    pub const fn contacts(&self) -> Contacts<'_> {
        Contacts { client: self }
    }

    /// Broadcast operations.
    #[must_use]
    pub const fn broadcasts(&self) -> Broadcasts<'_> {
        Broadcasts { client: self }
    }

    fn url(&self, segments: &[&str]) -> ApiResult<Url> {
        let mut url = self.base_url.clone();
        url.path_segments_mut()
            .map_err(|()| ClientError::InvalidBaseUrl {
                base_url: self.base_url.to_string(),
            })?
            .pop_if_empty()
            .extend(segments);
        Ok(url)
    }

    async fn send<B>(
        &self,
        method: Method,
        segments: &[&str],
        body: Option<&B>,
        idempotency_key: Option<&str>,
    ) -> ApiResult<Value>
    where
        B: Serialize + ?Sized,
    {
        let url = self.url(segments)?;
        let path = url.path().to_string();
        tracing::debug!(%method, %path, "sending request");

        let mut request = self.http.request(method, url);
        if let Some(body) = body {
            request = request.json(body);
        }
        if let Some(key) = idempotency_key {
            request = request.header(HEADER_IDEMPOTENCY_KEY, key);
        }

        let response = request
            .send()
            .await
            .map_err(|source| ClientError::Transport {
                path: path.clone(),
                source,
            })?;

        read_outcome(&path, response).await
    }
}

/// `/emails` namespace.
#[derive(Debug, Clone, Copy)]
pub struct Emails<'a> {
    client: &'a ResendClient,
}

impl Emails<'_> {
    /// `POST /emails`, optionally deduplicated by an idempotency key.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError::Api`] when the service rejects the email.
    pub async fn send(
        &self,
        request: &SendEmailRequest,
        idempotency_key: Option<&str>,
    ) -> ApiResult<Value> {
        self.client
            .send(Method::POST, &["emails"], Some(request), idempotency_key)
            .await
    }

    /// `POST /emails/batch` with the raw email objects.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError::Api`] when the service rejects the batch.
    pub async fn send_batch(&self, emails: &[Value]) -> ApiResult<Value> {
        self.client
            .send(Method::POST, &["emails", "batch"], Some(emails), None)
            .await
    }

    /// `GET /emails/{id}`.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError::Api`] when the email does not exist.
    pub async fn get(&self, id: &str) -> ApiResult<Value> {
        self.client
            .send(Method::GET, &["emails", id], NO_BODY, None)
            .await
    }

    /// `PATCH /emails/{id}`.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError::Api`] when the email cannot be rescheduled.
    pub async fn update(&self, id: &str, request: &UpdateEmailRequest) -> ApiResult<Value> {
        self.client
            .send(Method::PATCH, &["emails", id], Some(request), None)
            .await
    }

    /// `POST /emails/{id}/cancel`.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError::Api`] when the email is not scheduled.
    pub async fn cancel(&self, id: &str) -> ApiResult<Value> {
        self.client
            .send(Method::POST, &["emails", id, "cancel"], NO_BODY, None)
            .await
    }
}

/// `/domains` namespace.
#[derive(Debug, Clone, Copy)]
pub struct Domains<'a> {
    client: &'a ResendClient,
}

#[allow(clippy::missing_errors_doc)]
impl Domains<'_> {
    /// `POST /domains`.
    pub async fn create(&self, request: &CreateDomainRequest) -> ApiResult<Value> {
        self.client
            .send(Method::POST, &["domains"], Some(request), None)
            .await
    }

    /// `GET /domains`.
    pub async fn list(&self) -> ApiResult<Value> {
        self.client
            .send(Method::GET, &["domains"], NO_BODY, None)
            .await
    }

    /// `GET /domains/{id}`.
    pub async fn get(&self, id: &str) -> ApiResult<Value> {
        self.client
            .send(Method::GET, &["domains", id], NO_BODY, None)
            .await
    }

    /// `PATCH /domains/{id}`.
    pub async fn update(&self, id: &str, request: &UpdateDomainRequest) -> ApiResult<Value> {
        self.client
            .send(Method::PATCH, &["domains", id], Some(request), None)
            .await
    }

    /// `DELETE /domains/{id}`.
    pub async fn remove(&self, id: &str) -> ApiResult<Value> {
        self.client
            .send(Method::DELETE, &["domains", id], NO_BODY, None)
            .await
    }

    /// `POST /domains/{id}/verify`.
    pub async fn verify(&self, id: &str) -> ApiResult<Value> {
        self.client
            .send(Method::POST, &["domains", id, "verify"], NO_BODY, None)
            .await
    }
}

/// `/api-keys` namespace.
#[derive(Debug, Clone, Copy)]
pub struct ApiKeys<'a> {
    client: &'a ResendClient,
}

#[allow(clippy::missing_errors_doc)]
impl ApiKeys<'_> {
    /// `POST /api-keys`.
    pub async fn create(&self, request: &CreateApiKeyRequest) -> ApiResult<Value> {
        self.client
            .send(Method::POST, &["api-keys"], Some(request), None)
            .await
    }

    /// `GET /api-keys`.
    pub async fn list(&self) -> ApiResult<Value> {
        self.client
            .send(Method::GET, &["api-keys"], NO_BODY, None)
            .await
    }

    /// `DELETE /api-keys/{id}`.
    pub async fn remove(&self, id: &str) -> ApiResult<Value> {
        self.client
            .send(Method::DELETE, &["api-keys", id], NO_BODY, None)
            .await
    }
}

/// `/audiences` namespace.
#[derive(Debug, Clone, Copy)]
pub struct Audiences<'a> {
    client: &'a ResendClient,
}

#[allow(clippy::missing_errors_doc)]
impl Audiences<'_> {
    /// `POST /audiences`.
    pub async fn create(&self, request: &CreateAudienceRequest) -> ApiResult<Value> {
        self.client
            .send(Method::POST, &["audiences"], Some(request), None)
            .await
    }

    /// `GET /audiences`.
    pub async fn list(&self) -> ApiResult<Value> {
        self.client
            .send(Method::GET, &["audiences"], NO_BODY, None)
            .await
    }

    /// `GET /audiences/{id}`.
    pub async fn get(&self, id: &str) -> ApiResult<Value> {
        self.client
            .send(Method::GET, &["audiences", id], NO_BODY, None)
            .await
    }

    /// `DELETE /audiences/{id}`.
    pub async fn remove(&self, id: &str) -> ApiResult<Value> {
        self.client
            .send(Method::DELETE, &["audiences", id], NO_BODY, None)
            .await
    }
}

/// `/audiences/{audience_id}/contacts` namespace.
#[derive(Debug, Clone, Copy)]
pub struct Contacts<'a> {
    client: &'a ResendClient,
}

#[allow(clippy::missing_errors_doc)]
impl Contacts<'_> {
    /// Create a contact inside an audience.
    pub async fn create(
        &self,
        audience_id: &str,
        request: &CreateContactRequest,
    ) -> ApiResult<Value> {
        self.client
            .send(
                Method::POST,
                &["audiences", audience_id, "contacts"],
                Some(request),
                None,
            )
            .await
    }

    /// List the contacts of an audience.
    pub async fn list(&self, audience_id: &str) -> ApiResult<Value> {
        self.client
            .send(
                Method::GET,
                &["audiences", audience_id, "contacts"],
                NO_BODY,
                None,
            )
            .await
    }

    /// Fetch one contact.
    pub async fn get(&self, audience_id: &str, id: &str) -> ApiResult<Value> {
        self.client
            .send(
                Method::GET,
                &["audiences", audience_id, "contacts", id],
                NO_BODY,
                None,
            )
            .await
    }

    /// Patch one contact.
    pub async fn update(
        &self,
        audience_id: &str,
        id: &str,
        request: &UpdateContactRequest,
    ) -> ApiResult<Value> {
        self.client
            .send(
                Method::PATCH,
                &["audiences", audience_id, "contacts", id],
                Some(request),
                None,
            )
            .await
    }

    /// Delete one contact.
    pub async fn remove(&self, audience_id: &str, id: &str) -> ApiResult<Value> {
        self.client
            .send(
                Method::DELETE,
                &["audiences", audience_id, "contacts", id],
                NO_BODY,
                None,
            )
            .await
    }
}

/// `/broadcasts` namespace.
#[derive(Debug, Clone, Copy)]
pub struct Broadcasts<'a> {
    client: &'a ResendClient,
}

#[allow(clippy::missing_errors_doc)]
impl Broadcasts<'_> {
    /// `POST /broadcasts`.
    pub async fn create(&self, request: &CreateBroadcastRequest) -> ApiResult<Value> {
        self.client
            .send(Method::POST, &["broadcasts"], Some(request), None)
            .await
    }

    /// `GET /broadcasts`.
    pub async fn list(&self) -> ApiResult<Value> {
        self.client
            .send(Method::GET, &["broadcasts"], NO_BODY, None)
            .await
    }

    /// `GET /broadcasts/{id}`.
    pub async fn get(&self, id: &str) -> ApiResult<Value> {
        self.client
            .send(Method::GET, &["broadcasts", id], NO_BODY, None)
            .await
    }

    /// `PATCH /broadcasts/{id}`.
    pub async fn update(&self, id: &str, request: &UpdateBroadcastRequest) -> ApiResult<Value> {
        self.client
            .send(Method::PATCH, &["broadcasts", id], Some(request), None)
            .await
    }

    /// `POST /broadcasts/{id}/send`.
    pub async fn send(&self, id: &str, request: &SendBroadcastRequest) -> ApiResult<Value> {
        self.client
            .send(Method::POST, &["broadcasts", id, "send"], Some(request), None)
            .await
    }

    /// `DELETE /broadcasts/{id}`.
    pub async fn remove(&self, id: &str) -> ApiResult<Value> {
        self.client
            .send(Method::DELETE, &["broadcasts", id], NO_BODY, None)
            .await
    }
}

/// Error document shape; both fields are optional so partial bodies still
/// yield a useful message.
#[derive(Deserialize)]
struct ErrorBody {
    message: Option<String>,
    name: Option<String>,
}

async fn read_outcome(path: &str, response: Response) -> ApiResult<Value> {
    let status = response.status();
    tracing::debug!(%status, %path, "received response");

    let bytes = response
        .bytes()
        .await
        .map_err(|source| ClientError::Transport {
            path: path.to_string(),
            source,
        })?;

    if !status.is_success() {
        return Err(ClientError::Api(classify_problem(status, &bytes)));
    }

    if bytes.iter().all(u8::is_ascii_whitespace) {
        return Ok(Value::Null);
    }

    serde_json::from_slice(&bytes).map_err(|source| ClientError::Decode {
        path: path.to_string(),
        source,
    })
}

/// Turn a non-success response body into an [`ApiError`].
fn classify_problem(status: StatusCode, bytes: &[u8]) -> ApiError {
    if let Ok(ErrorBody {
        message: Some(message),
        name,
    }) = serde_json::from_slice::<ErrorBody>(bytes)
    {
        return ApiError {
            message,
            name: name.unwrap_or_else(|| APPLICATION_ERROR.to_string()),
            status_code: Some(status.as_u16()),
        };
    }

    let body_text = String::from_utf8_lossy(bytes).trim().to_string();
    let message = if body_text.is_empty() {
        format!("request failed with status {status}")
    } else {
        body_text
    };

    ApiError {
        message,
        name: APPLICATION_ERROR.to_string(),
        status_code: Some(status.as_u16()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use httpmock::prelude::*;
    use serde_json::json;

    fn client_for(server: &MockServer) -> ResendClient {
        let base_url = server.base_url().parse().expect("valid URL");
        ResendClient::new(&ApiKey::new("re_test"), &ClientConfig::new(base_url))
            .expect("client should build")
    }

    #[test]
    fn api_key_debug_is_redacted() {
        let key = ApiKey::new("re_secret");
        assert_eq!(format!("{key:?}"), "ApiKey(<redacted>)");
    }

    #[test]
    fn classify_problem_falls_back_to_body_text() {
        let error = classify_problem(StatusCode::BAD_GATEWAY, b"upstream unavailable\n");
        assert_eq!(error.message, "upstream unavailable");
        assert_eq!(error.name, APPLICATION_ERROR);
        assert_eq!(error.status_code, Some(502));
    }

    #[test]
    fn classify_problem_handles_empty_body() {
        let error = classify_problem(StatusCode::INTERNAL_SERVER_ERROR, b"");
        assert_eq!(
            error.message,
            "request failed with status 500 Internal Server Error"
        );
    }

    #[tokio::test]
    async fn requests_carry_bearer_token_and_body() {
        let server = MockServer::start_async().await;
        let mock = server.mock(|when, then| {
            when.method(POST)
                .path("/audiences")
                .header("authorization", "Bearer re_test")
                .json_body(json!({"name": "newsletter"}));
            then.status(201)
                .header("content-type", "application/json")
                .json_body(json!({"id": "aud_1", "object": "audience"}));
        });

        let data = client_for(&server)
            .audiences()
            .create(&CreateAudienceRequest {
                name: "newsletter".into(),
            })
            .await
            .expect("create should succeed");

        mock.assert();
        assert_eq!(data["id"], "aud_1");
    }

    #[tokio::test]
    async fn idempotency_key_is_forwarded() {
        let server = MockServer::start_async().await;
        let mock = server.mock(|when, then| {
            when.method(POST)
                .path("/emails")
                .header("idempotency-key", "welcome-42");
            then.status(200).json_body(json!({"id": "email_1"}));
        });

        let request = SendEmailRequest {
            from: "me@example.com".into(),
            to: vec!["you@example.com".into()],
            subject: "hi".into(),
            ..SendEmailRequest::default()
        };
        client_for(&server)
            .emails()
            .send(&request, Some("welcome-42"))
            .await
            .expect("send should succeed");
        mock.assert();
    }

    #[tokio::test]
    async fn empty_success_body_becomes_null() {
        let server = MockServer::start_async().await;
        server.mock(|when, then| {
            when.method(DELETE).path("/api-keys/key_1");
            then.status(200);
        });

        let data = client_for(&server)
            .api_keys()
            .remove("key_1")
            .await
            .expect("delete should succeed");
        assert_eq!(data, Value::Null);
    }

    #[tokio::test]
    async fn structured_error_is_surfaced() {
        let server = MockServer::start_async().await;
        server.mock(|when, then| {
            when.method(GET).path("/broadcasts/missing");
            then.status(404).json_body(json!({
                "statusCode": 404,
                "message": "Broadcast not found",
                "name": "not_found"
            }));
        });

        let err = client_for(&server)
            .broadcasts()
            .get("missing")
            .await
            .expect_err("lookup should fail");
        match err {
            ClientError::Api(api) => {
                assert_eq!(api.message, "Broadcast not found");
                assert_eq!(api.name, "not_found");
                assert_eq!(api.status_code, Some(404));
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[tokio::test]
    async fn contacts_are_scoped_to_their_audience() {
        let server = MockServer::start_async().await;
        let mock = server.mock(|when, then| {
            when.method(PATCH)
                .path("/audiences/aud_1/contacts/con_1")
                .json_body(json!({"unsubscribed": false}));
            then.status(200).json_body(json!({"id": "con_1"}));
        });

        client_for(&server)
            .contacts()
            .update(
                "aud_1",
                "con_1",
                &UpdateContactRequest {
                    unsubscribed: Some(false),
                    ..UpdateContactRequest::default()
                },
            )
            .await
            .expect("update should succeed");
        mock.assert();
    }

    #[test]
    fn opaque_base_url_is_rejected() {
        let base_url: Url = "mailto:ops@example.com".parse().expect("valid URL");
        let err = ResendClient::new(&ApiKey::new("re_test"), &ClientConfig::new(base_url))
            .expect_err("opaque URL should be rejected");
        assert!(matches!(err, ClientError::InvalidBaseUrl { .. }));
    }
}
