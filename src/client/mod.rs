//! Client layer: performs authenticated JSON calls and maps transport ↔ domain.

use std::error::Error as StdError;
use std::future::Future;
use std::io;
use std::pin::Pin;
use std::sync::Arc;
use std::time::Duration;

use reqwest::Method;
use reqwest::header::{ACCEPT, AUTHORIZATION, CONTENT_TYPE};
use serde::Serialize;
use tracing::Level;
use url::Url;

use crate::domain::{
    ApiKey, Template, TemplateCreated, TemplateId, Transmission, TransmissionCreated,
    ValidationError,
};
use crate::transport::TransportError;

#[cfg(test)]
pub(crate) mod testing;

/// Base URL of the SparkPost REST API; relative paths are joined beneath it.
pub const DEFAULT_ENDPOINT: &str = "https://api.sparkpost.com/api/v1/";
/// Wall-clock deadline applied to each request unless overridden.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

const TEMPLATES_PATH: &str = "templates";
const TRANSMISSIONS_PATH: &str = "transmissions";
const JSON_MEDIA_TYPE: &str = "application/json";
const REDACTED: &str = "[REDACTED]";

type BoxFuture<'a, T> = Pin<Box<dyn Future<Output = T> + Send + 'a>>;

/// Emit a `tracing` event at a level picked at runtime.
macro_rules! event_at {
    ($level:expr, $($args:tt)+) => {{
        let level: Level = $level;
        if level == Level::ERROR {
            tracing::error!($($args)+)
        } else if level == Level::WARN {
            tracing::warn!($($args)+)
        } else if level == Level::INFO {
            tracing::info!($($args)+)
        } else if level == Level::TRACE {
            tracing::trace!($($args)+)
        } else {
            tracing::debug!($($args)+)
        }
    }};
}

#[derive(Debug, Clone)]
pub(crate) struct HttpRequest {
    pub(crate) method: Method,
    pub(crate) url: Url,
    pub(crate) headers: Vec<(String, String)>,
    pub(crate) body: Option<String>,
}

impl HttpRequest {
    #[cfg(test)]
    pub(crate) fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(key, _)| key.eq_ignore_ascii_case(name))
            .map(|(_, value)| value.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
/// Raw response returned by [`SparkPostClient::call`]; the status is not interpreted.
pub struct Response {
    pub status_code: u16,
    pub body: String,
    pub headers: Vec<(String, String)>,
}

pub(crate) trait HttpTransport: Send + Sync {
    fn execute<'a>(
        &'a self,
        request: HttpRequest,
    ) -> BoxFuture<'a, Result<Response, Box<dyn StdError + Send + Sync>>>;
}

#[derive(Debug, Clone)]
struct ReqwestTransport {
    client: reqwest::Client,
    timeout: Duration,
}

impl HttpTransport for ReqwestTransport {
    fn execute<'a>(
        &'a self,
        request: HttpRequest,
    ) -> BoxFuture<'a, Result<Response, Box<dyn StdError + Send + Sync>>> {
        Box::pin(async move {
            let mut builder = self
                .client
                .request(request.method, request.url)
                .timeout(self.timeout);
            for (name, value) in &request.headers {
                builder = builder.header(name.as_str(), value.as_str());
            }
            if let Some(body) = request.body {
                builder = builder.body(body);
            }

            let response = builder.send().await?;
            let status_code = response.status().as_u16();
            let headers = response
                .headers()
                .iter()
                .map(|(name, value)| {
                    (
                        name.as_str().to_owned(),
                        String::from_utf8_lossy(value.as_bytes()).into_owned(),
                    )
                })
                .collect();
            let body = response.text().await?;
            Ok(Response {
                status_code,
                body,
                headers,
            })
        })
    }
}

#[derive(Debug, thiserror::Error)]
/// Errors returned by [`SparkPostClient`].
///
/// This error preserves:
/// - transport failures (DNS, TLS, truncated responses) and timeouts,
/// - HTTP-level failures (any status other than `200`) with the raw body,
/// - encode/parse failures of the JSON payloads.
pub enum SparkPostError {
    /// HTTP client / transport failure (DNS, connect, TLS, truncated body).
    #[error("transport error: {0}")]
    Transport(#[source] Box<dyn StdError + Send + Sync>),

    /// The request did not complete before the configured deadline.
    #[error("request timed out: {0}")]
    Timeout(#[source] Box<dyn StdError + Send + Sync>),

    /// The request body could not be encoded as JSON.
    #[error("could not encode request body: {0}")]
    Encode(#[source] serde_json::Error),

    /// Endpoint or path did not form a valid URL.
    #[error("invalid URL: {0}")]
    Url(#[from] url::ParseError),

    /// Non-`200` status code returned by the server.
    #[error("unexpected HTTP status: {status}")]
    HttpStatus { status: u16, body: Option<String> },

    /// A `200` response body could not be decoded into the expected shape.
    #[error("parse error: {0}")]
    Parse(#[source] Box<dyn StdError + Send + Sync>),

    /// One of the domain constructors rejected an invalid value.
    #[error("validation error: {0}")]
    Validation(#[from] ValidationError),
}

#[derive(Debug, Clone)]
/// Builder for [`SparkPostClient`].
///
/// Use this when you need to customize the endpoint, timeout, user-agent, or the level
/// at which request/response exchanges are logged.
pub struct SparkPostClientBuilder {
    api_key: ApiKey,
    endpoint: String,
    timeout: Duration,
    user_agent: Option<String>,
    log_level: Level,
}

impl SparkPostClientBuilder {
    /// Create a builder with the default endpoint, a 30 second timeout and `DEBUG` logging.
    pub fn new(api_key: ApiKey) -> Self {
        Self {
            api_key,
            endpoint: DEFAULT_ENDPOINT.to_owned(),
            timeout: DEFAULT_TIMEOUT,
            user_agent: None,
            log_level: Level::DEBUG,
        }
    }

    /// Override the API base URL. A trailing `/` is added when missing.
    pub fn endpoint(mut self, endpoint: impl Into<String>) -> Self {
        self.endpoint = endpoint.into();
        self
    }

    /// Set the deadline applied to each request.
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Override the HTTP `User-Agent` header.
    pub fn user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = Some(user_agent.into());
        self
    }

    /// Level of the event emitted for every request/response exchange.
    pub fn log_level(mut self, level: Level) -> Self {
        self.log_level = level;
        self
    }

    /// Build a [`SparkPostClient`].
    pub fn build(self) -> Result<SparkPostClient, SparkPostError> {
        let endpoint = normalize_endpoint(&self.endpoint)?;

        let mut builder = reqwest::Client::builder();
        if let Some(user_agent) = self.user_agent {
            builder = builder.user_agent(user_agent);
        }
        let client = builder
            .build()
            .map_err(|err| SparkPostError::Transport(Box::new(err)))?;

        Ok(SparkPostClient {
            api_key: self.api_key,
            endpoint,
            log_level: self.log_level,
            http: Arc::new(ReqwestTransport {
                client,
                timeout: self.timeout,
            }),
        })
    }
}

#[derive(Clone)]
/// SparkPost REST client.
///
/// Every request carries the API key verbatim in `Authorization` and asks for JSON.
/// Typed operations treat exactly `200` as success.
pub struct SparkPostClient {
    api_key: ApiKey,
    endpoint: Url,
    log_level: Level,
    http: Arc<dyn HttpTransport>,
}

impl SparkPostClient {
    /// Create a client using the default endpoint and timeout.
    ///
    /// For more customization, use [`SparkPostClient::builder`].
    pub fn new(api_key: ApiKey) -> Result<Self, SparkPostError> {
        Self::builder(api_key).build()
    }

    /// Start building a client with custom settings.
    pub fn builder(api_key: ApiKey) -> SparkPostClientBuilder {
        SparkPostClientBuilder::new(api_key)
    }

    #[cfg(test)]
    pub(crate) fn with_transport(
        api_key: ApiKey,
        endpoint: &str,
        http: Arc<dyn HttpTransport>,
    ) -> Self {
        Self {
            api_key,
            endpoint: normalize_endpoint(endpoint).unwrap(),
            log_level: Level::DEBUG,
            http,
        }
    }

    /// Base URL requests are resolved against.
    pub fn endpoint(&self) -> &Url {
        &self.endpoint
    }

    /// Perform one authenticated JSON request and return the raw response.
    ///
    /// `path` is relative to the endpoint (`"templates"`, `"transmissions"`). When `body`
    /// is present it is encoded as JSON and sent with `Content-Type: application/json`.
    /// The status code is not interpreted here.
    pub async fn call<B>(
        &self,
        method: Method,
        path: &str,
        body: Option<&B>,
    ) -> Result<Response, SparkPostError>
    where
        B: Serialize + ?Sized,
    {
        let url = self.endpoint.join(path)?;
        self.call_url(method, url, body).await
    }

    async fn call_url<B>(
        &self,
        method: Method,
        url: Url,
        body: Option<&B>,
    ) -> Result<Response, SparkPostError>
    where
        B: Serialize + ?Sized,
    {
        let body = body
            .map(serde_json::to_string)
            .transpose()
            .map_err(SparkPostError::Encode)?;

        let mut headers = vec![
            (
                AUTHORIZATION.as_str().to_owned(),
                self.api_key.as_str().to_owned(),
            ),
            (ACCEPT.as_str().to_owned(), JSON_MEDIA_TYPE.to_owned()),
        ];
        if body.is_some() {
            headers.push((CONTENT_TYPE.as_str().to_owned(), JSON_MEDIA_TYPE.to_owned()));
        }

        let request = HttpRequest {
            method,
            url,
            headers,
            body,
        };
        let logged = request.clone();

        match self.http.execute(request).await {
            Ok(response) => {
                self.log_exchange(&logged, &response);
                Ok(response)
            }
            Err(err) => {
                event_at!(
                    self.log_level,
                    method = %logged.method,
                    url = %logged.url,
                    error = %err,
                    "request failed"
                );
                Err(classify_transport_error(err))
            }
        }
    }

    /// Store a new template on the server.
    ///
    /// Errors:
    /// - [`SparkPostError::HttpStatus`] for any status other than `200`,
    /// - [`SparkPostError::Parse`] when the body is not `{"results":{"id":...}}` with a
    ///   non-empty id.
    pub async fn create_template(
        &self,
        template: &Template,
    ) -> Result<TemplateCreated, SparkPostError> {
        let body = crate::transport::encode_template_json(template);
        let response = self
            .call(Method::POST, TEMPLATES_PATH, Some(&body))
            .await?;
        let body = expect_ok(response)?;
        crate::transport::decode_template_created_response(&body).map_err(parse_error)
    }

    /// Submit a transmission.
    ///
    /// Errors:
    /// - [`SparkPostError::HttpStatus`] for any status other than `200`,
    /// - [`SparkPostError::Parse`] when the body lacks a non-empty `results.id` or the
    ///   recipient counters are not non-negative integers.
    pub async fn create_transmission(
        &self,
        transmission: &Transmission,
    ) -> Result<TransmissionCreated, SparkPostError> {
        let body = crate::transport::encode_transmission_json(transmission);
        let response = self
            .call(Method::POST, TRANSMISSIONS_PATH, Some(&body))
            .await?;
        let body = expect_ok(response)?;
        crate::transport::decode_transmission_created_response(&body).map_err(parse_error)
    }

    /// Fetch a stored template; `draft` selects the draft revision over the published one.
    ///
    /// The id is sent as a single percent-encoded path segment.
    pub async fn get_template(
        &self,
        id: &TemplateId,
        draft: bool,
    ) -> Result<Template, SparkPostError> {
        if matches!(id.as_str(), "." | "..") {
            return Err(ValidationError::InvalidPathSegment {
                input: id.as_str().to_owned(),
            }
            .into());
        }

        let mut url = self.endpoint.clone();
        url.path_segments_mut()
            .map_err(|()| SparkPostError::Url(url::ParseError::RelativeUrlWithoutBase))?
            .pop_if_empty()
            .push(TEMPLATES_PATH)
            .push(id.as_str());
        url.query_pairs_mut()
            .append_pair("draft", &draft.to_string());

        let response = self.call_url(Method::GET, url, None::<&()>).await?;
        let body = expect_ok(response)?;
        crate::transport::decode_template_response(&body).map_err(parse_error)
    }

    fn log_exchange(&self, request: &HttpRequest, response: &Response) {
        let secret = self.api_key.as_str();
        let headers = redact_headers(&request.headers);
        let request_body = request
            .body
            .as_deref()
            .map(|body| redact(body, secret))
            .unwrap_or_default();
        let response_body = redact(&response.body, secret);

        event_at!(
            self.log_level,
            method = %request.method,
            url = %request.url,
            request_headers = ?headers,
            request_body = %request_body,
            status = response.status_code,
            response_body = %response_body,
            "sparkpost exchange"
        );
    }
}

fn normalize_endpoint(raw: &str) -> Result<Url, url::ParseError> {
    let mut endpoint = raw.trim().to_owned();
    if !endpoint.ends_with('/') {
        endpoint.push('/');
    }
    let url = Url::parse(&endpoint)?;
    if url.cannot_be_a_base() {
        return Err(url::ParseError::RelativeUrlWithoutBase);
    }
    Ok(url)
}

fn expect_ok(response: Response) -> Result<String, SparkPostError> {
    if response.status_code != 200 {
        let body = if response.body.trim().is_empty() {
            None
        } else {
            Some(response.body)
        };
        return Err(SparkPostError::HttpStatus {
            status: response.status_code,
            body,
        });
    }
    Ok(response.body)
}

fn parse_error(err: TransportError) -> SparkPostError {
    SparkPostError::Parse(Box::new(err))
}

fn classify_transport_error(err: Box<dyn StdError + Send + Sync>) -> SparkPostError {
    let timed_out = err
        .downcast_ref::<reqwest::Error>()
        .is_some_and(reqwest::Error::is_timeout)
        || err
            .downcast_ref::<io::Error>()
            .is_some_and(|io_err| io_err.kind() == io::ErrorKind::TimedOut);
    if timed_out {
        SparkPostError::Timeout(err)
    } else {
        SparkPostError::Transport(err)
    }
}

fn redact_headers(headers: &[(String, String)]) -> Vec<(String, String)> {
    headers
        .iter()
        .map(|(name, value)| {
            if name.eq_ignore_ascii_case(AUTHORIZATION.as_str()) {
                (name.clone(), REDACTED.to_owned())
            } else {
                (name.clone(), value.clone())
            }
        })
        .collect()
}

fn redact(text: &str, secret: &str) -> String {
    if secret.is_empty() {
        return text.to_owned();
    }
    text.replace(secret, REDACTED)
}
