//! Native transport on `reqwest` with a shared cookie jar.
//!
//! The jar plays the browser's role: it stores the session and CSRF cookies
//! the backend sets and replays them on every call, so the pipeline's CSRF
//! interceptor can read the token exactly as it would from `document.cookie`.

use std::sync::Arc;
use std::time::Duration;

use reqwest::cookie::{CookieStore, Jar};
use reqwest::{Client, Url};

use super::error::ApiError;
use super::transport::{ApiRequest, Method, RawResponse, RequestBody, Transport, find_cookie};
use crate::config::ClientConfig;

pub struct ReqwestTransport {
    http: Client,
    jar: Arc<Jar>,
    base_url: String,
    origin: Url,
}

impl ReqwestTransport {
    /// Build a transport for `config.base_url` with the configured timeouts.
    pub fn new(config: &ClientConfig) -> Result<Self, ApiError> {
        let origin = Url::parse(&config.base_url).map_err(|e| ApiError::InvalidRequest(format!("{}: {e}", config.base_url)))?;
        let jar = Arc::new(Jar::default());
        let http = Client::builder()
            .cookie_provider(Arc::clone(&jar))
            .timeout(Duration::from_secs(config.timeouts.request_secs))
            .connect_timeout(Duration::from_secs(config.timeouts.connect_secs))
            .build()
            .map_err(|e| ApiError::Transport(e.to_string()))?;
        Ok(Self { http, jar, base_url: config.base_url.clone(), origin })
    }

    /// Store a cookie for the API origin, as if the backend had set it.
    pub fn seed_cookie(&self, name: &str, value: &str) {
        self.jar
            .add_cookie_str(&format!("{name}={value}; Path=/"), &self.origin);
    }

    /// `Cookie` header the jar would send to the API origin.
    #[must_use]
    pub fn cookies(&self) -> Option<String> {
        self.jar
            .cookies(&self.origin)
            .and_then(|value| value.to_str().ok().map(str::to_owned))
    }

    fn url(&self, path: &str) -> String {
        format!("{}{path}", self.base_url)
    }
}

fn to_reqwest(method: Method) -> reqwest::Method {
    match method {
        Method::Get => reqwest::Method::GET,
        Method::Post => reqwest::Method::POST,
        Method::Put => reqwest::Method::PUT,
        Method::Patch => reqwest::Method::PATCH,
        Method::Delete => reqwest::Method::DELETE,
    }
}

#[async_trait::async_trait(?Send)]
impl Transport for ReqwestTransport {
    async fn send(&self, request: &ApiRequest) -> Result<RawResponse, ApiError> {
        let url = self.url(&request.path);
        let mut builder = self.http.request(to_reqwest(request.method), &url);
        if !request.query.is_empty() {
            builder = builder.query(&request.query);
        }
        for (name, value) in &request.headers {
            builder = builder.header(name.as_str(), value.as_str());
        }
        builder = match &request.body {
            Some(RequestBody::Json(value)) => builder.json(value),
            Some(RequestBody::Form(fields)) => builder.form(fields),
            None => builder,
        };

        tracing::debug!(method = %request.method, %url, "sending request");
        let resp = builder.send().await.map_err(|e| {
            tracing::warn!(method = %request.method, %url, error = %e, "request failed");
            ApiError::Transport(e.to_string())
        })?;
        let status = resp.status().as_u16();
        let body = resp
            .text()
            .await
            .map_err(|e| ApiError::Transport(e.to_string()))?;
        Ok(RawResponse::new(status, body))
    }

    fn cookie(&self, name: &str) -> Option<String> {
        find_cookie(&self.cookies()?, name)
    }
}
