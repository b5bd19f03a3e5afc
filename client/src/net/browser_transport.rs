//! Browser transport on `gloo-net`.
//!
//! Every request is sent with `credentials: include` so the session cookie
//! travels cross-origin; the CSRF token is read back from `document.cookie`.

use gloo_net::http::{Method as GlooMethod, RequestBuilder};
use wasm_bindgen::JsCast;
use web_sys::{HtmlDocument, RequestCredentials};

use super::error::ApiError;
use super::transport::{ApiRequest, Method, RawResponse, RequestBody, Transport, find_cookie};
use crate::util::query::encode_form;

pub struct BrowserTransport {
    base_url: String,
}

impl BrowserTransport {
    #[must_use]
    pub fn new(base_url: impl Into<String>) -> Self {
        Self { base_url: base_url.into() }
    }
}

fn to_gloo(method: Method) -> GlooMethod {
    match method {
        Method::Get => GlooMethod::GET,
        Method::Post => GlooMethod::POST,
        Method::Put => GlooMethod::PUT,
        Method::Patch => GlooMethod::PATCH,
        Method::Delete => GlooMethod::DELETE,
    }
}

fn document_cookies() -> Option<String> {
    web_sys::window()?
        .document()?
        .dyn_into::<HtmlDocument>()
        .ok()?
        .cookie()
        .ok()
}

#[async_trait::async_trait(?Send)]
impl Transport for BrowserTransport {
    async fn send(&self, request: &ApiRequest) -> Result<RawResponse, ApiError> {
        let url = format!("{}{}", self.base_url, request.path);
        let mut builder = RequestBuilder::new(&url)
            .method(to_gloo(request.method))
            .credentials(RequestCredentials::Include)
            .query(request.query.iter().map(|(k, v)| (k.as_str(), v.as_str())));
        for (name, value) in &request.headers {
            builder = builder.header(name, value);
        }
        let built = match &request.body {
            Some(RequestBody::Json(value)) => builder.json(value),
            Some(RequestBody::Form(fields)) => builder
                .header("Content-Type", "application/x-www-form-urlencoded")
                .body(encode_form(fields)),
            None => builder.build(),
        }
        .map_err(|e| ApiError::InvalidRequest(e.to_string()))?;

        let resp = built.send().await.map_err(|e| {
            log::warn!("{} {url} failed: {e}", request.method);
            ApiError::Transport(e.to_string())
        })?;
        let status = resp.status();
        let body = resp
            .text()
            .await
            .map_err(|e| ApiError::Transport(e.to_string()))?;
        Ok(RawResponse::new(status, body))
    }

    fn cookie(&self, name: &str) -> Option<String> {
        find_cookie(&document_cookies()?, name)
    }
}
