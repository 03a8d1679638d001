//! Single-shot HTTP exchange with the catalog API.
//!
//! The transport knows nothing about login or retries: it sends exactly one
//! request with the fixed header set and, when a session is supplied, the
//! session cookies plus the anti-forgery header.

use crate::error::ClientResult;
use crate::session::Session;
use reqwest::header::{ACCEPT, CONTENT_TYPE, COOKIE, HeaderMap, HeaderValue, USER_AGENT};
use reqwest::{Client, Method, StatusCode};
use serde::Serialize;
use std::collections::HashMap;
use std::time::Duration;
use tracing::debug;

pub const SESSION_COOKIE: &str = "SESSION";
pub const TOKEN_COOKIE: &str = "XSRF-TOKEN";
pub const TOKEN_HEADER: &str = "X-XSRF-TOKEN";
pub const CLIENT_USER_AGENT: &str = "PCT";
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(120);

#[derive(Debug, Clone)]
pub struct ApiRequest {
    method: Method,
    url: String,
    body: Option<Vec<u8>>,
    headers: Vec<(String, String)>
}

impl ApiRequest {
    pub fn new(method: Method, url: impl Into<String>) -> Self {
        Self {
            method,
            url: url.into(),
            body: None,
            headers: Vec::new()
        }
    }

    pub fn with_body(mut self, body: Vec<u8>) -> Self {
        self.body = Some(body);
        self
    }

    pub fn with_json<T: Serialize + ?Sized>(self, payload: &T) -> ClientResult<Self> {
        Ok(self.with_body(serde_json::to_vec(payload)?))
    }

    pub fn with_header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.push((name.into(), value.into()));
        self
    }

    pub fn method(&self) -> &Method {
        &self.method
    }

    pub fn url(&self) -> &str {
        &self.url
    }

    pub fn body(&self) -> Option<&[u8]> {
        self.body.as_deref()
    }
}

/// Everything the caller may need from one response. Cookies are only
/// collected for 2xx responses.
#[derive(Debug, Clone)]
pub struct RawResponse {
    pub body: Vec<u8>,
    pub status: StatusCode,
    pub headers: HeaderMap,
    pub cookies: HashMap<String, String>
}

impl RawResponse {
    pub fn status_code(&self) -> u16 {
        self.status.as_u16()
    }

    /// e.g. `404 Not Found`
    pub fn status_line(&self) -> String {
        self.status.to_string()
    }

    pub fn is_success(&self) -> bool {
        self.status.is_success()
    }

    pub fn text(&self) -> String {
        String::from_utf8_lossy(&self.body).into_owned()
    }
}

#[derive(Debug, Clone)]
pub struct HttpTransport {
    client: Client
}

impl HttpTransport {
    pub fn new(timeout: Duration) -> ClientResult<Self> {
        let client = Client::builder().timeout(timeout).build()?;
        Ok(Self { client })
    }

    pub async fn send(
        &self,
        request: &ApiRequest,
        session: Option<&Session>
    ) -> ClientResult<RawResponse> {
        debug!(method = %request.method, url = %request.url, "Sending catalog API request");

        let mut builder = self
            .client
            .request(request.method.clone(), &request.url)
            .header(ACCEPT, "*/*")
            .header(USER_AGENT, CLIENT_USER_AGENT)
            .header(CONTENT_TYPE, "application/json");

        for (name, value) in &request.headers {
            builder = builder.header(name.as_str(), value.as_str());
        }

        if let Some(session) = session {
            builder = builder
                .header(TOKEN_HEADER, HeaderValue::from_str(session.token())?)
                .header(COOKIE, HeaderValue::from_str(&session.cookie_header())?);
        }

        if let Some(body) = &request.body {
            builder = builder.body(body.clone());
        }

        let response = builder.send().await?;
        let status = response.status();
        let headers = response.headers().clone();
        let cookies = if status.is_success() {
            response
                .cookies()
                .map(|c| (c.name().to_string(), c.value().to_string()))
                .collect()
        } else {
            HashMap::new()
        };
        let body = response.bytes().await?.to_vec();

        debug!(url = %request.url, status = status.as_u16(), "Catalog API responded");

        Ok(RawResponse {
            body,
            status,
            headers,
            cookies
        })
    }
}
