use crate::api_error::translate_error_body;
use crate::error::{ClientError, ClientResult};
use crate::session::{Credentials, SessionManager};
use crate::transport::{ApiRequest, HttpTransport, RawResponse};
use reqwest::Method;
use serde::Serialize;
use serde::de::DeserializeOwned;
use std::time::Duration;
use tracing::debug;

/// Entry point for every catalog API call.
///
/// One instance holds one session. It is `Send + Sync` and may be shared
/// behind an `Arc`; concurrent calls are serialized by the session manager.
#[derive(Debug)]
pub struct CatalogClient {
    sessions: SessionManager
}

impl CatalogClient {
    pub fn new(credentials: Credentials, timeout: Duration) -> ClientResult<Self> {
        Ok(Self::with_transport(credentials, HttpTransport::new(timeout)?))
    }

    pub fn with_transport(credentials: Credentials, transport: HttpTransport) -> Self {
        Self {
            sessions: SessionManager::new(credentials, transport)
        }
    }

    pub fn host(&self) -> &str {
        self.sessions.credentials().host()
    }

    pub fn sessions(&self) -> &SessionManager {
        &self.sessions
    }

    pub async fn login(&self) -> ClientResult<()> {
        self.sessions.login().await
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.host(), path)
    }

    /// Sends one business call and maps any non-2xx answer to
    /// [`ClientError::RemoteApi`] with the translated message.
    pub(crate) async fn call(
        &self,
        method: Method,
        path: &str,
        body: Option<Vec<u8>>
    ) -> ClientResult<RawResponse> {
        let mut request = ApiRequest::new(method, self.url(path));
        if let Some(body) = body {
            request = request.with_body(body);
        }

        let response = self.sessions.execute(&request).await?;
        ensure_success(response)
    }

    pub(crate) async fn call_json<T: DeserializeOwned>(
        &self,
        method: Method,
        path: &str,
        payload: Option<&impl Serialize>
    ) -> ClientResult<T> {
        let body = payload.map(serde_json::to_vec).transpose()?;
        let response = self.call(method, path, body).await?;
        Ok(serde_json::from_slice(&response.body)?)
    }
}

fn ensure_success(response: RawResponse) -> ClientResult<RawResponse> {
    if response.is_success() {
        return Ok(response);
    }

    let message = translate_error_body(&response.body)?;
    debug!(
        status = response.status_code(),
        message = %message,
        "Catalog API returned an error"
    );
    Err(ClientError::RemoteApi {
        status: response.status_code(),
        message
    })
}
