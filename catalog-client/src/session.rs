//! Credentials, session state and the login / re-login policy.
//!
//! A [`SessionManager`] owns the only copy of the session pair. The pair sits
//! behind an async mutex that stays locked for a whole logical call (initial
//! login, request, optional re-login, resubmission), so calls made through
//! one client are serialized and a re-login never races another request.

use crate::api_error::translate_error_body;
use crate::error::{ClientError, ClientResult};
use crate::transport::{ApiRequest, HttpTransport, RawResponse, SESSION_COOKIE, TOKEN_COOKIE};
use reqwest::{Method, StatusCode};
use serde::Serialize;
use std::collections::HashMap;
use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};
use tokio::sync::Mutex;
use tracing::{info, warn};
use zeroize::Zeroizing;

pub const LOGIN_PATH: &str = "/api/v1/account/login";

#[derive(Clone)]
pub struct Credentials {
    host: String,
    organisation_name: String,
    email: String,
    password: Zeroizing<String>
}

impl Credentials {
    pub fn new(
        host: impl Into<String>,
        organisation_name: impl Into<String>,
        email: impl Into<String>,
        password: impl Into<String>
    ) -> Self {
        Self {
            host: host.into().trim_end_matches('/').to_string(),
            organisation_name: organisation_name.into(),
            email: email.into(),
            password: Zeroizing::new(password.into())
        }
    }

    pub fn host(&self) -> &str {
        &self.host
    }

    pub fn organisation_name(&self) -> &str {
        &self.organisation_name
    }

    pub fn email(&self) -> &str {
        &self.email
    }
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("host", &self.host)
            .field("organisation_name", &self.organisation_name)
            .field("email", &self.email)
            .field("password", &"<redacted>")
            .finish()
    }
}

#[derive(Serialize)]
struct LoginRequest<'a> {
    organisationname: &'a str,
    email: &'a str,
    password: &'a str
}

/// The `(SESSION, XSRF-TOKEN)` pair. Either value empty means unauthenticated.
#[derive(Clone, Default, PartialEq, Eq)]
pub struct Session {
    session: String,
    token: String
}

impl Session {
    pub fn new(session: impl Into<String>, token: impl Into<String>) -> Self {
        Self {
            session: session.into(),
            token: token.into()
        }
    }

    fn from_cookies(cookies: &HashMap<String, String>) -> Option<Self> {
        let session = cookies.get(SESSION_COOKIE).filter(|v| !v.is_empty())?;
        let token = cookies.get(TOKEN_COOKIE).filter(|v| !v.is_empty())?;
        Some(Self::new(session.clone(), token.clone()))
    }

    pub fn is_authenticated(&self) -> bool {
        !self.session.is_empty() && !self.token.is_empty()
    }

    pub fn clear(&mut self) {
        self.session.clear();
        self.token.clear();
    }

    pub fn session(&self) -> &str {
        &self.session
    }

    pub fn token(&self) -> &str {
        &self.token
    }

    pub fn cookie_header(&self) -> String {
        format!(
            "{}={}; {}={}",
            SESSION_COOKIE, self.session, TOKEN_COOKIE, self.token
        )
    }
}

impl fmt::Debug for Session {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Session")
            .field("authenticated", &self.is_authenticated())
            .finish()
    }
}

pub struct SessionManager {
    transport: HttpTransport,
    credentials: Credentials,
    session: Mutex<Session>,
    logins: AtomicU64
}

impl SessionManager {
    pub fn new(credentials: Credentials, transport: HttpTransport) -> Self {
        Self {
            transport,
            credentials,
            session: Mutex::new(Session::default()),
            logins: AtomicU64::new(0)
        }
    }

    pub fn credentials(&self) -> &Credentials {
        &self.credentials
    }

    pub async fn is_authenticated(&self) -> bool {
        self.session.lock().await.is_authenticated()
    }

    /// Number of login attempts sent so far, including failed ones.
    pub fn login_count(&self) -> u64 {
        self.logins.load(Ordering::Relaxed)
    }

    pub async fn login(&self) -> ClientResult<()> {
        let mut session = self.session.lock().await;
        self.login_locked(&mut session).await
    }

    /// Sends `request` with the current session, logging in first when
    /// unauthenticated. A 401 triggers one re-login and one resubmission;
    /// whatever the second attempt returns goes back to the caller.
    pub async fn execute(&self, request: &ApiRequest) -> ClientResult<RawResponse> {
        let mut session = self.session.lock().await;

        if !session.is_authenticated() {
            self.login_locked(&mut session).await?;
        }

        let response = self.transport.send(request, Some(&*session)).await?;
        if response.status != StatusCode::UNAUTHORIZED {
            return Ok(response);
        }

        warn!(
            method = %request.method(),
            url = %request.url(),
            "Session rejected by catalog API, logging in again"
        );
        session.clear();
        self.login_locked(&mut session).await?;

        self.transport.send(request, Some(&*session)).await
    }

    async fn login_locked(&self, session: &mut Session) -> ClientResult<()> {
        let url = format!("{}{}", self.credentials.host, LOGIN_PATH);
        let payload = LoginRequest {
            organisationname: &self.credentials.organisation_name,
            email: &self.credentials.email,
            password: &self.credentials.password
        };
        let request = ApiRequest::new(Method::POST, url).with_json(&payload)?;

        info!(
            host = %self.credentials.host,
            organisation = %self.credentials.organisation_name,
            email = %self.credentials.email,
            "Logging in to catalog API"
        );
        self.logins.fetch_add(1, Ordering::Relaxed);

        let response = self.transport.send(&request, None).await?;

        if !response.is_success() {
            session.clear();
            let message = translate_error_body(&response.body)?;
            warn!(status = response.status_code(), message = %message, "Login rejected");
            return Err(ClientError::Login(message));
        }

        match Session::from_cookies(&response.cookies) {
            Some(fresh) => {
                *session = fresh;
                Ok(())
            }
            None => {
                session.clear();
                warn!("Login response did not carry session cookies");
                Err(ClientError::Login("failed to login".to_string()))
            }
        }
    }
}

impl fmt::Debug for SessionManager {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SessionManager")
            .field("credentials", &self.credentials)
            .field("logins", &self.login_count())
            .finish_non_exhaustive()
    }
}
