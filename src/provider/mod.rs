pub mod dto;

use std::env;
use std::fmt;

use async_trait::async_trait;
use reqwest::header::CONTENT_TYPE;
use reqwest::{Client, StatusCode};
use serde_json::Value;
use tracing::{debug, info, warn};

use crate::error::{BcsError, Result};

pub const DEFAULT_ROOT: &str = "https://bootcampspot.com/api/instructor/v1";

#[derive(Clone)]
pub struct Credentials {
    pub email: String,
    pub password: String,
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("email", &self.email)
            .field("password", &"<redacted>")
            .finish()
    }
}

#[derive(Clone, Debug)]
pub struct ProviderConfig {
    pub root: String,
    pub credentials: Credentials,
    /// Keep enrollments where the account is a student.
    pub student_ok: bool,
}

impl ProviderConfig {
    pub fn new(email: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            root: DEFAULT_ROOT.to_string(),
            credentials: Credentials {
                email: email.into(),
                password: password.into(),
            },
            student_ok: false,
        }
    }

    /// Reads `BCS_USER` / `BCS_PASS`, and `BCS_ROOT` when set.
    pub fn new_from_env() -> Result<Self> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let email = lookup("BCS_USER")
            .ok_or_else(|| BcsError::Config("BCS_USER is not set".to_string()))?;
        let password = lookup("BCS_PASS")
            .ok_or_else(|| BcsError::Config("BCS_PASS is not set".to_string()))?;

        let mut config = Self::new(email, password);
        if let Some(root) = lookup("BCS_ROOT") {
            config = config.with_root(root);
        }
        Ok(config)
    }

    pub fn with_root(mut self, root: impl Into<String>) -> Self {
        self.root = root.into().trim_end_matches('/').to_string();
        self
    }

    pub fn with_student_ok(mut self, student_ok: bool) -> Self {
        self.student_ok = student_ok;
        self
    }
}

/// Authenticated access to the provider's endpoints.
#[async_trait]
pub trait Provider: Send + Sync {
    async fn me(&self) -> Result<dto::MeResponse>;

    /// POST `body` to `endpoint`.
    ///
    /// `None` means the endpoint gave no usable result (transport failure,
    /// non-200 status, or an undecodable body). It never stands for an empty
    /// data set.
    async fn call(&self, endpoint: &str, body: &Value) -> Option<Value>;
}

pub struct HttpProvider {
    client: Client,
    root: String,
    auth_token: String,
}

impl HttpProvider {
    /// Logs in once; the returned token is sent on every later request.
    pub async fn connect(config: &ProviderConfig) -> Result<Self> {
        let client = Client::builder().build()?;
        let root = config.root.trim_end_matches('/').to_string();

        let request_body = dto::LoginRequest {
            email: &config.credentials.email,
            password: &config.credentials.password,
        };

        let response = client
            .post(format!("{}/login", root))
            .json(&request_body)
            .send()
            .await?;

        if !response.status().is_success() {
            let status = response.status();
            return Err(BcsError::Authentication(format!("login returned {}", status)));
        }

        let login: dto::LoginResponse = response
            .json()
            .await
            .map_err(|e| BcsError::Authentication(format!("unreadable login response: {}", e)))?;

        let auth_token = login
            .authentication_info
            .and_then(|info| info.auth_token)
            .ok_or_else(|| BcsError::Authentication("login response carried no authToken".to_string()))?;

        info!("Authenticated as {}", config.credentials.email);

        Ok(Self {
            client,
            root,
            auth_token,
        })
    }

    fn url(&self, endpoint: &str) -> String {
        format!("{}/{}", self.root, endpoint)
    }
}

#[async_trait]
impl Provider for HttpProvider {
    async fn me(&self) -> Result<dto::MeResponse> {
        let response = self
            .client
            .get(self.url("me"))
            .header(CONTENT_TYPE, "application/json")
            .header("authToken", &self.auth_token)
            .send()
            .await?;

        if !response.status().is_success() {
            warn!("me returned {}", response.status());
            return Err(BcsError::Unavailable {
                endpoint: "me".to_string(),
            });
        }

        response
            .json::<dto::MeResponse>()
            .await
            .map_err(|e| BcsError::decode("me", e))
    }

    async fn call(&self, endpoint: &str, body: &Value) -> Option<Value> {
        debug!("POST {} {}", endpoint, body);

        let response = match self
            .client
            .post(self.url(endpoint))
            .header(CONTENT_TYPE, "application/json")
            .header("authToken", &self.auth_token)
            .json(body)
            .send()
            .await
        {
            Ok(response) => response,
            Err(e) => {
                warn!("{} request failed: {}", endpoint, e);
                return None;
            }
        };

        if response.status() != StatusCode::OK {
            warn!("{} returned {}", endpoint, response.status());
            return None;
        }

        match response.json::<Value>().await {
            Ok(payload) => Some(payload),
            Err(e) => {
                warn!("{} returned an unreadable body: {}", endpoint, e);
                None
            }
        }
    }
}

/// A provider with no enrollments whose endpoints never answer.
pub struct NoopProvider;

#[async_trait]
impl Provider for NoopProvider {
    async fn me(&self) -> Result<dto::MeResponse> {
        Ok(dto::MeResponse {
            user_account: Value::Null,
            enrollments: Vec::new(),
        })
    }

    async fn call(&self, _endpoint: &str, _body: &Value) -> Option<Value> {
        None
    }
}
