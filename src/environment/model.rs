use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::view_model::RawPost;

/// The admin endpoint's answer to a version check.
#[derive(Debug, Clone, Default, Eq, PartialEq, Serialize, Deserialize)]
pub struct VersionCheckResult {
    pub is_error: bool,
    pub message: String,
}

/// A dead connection would otherwise leave the check pending forever;
/// the bounded timeout settles it instead.
pub const VERSION_CHECK_TIMEOUT: Duration = Duration::from_secs(15);

/// What the forum server offers this client. `HttpApi` is the real
/// implementation; tests substitute their own.
#[async_trait]
pub trait ForumApi: Send + Sync {
    /// The raw post records of the current thread page.
    async fn posts(&self) -> Result<Vec<RawPost>, String>;

    /// Form-encoded POST against the admin check endpoint. `fields`
    /// are the triggering form's serialized inputs, CSRF token
    /// included, forwarded verbatim.
    async fn check_version(
        &self,
        fields: Vec<(String, String)>,
    ) -> Result<VersionCheckResult, String>;
}

#[derive(Clone)]
pub struct Model {
    pub url: String,
    pub has_token: bool,
    client: Arc<Box<dyn ForumApi>>,
}

impl std::fmt::Debug for Model {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Model").finish()
    }
}

impl Model {
    pub fn new(url: String, token: Option<String>) -> Self {
        let has_token = token.is_some();
        let client = HttpApi::new(url.clone(), token);
        Self {
            url,
            has_token,
            client: Arc::new(Box::new(client)),
        }
    }

    /// Wrap a custom transport. Used by tests and anything that talks
    /// to the forum through something other than plain HTTP.
    pub fn with_client(url: String, client: Box<dyn ForumApi>) -> Self {
        Self {
            url,
            has_token: false,
            client: Arc::new(client),
        }
    }

    pub async fn posts(&self) -> Result<Vec<RawPost>, String> {
        self.client.posts().await
    }

    pub async fn check_version(
        &self,
        fields: Vec<(String, String)>,
    ) -> Result<VersionCheckResult, String> {
        self.client.check_version(fields).await
    }
}

pub struct HttpApi {
    base: String,
    token: Option<String>,
    client: reqwest::Client,
}

impl HttpApi {
    pub fn new(base: String, token: Option<String>) -> Self {
        Self {
            base,
            token,
            client: reqwest::Client::new(),
        }
    }

    fn endpoint(&self, path: &str) -> String {
        format!("{}/{}", self.base.trim_end_matches('/'), path)
    }

    fn authorized(&self, request: reqwest::RequestBuilder) -> reqwest::RequestBuilder {
        match &self.token {
            Some(token) => request.bearer_auth(token),
            None => request,
        }
    }
}

#[async_trait]
impl ForumApi for HttpApi {
    async fn posts(&self) -> Result<Vec<RawPost>, String> {
        log::trace!("Posts");
        let response = self
            .authorized(self.client.get(self.endpoint("api/posts/")))
            .send()
            .await
            .string_error("posts")?
            .error_for_status()
            .string_error("posts")?;
        response.json::<Vec<RawPost>>().await.string_error("posts")
    }

    async fn check_version(
        &self,
        fields: Vec<(String, String)>,
    ) -> Result<VersionCheckResult, String> {
        log::trace!("CheckVersion");
        let response = self
            .authorized(self.client.post(self.endpoint("admin/check-version/")))
            .form(&fields)
            .timeout(VERSION_CHECK_TIMEOUT)
            .send()
            .await
            .string_error("check_version")?
            .error_for_status()
            .string_error("check_version")?;
        response
            .json::<VersionCheckResult>()
            .await
            .string_error("check_version")
    }
}

trait ResultExt {
    type Output;
    fn string_error(self, call: &'static str) -> Result<Self::Output, String>;
}

impl<T, E: std::fmt::Debug> ResultExt for Result<T, E> {
    type Output = T;
    fn string_error(self, call: &'static str) -> Result<T, String> {
        self.map_err(|e| {
            let string_error = format!("API Error: {call} {e:?}");
            log::error!("{string_error}");
            string_error
        })
    }
}
