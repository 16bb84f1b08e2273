use async_trait::async_trait;

use crate::environment::model::{ForumApi, Model, VersionCheckResult};
use crate::environment::Environment;
use crate::view_model::RawPost;

/// Canned transport for driving reducers without a server.
pub struct StubApi {
    pub posts: Vec<RawPost>,
    pub version: Result<VersionCheckResult, String>,
}

#[async_trait]
impl ForumApi for StubApi {
    async fn posts(&self) -> Result<Vec<RawPost>, String> {
        Ok(self.posts.clone())
    }

    async fn check_version(
        &self,
        _fields: Vec<(String, String)>,
    ) -> Result<VersionCheckResult, String> {
        self.version.clone()
    }
}

pub fn environment_with(api: StubApi) -> Environment {
    Environment::new(Model::with_client(
        "http://forum.example".to_string(),
        Box::new(api),
    ))
}

pub fn stub_environment() -> Environment {
    environment_with(StubApi {
        posts: Vec::new(),
        version: Ok(VersionCheckResult::default()),
    })
}
