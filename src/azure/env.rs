use tracing::error;

use crate::error::EnvError;

pub const TOKEN_VAR: &str = "AZURE_PERSONAL_ACCESS_TOKEN";
const REPOSITORY_ID_VAR: &str = "BUILD_REPOSITORY_ID";
const PULL_REQUEST_ID_VAR: &str = "SYSTEM_PULLREQUEST_PULLREQUESTID";
const COLLECTION_URI_VAR: &str = "SYSTEM_TEAMFOUNDATIONCOLLECTIONURI";
const PROJECT_ID_VAR: &str = "SYSTEM_TEAMPROJECTID";

/// Pull request context provided by Azure Pipelines.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AzureEnv {
    pub token: String,
    pub repository_id: String,
    pub pull_request_id: u64,
    pub collection_uri: String,
    pub project: String,
}

impl AzureEnv {
    pub fn from_env() -> Result<Self, EnvError> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Every missing variable is logged before failing.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, EnvError> {
        let mut missing = Vec::new();
        let mut require = |name: &'static str, hint: &str| {
            let value = lookup(name).filter(|v| !v.is_empty());
            if value.is_none() {
                error!("`{}` {}", name, hint);
                missing.push(name);
            }
            value
        };

        let token = require(TOKEN_VAR, "must be set to your Azure DevOps access token");
        let repository_id = require(REPOSITORY_ID_VAR, "should've been defined by Azure Pipelines");
        let pull_request_id =
            require(PULL_REQUEST_ID_VAR, "should've been defined by Azure Pipelines");
        let collection_uri =
            require(COLLECTION_URI_VAR, "should've been defined by Azure Pipelines");
        let project = require(PROJECT_ID_VAR, "should've been defined by Azure Pipelines");

        let (
            Some(token),
            Some(repository_id),
            Some(pull_request_id),
            Some(collection_uri),
            Some(project),
        ) = (token, repository_id, pull_request_id, collection_uri, project)
        else {
            return Err(EnvError::Missing(missing));
        };

        let pull_request_id =
            pull_request_id
                .trim()
                .parse()
                .map_err(|_| EnvError::InvalidNumber {
                    name: PULL_REQUEST_ID_VAR,
                    value: pull_request_id.clone(),
                })?;

        Ok(Self {
            token,
            repository_id,
            pull_request_id,
            collection_uri,
            project,
        })
    }
}
