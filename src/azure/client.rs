use anyhow::Context;
use async_trait::async_trait;
use reqwest::{Client, RequestBuilder, Response};
use serde::de::DeserializeOwned;
use serde::Deserialize;

use super::env::AzureEnv;
use super::thread::{CommentThread, Iteration, IterationChanges};
use crate::error::ApiError;

/// The pull request calls a review needs, scoped to one pull request.
#[async_trait]
pub trait AzureDevOpsApi: Send + Sync {
    async fn pull_request_iterations(&self) -> Result<Vec<Iteration>, ApiError>;

    async fn iteration_changes(&self, iteration: u32) -> Result<IterationChanges, ApiError>;

    async fn create_thread(&self, thread: &CommentThread) -> Result<(), ApiError>;
}

/// List responses are wrapped in `{ "count": n, "value": [...] }`.
#[derive(Deserialize)]
struct ValueList<T> {
    value: Vec<T>,
}

/// [`AzureDevOpsApi`] over the Git REST API, authenticated with a personal
/// access token.
pub struct AzureRestClient {
    client: Client,
    env: AzureEnv,
    api_version: String,
}

impl AzureRestClient {
    pub fn new(env: AzureEnv, api_version: &str) -> Self {
        Self {
            client: Client::new(),
            env,
            api_version: api_version.to_string(),
        }
    }

    fn pull_request_url(&self, rest: &str) -> String {
        format!(
            "{}/{}/_apis/git/repositories/{}/pullRequests/{}/{}?api-version={}",
            self.env.collection_uri.trim_end_matches('/'),
            self.env.project,
            self.env.repository_id,
            self.env.pull_request_id,
            rest,
            self.api_version
        )
    }

    fn authorized(&self, request: RequestBuilder) -> RequestBuilder {
        request
            .basic_auth("", Some(&self.env.token))
            .header("Accept", "application/json")
    }

    async fn send(&self, request: RequestBuilder) -> Result<Response, ApiError> {
        let response = self
            .authorized(request)
            .send()
            .await
            .context("Failed to reach Azure DevOps")?;

        if !response.status().is_success() {
            let status = response.status();
            let message = response.text().await.unwrap_or_default();
            return Err(ApiError::Http {
                status: status.as_u16(),
                message,
            });
        }
        Ok(response)
    }

    async fn get_json<T: DeserializeOwned>(&self, rest: &str) -> Result<T, ApiError> {
        let url = self.pull_request_url(rest);
        let response = self.send(self.client.get(&url)).await?;
        Ok(response
            .json()
            .await
            .with_context(|| format!("Failed to parse response from {}", url))?)
    }
}

#[async_trait]
impl AzureDevOpsApi for AzureRestClient {
    async fn pull_request_iterations(&self) -> Result<Vec<Iteration>, ApiError> {
        let list: ValueList<Iteration> = self.get_json("iterations").await?;
        Ok(list.value)
    }

    async fn iteration_changes(&self, iteration: u32) -> Result<IterationChanges, ApiError> {
        self.get_json(&format!("iterations/{}/changes", iteration))
            .await
    }

    async fn create_thread(&self, thread: &CommentThread) -> Result<(), ApiError> {
        let url = self.pull_request_url("threads");
        self.send(self.client.post(&url).json(thread)).await?;
        Ok(())
    }
}
