use std::time::Duration;

use async_trait::async_trait;
use chrono::SecondsFormat;
use reqwest::header::{ACCEPT, USER_AGENT};
use reqwest::{Client, Response, StatusCode};
use serde::de::DeserializeOwned;
use tracing::debug;

use super::models::{ContentEntry, ContributorStats, Issue, PullRequest, Repository, WeeklyCommits};
use super::{Fetched, IssueQuery, Platform, PlatformError, RepoRef};
use crate::types::config::ApiConfig;

const GITHUB_JSON: &str = "application/vnd.github+json";
const API_VERSION: &str = "2022-11-28";

#[derive(Clone)]
pub struct GitHubClient {
    client: Client,
    config: ApiConfig,
}

impl GitHubClient {
    pub fn new(config: ApiConfig) -> Result<Self, reqwest::Error> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()?;
        Ok(Self { client, config })
    }

    async fn send(&self, path: &str, query: &[(&str, String)]) -> Result<Response, PlatformError> {
        let url = format!("{}{}", self.config.base_url.trim_end_matches('/'), path);
        let mut request = self
            .client
            .get(&url)
            .query(query)
            .header(ACCEPT, GITHUB_JSON)
            .header(USER_AGENT, &self.config.user_agent)
            .header("X-GitHub-Api-Version", API_VERSION);
        if let Some(token) = &self.config.token {
            request = request.bearer_auth(token);
        }

        debug!(%url, "GET");
        let response = request.send().await?;
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }
        Err(classify_failure(response).await)
    }

    async fn get_json<T: DeserializeOwned>(
        &self,
        path: &str,
        query: &[(&str, String)],
    ) -> Result<T, PlatformError> {
        let response = self.send(path, query).await?;
        Ok(response.json::<T>().await?)
    }

    /// Statistics endpoints answer 202 while GitHub computes them in the background.
    async fn get_stats<T: DeserializeOwned + Default>(
        &self,
        path: &str,
    ) -> Result<Fetched<T>, PlatformError> {
        let response = self.send(path, &[]).await?;
        match response.status() {
            StatusCode::ACCEPTED => Ok(Fetched::Pending),
            StatusCode::NO_CONTENT => Ok(Fetched::Ready(T::default())),
            _ => Ok(Fetched::Ready(response.json::<T>().await?)),
        }
    }
}

async fn classify_failure(response: Response) -> PlatformError {
    let status = response.status();
    let quota_exhausted = response
        .headers()
        .get("x-ratelimit-remaining")
        .and_then(|v| v.to_str().ok())
        .is_some_and(|remaining| remaining.trim() == "0");
    let body = response.text().await.unwrap_or_default();

    match status {
        StatusCode::NOT_FOUND => PlatformError::NotFound,
        StatusCode::TOO_MANY_REQUESTS => PlatformError::RateLimited,
        StatusCode::FORBIDDEN
            if quota_exhausted || body.to_lowercase().contains("rate limit") =>
        {
            PlatformError::RateLimited
        }
        _ => PlatformError::Http {
            status: status.as_u16(),
            body,
        },
    }
}

fn repo_path(repo: &RepoRef, suffix: &str) -> String {
    format!("/repos/{}/{}{}", repo.owner, repo.name, suffix)
}

#[async_trait]
impl Platform for GitHubClient {
    async fn repository(&self, repo: &RepoRef) -> Result<Repository, PlatformError> {
        self.get_json(&repo_path(repo, ""), &[]).await
    }

    async fn commit_activity(
        &self,
        repo: &RepoRef,
    ) -> Result<Fetched<Vec<WeeklyCommits>>, PlatformError> {
        self.get_stats(&repo_path(repo, "/stats/commit_activity"))
            .await
    }

    async fn contributor_stats(
        &self,
        repo: &RepoRef,
    ) -> Result<Fetched<Vec<ContributorStats>>, PlatformError> {
        self.get_stats(&repo_path(repo, "/stats/contributors")).await
    }

    async fn issues(
        &self,
        repo: &RepoRef,
        query: &IssueQuery,
    ) -> Result<Vec<Issue>, PlatformError> {
        let mut params = vec![
            ("state", query.state.as_str().to_string()),
            ("per_page", query.per_page.to_string()),
        ];
        if let Some(since) = query.since {
            params.push(("since", since.to_rfc3339_opts(SecondsFormat::Secs, true)));
        }
        self.get_json(&repo_path(repo, "/issues"), &params).await
    }

    async fn closed_pulls(
        &self,
        repo: &RepoRef,
        per_page: u32,
    ) -> Result<Vec<PullRequest>, PlatformError> {
        let params = [
            ("state", "closed".to_string()),
            ("sort", "updated".to_string()),
            ("direction", "desc".to_string()),
            ("per_page", per_page.to_string()),
        ];
        self.get_json(&repo_path(repo, "/pulls"), &params).await
    }

    async fn root_contents(&self, repo: &RepoRef) -> Result<Vec<ContentEntry>, PlatformError> {
        self.get_json(&repo_path(repo, "/contents/"), &[]).await
    }
}
