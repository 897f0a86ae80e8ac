//! Portfolio REST API client.
//!
//! This module provides:
//!
//! - `PortfolioApi`: the operations the dashboard needs from the backend
//! - `ApiClient`: reqwest-backed implementation
//! - `Project`, `User` and `Asset`: deserialized API records
//!
//! Mutations are sent as multipart bodies built from a `Payload`. Errors from
//! the server carry a free-text `message` that is shown to the user verbatim.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::StatusCode;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::config::ApiConfig;
use crate::form::{FieldMap, Payload};

/// User agent for API requests
const USER_AGENT: &str = concat!("portfolio-admin/", env!("CARGO_PKG_VERSION"));

#[derive(Error, Debug)]
pub enum ApiError {
    /// Non-success response; the message comes from the server
    #[error("{message}")]
    Server { status: u16, message: String },

    #[error("Request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Unexpected response: {0}")]
    Decode(String),
}

/// A stored file on the backend (banner, avatar, resume)
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Asset {
    #[serde(default)]
    pub public_id: Option<String>,
    pub url: String,
}

/// A portfolio project
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Project {
    #[serde(rename = "_id", default)]
    pub id: String,
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub technologies: Option<String>,
    #[serde(default)]
    pub stack: Option<String>,
    #[serde(default)]
    pub deployed: Option<String>,
    #[serde(default)]
    pub git_repo_link: Option<String>,
    #[serde(default)]
    pub project_link: Option<String>,
    #[serde(default)]
    pub project_banner: Option<Asset>,
}

/// The portfolio owner's profile
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    #[serde(rename = "_id", default)]
    pub id: String,
    #[serde(rename = "fullName", default)]
    pub full_name: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub phone: Option<String>,
    #[serde(rename = "aboutMe", default)]
    pub about_me: Option<String>,
    #[serde(rename = "portfolioURL", default)]
    pub portfolio_url: Option<String>,
    #[serde(rename = "linkedInURL", default)]
    pub linked_in_url: Option<String>,
    #[serde(rename = "githubURL", default)]
    pub github_url: Option<String>,
    #[serde(rename = "instagramURL", default)]
    pub instagram_url: Option<String>,
    #[serde(rename = "twitterURL", default)]
    pub twitter_url: Option<String>,
    #[serde(rename = "facebookURL", default)]
    pub facebook_url: Option<String>,
    #[serde(default)]
    pub avatar: Option<Asset>,
    #[serde(default)]
    pub resume: Option<Asset>,
}

/// A record that can seed an edit form.
pub trait EditableEntity {
    /// Text fields by their API name; absent fields are omitted.
    fn field_map(&self) -> FieldMap;

    /// Stored assets by their file field name.
    fn asset_urls(&self) -> Vec<(&'static str, String)>;
}

fn collect_fields(pairs: &[(&str, &Option<String>)]) -> FieldMap {
    pairs
        .iter()
        .filter_map(|(name, value)| value.as_ref().map(|v| (name.to_string(), v.clone())))
        .collect()
}

impl EditableEntity for Project {
    fn field_map(&self) -> FieldMap {
        collect_fields(&[
            ("title", &self.title),
            ("description", &self.description),
            ("technologies", &self.technologies),
            ("stack", &self.stack),
            ("deployed", &self.deployed),
            ("gitRepoLink", &self.git_repo_link),
            ("projectLink", &self.project_link),
        ])
    }

    fn asset_urls(&self) -> Vec<(&'static str, String)> {
        self.project_banner
            .iter()
            .filter(|a| !a.url.is_empty())
            .map(|a| ("projectBanner", a.url.clone()))
            .collect()
    }
}

impl EditableEntity for User {
    fn field_map(&self) -> FieldMap {
        collect_fields(&[
            ("fullName", &self.full_name),
            ("email", &self.email),
            ("phone", &self.phone),
            ("aboutMe", &self.about_me),
            ("portfolioURL", &self.portfolio_url),
            ("linkedInURL", &self.linked_in_url),
            ("githubURL", &self.github_url),
            ("instagramURL", &self.instagram_url),
            ("twitterURL", &self.twitter_url),
            ("facebookURL", &self.facebook_url),
        ])
    }

    fn asset_urls(&self) -> Vec<(&'static str, String)> {
        [("avatar", &self.avatar), ("resume", &self.resume)]
            .into_iter()
            .filter_map(|(name, asset)| {
                asset
                    .as_ref()
                    .filter(|a| !a.url.is_empty())
                    .map(|a| (name, a.url.clone()))
            })
            .collect()
    }
}

/// Backend operations used by the dashboard
#[async_trait]
pub trait PortfolioApi: Send + Sync {
    async fn get_project(&self, id: &str) -> Result<Project, ApiError>;
    async fn list_projects(&self) -> Result<Vec<Project>, ApiError>;
    /// Returns the server's success message
    async fn add_project(&self, payload: Payload) -> Result<String, ApiError>;
    async fn update_project(&self, id: &str, payload: Payload) -> Result<String, ApiError>;
    async fn get_user(&self) -> Result<User, ApiError>;
    async fn update_profile(&self, payload: Payload) -> Result<String, ApiError>;
}

#[derive(Deserialize)]
struct MessageBody {
    #[serde(default)]
    message: Option<String>,
}

#[derive(Deserialize)]
struct ProjectBody {
    project: Project,
}

#[derive(Deserialize)]
struct ProjectsBody {
    projects: Vec<Project>,
}

#[derive(Deserialize)]
struct UserBody {
    user: User,
}

/// HTTP client for the portfolio backend
#[derive(Clone)]
pub struct ApiClient {
    client: reqwest::Client,
    base_url: String,
}

impl ApiClient {
    /// Create a new client from the API settings
    pub fn new(config: &ApiConfig) -> Result<Self, ApiError> {
        let mut builder = reqwest::Client::builder().user_agent(USER_AGENT);

        // No timeout unless configured: a hung request stays pending
        if let Some(secs) = config.request_timeout_secs {
            builder = builder.timeout(Duration::from_secs(secs));
        }

        Ok(Self {
            client: builder.build()?,
            base_url: config.base_url.trim_end_matches('/').to_string(),
        })
    }

    fn url(&self, path: &str) -> String {
        format!("{}/api/v1/{}", self.base_url, path)
    }

    /// Turn a response into its body, or the server's error message
    async fn read<T: DeserializeOwned>(response: reqwest::Response) -> Result<T, ApiError> {
        let status = response.status();
        let text = response.text().await?;

        if !status.is_success() {
            return Err(server_error(status, &text));
        }

        serde_json::from_str(&text).map_err(|e| ApiError::Decode(e.to_string()))
    }

    async fn send_payload(
        &self,
        method: reqwest::Method,
        path: &str,
        payload: Payload,
    ) -> Result<String, ApiError> {
        let url = self.url(path);
        tracing::info!(
            "{} {} ({} fields, {} files)",
            method,
            url,
            payload.len(),
            payload.file_count()
        );
        tracing::debug!("Fields: {}", payload.keys().collect::<Vec<_>>().join(", "));

        let form = payload.to_multipart()?;
        let response = self.client.request(method, &url).multipart(form).send().await?;
        let body: MessageBody = Self::read(response).await?;
        Ok(body.message.unwrap_or_default())
    }
}

fn server_error(status: StatusCode, body: &str) -> ApiError {
    let message = serde_json::from_str::<MessageBody>(body)
        .ok()
        .and_then(|b| b.message)
        .filter(|m| !m.is_empty())
        .unwrap_or_else(|| {
            status
                .canonical_reason()
                .unwrap_or("Request failed")
                .to_string()
        });
    ApiError::Server {
        status: status.as_u16(),
        message,
    }
}

#[async_trait]
impl PortfolioApi for ApiClient {
    async fn get_project(&self, id: &str) -> Result<Project, ApiError> {
        let url = self.url(&format!("project/get/{}", id));
        tracing::debug!("GET {}", url);
        let response = self.client.get(&url).send().await?;
        let body: ProjectBody = Self::read(response).await?;
        Ok(body.project)
    }

    async fn list_projects(&self) -> Result<Vec<Project>, ApiError> {
        let start = std::time::Instant::now();
        let url = self.url("project/getall");
        let response = self.client.get(&url).send().await?;
        let body: ProjectsBody = Self::read(response).await?;
        tracing::info!(
            "Fetched {} projects in {:.1}s",
            body.projects.len(),
            start.elapsed().as_secs_f32()
        );
        Ok(body.projects)
    }

    async fn add_project(&self, payload: Payload) -> Result<String, ApiError> {
        self.send_payload(reqwest::Method::POST, "project/add", payload)
            .await
    }

    async fn update_project(&self, id: &str, payload: Payload) -> Result<String, ApiError> {
        self.send_payload(
            reqwest::Method::PUT,
            &format!("project/update/{}", id),
            payload,
        )
        .await
    }

    async fn get_user(&self) -> Result<User, ApiError> {
        let url = self.url("user/me");
        tracing::debug!("GET {}", url);
        let response = self.client.get(&url).send().await?;
        let body: UserBody = Self::read(response).await?;
        Ok(body.user)
    }

    async fn update_profile(&self, payload: Payload) -> Result<String, ApiError> {
        self.send_payload(reqwest::Method::PUT, "user/me/profile/update", payload)
            .await
    }
}

/// In-memory backend that records every call.
#[cfg(test)]
pub mod testing {
    use std::sync::Mutex;

    use super::*;

    #[derive(Debug, Clone, PartialEq)]
    pub enum ApiCall {
        GetProject(String),
        ListProjects,
        AddProject(Payload),
        UpdateProject(String, Payload),
        GetUser,
        UpdateProfile(Payload),
    }

    pub struct RecordingApi {
        pub calls: Mutex<Vec<ApiCall>>,
        pub project: Mutex<Result<Project, String>>,
        pub projects: Mutex<Vec<Project>>,
        pub user: Mutex<Result<User, String>>,
        pub submit_result: Mutex<Result<String, String>>,
        /// Never resolve submissions
        pub hold_submissions: bool,
    }

    impl Default for RecordingApi {
        fn default() -> Self {
            Self {
                calls: Mutex::new(Vec::new()),
                project: Mutex::new(Err("Project not found".to_string())),
                projects: Mutex::new(Vec::new()),
                user: Mutex::new(Ok(User::default())),
                submit_result: Mutex::new(Ok("Saved".to_string())),
                hold_submissions: false,
            }
        }
    }

    impl RecordingApi {
        pub fn calls(&self) -> Vec<ApiCall> {
            self.calls.lock().unwrap().clone()
        }

        pub fn count(&self, pred: impl Fn(&ApiCall) -> bool) -> usize {
            self.calls.lock().unwrap().iter().filter(|c| pred(c)).count()
        }

        fn record(&self, call: ApiCall) {
            self.calls.lock().unwrap().push(call);
        }

        async fn submit(&self) -> Result<String, ApiError> {
            if self.hold_submissions {
                std::future::pending::<()>().await;
            }
            self.submit_result
                .lock()
                .unwrap()
                .clone()
                .map_err(server)
        }
    }

    fn server(message: String) -> ApiError {
        ApiError::Server {
            status: 400,
            message,
        }
    }

    #[async_trait]
    impl PortfolioApi for RecordingApi {
        async fn get_project(&self, id: &str) -> Result<Project, ApiError> {
            self.record(ApiCall::GetProject(id.to_string()));
            self.project.lock().unwrap().clone().map_err(server)
        }

        async fn list_projects(&self) -> Result<Vec<Project>, ApiError> {
            self.record(ApiCall::ListProjects);
            Ok(self.projects.lock().unwrap().clone())
        }

        async fn add_project(&self, payload: Payload) -> Result<String, ApiError> {
            self.record(ApiCall::AddProject(payload));
            self.submit().await
        }

        async fn update_project(&self, id: &str, payload: Payload) -> Result<String, ApiError> {
            self.record(ApiCall::UpdateProject(id.to_string(), payload));
            self.submit().await
        }

        async fn get_user(&self) -> Result<User, ApiError> {
            self.record(ApiCall::GetUser);
            self.user.lock().unwrap().clone().map_err(server)
        }

        async fn update_profile(&self, payload: Payload) -> Result<String, ApiError> {
            self.record(ApiCall::UpdateProfile(payload));
            self.submit().await
        }
    }
}
