//! Quantum Inspire REST API client.
//!
//! Covers the endpoints needed to run one cQASM program: backend types,
//! projects, assets, jobs and results.

// Response fields are deserialized for completeness even where unused.
#![allow(dead_code)]

use std::time::Duration;

use qinspire_hal::{Histogram, JobStatus};
use reqwest::{Client, RequestBuilder, StatusCode};
use serde::{Deserialize, Serialize};
use tracing::{debug, instrument};

use crate::error::{QiError, QiResult};

/// Quantum Inspire API base URL.
pub const BASE_URL: &str = "https://api.quantum-inspire.com";

/// How the client authenticates.
#[derive(Clone)]
pub enum Auth {
    /// HTTP basic authentication with the account credentials.
    Basic { email: String, password: String },
    /// API token, sent as `Authorization: token <key>`.
    Token(String),
}

impl std::fmt::Debug for Auth {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Auth::Basic { email, .. } => f
                .debug_struct("Basic")
                .field("email", email)
                .field("password", &"[REDACTED]")
                .finish(),
            Auth::Token(_) => f.debug_tuple("Token").field(&"[REDACTED]").finish(),
        }
    }
}

/// Quantum Inspire REST API client.
pub struct QiClient {
    /// HTTP client with timeouts configured.
    client: Client,
    /// API base URL (without trailing slash).
    base_url: String,
    /// Credentials.
    auth: Auth,
}

impl std::fmt::Debug for QiClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("QiClient")
            .field("base_url", &self.base_url)
            .field("auth", &self.auth)
            .finish()
    }
}

impl QiClient {
    /// Create a client for the production API.
    pub fn new(auth: Auth) -> QiResult<Self> {
        Self::with_base_url(BASE_URL, auth)
    }

    /// Create a client targeting a custom base URL.
    pub fn with_base_url(base_url: impl Into<String>, auth: Auth) -> QiResult<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(60))
            .connect_timeout(Duration::from_secs(10))
            .build()
            .map_err(QiError::Http)?;

        Ok(Self {
            client,
            base_url: base_url.into().trim_end_matches('/').to_string(),
            auth,
        })
    }

    /// API base URL.
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Resolve a relative path against the base URL. Absolute URLs, as the
    /// API hands out for results, pass through unchanged.
    pub(crate) fn url_for(&self, path: &str) -> String {
        if path.starts_with("http://") || path.starts_with("https://") {
            path.to_string()
        } else {
            format!("{}/{}", self.base_url, path.trim_start_matches('/'))
        }
    }

    fn authorize(&self, request: RequestBuilder) -> RequestBuilder {
        match &self.auth {
            Auth::Basic { email, password } => request.basic_auth(email, Some(password)),
            Auth::Token(token) => request.header("Authorization", format!("token {token}")),
        }
    }

    async fn get<T: for<'de> Deserialize<'de>>(&self, path: &str) -> QiResult<T> {
        let url = self.url_for(path);
        debug!("GET {}", url);

        let resp = self.authorize(self.client.get(&url)).send().await?;
        Self::handle_response(resp).await
    }

    async fn post<T: for<'de> Deserialize<'de>>(
        &self,
        path: &str,
        body: &impl Serialize,
    ) -> QiResult<T> {
        let url = self.url_for(path);
        debug!("POST {}", url);

        let resp = self
            .authorize(self.client.post(&url))
            .json(body)
            .send()
            .await?;
        Self::handle_response(resp).await
    }

    async fn delete(&self, path: &str) -> QiResult<()> {
        let url = self.url_for(path);
        debug!("DELETE {}", url);

        let resp = self.authorize(self.client.delete(&url)).send().await?;
        if resp.status().is_success() {
            Ok(())
        } else {
            let status = resp.status();
            let message = resp.text().await.unwrap_or_default();
            Err(Self::status_error(status, message))
        }
    }

    async fn handle_response<T: for<'de> Deserialize<'de>>(
        response: reqwest::Response,
    ) -> QiResult<T> {
        let status = response.status();

        if status.is_success() {
            let text = response.text().await?;
            Ok(serde_json::from_str(&text)?)
        } else {
            let message = response.text().await.unwrap_or_default();
            Err(Self::status_error(status, message))
        }
    }

    fn status_error(status: StatusCode, message: String) -> QiError {
        match status {
            StatusCode::NOT_FOUND => QiError::NotFound(message),
            _ => QiError::ApiError {
                status: status.as_u16(),
                message,
            },
        }
    }

    // -----------------------------------------------------------------------
    // Backend types
    // -----------------------------------------------------------------------

    /// List all backend types.
    #[instrument(skip(self))]
    pub async fn list_backend_types(&self) -> QiResult<Vec<BackendType>> {
        self.get("backendtypes/").await
    }

    /// The platform's default backend type.
    #[instrument(skip(self))]
    pub async fn default_backend_type(&self) -> QiResult<BackendType> {
        self.get("backendtypes/default/").await
    }

    /// A backend type by id.
    #[instrument(skip(self))]
    pub async fn backend_type(&self, id: u32) -> QiResult<BackendType> {
        self.get(&format!("backendtypes/{id}/")).await
    }

    /// A backend type by name.
    #[instrument(skip(self))]
    pub async fn backend_type_by_name(&self, name: &str) -> QiResult<BackendType> {
        let types = self.list_backend_types().await?;
        find_backend_type(types, name)
    }

    // -----------------------------------------------------------------------
    // Projects
    // -----------------------------------------------------------------------

    /// List the projects of the account.
    #[instrument(skip(self))]
    pub async fn list_projects(&self) -> QiResult<Vec<Project>> {
        self.get("projects/").await
    }

    /// A project by id.
    #[instrument(skip(self))]
    pub async fn project(&self, id: u64) -> QiResult<Project> {
        self.get(&format!("projects/{id}/")).await
    }

    /// The first project with the given name, if any.
    #[instrument(skip(self))]
    pub async fn project_by_name(&self, name: &str) -> QiResult<Option<Project>> {
        let projects = self.list_projects().await?;
        Ok(projects.into_iter().find(|p| p.name == name))
    }

    /// Create a project bound to a backend type.
    #[instrument(skip(self, backend_type), fields(backend_type = %backend_type.name))]
    pub async fn create_project(
        &self,
        name: &str,
        default_number_of_shots: u32,
        backend_type: &BackendType,
    ) -> QiResult<Project> {
        let body = CreateProject {
            name,
            default_number_of_shots,
            backend_type: &backend_type.url,
        };
        self.post("projects/", &body).await
    }

    /// Delete a project with its assets and jobs.
    #[instrument(skip(self))]
    pub async fn delete_project(&self, id: u64) -> QiResult<()> {
        self.delete(&format!("projects/{id}/")).await
    }

    // -----------------------------------------------------------------------
    // Assets, jobs and results
    // -----------------------------------------------------------------------

    /// Upload a program as a `text/plain` asset of a project.
    #[instrument(skip(self, project, content), fields(project = project.id))]
    pub async fn create_asset(
        &self,
        name: &str,
        project: &Project,
        content: &str,
    ) -> QiResult<Asset> {
        let body = CreateAsset {
            name,
            project: &project.url,
            content_type: "text/plain",
            content,
        };
        self.post("assets/", &body).await
    }

    /// Create a job that runs an asset.
    #[instrument(skip(self, asset, project), fields(asset = asset.id))]
    pub async fn create_job(
        &self,
        name: &str,
        asset: &Asset,
        project: &Project,
        number_of_shots: u32,
    ) -> QiResult<QiJob> {
        let body = CreateJob {
            status: QiJobStatus::New,
            name,
            input: &asset.url,
            backend_type: &project.backend_type,
            number_of_shots,
            full_state_projection: false,
        };
        self.post("jobs/", &body).await
    }

    /// A job by id.
    #[instrument(skip(self))]
    pub async fn job(&self, id: u64) -> QiResult<QiJob> {
        self.get(&format!("jobs/{id}/")).await
    }

    /// Fetch the result a completed job points at.
    #[instrument(skip(self))]
    pub async fn result(&self, url: &str) -> QiResult<JobResult> {
        self.get(url).await
    }
}

/// Pick the backend type called `name` from a listing.
pub(crate) fn find_backend_type(types: Vec<BackendType>, name: &str) -> QiResult<BackendType> {
    types
        .into_iter()
        .find(|t| t.name == name)
        .ok_or_else(|| QiError::UnknownBackendType(name.to_string()))
}

// ---------------------------------------------------------------------------
// Request / response serde types
// ---------------------------------------------------------------------------

/// A backend type: a simulator or hardware target jobs can run on.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BackendType {
    /// Resource URL, used to reference the type in other requests.
    pub url: String,
    /// Display name.
    pub name: String,
    /// Whether the type is real hardware.
    #[serde(default)]
    pub is_hardware_backend: bool,
    /// Maximum qubit count.
    #[serde(default)]
    pub number_of_qubits: u32,
    /// Free-form description.
    #[serde(default)]
    pub description: String,
    /// Whether the account may use it.
    #[serde(default)]
    pub is_allowed: bool,
}

impl BackendType {
    /// Numeric id parsed from the resource URL (`.../backendtypes/2/`).
    pub fn id(&self) -> Option<u32> {
        self.url
            .trim_end_matches('/')
            .rsplit('/')
            .next()
            .and_then(|segment| segment.parse().ok())
    }
}

/// A project owning assets and jobs.
#[derive(Debug, Clone, Deserialize)]
pub struct Project {
    pub url: String,
    pub id: u64,
    pub name: String,
    #[serde(default)]
    pub owner: Option<String>,
    #[serde(default)]
    pub assets: Option<String>,
    pub backend_type: String,
    #[serde(default, alias = "number_of_shots")]
    pub default_number_of_shots: u32,
}

/// Body for `POST projects/`.
#[derive(Debug, Serialize)]
struct CreateProject<'a> {
    name: &'a str,
    default_number_of_shots: u32,
    backend_type: &'a str,
}

/// An uploaded program.
#[derive(Debug, Clone, Deserialize)]
pub struct Asset {
    pub url: String,
    pub id: u64,
    pub name: String,
    #[serde(rename = "contentType", default)]
    pub content_type: String,
    #[serde(default)]
    pub content: String,
    #[serde(default)]
    pub project: Option<String>,
}

/// Body for `POST assets/`.
#[derive(Debug, Serialize)]
struct CreateAsset<'a> {
    name: &'a str,
    project: &'a str,
    #[serde(rename = "contentType")]
    content_type: &'static str,
    content: &'a str,
}

/// Job status as the platform reports it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum QiJobStatus {
    New,
    Running,
    Complete,
    Failed,
    Cancelled,
}

impl QiJobStatus {
    /// The matching lifecycle status.
    pub fn to_hal(self) -> JobStatus {
        match self {
            QiJobStatus::New => JobStatus::Queued,
            QiJobStatus::Running => JobStatus::Running,
            QiJobStatus::Complete => JobStatus::Completed,
            QiJobStatus::Failed => JobStatus::Failed,
            QiJobStatus::Cancelled => JobStatus::Cancelled,
        }
    }
}

/// A job running an asset on a backend type.
#[derive(Debug, Clone, Deserialize)]
pub struct QiJob {
    pub url: String,
    pub id: u64,
    pub name: String,
    pub status: QiJobStatus,
    #[serde(default)]
    pub input: String,
    #[serde(default)]
    pub backend_type: String,
    /// URL of the result, empty until the job completes.
    #[serde(default)]
    pub results: String,
    #[serde(default)]
    pub number_of_shots: u32,
}

/// Body for `POST jobs/`.
#[derive(Debug, Serialize)]
struct CreateJob<'a> {
    status: QiJobStatus,
    name: &'a str,
    input: &'a str,
    backend_type: &'a str,
    number_of_shots: u32,
    full_state_projection: bool,
}

/// Result of a completed job.
#[derive(Debug, Clone, Deserialize)]
pub struct JobResult {
    #[serde(default)]
    pub id: Option<u64>,
    /// Register value to fraction of shots.
    #[serde(default)]
    pub histogram: Histogram,
    /// Raw simulator output, useful when the histogram is empty.
    #[serde(default)]
    pub raw_text: String,
    #[serde(default)]
    pub number_of_qubits: Option<u32>,
    #[serde(default)]
    pub execution_time_in_seconds: Option<f64>,
}
