//! Quantum Inspire executor implementation.

use std::time::Duration;

use async_trait::async_trait;
use tracing::{debug, info, instrument, warn};

use qinspire_hal::{
    BackendConfig, BackendSelector, Executor, ExecutorFactory, HalError, HalResult, Job, JobId,
    RawResult,
};

use crate::api::{Auth, BackendType, BASE_URL, Project, QiClient, QiJob, QiJobStatus};
use crate::error::{QiError, QiResult};

/// Default number of status polls before giving up on a job.
pub const DEFAULT_COLLECT_TRIES: u32 = 60;

/// Default delay between status polls.
pub const DEFAULT_RETRY_DELAY: Duration = Duration::from_secs(1);

/// Runs cQASM programs on Quantum Inspire.
///
/// Each execution uploads the program as an asset, starts a job on the
/// selected backend type and polls it until completion. Without a
/// configured project name a temporary project is created per execution
/// and deleted afterwards.
///
/// # Example
///
/// ```ignore
/// use qinspire_adapter_qi::{Auth, QiExecutor};
/// use qinspire_hal::{BackendSelector, Executor};
///
/// let executor = QiExecutor::new(Auth::Token(std::env::var("QI_TOKEN")?))?;
/// let result = executor
///     .execute("version 1.0\nqubits 1\nh q[0]\n", &BackendSelector::Default, 1024)
///     .await?;
/// ```
#[derive(Debug)]
pub struct QiExecutor {
    client: QiClient,
    /// Named project reused across executions.
    project_name: Option<String>,
    collect_tries: u32,
    retry_delay: Duration,
}

impl QiExecutor {
    /// Executor against the production API.
    pub fn new(auth: Auth) -> QiResult<Self> {
        Ok(Self::with_client(QiClient::new(auth)?))
    }

    /// Executor around an existing client.
    pub fn with_client(client: QiClient) -> Self {
        Self {
            client,
            project_name: None,
            collect_tries: DEFAULT_COLLECT_TRIES,
            retry_delay: DEFAULT_RETRY_DELAY,
        }
    }

    /// Run every job inside the named project, creating it on first use.
    #[must_use]
    pub fn with_project(mut self, name: impl Into<String>) -> Self {
        self.project_name = Some(name.into());
        self
    }

    /// Number of status polls before a job times out.
    #[must_use]
    pub fn with_collect_tries(mut self, tries: u32) -> Self {
        self.collect_tries = tries.max(1);
        self
    }

    /// Delay between status polls.
    #[must_use]
    pub fn with_retry_delay(mut self, delay: Duration) -> Self {
        self.retry_delay = delay;
        self
    }

    /// The underlying REST client.
    pub fn client(&self) -> &QiClient {
        &self.client
    }

    /// Configured project name, if any.
    pub fn project_name(&self) -> Option<&str> {
        self.project_name.as_deref()
    }

    /// All backend types visible to the account.
    pub async fn list_backend_types(&self) -> QiResult<Vec<BackendType>> {
        self.client.list_backend_types().await
    }

    /// Look up the backend type a selector refers to.
    pub async fn resolve_backend_type(&self, selector: &BackendSelector) -> QiResult<BackendType> {
        match selector {
            BackendSelector::Default => self.client.default_backend_type().await,
            BackendSelector::Id(id) => self.client.backend_type(*id).await,
            BackendSelector::Name(name) => self.client.backend_type_by_name(name).await,
        }
    }

    /// The project to run in and whether it is temporary.
    async fn open_project(&self, backend_type: &BackendType, shots: u32) -> QiResult<(Project, bool)> {
        if let Some(name) = &self.project_name {
            if let Some(project) = self.client.project_by_name(name).await? {
                debug!("Reusing project {} ({})", project.name, project.id);
                return Ok((project, false));
            }
            let project = self.client.create_project(name, shots, backend_type).await?;
            info!("Created project {} ({})", project.name, project.id);
            return Ok((project, false));
        }

        let name = format!("qi-sdk-project-{}", uuid::Uuid::new_v4());
        let project = self.client.create_project(&name, shots, backend_type).await?;
        debug!("Created temporary project {} ({})", project.name, project.id);
        Ok((project, true))
    }

    /// Poll the job behind `record` until it completes, advancing the
    /// record with every observed status.
    async fn wait_for_completed_job(&self, record: &mut Job) -> QiResult<QiJob> {
        let mut attempt = 0;
        loop {
            attempt += 1;
            let current = self.client.job(record.id.0).await?;
            if record.advance(current.status.to_hal()) {
                debug!("Job {} is now {}", record.id, record.status);
            }
            match poll_outcome(record.id.0, current.status, attempt, self.collect_tries)? {
                PollOutcome::Complete => return Ok(current),
                PollOutcome::Wait => {
                    debug!(
                        "Job {} still {} (poll {}/{})",
                        record.id, record.status, attempt, self.collect_tries
                    );
                    tokio::time::sleep(self.retry_delay).await;
                }
            }
        }
    }

    /// Asset, job, polling and result for one program inside `project`.
    async fn run_in_project(
        &self,
        project: &Project,
        backend_type: &BackendType,
        program: &str,
        shots: u32,
    ) -> QiResult<RawResult> {
        let job_name = format!("qi-sdk-job-{}", uuid::Uuid::new_v4());
        let asset = self.client.create_asset(&job_name, project, program).await?;
        let created = self
            .client
            .create_job(&job_name, &asset, project, shots)
            .await?;
        info!("Quantum Inspire job submitted: {} ({})", created.name, created.id);

        let mut record = Job::submitted(JobId(created.id), &backend_type.name, shots);
        record.advance(created.status.to_hal());

        let finished = self.wait_for_completed_job(&mut record).await?;
        if let Some(elapsed) = record.elapsed() {
            info!("Job {} completed in {} ms", record.id, elapsed.num_milliseconds());
        }
        let result = self.client.result(&finished.results).await?;

        let mut raw = RawResult::new(result.histogram)
            .with_raw_text(result.raw_text)
            .with_job(record);
        if let Some(n) = result.number_of_qubits {
            raw = raw.with_number_of_qubits(n);
        }
        Ok(raw)
    }
}

/// What to do after one status poll.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum PollOutcome {
    /// The job is complete and its result can be fetched.
    Complete,
    /// Sleep and poll again.
    Wait,
}

/// Decide on poll `attempt` of `tries` given the reported status.
///
/// A job still new or running on the last attempt times out.
fn poll_outcome(
    job_id: u64,
    status: QiJobStatus,
    attempt: u32,
    tries: u32,
) -> QiResult<PollOutcome> {
    match status {
        QiJobStatus::Complete => Ok(PollOutcome::Complete),
        QiJobStatus::Failed => Err(QiError::JobFailed(job_id.to_string())),
        QiJobStatus::Cancelled => Err(QiError::JobCancelled(job_id.to_string())),
        QiJobStatus::New | QiJobStatus::Running if attempt >= tries => {
            Err(QiError::Timeout(job_id.to_string()))
        }
        QiJobStatus::New | QiJobStatus::Running => Ok(PollOutcome::Wait),
    }
}

#[async_trait]
impl Executor for QiExecutor {
    fn name(&self) -> &str {
        "quantum-inspire"
    }

    #[instrument(skip(self, program), fields(program_len = program.len()))]
    async fn execute(
        &self,
        program: &str,
        backend: &BackendSelector,
        shots: u32,
    ) -> HalResult<RawResult> {
        if shots == 0 {
            return Err(HalError::InvalidShots(
                "Shot count must be at least 1".into(),
            ));
        }

        let backend_type = self.resolve_backend_type(backend).await?;
        info!(
            "Executing on Quantum Inspire backend type {}: {} shots",
            backend_type.name, shots
        );

        let (project, temporary) = self.open_project(&backend_type, shots).await?;
        let outcome = self
            .run_in_project(&project, &backend_type, program, shots)
            .await;

        if temporary {
            if let Err(e) = self.client.delete_project(project.id).await {
                warn!("Failed to delete temporary project {}: {}", project.id, e);
            }
        }

        Ok(outcome?)
    }
}

impl ExecutorFactory for QiExecutor {
    /// Reads `endpoint`, `token`, and the extras `email`, `password`,
    /// `project`, `collect_tries` and `retry_delay_ms`.
    fn from_config(config: BackendConfig) -> HalResult<Self> {
        let auth = auth_from_config(&config)?;
        let base_url = config.endpoint.as_deref().unwrap_or(BASE_URL);
        let client = QiClient::with_base_url(base_url, auth)?;

        let mut executor = Self::with_client(client);
        if let Some(project) = config.extra_str("project") {
            executor = executor.with_project(project);
        }
        if let Some(tries) = config.extra_u64("collect_tries") {
            executor = executor.with_collect_tries(u32::try_from(tries).unwrap_or(u32::MAX));
        }
        if let Some(ms) = config.extra_u64("retry_delay_ms") {
            executor = executor.with_retry_delay(Duration::from_millis(ms));
        }
        Ok(executor)
    }
}

/// Token wins over email/password.
fn auth_from_config(config: &BackendConfig) -> QiResult<Auth> {
    if let Some(token) = config.token.as_deref().filter(|t| !t.is_empty()) {
        return Ok(Auth::Token(token.to_string()));
    }
    match (config.extra_str("email"), config.extra_str("password")) {
        (Some(email), Some(password)) => Ok(Auth::Basic {
            email: email.to_string(),
            password: password.to_string(),
        }),
        _ => Err(QiError::MissingCredentials),
    }
}
