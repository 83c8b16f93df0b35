//! qinspire adapter for the Quantum Inspire platform
//!
//! Implements [`Executor`] on top of the Quantum Inspire REST API
//! (`https://api.quantum-inspire.com`).
//!
//! # Execution flow
//!
//! | Step | Endpoint | Notes |
//! |------|----------|-------|
//! | Resolve backend type | `backendtypes/default/`, `backendtypes/{id}/`, `backendtypes/` | By default, id or name |
//! | Project | `projects/` | Named project reused, else `qi-sdk-project-<uuid>` |
//! | Upload program | `assets/` | `text/plain` asset |
//! | Start job | `jobs/` | `qi-sdk-job-<uuid>` with the shot count |
//! | Poll | `jobs/{id}/` | Until `COMPLETE`, `FAILED` or `CANCELLED` |
//! | Fetch result | job `results` URL | Histogram of register value to fraction |
//! | Clean up | `projects/{id}/` | Temporary projects only |
//!
//! # Authentication
//!
//! Either an API token or the account email and password:
//!
//! ```bash
//! export QI_TOKEN="your-api-token"
//! # or
//! export QI_EMAIL="you@example.com" QI_PASSWORD="..."
//! ```
//!
//! # Example
//!
//! ```ignore
//! use qinspire_adapter_qi::QiExecutor;
//! use qinspire_hal::{BackendConfig, BackendSelector, Executor, ExecutorFactory};
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let config = BackendConfig::new("quantum-inspire").with_token(std::env::var("QI_TOKEN")?);
//!     let executor = QiExecutor::from_config(config)?;
//!
//!     let program = "version 1.0\nqubits 2\nh q[0]\nCNOT q[0], q[1]\nmeasure q[0]\nmeasure q[1]\n";
//!     let result = executor.execute(program, &BackendSelector::Default, 1024).await?;
//!     println!("{:?}", result.histogram);
//!     Ok(())
//! }
//! ```

mod api;
mod backend;
mod error;

pub use api::{Asset, Auth, BASE_URL, BackendType, JobResult, Project, QiClient, QiJob, QiJobStatus};
pub use backend::{DEFAULT_COLLECT_TRIES, DEFAULT_RETRY_DELAY, QiExecutor};
pub use error::{QiError, QiResult};

// Re-export common types for convenience.
pub use qinspire_hal::{BackendConfig, Executor, ExecutorFactory};
