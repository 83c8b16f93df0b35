//! qinspire Hardware Abstraction Layer
//!
//! This crate defines the boundary between cQASM generation and the service
//! that runs the programs.
//!
//! # Overview
//!
//! - [`Executor`]: async trait that runs a program and returns a [`RawResult`]
//! - [`BackendSelector`]: chooses the remote backend type (default, id or name)
//! - [`Histogram`] and [`Weight`]: outcome histogram keyed by register value
//! - [`Counts`]: bitstring-keyed shot counts for reporting
//! - [`Job`], [`JobId`], [`JobStatus`]: remote job lifecycle
//! - [`BackendConfig`] and [`ExecutorFactory`]: construction from configuration
//!
//! # Implementing an executor
//!
//! ```rust
//! use async_trait::async_trait;
//! use qinspire_hal::{BackendSelector, Executor, HalResult, Histogram, RawResult};
//!
//! struct AlwaysZero;
//!
//! #[async_trait]
//! impl Executor for AlwaysZero {
//!     fn name(&self) -> &str {
//!         "always-zero"
//!     }
//!
//!     async fn execute(
//!         &self,
//!         _program: &str,
//!         _backend: &BackendSelector,
//!         shots: u32,
//!     ) -> HalResult<RawResult> {
//!         let histogram = Histogram::from_registers([(0u64, u64::from(shots))]);
//!         Ok(RawResult::new(histogram))
//!     }
//! }
//! ```

pub mod backend;
pub mod error;
pub mod job;
pub mod result;

pub use backend::{BackendConfig, BackendSelector, Executor, ExecutorFactory};
pub use error::{HalError, HalResult};
pub use job::{Job, JobId, JobStatus};
pub use result::{Counts, Histogram, RawResult, Weight};
