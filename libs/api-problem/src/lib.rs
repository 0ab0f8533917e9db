//! RFC 7807 problem records built from runtime errors
//!
//! This crate provides pure data types and a builder for turning a runtime
//! error (message, numeric code, trace text and an optional chain of causing
//! errors) into RFC 7807 problem records, with no dependencies on HTTP
//! frameworks. It includes:
//! - the minimal problem record (`ApiProblem`)
//! - the debuggable variant with trace and flattened cause chain
//!   (`DebuggableApiProblem`)
//! - the input contract any error representation can adapt to
//!   (`ErrorSource`, with `CapturedError` as a ready-made carrier)
//!
//! ```
//! use api_problem::{CapturedError, ProblemBuilder};
//!
//! let error = CapturedError::new("no such user", 404)
//!     .caused_by(CapturedError::new("row not found", 0));
//!
//! let problem = ProblemBuilder::new().problem(&error);
//! assert_eq!(problem.status, http::StatusCode::NOT_FOUND);
//! assert_eq!(problem.detail, "no such user");
//! ```
#![cfg_attr(coverage_nightly, feature(coverage_attribute))]

pub mod builder;
pub mod problem;
pub mod source;
pub mod status;

// Re-export commonly used types
pub use builder::{ChainTooDeep, DEFAULT_MAX_CHAIN_DEPTH, ProblemBuilder};
pub use problem::{
    APPLICATION_PROBLEM_JSON, ApiProblem, CauseEntry, DebuggableApiProblem, ExceptionDetails,
    TYPE_HTTP_RFC,
};
pub use source::{CapturedError, ErrorSource};
pub use status::{CanonicalStatusTitles, StatusTitleResolver};
