//! Problem construction from runtime errors.

use std::borrow::Cow;

use http::StatusCode;
use tracing::{debug, warn};

use crate::problem::{
    ApiProblem, CauseEntry, DebuggableApiProblem, ExceptionDetails, TYPE_HTTP_RFC,
};
use crate::source::ErrorSource;
use crate::status::{CanonicalStatusTitles, StatusTitleResolver};

/// Default bound on causal-chain traversal. The walk aborts once a chain
/// would produce more entries than this, which also catches cyclic chains.
pub const DEFAULT_MAX_CHAIN_DEPTH: usize = 50;

/// A causal chain exceeded the configured depth bound, which indicates a
/// cyclic or malformed cause chain. No partial record is produced.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
#[error("causal chain exceeded {max_depth} entries (cyclic or malformed cause chain)")]
pub struct ChainTooDeep {
    /// The bound that was exceeded.
    pub max_depth: usize,
}

/// Builds RFC 7807 problem records from [`ErrorSource`] values.
///
/// Construction is pure and side-effect free; a builder can be shared
/// freely across threads since it only holds the resolver and the chain
/// bound.
#[derive(Debug, Clone)]
#[must_use]
pub struct ProblemBuilder<R = CanonicalStatusTitles> {
    resolver: R,
    max_chain_depth: usize,
}

impl ProblemBuilder {
    /// Builder with the canonical title resolver and the default chain bound.
    pub fn new() -> Self {
        Self {
            resolver: CanonicalStatusTitles,
            max_chain_depth: DEFAULT_MAX_CHAIN_DEPTH,
        }
    }
}

impl Default for ProblemBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl<R: StatusTitleResolver> ProblemBuilder<R> {
    /// Swap in a different status title resolver.
    pub fn with_resolver<R2: StatusTitleResolver>(self, resolver: R2) -> ProblemBuilder<R2> {
        ProblemBuilder {
            resolver,
            max_chain_depth: self.max_chain_depth,
        }
    }

    /// Override the causal-chain traversal bound.
    pub fn with_max_chain_depth(mut self, max_depth: usize) -> Self {
        self.max_chain_depth = max_depth;
        self
    }

    /// Build the minimal problem record for `error`.
    ///
    /// The error's code becomes the record's status when the resolver
    /// recognizes it as a valid HTTP status; any other code (zero,
    /// negative, out of range) silently defaults to 500. The message is
    /// carried into `detail` verbatim.
    pub fn problem(&self, error: &dyn ErrorSource) -> ApiProblem {
        let status = self.derive_status(error.code());
        ApiProblem {
            status,
            type_url: TYPE_HTTP_RFC.to_owned(),
            title: self.title_for(status),
            detail: error.message().to_owned(),
        }
    }

    /// Build the debuggable problem record for `error`: the minimal record
    /// plus an `exception` section with the raw code, the trace text and
    /// the flattened causal chain.
    ///
    /// # Errors
    ///
    /// Returns [`ChainTooDeep`] when the cause chain exceeds the configured
    /// bound, which indicates a cyclic or malformed chain.
    pub fn debuggable_problem(
        &self,
        error: &dyn ErrorSource,
    ) -> Result<DebuggableApiProblem, ChainTooDeep> {
        let previous = flatten(error.cause(), self.max_chain_depth)?;
        let base = self.problem(error);
        Ok(DebuggableApiProblem {
            status: base.status,
            type_url: base.type_url,
            title: base.title,
            detail: base.detail,
            exception: ExceptionDetails {
                message: error.message().to_owned(),
                code: error.code(),
                trace: error.trace().to_owned(),
                previous,
            },
        })
    }

    fn derive_status(&self, code: i64) -> StatusCode {
        let recognized = u16::try_from(code)
            .ok()
            .filter(|&c| self.resolver.title_for(c).is_some())
            .and_then(|c| StatusCode::from_u16(c).ok());
        match recognized {
            Some(status) => status,
            None => {
                if code != 0 {
                    debug!(code, "error code is not a recognized HTTP status, defaulting to 500");
                }
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }

    fn title_for(&self, status: StatusCode) -> String {
        // The derived status is always resolver-recognized or 500, which the
        // resolver contract guarantees a mapping for; "Unknown" only shows
        // up if a custom resolver breaks that contract.
        self.resolver
            .title_for(status.as_u16())
            .map_or_else(|| "Unknown".to_owned(), Cow::into_owned)
    }
}

/// Linearize a cause chain into flat entries, immediate cause first.
///
/// Iterative on purpose: the bound check stays explicit and a hostile chain
/// cannot grow the call stack.
fn flatten(
    start: Option<&dyn ErrorSource>,
    max_depth: usize,
) -> Result<Vec<CauseEntry>, ChainTooDeep> {
    let mut entries = Vec::new();
    let mut current = start;
    while let Some(err) = current {
        if entries.len() == max_depth {
            warn!(max_depth, "aborting causal chain walk, cyclic or excessively deep cause chain");
            return Err(ChainTooDeep { max_depth });
        }
        entries.push(CauseEntry {
            message: err.message().to_owned(),
            code: err.code(),
            trace: err.trace().to_owned(),
        });
        current = err.cause();
    }
    Ok(entries)
}
