//! HTTP status to title resolution.

use std::borrow::Cow;

use http::StatusCode;

/// Maps HTTP status codes to human-readable titles.
///
/// `title_for` returns `Some` exactly for the codes the resolver recognizes
/// as valid HTTP statuses; the builder uses that signal for its 500
/// defaulting policy. Implementations must be total over the conventional
/// 1xx-5xx status space and must map 500.
pub trait StatusTitleResolver {
    /// Title for a recognized HTTP status code, `None` otherwise.
    fn title_for(&self, status: u16) -> Option<Cow<'static, str>>;
}

/// Resolver backed by the canonical reason phrases of the [`http`] crate.
#[derive(Debug, Clone, Copy, Default)]
pub struct CanonicalStatusTitles;

impl StatusTitleResolver for CanonicalStatusTitles {
    fn title_for(&self, status: u16) -> Option<Cow<'static, str>> {
        StatusCode::from_u16(status)
            .ok()
            .and_then(|status| status.canonical_reason())
            .map(Cow::Borrowed)
    }
}

#[cfg(test)]
#[cfg_attr(coverage_nightly, coverage(off))]
mod tests {
    use super::*;

    #[test]
    fn resolves_assigned_status_codes() {
        let titles = CanonicalStatusTitles;
        assert_eq!(titles.title_for(200).unwrap(), "OK");
        assert_eq!(titles.title_for(404).unwrap(), "Not Found");
        assert_eq!(titles.title_for(418).unwrap(), "I'm a teapot");
        assert_eq!(titles.title_for(503).unwrap(), "Service Unavailable");
    }

    #[test]
    fn guarantees_a_title_for_500() {
        assert_eq!(
            CanonicalStatusTitles.title_for(500).unwrap(),
            "Internal Server Error"
        );
    }

    #[test]
    fn rejects_codes_outside_the_status_space() {
        let titles = CanonicalStatusTitles;
        assert!(titles.title_for(0).is_none());
        assert!(titles.title_for(42).is_none());
        assert!(titles.title_for(1000).is_none());
    }

    #[test]
    fn rejects_unassigned_codes_inside_the_status_space() {
        // Parseable as a StatusCode but has no canonical reason phrase.
        assert!(CanonicalStatusTitles.title_for(599).is_none());
    }
}
