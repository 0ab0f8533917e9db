//! RFC 7807 problem records (pure data model, no HTTP framework dependencies)

use http::StatusCode;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// Content type for Problem Details as per RFC 7807.
pub const APPLICATION_PROBLEM_JSON: &str = "application/problem+json";

/// Problem `type` URI for problems that are fully described by the status
/// code sections of the HTTP RFC. Constant across all records produced by
/// this crate; never derived per error.
pub const TYPE_HTTP_RFC: &str = "http://www.w3.org/Protocols/rfc2616/rfc2616-sec10.html";

/// Custom serializer for `StatusCode` to u16
#[allow(clippy::trivially_copy_pass_by_ref)] // serde requires &T signature
fn serialize_status_code<S>(status: &StatusCode, serializer: S) -> Result<S::Ok, S::Error>
where
    S: Serializer,
{
    serializer.serialize_u16(status.as_u16())
}

/// Custom deserializer for `StatusCode` from u16
fn deserialize_status_code<'de, D>(deserializer: D) -> Result<StatusCode, D::Error>
where
    D: Deserializer<'de>,
{
    let code = u16::deserialize(deserializer)?;
    StatusCode::from_u16(code).map_err(serde::de::Error::custom)
}

/// Minimal RFC 7807 problem record.
///
/// Serializes with keys exactly `status, type, title, detail`, in that
/// order. Built fresh per conversion call and immutable afterwards.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[must_use]
pub struct ApiProblem {
    /// The HTTP status code for this occurrence of the problem.
    /// Serializes as u16 for RFC 7807 compatibility.
    #[serde(
        serialize_with = "serialize_status_code",
        deserialize_with = "deserialize_status_code"
    )]
    pub status: StatusCode,
    /// A URI reference that identifies the problem type.
    /// Always [`TYPE_HTTP_RFC`] for records built by this crate.
    #[serde(rename = "type")]
    pub type_url: String,
    /// A short, human-readable summary of the problem type.
    pub title: String,
    /// The source error's message, verbatim. No truncation, no escaping;
    /// sanitization is the transport layer's concern.
    pub detail: String,
}

/// Debuggable variant of [`ApiProblem`], extended with an `exception`
/// section carrying the raw error code, trace text and the flattened
/// causal chain. Intended for non-production diagnostics only.
///
/// The two variants are distinct types so the key-set contract is enforced
/// statically: presence of the `exception` key is what distinguishes them
/// on the wire, and neither type has optional fields.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[must_use]
pub struct DebuggableApiProblem {
    /// The HTTP status code for this occurrence of the problem.
    #[serde(
        serialize_with = "serialize_status_code",
        deserialize_with = "deserialize_status_code"
    )]
    pub status: StatusCode,
    /// A URI reference that identifies the problem type.
    #[serde(rename = "type")]
    pub type_url: String,
    /// A short, human-readable summary of the problem type.
    pub title: String,
    /// The source error's message, verbatim.
    pub detail: String,
    /// Diagnostic details of the source error.
    pub exception: ExceptionDetails,
}

/// Diagnostic section of a [`DebuggableApiProblem`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExceptionDetails {
    /// Root error's message. Duplicates `detail` by contract.
    pub message: String,
    /// Root error's raw code. Unlike `status` this is never normalized;
    /// it may be 0, negative, or differ from the derived status.
    pub code: i64,
    /// Root error's trace text, opaque.
    pub trace: String,
    /// Flattened causal chain: immediate cause first, deepest cause last.
    /// Empty when the root error has no cause.
    pub previous: Vec<CauseEntry>,
}

/// One flattened entry of a causal chain. Flat by design; the chain is
/// linearized into a sequence rather than nested records.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CauseEntry {
    /// The causing error's message.
    pub message: String,
    /// The causing error's raw code (not an HTTP status).
    pub code: i64,
    /// The causing error's trace text.
    pub trace: String,
}

impl From<DebuggableApiProblem> for ApiProblem {
    /// Drops the `exception` section, leaving the minimal record.
    fn from(p: DebuggableApiProblem) -> Self {
        Self {
            status: p.status,
            type_url: p.type_url,
            title: p.title,
            detail: p.detail,
        }
    }
}

#[cfg(test)]
#[cfg_attr(coverage_nightly, coverage(off))]
mod tests {
    use super::*;

    fn sample_problem() -> ApiProblem {
        ApiProblem {
            status: StatusCode::NOT_FOUND,
            type_url: TYPE_HTTP_RFC.to_owned(),
            title: "Not Found".to_owned(),
            detail: "no such user".to_owned(),
        }
    }

    #[test]
    fn problem_serializes_keys_in_contract_order() {
        let json = serde_json::to_string(&sample_problem()).unwrap();
        assert_eq!(
            json,
            r#"{"status":404,"type":"http://www.w3.org/Protocols/rfc2616/rfc2616-sec10.html","title":"Not Found","detail":"no such user"}"#
        );
    }

    #[test]
    fn problem_deserializes_status_from_u16() {
        let json = r#"{"status":404,"type":"about:blank","title":"Not Found","detail":"x"}"#;
        let p: ApiProblem = serde_json::from_str(json).unwrap();
        assert_eq!(p.status, StatusCode::NOT_FOUND);
    }

    #[test]
    fn problem_round_trips_through_json() {
        let p = sample_problem();
        let json = serde_json::to_string(&p).unwrap();
        let back: ApiProblem = serde_json::from_str(&json).unwrap();
        assert_eq!(back, p);
    }

    #[test]
    fn debuggable_problem_serializes_exception_section_last() {
        let p = DebuggableApiProblem {
            status: StatusCode::INTERNAL_SERVER_ERROR,
            type_url: TYPE_HTTP_RFC.to_owned(),
            title: "Internal Server Error".to_owned(),
            detail: "message".to_owned(),
            exception: ExceptionDetails {
                message: "message".to_owned(),
                code: 500,
                trace: "#0 main".to_owned(),
                previous: vec![],
            },
        };
        let json = serde_json::to_string(&p).unwrap();
        assert_eq!(
            json,
            r##"{"status":500,"type":"http://www.w3.org/Protocols/rfc2616/rfc2616-sec10.html","title":"Internal Server Error","detail":"message","exception":{"message":"message","code":500,"trace":"#0 main","previous":[]}}"##
        );
    }

    #[test]
    fn cause_entries_serialize_flat() {
        let entry = CauseEntry {
            message: "previous".to_owned(),
            code: 2,
            trace: "t1".to_owned(),
        };
        let json = serde_json::to_string(&entry).unwrap();
        assert_eq!(json, r#"{"message":"previous","code":2,"trace":"t1"}"#);
    }

    #[test]
    fn debuggable_problem_downgrades_to_plain_record() {
        let p = DebuggableApiProblem {
            status: StatusCode::NOT_FOUND,
            type_url: TYPE_HTTP_RFC.to_owned(),
            title: "Not Found".to_owned(),
            detail: "no such user".to_owned(),
            exception: ExceptionDetails {
                message: "no such user".to_owned(),
                code: 404,
                trace: String::new(),
                previous: vec![],
            },
        };
        assert_eq!(ApiProblem::from(p), sample_problem());
    }
}
