use crate::googlemaps::GeocodeResponse;
use std::fmt;
use thiserror::Error;

/// Errors that can occur during geocoding operations
#[derive(Error, Debug)]
pub enum GeocodingError {
    /// Google Maps answered, but not with a usable `OK` result.
    ///
    /// The complete response is kept so callers can inspect `status` and
    /// `error_message` without re-parsing anything.
    #[error("Geocoding failed ({kind}): {}", describe(.response))]
    Status {
        kind: StatusKind,
        response: Box<GeocodeResponse>,
    },
    #[error("Geocoding response is missing required field `{0}`")]
    MissingField(&'static str),
    #[error("HTTP request error")]
    Request(#[from] reqwest::Error),
    #[error("Error decoding JSON response")]
    Json(#[from] serde_json::Error),
}

impl GeocodingError {
    pub(crate) fn status(kind: StatusKind, response: GeocodeResponse) -> Self {
        GeocodingError::Status {
            kind,
            response: Box::new(response),
        }
    }

    /// The status category, if this error came from a non-`OK` response
    pub fn kind(&self) -> Option<StatusKind> {
        match self {
            GeocodingError::Status { kind, .. } => Some(*kind),
            _ => None,
        }
    }

    /// The raw response Google Maps returned, if this error came from one
    pub fn response(&self) -> Option<&GeocodeResponse> {
        match self {
            GeocodingError::Status { response, .. } => Some(response),
            _ => None,
        }
    }
}

fn describe(response: &GeocodeResponse) -> String {
    let status = response.status.as_deref().unwrap_or("<missing status>");
    match &response.error_message {
        Some(message) => format!("Google returned {}: {}", status, message),
        None => format!("Google returned {}", status),
    }
}

/// Failure categories of a Google Maps geocoding response
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum StatusKind {
    /// The lookup succeeded but found nothing
    ZeroResults,
    /// The daily quota or request rate was exceeded
    QueryLimit,
    /// The request was rejected, usually because of the API key
    RequestDenied,
    /// The query was malformed, e.g. an empty address
    InvalidRequest,
    /// Anything else: `UNKNOWN_ERROR`, a missing or unrecognised status,
    /// an empty document, or `OK` without results
    Unknown,
}

impl StatusKind {
    /// Map a non-`OK` status code to its failure category.
    ///
    /// `OK` itself maps to `Unknown`: it only reaches this point when the
    /// response carried no results.
    pub fn from_status(status: Option<&str>) -> StatusKind {
        match status {
            Some("ZERO_RESULTS") => StatusKind::ZeroResults,
            Some("OVER_QUERY_LIMIT") => StatusKind::QueryLimit,
            Some("REQUEST_DENIED") => StatusKind::RequestDenied,
            Some("INVALID_REQUEST") => StatusKind::InvalidRequest,
            _ => StatusKind::Unknown,
        }
    }
}

impl fmt::Display for StatusKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            StatusKind::ZeroResults => "zero results",
            StatusKind::QueryLimit => "query limit exceeded",
            StatusKind::RequestDenied => "request denied",
            StatusKind::InvalidRequest => "invalid request",
            StatusKind::Unknown => "unknown error",
        };
        f.write_str(name)
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn status_mapping_test() {
        assert_eq!(
            StatusKind::from_status(Some("ZERO_RESULTS")),
            StatusKind::ZeroResults
        );
        assert_eq!(
            StatusKind::from_status(Some("OVER_QUERY_LIMIT")),
            StatusKind::QueryLimit
        );
        assert_eq!(
            StatusKind::from_status(Some("REQUEST_DENIED")),
            StatusKind::RequestDenied
        );
        assert_eq!(
            StatusKind::from_status(Some("INVALID_REQUEST")),
            StatusKind::InvalidRequest
        );
        assert_eq!(
            StatusKind::from_status(Some("UNKNOWN_ERROR")),
            StatusKind::Unknown
        );
        assert_eq!(StatusKind::from_status(Some("OK")), StatusKind::Unknown);
        assert_eq!(
            StatusKind::from_status(Some("SOMETHING_NEW")),
            StatusKind::Unknown
        );
        assert_eq!(StatusKind::from_status(None), StatusKind::Unknown);
    }

    #[test]
    fn display_includes_error_message_test() {
        let response = GeocodeResponse {
            status: Some("REQUEST_DENIED".to_string()),
            error_message: Some("The provided API key is invalid.".to_string()),
            results: vec![],
        };
        let err = GeocodingError::status(StatusKind::RequestDenied, response);
        assert_eq!(
            err.to_string(),
            "Geocoding failed (request denied): Google returned REQUEST_DENIED: The provided API key is invalid."
        );
        assert_eq!(err.kind(), Some(StatusKind::RequestDenied));
        assert_eq!(
            err.response().and_then(|r| r.status.as_deref()),
            Some("REQUEST_DENIED")
        );
    }

    #[test]
    fn display_without_status_test() {
        let err = GeocodingError::status(StatusKind::Unknown, GeocodeResponse::default());
        assert_eq!(
            err.to_string(),
            "Geocoding failed (unknown error): Google returned <missing status>"
        );
        assert!(GeocodingError::MissingField("lat").kind().is_none());
    }
}
