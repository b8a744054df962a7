use super::types::ScanError;

#[derive(Debug, Clone)]
pub struct ErrorClassification {
    pub error_type: &'static str,
    /// The page could not be obtained. Recovered at the row or track that
    /// asked for it, never escalated past the coordinator.
    pub page_unavailable: bool,
}

impl ScanError {
    /// Classify this error for structured logging and exit-code selection.
    pub fn classify(&self) -> ErrorClassification {
        match self {
            ScanError::Fetch { .. } => ErrorClassification {
                error_type: "FetchError",
                page_unavailable: true,
            },
            ScanError::HttpStatus { .. } => ErrorClassification {
                error_type: "HttpStatusError",
                page_unavailable: true,
            },
            ScanError::InvalidUrl(_) => ErrorClassification {
                error_type: "InvalidUrlError",
                page_unavailable: true,
            },

            ScanError::Config(_) => ErrorClassification {
                error_type: "ConfigError",
                page_unavailable: false,
            },
            ScanError::Report(_) => ErrorClassification {
                error_type: "ReportError",
                page_unavailable: false,
            },
            ScanError::Cancelled => ErrorClassification {
                error_type: "CancelledError",
                page_unavailable: false,
            },
            ScanError::Io(_) => ErrorClassification {
                error_type: "IoError",
                page_unavailable: false,
            },
            ScanError::Json(_) => ErrorClassification {
                error_type: "JsonError",
                page_unavailable: false,
            },
            ScanError::Yaml(_) => ErrorClassification {
                error_type: "YamlError",
                page_unavailable: false,
            },
            ScanError::Internal(_) => ErrorClassification {
                error_type: "InternalError",
                page_unavailable: false,
            },
        }
    }

    /// Process exit code for an error that reached `main`.
    pub fn exit_code(&self) -> i32 {
        match self {
            ScanError::Config(_) | ScanError::Yaml(_) => 2,
            e if e.classify().page_unavailable => 3,
            _ => 1,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fetch_error_is_page_unavailable() {
        let err = ScanError::fetch("http://atw/track/1", "connection refused");
        let class = err.classify();
        assert!(class.page_unavailable);
        assert_eq!(class.error_type, "FetchError");
    }

    #[test]
    fn test_http_status_is_page_unavailable() {
        let err = ScanError::HttpStatus { url: "http://atw/x".into(), status: 404 };
        let class = err.classify();
        assert!(class.page_unavailable);
        assert_eq!(class.error_type, "HttpStatusError");
    }

    #[test]
    fn test_invalid_url_is_page_unavailable() {
        let err = ScanError::InvalidUrl("not a url".into());
        assert!(err.classify().page_unavailable);
    }

    #[test]
    fn test_config_error_not_page_unavailable() {
        let err = ScanError::Config("no tracks".into());
        let class = err.classify();
        assert!(!class.page_unavailable);
        assert_eq!(class.error_type, "ConfigError");
    }

    #[test]
    fn test_exit_codes() {
        assert_eq!(ScanError::Config("x".into()).exit_code(), 2);
        assert_eq!(ScanError::fetch("http://atw", "down").exit_code(), 3);
        assert_eq!(ScanError::Internal("x".into()).exit_code(), 1);
        assert_eq!(ScanError::Report("x".into()).exit_code(), 1);
    }

    #[test]
    fn test_fetch_error_display_names_url() {
        let err = ScanError::fetch("http://atw/track/1", "timed out");
        assert_eq!(err.to_string(), "Fetch error for http://atw/track/1: timed out");
    }
}
