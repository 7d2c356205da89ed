use std::path::PathBuf;

/// Failure to turn a rule document (or its companion code list) into a
/// [`RuleSet`](crate::rules::RuleSet).
///
/// Every variant is fatal at startup: the service refuses to run with a
/// partially loaded rule set.
#[derive(Debug, thiserror::Error)]
pub enum RulesLoadError {
    #[error("Rules file not found at {}", path.display())]
    NotFound { path: PathBuf },

    #[error("Failed to read {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("{document} is not valid JSON: {source}")]
    InvalidJson {
        document: &'static str,
        #[source]
        source: serde_json::Error,
    },

    #[error("{0}")]
    Invalid(String),
}

impl RulesLoadError {
    /// Shorthand for a structural validation failure.
    pub fn invalid(reason: impl Into<String>) -> Self {
        Self::Invalid(reason.into())
    }
}
