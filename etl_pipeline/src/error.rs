//! Error types for pipeline stages.

/// Result type for pipeline operations
pub type EtlResult<T> = Result<T, EtlError>;

/// Pipeline stage an error originated from
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stage {
    Extract,
    Transform,
    Load,
    Config,
}

impl std::fmt::Display for Stage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            Stage::Extract => "extract",
            Stage::Transform => "transform",
            Stage::Load => "load",
            Stage::Config => "config",
        };
        f.write_str(name)
    }
}

/// Error type for pipeline operations
#[derive(Debug, thiserror::Error)]
pub enum EtlError {
    #[error("Extraction error: {0}")]
    Extraction(String),

    #[error("Transformation error: {0}")]
    Transformation(String),

    #[error("Load error: {0}")]
    Load(String),

    #[error("Configuration error: {0}")]
    Configuration(String),
}

impl EtlError {
    /// Stage that produced this error.
    pub fn stage(&self) -> Stage {
        match self {
            EtlError::Extraction(_) => Stage::Extract,
            EtlError::Transformation(_) => Stage::Transform,
            EtlError::Load(_) => Stage::Load,
            EtlError::Configuration(_) => Stage::Config,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_stage_matches_variant() {
        assert_eq!(EtlError::Extraction("x".into()).stage(), Stage::Extract);
        assert_eq!(EtlError::Transformation("x".into()).stage(), Stage::Transform);
        assert_eq!(EtlError::Load("x".into()).stage(), Stage::Load);
        assert_eq!(EtlError::Configuration("x".into()).stage(), Stage::Config);
    }

    #[test]
    fn test_display_includes_message() {
        let err = EtlError::Load("disk full".to_string());
        assert_eq!(err.to_string(), "Load error: disk full");
        assert_eq!(err.stage().to_string(), "load");
    }
}
