use crate::error::{ReceivableError, Result};

pub const MAX_RETRIES_ENV: &str = "RECEIVABLES_MAX_RETRIES";
pub const DEFAULT_MAX_RETRIES: u32 = 5;

/// Tuning for the collection workflow.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WorkflowConfig {
    /// Extra attempts after a transaction conflict before giving up.
    pub max_retries: u32,
}

impl Default for WorkflowConfig {
    fn default() -> Self {
        Self {
            max_retries: DEFAULT_MAX_RETRIES,
        }
    }
}

impl WorkflowConfig {
    pub fn from_env() -> Result<Self> {
        match std::env::var(MAX_RETRIES_ENV) {
            Ok(raw) => Self::parse_max_retries(&raw),
            Err(_) => Ok(Self::default()),
        }
    }

    fn parse_max_retries(raw: &str) -> Result<Self> {
        let max_retries = raw.trim().parse().map_err(|_| {
            ReceivableError::ValidationError(format!(
                "{MAX_RETRIES_ENV} must be a non-negative integer, got {raw:?}"
            ))
        })?;
        Ok(Self { max_retries })
    }

    pub fn with_max_retries(mut self, max_retries: u32) -> Self {
        self.max_retries = max_retries;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_max_retries() {
        assert_eq!(
            WorkflowConfig::parse_max_retries(" 7 ").unwrap().max_retries,
            7
        );
        assert!(matches!(
            WorkflowConfig::parse_max_retries("-1"),
            Err(ReceivableError::ValidationError(_))
        ));
        assert!(WorkflowConfig::parse_max_retries("many").is_err());
    }

    #[test]
    fn test_default() {
        assert_eq!(WorkflowConfig::default().max_retries, DEFAULT_MAX_RETRIES);
        assert_eq!(WorkflowConfig::default().with_max_retries(0).max_retries, 0);
    }
}
