use super::receivable::{Amount, ReceivableId, parse_decimal};
use crate::error::{ReceivableError, Result};
use rust_decimal::Decimal;
use serde::Serialize;

/// A single payment collection against one receivable. Never persisted.
#[derive(Debug, Clone, PartialEq)]
pub struct CollectionRequest {
    pub receivable_id: String,
    pub amount_collected: Decimal,
}

impl CollectionRequest {
    pub fn new(receivable_id: impl Into<String>, amount_collected: Decimal) -> Self {
        Self {
            receivable_id: receivable_id.into(),
            amount_collected,
        }
    }

    /// Builds a request from untyped input, rejecting non-numeric amounts.
    pub fn parse(receivable_id: &str, amount_collected: &str) -> Result<Self> {
        let amount = parse_decimal("Amount collected", amount_collected)?;
        Ok(Self::new(receivable_id.trim(), amount))
    }

    /// Checks the request shape. Runs before any store access.
    pub fn validate(&self) -> Result<(ReceivableId, Amount)> {
        let id = ReceivableId::new(self.receivable_id.clone())?;
        let amount = Amount::new(self.amount_collected).map_err(|_| {
            ReceivableError::ValidationError(
                "Amount collected must be greater than zero".to_string(),
            )
        })?;
        Ok((id, amount))
    }
}

/// Result shape handed to the surrounding application layer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ActionOutcome {
    pub success: bool,
    pub message: Option<String>,
}

impl ActionOutcome {
    pub fn ok() -> Self {
        Self {
            success: true,
            message: None,
        }
    }

    pub fn failed(message: impl Into<String>) -> Self {
        Self {
            success: false,
            message: Some(message.into()),
        }
    }
}

impl<T> From<Result<T>> for ActionOutcome {
    fn from(result: Result<T>) -> Self {
        match result {
            Ok(_) => Self::ok(),
            Err(e) if e.is_backing_store() => {
                Self::failed(format!("An unexpected error occurred: {e}"))
            }
            Err(e) => Self::failed(e.to_string()),
        }
    }
}
