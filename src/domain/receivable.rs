use crate::error::{ReceivableError, Result};
use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Opaque identifier of a receivable document.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ReceivableId(String);

impl ReceivableId {
    pub fn new(value: impl Into<String>) -> Result<Self> {
        let value = value.into();
        if value.trim().is_empty() {
            return Err(ReceivableError::ValidationError(
                "Receivable id must not be empty".to_string(),
            ));
        }
        Ok(Self(value))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ReceivableId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Identifies the owing partner. Either a legacy user id or an assigned
/// partner code; the two forms are compared verbatim.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PartnerId(String);

impl PartnerId {
    pub fn new(value: impl Into<String>) -> Result<Self> {
        let value = value.into();
        if value.trim().is_empty() {
            return Err(ReceivableError::ValidationError(
                "Partner id must not be empty".to_string(),
            ));
        }
        Ok(Self(value))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for PartnerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// A strictly positive monetary amount being collected.
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd)]
pub struct Amount(Decimal);

impl Amount {
    pub fn new(value: Decimal) -> Result<Self> {
        if value > Decimal::ZERO {
            Ok(Self(value))
        } else {
            Err(ReceivableError::ValidationError(
                "Amount must be positive".to_string(),
            ))
        }
    }

    pub fn value(&self) -> Decimal {
        self.0
    }
}

impl TryFrom<Decimal> for Amount {
    type Error = ReceivableError;

    fn try_from(value: Decimal) -> Result<Self> {
        Self::new(value)
    }
}

impl From<Amount> for Decimal {
    fn from(amount: Amount) -> Self {
        amount.0
    }
}

#[derive(Debug, Default, Serialize, Deserialize, PartialEq, Eq, Clone, Copy)]
pub enum ReceivableStatus {
    #[default]
    Pending,
    Received,
}

impl fmt::Display for ReceivableStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Pending => f.write_str("Pending"),
            Self::Received => f.write_str("Received"),
        }
    }
}

/// Money owed by a partner for one transaction.
///
/// The balance and status only change through [`Receivable::collect`], which
/// keeps `pending_amount >= 0` and `status == Received` exactly when the
/// balance is zero. Documents read from a store are validated against the same
/// rules on deserialization.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "ReceivableRecord", into = "ReceivableRecord")]
pub struct Receivable {
    id: ReceivableId,
    partner_id: PartnerId,
    partner_name: String,
    date: Option<NaiveDate>,
    pending_amount: Decimal,
    status: ReceivableStatus,
}

impl Receivable {
    /// Creates a new pending receivable with a positive balance.
    pub fn new(
        id: ReceivableId,
        partner_id: PartnerId,
        partner_name: impl Into<String>,
        pending_amount: Decimal,
    ) -> Result<Self> {
        let pending_amount = Amount::new(pending_amount)?.value();
        Ok(Self {
            id,
            partner_id,
            partner_name: partner_name.into(),
            date: None,
            pending_amount,
            status: ReceivableStatus::Pending,
        })
    }

    pub fn with_date(mut self, date: NaiveDate) -> Self {
        self.date = Some(date);
        self
    }

    pub fn id(&self) -> &ReceivableId {
        &self.id
    }

    pub fn partner_id(&self) -> &PartnerId {
        &self.partner_id
    }

    pub fn partner_name(&self) -> &str {
        &self.partner_name
    }

    pub fn date(&self) -> Option<NaiveDate> {
        self.date
    }

    pub fn pending_amount(&self) -> Decimal {
        self.pending_amount
    }

    pub fn status(&self) -> ReceivableStatus {
        self.status
    }

    pub fn is_pending(&self) -> bool {
        self.status == ReceivableStatus::Pending
    }

    /// Applies a collected amount to the remaining balance.
    ///
    /// Fails without touching the record when it is no longer pending or when
    /// the amount exceeds the balance.
    pub fn collect(&mut self, amount: Amount) -> Result<()> {
        if self.status != ReceivableStatus::Pending {
            return Err(ReceivableError::InvalidState);
        }
        if amount.value() > self.pending_amount {
            return Err(ReceivableError::InvalidAmount {
                requested: amount.value(),
                pending: self.pending_amount,
            });
        }

        let remaining = self.pending_amount - amount.value();
        if remaining <= Decimal::ZERO {
            self.pending_amount = Decimal::ZERO;
            self.status = ReceivableStatus::Received;
        } else {
            self.pending_amount = remaining;
        }
        Ok(())
    }
}

/// Parses a plain decimal literal. Exponent notation is rejected.
pub(crate) fn parse_decimal(field: &str, raw: &str) -> Result<Decimal> {
    Decimal::from_str(raw.trim())
        .map_err(|_| ReceivableError::ValidationError(format!("{field} must be a number, got {raw:?}")))
}

/// Wire shape of a receivable document. The amount travels as text so CSV
/// input is never widened through a float.
#[derive(Debug, Clone, Serialize, Deserialize)]
struct ReceivableRecord {
    id: String,
    partner_id: String,
    #[serde(default)]
    partner_name: String,
    #[serde(default)]
    date: Option<NaiveDate>,
    pending_amount: String,
    #[serde(default)]
    status: ReceivableStatus,
}

impl TryFrom<ReceivableRecord> for Receivable {
    type Error = ReceivableError;

    fn try_from(record: ReceivableRecord) -> Result<Self> {
        let id = ReceivableId::new(record.id)?;
        let partner_id = PartnerId::new(record.partner_id)?;
        let pending_amount = parse_decimal("Pending amount", &record.pending_amount)?;

        if pending_amount < Decimal::ZERO {
            return Err(ReceivableError::ValidationError(format!(
                "Receivable {id} has a negative pending amount"
            )));
        }
        let settled = pending_amount == Decimal::ZERO;
        if settled != (record.status == ReceivableStatus::Received) {
            return Err(ReceivableError::ValidationError(format!(
                "Receivable {id} is {} with pending amount {pending_amount}",
                record.status
            )));
        }

        Ok(Self {
            id,
            partner_id,
            partner_name: record.partner_name,
            date: record.date,
            pending_amount,
            status: record.status,
        })
    }
}

impl From<Receivable> for ReceivableRecord {
    fn from(receivable: Receivable) -> Self {
        Self {
            id: receivable.id.0,
            partner_id: receivable.partner_id.0,
            partner_name: receivable.partner_name,
            date: receivable.date,
            pending_amount: receivable.pending_amount.to_string(),
            status: receivable.status,
        }
    }
}
