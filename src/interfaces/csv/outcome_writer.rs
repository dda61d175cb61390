use crate::domain::collection::{ActionOutcome, CollectionRequest};
use crate::error::Result;
use rust_decimal::Decimal;
use serde::Serialize;
use std::io::Write;

#[derive(Serialize)]
struct OutcomeRow<'a> {
    receivable: &'a str,
    amount: Decimal,
    success: bool,
    message: Option<&'a str>,
}

/// Streams one `receivable,amount,success,message` row per processed request.
pub struct OutcomeWriter<W: Write> {
    writer: csv::Writer<W>,
}

impl<W: Write> OutcomeWriter<W> {
    pub fn new(sink: W) -> Self {
        Self {
            writer: csv::Writer::from_writer(sink),
        }
    }

    pub fn write_outcome(
        &mut self,
        request: &CollectionRequest,
        outcome: &ActionOutcome,
    ) -> Result<()> {
        self.writer.serialize(OutcomeRow {
            receivable: &request.receivable_id,
            amount: request.amount_collected.normalize(),
            success: outcome.success,
            message: outcome.message.as_deref(),
        })?;
        Ok(())
    }

    pub fn flush(&mut self) -> Result<()> {
        self.writer.flush()?;
        Ok(())
    }
}
