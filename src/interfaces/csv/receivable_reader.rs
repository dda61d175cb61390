use crate::domain::receivable::Receivable;
use crate::error::{ReceivableError, Result};
use std::io::Read;

/// Reads receivables from a CSV source.
///
/// Expected header: `id, partner_id, partner_name, date, pending_amount` with an
/// optional trailing `status` column (defaults to `Pending`). Each row goes
/// through the same validation as a stored document.
pub struct ReceivableReader<R: Read> {
    reader: csv::Reader<R>,
}

impl<R: Read> ReceivableReader<R> {
    pub fn new(source: R) -> Self {
        let reader = csv::ReaderBuilder::new()
            .trim(csv::Trim::All)
            .flexible(true)
            .from_reader(source);
        Self { reader }
    }

    /// Lazily deserializes receivables, one `Result` per row.
    pub fn receivables(self) -> impl Iterator<Item = Result<Receivable>> {
        self.reader
            .into_deserialize()
            .map(|result| result.map_err(ReceivableError::from))
    }
}
