use crate::domain::collection::CollectionRequest;
use crate::error::{ReceivableError, Result};
use serde::Deserialize;
use std::io::Read;

#[derive(Debug, Deserialize)]
struct CollectionRow {
    receivable: String,
    amount: String,
}

/// Reads collection requests (`receivable, amount`) from a CSV source.
///
/// Amounts are kept as text until [`CollectionRequest::parse`] so that a
/// non-numeric amount surfaces as a validation error rather than a CSV error.
pub struct CollectionReader<R: Read> {
    reader: csv::Reader<R>,
}

impl<R: Read> CollectionReader<R> {
    pub fn new(source: R) -> Self {
        let reader = csv::ReaderBuilder::new()
            .trim(csv::Trim::All)
            .flexible(true)
            .from_reader(source);
        Self { reader }
    }

    pub fn requests(self) -> impl Iterator<Item = Result<CollectionRequest>> {
        self.reader.into_deserialize::<CollectionRow>().map(|result| {
            let row = result.map_err(ReceivableError::from)?;
            CollectionRequest::parse(&row.receivable, &row.amount)
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_reader_valid_stream() {
        let data = "receivable, amount\nr1, 200\nr1, 300.50";
        let requests: Vec<CollectionRequest> = CollectionReader::new(data.as_bytes())
            .requests()
            .collect::<Result<_>>()
            .unwrap();

        assert_eq!(
            requests,
            vec![
                CollectionRequest::new("r1", dec!(200)),
                CollectionRequest::new("r1", dec!(300.50)),
            ]
        );
    }

    #[test]
    fn test_reader_malformed_lines() {
        let data = "receivable, amount\nr1, abc\nr2\nr3, -4";
        let results: Vec<Result<CollectionRequest>> =
            CollectionReader::new(data.as_bytes()).requests().collect();

        assert!(matches!(results[0], Err(ReceivableError::ValidationError(_))));
        assert!(matches!(results[1], Err(ReceivableError::CsvError(_))));
        // Sign is checked by the workflow, not the reader.
        assert_eq!(
            results[2].as_ref().unwrap().amount_collected,
            dec!(-4)
        );
    }
}
