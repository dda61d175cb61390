//! CSV import and export of receivables and collection requests.

pub mod collection_reader;
pub mod outcome_writer;
pub mod receivable_reader;
pub mod receivable_writer;

#[cfg(test)]
mod tests {
    use super::collection_reader::CollectionReader;
    use super::receivable_reader::ReceivableReader;

    #[test]
    fn test_readers_share_numeric_syntax() {
        let receivables = "id, partner_id, partner_name, date, pending_amount\n\
                           r1, P1, A, , 1e2\n\
                           r2, P1, A, , 100";
        let collections = "receivable, amount\n\
                           r1, 1e2\n\
                           r2, 100";

        let imported: Vec<_> = ReceivableReader::new(receivables.as_bytes())
            .receivables()
            .collect();
        let requested: Vec<_> = CollectionReader::new(collections.as_bytes())
            .requests()
            .collect();

        let expected = "must be a number, got \"1e2\"";
        let import_error = imported[0].as_ref().unwrap_err().to_string();
        let request_error = requested[0].as_ref().unwrap_err().to_string();
        assert!(import_error.contains(expected), "{import_error}");
        assert!(request_error.contains(expected), "{request_error}");

        assert!(imported[1].is_ok());
        assert!(requested[1].is_ok());
    }
}
