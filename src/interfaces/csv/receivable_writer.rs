use crate::domain::receivable::{Receivable, ReceivableStatus};
use crate::error::Result;
use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::Serialize;
use std::io::Write;

#[derive(Serialize)]
struct ReceivableRow<'a> {
    id: &'a str,
    partner_id: &'a str,
    partner_name: &'a str,
    date: Option<NaiveDate>,
    pending_amount: Decimal,
    status: ReceivableStatus,
}

/// Writes receivables as CSV, in the same column layout the reader accepts.
pub struct ReceivableWriter<W: Write> {
    writer: csv::Writer<W>,
}

impl<W: Write> ReceivableWriter<W> {
    pub fn new(sink: W) -> Self {
        Self {
            writer: csv::Writer::from_writer(sink),
        }
    }

    /// Writes the rows sorted by id so output is stable across stores.
    pub fn write_receivables(&mut self, mut receivables: Vec<Receivable>) -> Result<()> {
        receivables.sort_by(|a, b| a.id().cmp(b.id()));
        for r in &receivables {
            self.writer.serialize(ReceivableRow {
                id: r.id().as_str(),
                partner_id: r.partner_id().as_str(),
                partner_name: r.partner_name(),
                date: r.date(),
                pending_amount: r.pending_amount().normalize(),
                status: r.status(),
            })?;
        }
        self.writer.flush()?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::receivable::{Amount, PartnerId, ReceivableId};
    use rust_decimal_macros::dec;

    #[test]
    fn test_write_receivables() {
        let r2 = Receivable::new(
            ReceivableId::new("r2").unwrap(),
            PartnerId::new("P100").unwrap(),
            "Acme",
            dec!(300.00),
        )
        .unwrap()
        .with_date(NaiveDate::from_ymd_opt(2024, 1, 15).unwrap());
        let mut r1 = Receivable::new(
            ReceivableId::new("r1").unwrap(),
            PartnerId::new("P100").unwrap(),
            "Acme",
            dec!(5),
        )
        .unwrap();
        r1.collect(Amount::new(dec!(5)).unwrap()).unwrap();

        let mut out = Vec::new();
        ReceivableWriter::new(&mut out)
            .write_receivables(vec![r2, r1])
            .unwrap();

        let text = String::from_utf8(out).unwrap();
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(
            lines,
            vec![
                "id,partner_id,partner_name,date,pending_amount,status",
                "r1,P100,Acme,,0,Received",
                "r2,P100,Acme,2024-01-15,300,Pending",
            ]
        );
    }
}
