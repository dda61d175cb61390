use std::fs::File;
use std::io::Error;
use std::path::Path;

/// Writes `rows` pending receivables `r1..=rows`, spread over partners `P1..=P10`.
pub fn generate_receivables(path: &Path, rows: usize, pending: &str) -> Result<(), Error> {
    let file = File::create(path)?;
    let mut wtr = csv::WriterBuilder::new().from_writer(file);

    wtr.write_record(["id", "partner_id", "partner_name", "date", "pending_amount"])?;

    for i in 1..=rows {
        wtr.write_record([
            format!("r{i}").as_str(),
            format!("P{}", i % 10 + 1).as_str(),
            "Generated Partner",
            "2024-01-01",
            pending,
        ])?;
    }

    wtr.flush()?;
    Ok(())
}

/// Writes `per_receivable` collections of `amount` against each of `r1..=receivables`.
pub fn generate_collections(
    path: &Path,
    receivables: usize,
    per_receivable: usize,
    amount: &str,
) -> Result<(), Error> {
    let file = File::create(path)?;
    let mut wtr = csv::WriterBuilder::new().from_writer(file);
    wtr.write_record(["receivable", "amount"])?;

    for _ in 0..per_receivable {
        for i in 1..=receivables {
            wtr.write_record([format!("r{i}").as_str(), amount])?;
        }
    }

    wtr.flush()?;
    Ok(())
}
