use assert_cmd::cargo_bin;
use assert_cmd::prelude::*;
use predicates::prelude::*;
use std::process::Command;

#[test]
fn test_cli_collect_end_to_end() -> Result<(), Box<dyn std::error::Error>> {
    let mut cmd = Command::new(cargo_bin!());
    cmd.arg("collect")
        .arg("tests/fixtures/collections.csv")
        .arg("--receivables")
        .arg("tests/fixtures/receivables.csv");

    cmd.assert()
        .success()
        .stdout(predicate::str::contains("receivable,amount,success,message"))
        .stdout(predicate::str::contains("r1,200,true,\n"))
        .stdout(predicate::str::contains("r1,300,true,\n"))
        .stdout(predicate::str::contains(
            "r1,1,false,This payment is not pending",
        ))
        .stdout(predicate::str::contains(
            "r2,150,false,Collected amount cannot be greater than the pending amount",
        ))
        .stdout(predicate::str::contains("r3,75,true,\n"));

    Ok(())
}

#[test]
fn test_cli_pending_listing() -> Result<(), Box<dyn std::error::Error>> {
    let mut cmd = Command::new(cargo_bin!());
    cmd.arg("pending")
        .arg("--partner")
        .arg("P100")
        .arg("--receivables")
        .arg("tests/fixtures/receivables.csv");

    cmd.assert()
        .success()
        .stdout(predicate::str::contains(
            "id,partner_id,partner_name,date,pending_amount,status",
        ))
        .stdout(predicate::str::contains(
            "r1,P100,Acme Realty,2024-01-15,500,Pending",
        ))
        .stdout(predicate::str::contains(
            "r2,P100,Acme Realty,2024-02-01,120.5,Pending",
        ))
        .stdout(predicate::str::contains("r3,").not())
        .stdout(predicate::str::contains("r4,").not());

    Ok(())
}

#[test]
fn test_cli_pending_json() -> Result<(), Box<dyn std::error::Error>> {
    let output = Command::new(cargo_bin!())
        .arg("pending")
        .arg("--partner")
        .arg("P200")
        .arg("--json")
        .arg("--receivables")
        .arg("tests/fixtures/receivables.csv")
        .output()?;
    assert!(output.status.success());

    let listed: serde_json::Value = serde_json::from_slice(&output.stdout)?;
    let listed = listed.as_array().unwrap();
    assert_eq!(listed.len(), 1);
    assert_eq!(listed[0]["id"], "r3");
    assert_eq!(listed[0]["status"], "Pending");

    Ok(())
}

#[test]
fn test_cli_report() -> Result<(), Box<dyn std::error::Error>> {
    let mut cmd = Command::new(cargo_bin!());
    cmd.arg("report")
        .arg("--receivables")
        .arg("tests/fixtures/receivables.csv");

    cmd.assert()
        .success()
        .stdout(predicate::str::contains(
            "r4,P100,Acme Realty,2023-12-20,0,Received",
        ))
        .stdout(predicate::str::contains("r3,P200,Harbor Homes,2024-02-03,75,Pending"));

    Ok(())
}
