mod common;

use assert_cmd::cargo_bin;
use assert_cmd::prelude::*;
use predicates::prelude::*;
use std::process::Command;

#[test]
fn test_cli_register_confirm_complete() -> Result<(), Box<dyn std::error::Error>> {
    let seed = common::seed_file()?;
    let commands = common::commands_file(&[
        "register, T1, A1, 100.5, bob@example.com, email, pay,",
        "confirm, T1, , , , , ,",
        "complete, T1, , , , , ,",
    ])?;

    let mut cmd = Command::new(cargo_bin!("codepix"));
    cmd.arg(commands.path()).arg("--seed").arg(seed.path());

    cmd.assert()
        .success()
        .stdout(predicate::str::contains(
            "id,account_from,pix_key_to,amount,status,description,cancel_description",
        ))
        .stdout(predicate::str::contains("T1,A1,bob@example.com,100.5,pending,pay,"))
        .stdout(predicate::str::contains("T1,A1,bob@example.com,100.5,confirmed,pay,"))
        .stdout(predicate::str::contains("T1,A1,bob@example.com,100.5,completed,pay,"));

    Ok(())
}

#[test]
fn test_cli_error_records_reason() -> Result<(), Box<dyn std::error::Error>> {
    let seed = common::seed_file()?;
    let commands = common::commands_file(&[
        "register, T1, A1, 10.5, 12345678900, cpf, rent,",
        "error, T1, , , , , , insufficient funds",
    ])?;

    let mut cmd = Command::new(cargo_bin!("codepix"));
    cmd.arg(commands.path()).arg("--seed").arg(seed.path());

    cmd.assert().success().stdout(predicate::str::contains(
        "T1,A1,12345678900,10.5,error,rent,insufficient funds",
    ));

    Ok(())
}

#[test]
fn test_cli_rejected_commands_are_logged_and_skipped() -> Result<(), Box<dyn std::error::Error>> {
    let seed = common::seed_file()?;
    let commands = common::commands_file(&[
        "register, T1, A1, 0, bob@example.com, email, zero,",
        "register, T2, A1, 5.5, alice@example.com, email, self,",
        "register, T3, A1, 5.5, bob@example.com, phone, kind,",
        "confirm, T9, , , , , ,",
        "register, T4, A1, 7.5, bob@example.com, email, ok,",
    ])?;

    let mut cmd = Command::new(cargo_bin!("codepix"));
    cmd.arg(commands.path()).arg("--seed").arg(seed.path());

    cmd.assert()
        .success()
        .stdout(predicate::str::contains("T4,A1,bob@example.com,7.5,pending,ok,"))
        .stdout(predicate::str::contains("T1,").not())
        .stdout(predicate::str::contains("T2,").not())
        .stdout(predicate::str::contains("T3,").not())
        .stderr(predicate::str::contains("amount must be greater than 0"))
        .stderr(predicate::str::contains(
            "the source and destination account cannot be the same",
        ))
        .stderr(predicate::str::contains("invalid pix key kind"))
        .stderr(predicate::str::contains("transaction not found: T9"));

    Ok(())
}

#[test]
fn test_cli_amounts_are_written_exactly() -> Result<(), Box<dyn std::error::Error>> {
    let seed = common::seed_file()?;
    let commands = common::commands_file(&[
        "register, T1, A1, 100.0, bob@example.com, email, pay,",
        "register, T2, A1, 12345678901234567.89, bob@example.com, email, big,",
        "register, T3, A1, abc, bob@example.com, email, bad,",
    ])?;

    let mut cmd = Command::new(cargo_bin!("codepix"));
    cmd.arg(commands.path()).arg("--seed").arg(seed.path());

    cmd.assert()
        .success()
        .stdout(predicate::str::contains("T1,A1,bob@example.com,100.0,pending,pay,"))
        .stdout(predicate::str::contains(
            "T2,A1,bob@example.com,12345678901234567.89,pending,big,",
        ))
        .stdout(predicate::str::contains("T3,").not())
        .stderr(predicate::str::contains("invalid amount: \"abc\""));

    Ok(())
}

#[test]
fn test_cli_register_existing_id_is_rejected() -> Result<(), Box<dyn std::error::Error>> {
    let seed = common::seed_file()?;
    let commands = common::commands_file(&[
        "register, T1, A1, 100.5, bob@example.com, email, pay,",
        "complete, T1, , , , , ,",
        "register, T1, A1, 5.5, bob@example.com, email, retry,",
    ])?;

    let mut cmd = Command::new(cargo_bin!("codepix"));
    cmd.arg(commands.path()).arg("--seed").arg(seed.path());

    cmd.assert()
        .success()
        .stdout(predicate::str::contains("T1,A1,bob@example.com,100.5,completed,pay,"))
        .stdout(predicate::str::contains("retry").not())
        .stderr(predicate::str::contains("transaction T1 already registered"));

    Ok(())
}

#[test]
fn test_cli_strict_transitions() -> Result<(), Box<dyn std::error::Error>> {
    let seed = common::seed_file()?;
    let commands = common::commands_file(&[
        "register, T1, A1, 3.5, bob@example.com, email, pay,",
        "complete, T1, , , , , ,",
    ])?;

    let mut cmd = Command::new(cargo_bin!("codepix"));
    cmd.arg(commands.path())
        .arg("--seed")
        .arg(seed.path())
        .arg("--transitions")
        .arg("strict");

    cmd.assert()
        .success()
        .stdout(predicate::str::contains("completed").not())
        .stderr(predicate::str::contains(
            "illegal transition from pending to completed",
        ));

    Ok(())
}

#[test]
fn test_cli_missing_input_fails() {
    let mut cmd = Command::new(cargo_bin!("codepix"));
    cmd.arg("does/not/exist.csv");
    cmd.assert().failure();
}
