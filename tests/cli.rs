use assert_cmd::Command;
use predicates::prelude::*;

/// Missing required configuration must be a fatal startup error with the
/// variable named, before any network call is attempted.
#[test]
fn sync_fails_fast_when_required_env_is_missing() {
    let mut cmd = Command::cargo_bin("pdf-bucket").expect("binary exists");

    cmd.arg("sync")
        .env_remove("DRIVE_FOLDER_ID")
        .env_remove("GCS_BUCKET")
        .env_remove("GCP_PROJECT");

    cmd.assert()
        .failure()
        .stderr(predicate::str::contains("DRIVE_FOLDER_ID"));
}

#[test]
fn help_names_the_sync_subcommand() {
    let mut cmd = Command::cargo_bin("pdf-bucket").expect("binary exists");
    cmd.arg("--help");
    cmd.assert()
        .success()
        .stdout(predicate::str::contains("sync"));
}
