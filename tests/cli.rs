use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

fn groupsplit(data_dir: &TempDir) -> Command {
    let mut cmd = Command::cargo_bin("groupsplit").unwrap();
    cmd.env("GROUPSPLIT_DATA_DIR", data_dir.path())
        .env_remove("GROUPSPLIT_LOG");
    cmd
}

fn login(data_dir: &TempDir, email: &str, name: &str) {
    groupsplit(data_dir)
        .args(["login", "--email", email, "--name", name])
        .assert()
        .success();
}

/// Create a group and return its invite code
fn create_group(data_dir: &TempDir, name: &str) -> String {
    let output = groupsplit(data_dir)
        .args(["group", "create", name])
        .output()
        .unwrap();
    assert!(output.status.success());

    let stdout = String::from_utf8(output.stdout).unwrap();
    stdout
        .lines()
        .find_map(|line| line.trim().strip_prefix("Invite code: "))
        .map(str::to_string)
        .unwrap()
}

#[test]
fn init_creates_data_files() {
    let data_dir = TempDir::new().unwrap();

    groupsplit(&data_dir)
        .arg("init")
        .assert()
        .success()
        .stdout(predicate::str::contains("Initialization complete!"));

    assert!(data_dir.path().join("data").join("groups.json").exists());
    assert!(data_dir.path().join("config.json").exists());
}

#[test]
fn login_registers_then_reuses_account() {
    let data_dir = TempDir::new().unwrap();

    groupsplit(&data_dir)
        .args(["login", "--email", "asha@example.com", "--name", "Asha"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Welcome, Asha!"));

    groupsplit(&data_dir)
        .args(["login", "--email", "ASHA@example.com", "--name", "Someone"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Logged in as Asha."));

    groupsplit(&data_dir)
        .arg("whoami")
        .assert()
        .success()
        .stdout(predicate::str::contains("asha@example.com"));
}

#[test]
fn invalid_email_is_rejected() {
    let data_dir = TempDir::new().unwrap();

    groupsplit(&data_dir)
        .args(["login", "--email", "not-an-email", "--name", "Asha"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Please enter a valid email address."));
}

#[test]
fn group_commands_require_login() {
    let data_dir = TempDir::new().unwrap();

    groupsplit(&data_dir)
        .args(["group", "create", "Goa Trip"])
        .assert()
        .failure()
        .stderr(predicate::str::contains(
            "You must be logged in to create a group.",
        ));
}

#[test]
fn shared_dinner_settles_to_one_payment() {
    let data_dir = TempDir::new().unwrap();

    login(&data_dir, "asha@example.com", "Asha");
    let invite_code = create_group(&data_dir, "Goa Trip");

    login(&data_dir, "ravi@example.com", "Ravi");
    groupsplit(&data_dir)
        .args(["group", "join", &invite_code])
        .assert()
        .success()
        .stdout(predicate::str::contains("Joined group: Goa Trip"));

    groupsplit(&data_dir)
        .args(["expense", "add", "goa trip", "Dinner", "300", "--paid-by", "Ravi"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Added expense: Dinner (₹300.00)"));

    groupsplit(&data_dir)
        .args(["group", "balances", "Goa Trip"])
        .assert()
        .success()
        .stdout(predicate::str::contains("+₹150.00"))
        .stdout(predicate::str::contains("-₹150.00"));

    groupsplit(&data_dir)
        .args(["group", "settle", "Goa Trip"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Asha  pays  Ravi  ₹150.00"));
}

#[test]
fn custom_split_must_match_total() {
    let data_dir = TempDir::new().unwrap();

    login(&data_dir, "asha@example.com", "Asha");
    create_group(&data_dir, "Flatmates");

    groupsplit(&data_dir)
        .args([
            "expense",
            "add",
            "Flatmates",
            "Rent",
            "300",
            "--share",
            "Asha=200",
        ])
        .assert()
        .failure()
        .stderr(predicate::str::contains(
            "Splits total (200.00) does not match the expense amount (300.00).",
        ));

    groupsplit(&data_dir)
        .args(["expense", "list", "Flatmates"])
        .assert()
        .success()
        .stdout(predicate::str::contains("No expenses yet."));
}

#[test]
fn empty_group_is_settled() {
    let data_dir = TempDir::new().unwrap();

    login(&data_dir, "asha@example.com", "Asha");
    create_group(&data_dir, "Flatmates");

    groupsplit(&data_dir)
        .args(["group", "settle", "Flatmates"])
        .assert()
        .success()
        .stdout(predicate::str::contains("All Settled Up!"));
}

#[test]
fn oversized_amounts_are_rejected() {
    let data_dir = TempDir::new().unwrap();

    login(&data_dir, "asha@example.com", "Asha");
    create_group(&data_dir, "Flatmates");

    groupsplit(&data_dir)
        .args(["expense", "add", "Flatmates", "Yacht", "90000000000000000"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Amount must not exceed"));

    groupsplit(&data_dir)
        .args([
            "expense",
            "add",
            "Flatmates",
            "Rent",
            "1",
            "--share",
            "Asha=90000000000000000",
            "--share",
            "Asha=90000000000000000",
        ])
        .assert()
        .failure()
        .stderr(predicate::str::contains("panicked").not());

    groupsplit(&data_dir)
        .args(["group", "balances", "Flatmates"])
        .assert()
        .success();
}

#[test]
fn conflicting_split_flags_are_rejected() {
    let data_dir = TempDir::new().unwrap();

    login(&data_dir, "asha@example.com", "Asha");
    create_group(&data_dir, "Flatmates");

    groupsplit(&data_dir)
        .args([
            "expense", "add", "Flatmates", "Rent", "300", "--split", "equal", "--with", "Asha",
        ])
        .assert()
        .failure()
        .stderr(predicate::str::contains(
            "--with only applies to selective splits, not equal.",
        ));
}
