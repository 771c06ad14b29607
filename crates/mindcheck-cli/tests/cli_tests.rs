//! CLI integration tests using assert_cmd.

use std::path::Path;

use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

fn mindcheck(dir: &Path) -> Command {
    #[allow(deprecated)]
    let mut cmd = Command::cargo_bin("mindcheck").unwrap();
    cmd.current_dir(dir)
        .env("HOME", dir)
        .env_remove("MINDCHECK_DB")
        .env_remove("MINDCHECK_THRESHOLD")
        .env_remove("RUST_LOG");
    cmd
}

/// Menu input that registers `email` and then takes the quiz with `answers`.
fn register_and_quiz(email: &str, answers: &[&str]) -> String {
    let mut script = format!("1\n{email}\nTest User\n2\n");
    for answer in answers {
        script.push_str(answer);
        script.push('\n');
    }
    script.push_str("3\n");
    script
}

#[test]
fn exit_immediately() {
    let dir = TempDir::new().unwrap();

    mindcheck(dir.path())
        .write_stdin("3\n")
        .assert()
        .success()
        .stdout(predicate::str::contains("1. Register"))
        .stdout(predicate::str::contains("Choose an option (1/2/3): "));

    assert!(dir.path().join("quiz.db").exists());
}

#[test]
fn invalid_choice_reprompts() {
    let dir = TempDir::new().unwrap();

    mindcheck(dir.path())
        .write_stdin("9\n3\n")
        .assert()
        .success()
        .stdout(predicate::str::contains("Invalid choice. Please try again."));
}

#[test]
fn input_mistakes_keep_stderr_clean() {
    let dir = TempDir::new().unwrap();

    mindcheck(dir.path())
        .write_stdin("9\n1\n\nada@example.com\nAda\n3\n")
        .assert()
        .success()
        .stdout(predicate::str::contains("Invalid choice. Please try again."))
        .stdout(predicate::str::contains("User registered successfully!"))
        .stderr(predicate::str::is_empty());
}

#[test]
fn quiz_without_registration() {
    let dir = TempDir::new().unwrap();

    mindcheck(dir.path())
        .write_stdin("2\n3\n")
        .assert()
        .success()
        .stdout(predicate::str::contains(
            "User not found. Please register before taking the quiz.",
        ));
}

#[test]
fn low_depressive_score_recommends_help() {
    let dir = TempDir::new().unwrap();
    let script = register_and_quiz("ada@example.com", &["no", "NO", "yes", "yes", "yes"]);

    mindcheck(dir.path())
        .write_stdin(script)
        .assert()
        .success()
        .stdout(predicate::str::contains("User registered successfully!"))
        .stdout(predicate::str::contains(
            "seek help for Depressive Disorder symptoms",
        ))
        .stdout(predicate::str::contains("Have you experienced periods").not());
}

#[test]
fn all_stages_high_prints_wellness_reminder() {
    let dir = TempDir::new().unwrap();
    let answers = ["no"; 15];
    let script = register_and_quiz("ada@example.com", &answers);

    mindcheck(dir.path())
        .write_stdin(script)
        .assert()
        .success()
        .stdout(predicate::str::contains(
            "it's essential to prioritize your mental health",
        ))
        .stdout(predicate::str::contains("Quiz completed successfully!").not());
}

#[test]
fn duplicate_email_across_runs() {
    let dir = TempDir::new().unwrap();
    let db = dir.path().join("screening.db");

    mindcheck(dir.path())
        .arg("--db")
        .arg(&db)
        .write_stdin("1\nada@example.com\nAda\n3\n")
        .assert()
        .success();

    mindcheck(dir.path())
        .arg("--db")
        .arg(&db)
        .write_stdin("1\nada@example.com\nother@example.com\nOther\n3\n")
        .assert()
        .success()
        .stdout(predicate::str::contains("Email already registered"))
        .stdout(predicate::str::contains("User registered successfully!"));
}

#[test]
fn end_of_input_exits_cleanly() {
    let dir = TempDir::new().unwrap();

    mindcheck(dir.path()).write_stdin("1\n").assert().success();
}

#[test]
fn config_file_sets_threshold_and_hotline() {
    let dir = TempDir::new().unwrap();
    std::fs::write(
        dir.path().join("mindcheck.toml"),
        "threshold = 1\nhotline = \"Call 555-0100.\"\n",
    )
    .unwrap();
    let script = register_and_quiz("ada@example.com", &["yes"; 5]);

    mindcheck(dir.path())
        .write_stdin(script)
        .assert()
        .success()
        .stdout(predicate::str::contains("Call 555-0100."));
}

#[test]
fn missing_config_file_fails() {
    let dir = TempDir::new().unwrap();

    mindcheck(dir.path())
        .arg("--config")
        .arg("nonexistent.toml")
        .write_stdin("3\n")
        .assert()
        .failure()
        .stderr(predicate::str::contains("Error"))
        .stderr(predicate::str::contains("config file not found"));
}

#[test]
fn unopenable_database_fails() {
    let dir = TempDir::new().unwrap();

    mindcheck(dir.path())
        .arg("--db")
        .arg(dir.path().join("no-such-dir").join("quiz.db"))
        .write_stdin("3\n")
        .assert()
        .failure()
        .stderr(predicate::str::contains("failed to open database"));
}

#[test]
fn custom_question_bank() {
    let dir = TempDir::new().unwrap();
    let bank = dir.path().join("bank.toml");
    std::fs::write(
        &bank,
        "[[stages]]\ncategory = \"depressive\"\nquestions = [\"Feeling low lately?\"]\n",
    )
    .unwrap();

    mindcheck(dir.path())
        .arg("--questions")
        .arg(&bank)
        .write_stdin(register_and_quiz("ada@example.com", &["yes"]))
        .assert()
        .success()
        .stdout(predicate::str::contains("Feeling low lately? (yes/no): "))
        .stdout(predicate::str::contains("seek help for Depressive Disorder"));
}

#[test]
fn validate_questions_reports_warnings() {
    let dir = TempDir::new().unwrap();
    let bank = dir.path().join("bank.toml");
    std::fs::write(
        &bank,
        "[[stages]]\ncategory = \"bipolar\"\nquestions = [\"Same?\", \"Same?\"]\n",
    )
    .unwrap();

    mindcheck(dir.path())
        .arg("validate-questions")
        .arg(&bank)
        .assert()
        .success()
        .stdout(predicate::str::contains("12 questions"))
        .stdout(predicate::str::contains("[bipolar] WARNING: duplicate question"))
        .stdout(predicate::str::contains("never pass"));
}

#[test]
fn validate_questions_nonexistent_file() {
    let dir = TempDir::new().unwrap();

    mindcheck(dir.path())
        .arg("validate-questions")
        .arg("nonexistent.toml")
        .assert()
        .failure()
        .stderr(predicate::str::contains("failed to read question bank"));
}

#[test]
fn help_output() {
    let dir = TempDir::new().unwrap();

    mindcheck(dir.path())
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("Console mental-health screening quiz"));
}

#[test]
fn version_output() {
    let dir = TempDir::new().unwrap();

    mindcheck(dir.path())
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains("mindcheck"));
}
