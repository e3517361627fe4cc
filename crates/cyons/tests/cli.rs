use assert_cmd::Command;
use predicates::prelude::*;
use predicates::str::contains;

const ARTICLE: &str = "The city council approved a new bus network on Tuesday. \
Officials said routes will change in March.";

fn cmd() -> Command {
    let mut cmd = Command::cargo_bin("cyons").unwrap();
    cmd.env_remove("OPENAI_API_KEY")
        .env_remove("CYONS_OPENAI_API_KEY")
        .env_remove("RUST_LOG")
        .env("CYONS_MANIFESTO_DIR", "/nonexistent/cyons-prompts");
    cmd
}

#[test]
fn compile_prints_prompt_with_selected_instructions() {
    cmd()
        .args([
            "compile",
            "--style",
            "policy",
            "--compression",
            "0.9",
            "--bias-avoidance",
            "0.95",
        ])
        .write_stdin(ARTICLE)
        .assert()
        .success()
        .stdout(contains("--- ROLE AND INSTRUCTIONS ---"))
        .stdout(contains("as comprehensive as possible"))
        .stdout(contains("absolute and strict neutrality"))
        .stdout(contains("policy analyst"))
        .stdout(contains(ARTICLE));
}

#[test]
fn compile_unknown_style_uses_default_manifesto() {
    cmd()
        .args(["compile", "--style", "haiku"])
        .write_stdin(ARTICLE)
        .assert()
        .success()
        .stdout(contains("You are Sherlock"))
        .stdout(contains("moderate in length"));
}

#[test]
fn compile_rejects_blank_article() {
    cmd()
        .arg("compile")
        .write_stdin("   \n")
        .assert()
        .failure()
        .stderr(contains("Please paste an article"));
}

#[test]
fn compile_rejects_out_of_range_controls() {
    cmd()
        .args(["compile", "--compression", "0.05"])
        .write_stdin(ARTICLE)
        .assert()
        .failure()
        .stderr(contains("outside the allowed range"));
}

#[test]
fn review_empty_input() {
    cmd()
        .arg("review")
        .write_stdin("")
        .assert()
        .success()
        .stdout(contains("Word count: 0"))
        .stdout(contains("too short"))
        .stdout(contains("does NOT constitute factual verification"));
}

#[test]
fn review_flags_opinionated_text() {
    cmd()
        .arg("review")
        .write_stdin("Voters should act. Leaders must listen. This is clearly wrong.")
        .assert()
        .success()
        .stdout(contains("Bias risk: High"))
        .stdout(contains("Coherence: Low"));
}

#[test]
fn styles_marks_default() {
    cmd()
        .arg("styles")
        .assert()
        .success()
        .stdout(contains("sherlock (default)"))
        .stdout(contains("policy"))
        .stdout(contains("critic"));
}

#[test]
fn styles_honors_configured_default() {
    cmd()
        .env("CYONS_DEFAULT_STYLE", "critic")
        .arg("styles")
        .assert()
        .success()
        .stdout(contains("critic (default)"))
        .stdout(contains("sherlock (default)").not());
}

/// Empty project root (marked by `.git`) so no developer `.env` is picked up
fn isolated_project() -> tempfile::TempDir {
    let dir = tempfile::tempdir().unwrap();
    std::fs::create_dir(dir.path().join(".git")).unwrap();
    dir
}

#[test]
fn summarize_without_api_key_fails() {
    let project = isolated_project();

    cmd()
        .current_dir(project.path())
        .arg("summarize")
        .write_stdin(ARTICLE)
        .assert()
        .failure()
        .stderr(contains("No API key configured"));
}

#[test]
fn dotenv_is_read_from_project_root_only() {
    let project = isolated_project();
    let nested = project.path().join("drafts");
    std::fs::create_dir(&nested).unwrap();
    std::fs::write(nested.join(".env"), "OPENAI_API_KEY=sk-stray\n").unwrap();

    cmd()
        .current_dir(&nested)
        .arg("summarize")
        .write_stdin(ARTICLE)
        .assert()
        .failure()
        .stderr(contains("No API key configured"));
}

#[test]
fn dotenv_at_project_root_feeds_config() {
    let project = isolated_project();
    std::fs::write(project.path().join(".env"), "CYONS_DEFAULT_STYLE=policy\n").unwrap();

    cmd()
        .current_dir(project.path())
        .arg("styles")
        .assert()
        .success()
        .stdout(contains("policy (default)"));
}
