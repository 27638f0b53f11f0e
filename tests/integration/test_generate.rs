use assert_cmd::Command;
use insta::assert_snapshot;
use predicates::prelude::*;
use std::fs;
use std::path::Path;
use tempfile::TempDir;

const TEMPLATE: &str = "\
# Shared workflows

| Workflow | File |
| --- | --- |
{% for f in workflows %}| {{ f.name }} | [{{ f.file }}](.github/workflows/{{ f.file }}) |
{% endfor %}
Generated by workflow-readme. {{ not_a_directive }}


";

fn workflow_readme(cwd: &Path) -> Command {
    let mut cmd = Command::new(assert_cmd::cargo::cargo_bin!("workflow-readme"));
    cmd.current_dir(cwd)
        .env_remove("RUST_LOG")
        .env_remove("WORKFLOW_README_LOG_OUTPUT")
        .env_remove("WORKFLOW_README_TEMPLATE")
        .env_remove("WORKFLOW_README_OUTPUT")
        .env_remove("WORKFLOW_README_WORKFLOW_DIR");
    cmd
}

fn write_repo(root: &Path, workflows: &[(&str, &str)]) {
    let workflow_dir = root.join(".github").join("workflows");
    fs::create_dir_all(&workflow_dir).unwrap();
    for (file, content) in workflows {
        fs::write(workflow_dir.join(file), content).unwrap();
    }
    fs::write(root.join("README.md.j2"), TEMPLATE).unwrap();
}

fn sample_repo() -> TempDir {
    let tmp = TempDir::new().unwrap();
    write_repo(
        tmp.path(),
        &[
            ("release.yml", "name: Release\non:\n  push:\n    tags: ['v*']\n  workflow_call:\n    secrets:\n      token:\n        required: true\n"),
            ("build.yml", "name: Build\non: workflow_call\njobs: {}\n"),
            ("ci.yml", "name: CI\non:\n  pull_request:\n"),
            ("broken.yml", "name: Broken\non: [workflow_call\n"),
            ("unnamed.yml", "on: workflow_call\n"),
            ("lint.yaml", "name: Lint\non: workflow_call\n"),
        ],
    );
    tmp
}

#[test]
fn renders_reusable_workflows_in_file_name_order() {
    let repo = sample_repo();

    workflow_readme(repo.path()).assert().success();

    let readme = fs::read_to_string(repo.path().join("README.md")).unwrap();
    assert_snapshot!(readme, @r"
    # Shared workflows

    | Workflow | File |
    | --- | --- |
    | Build | [build.yml](.github/workflows/build.yml) |
    | Release | [release.yml](.github/workflows/release.yml) |

    Generated by workflow-readme. {{ not_a_directive }}
    ");
    assert!(!readme.ends_with('\n'));
}

#[test]
fn progress_notices_are_printed_without_flags() {
    let repo = sample_repo();
    let workflow_dir = repo.path().join(".github").join("workflows");

    workflow_readme(repo.path())
        .assert()
        .success()
        .stdout(predicate::str::contains(format!(
            ">>\tDetect reusable workflows: {}",
            workflow_dir.display()
        )))
        .stdout(predicate::str::contains(format!(
            "  - {}",
            workflow_dir.join("build.yml").display()
        )))
        .stdout(predicate::str::contains(format!(
            "  - {}",
            workflow_dir.join("release.yml").display()
        )))
        .stdout(predicate::str::contains("ci.yml").not())
        .stdout(predicate::str::contains(format!(
            ">>\tRender a Markdown file: {}",
            repo.path().join("README.md").display()
        )))
        .stderr(predicate::str::is_empty());
}

#[test]
fn info_flag_reports_skipped_files_on_stderr() {
    let repo = sample_repo();

    workflow_readme(repo.path())
        .arg("--info")
        .assert()
        .success()
        .stderr(predicate::str::contains("Read YAML"))
        .stderr(predicate::str::contains("Failed to parse YAML"))
        .stderr(predicate::str::contains("(file=broken.yml)"));
}

#[test]
fn log_output_env_alone_enables_diagnostics() {
    let repo = sample_repo();

    workflow_readme(repo.path())
        .env("WORKFLOW_README_LOG_OUTPUT", "stderr")
        .assert()
        .success()
        .stderr(predicate::str::contains("Read YAML"))
        .stderr(predicate::str::contains("Logging initialized").not());
}

#[test]
fn debug_flag_includes_parsed_documents() {
    let repo = sample_repo();

    workflow_readme(repo.path())
        .arg("--debug")
        .assert()
        .success()
        .stderr(predicate::str::contains("YAML: "))
        .stderr(predicate::str::contains("\"Release\""));
}

#[test]
fn running_from_src_uses_the_parent_as_root() {
    let repo = sample_repo();
    let src = repo.path().join("src");
    fs::create_dir_all(&src).unwrap();

    workflow_readme(&src).assert().success();

    assert!(repo.path().join("README.md").exists());
    assert!(!src.join("README.md").exists());
}

#[test]
fn root_flag_overrides_the_working_directory() {
    let repo = sample_repo();
    let elsewhere = TempDir::new().unwrap();

    workflow_readme(elsewhere.path())
        .arg("--root")
        .arg(repo.path())
        .assert()
        .success();

    assert!(repo.path().join("README.md").exists());
}

#[test]
fn no_reusable_workflows_is_fatal() {
    let tmp = TempDir::new().unwrap();
    write_repo(tmp.path(), &[("ci.yml", "name: CI\non: push\n")]);

    workflow_readme(tmp.path())
        .assert()
        .failure()
        .code(1)
        .stderr(predicate::str::contains("Error: No reusable workflows found"));

    assert!(!tmp.path().join("README.md").exists());
}

#[test]
fn fatal_error_is_reported_once_with_logging_enabled() {
    let tmp = TempDir::new().unwrap();
    write_repo(tmp.path(), &[("ci.yml", "name: CI\non: push\n")]);

    for flag in ["--info", "--debug"] {
        let output = workflow_readme(tmp.path()).arg(flag).output().unwrap();
        assert_eq!(output.status.code(), Some(1));
        let stderr = String::from_utf8(output.stderr).unwrap();
        assert_eq!(
            stderr.matches("No reusable workflows found").count(),
            1,
            "{flag}: {stderr}"
        );
    }
}

#[test]
fn missing_template_is_fatal() {
    let tmp = TempDir::new().unwrap();
    fs::create_dir_all(tmp.path().join(".github").join("workflows")).unwrap();

    workflow_readme(tmp.path())
        .assert()
        .failure()
        .stderr(predicate::str::contains("Error: Template file"))
        .stderr(predicate::str::contains("does not exist"));
}

#[test]
fn missing_workflow_directory_is_fatal() {
    let tmp = TempDir::new().unwrap();
    fs::write(tmp.path().join("README.md.j2"), TEMPLATE).unwrap();

    workflow_readme(tmp.path())
        .assert()
        .failure()
        .stderr(predicate::str::contains("Error: Workflow directory"));
}

#[test]
fn malformed_template_is_fatal_and_leaves_output_untouched() {
    let repo = sample_repo();
    fs::write(repo.path().join("README.md.j2"), "{% for f in workflows %}open").unwrap();
    fs::write(repo.path().join("README.md"), "previous").unwrap();

    workflow_readme(repo.path())
        .assert()
        .failure()
        .stderr(predicate::str::contains("Failed to render template"))
        .stderr(predicate::str::contains("never closed"));

    assert_eq!(
        fs::read_to_string(repo.path().join("README.md")).unwrap(),
        "previous"
    );
}

#[test]
fn config_file_relocates_inputs_and_output() {
    let tmp = TempDir::new().unwrap();
    let root = tmp.path();
    fs::create_dir_all(root.join("ci")).unwrap();
    fs::create_dir_all(root.join("docs")).unwrap();
    fs::write(root.join("ci").join("deploy.yml"), "name: Deploy\non: workflow_call\n").unwrap();
    fs::write(
        root.join("docs").join("workflows.md.j2"),
        "{% for f in workflows %}* {{ f.name }}\n{% endfor %}",
    )
    .unwrap();
    fs::write(
        root.join("workflow-readme.toml"),
        "[paths]\ntemplate = \"docs/workflows.md.j2\"\noutput = \"docs/workflows.md\"\nworkflow_dir = \"ci\"\n",
    )
    .unwrap();

    workflow_readme(root).assert().success();

    assert_eq!(
        fs::read_to_string(root.join("docs").join("workflows.md")).unwrap(),
        "* Deploy"
    );
}

#[test]
fn env_override_takes_precedence_over_defaults() {
    let repo = sample_repo();

    workflow_readme(repo.path())
        .env("WORKFLOW_README_OUTPUT", "WORKFLOWS.md")
        .assert()
        .success();

    assert!(repo.path().join("WORKFLOWS.md").exists());
    assert!(!repo.path().join("README.md").exists());
}
