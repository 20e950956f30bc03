use assert_cmd::cargo::cargo_bin_cmd;
use predicates::prelude::*;
use std::fs;
use std::path::PathBuf;
use tempfile::tempdir;

fn sample_path(name: &str) -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("samples")
        .join(name)
}

#[test]
fn fmt_prints_canonical_script() {
    let mut cmd = cargo_bin_cmd!("samos-conf");
    cmd.arg("fmt").arg(sample_path("cell_monolayer.conf"));

    let output_pred = predicate::str::contains("pair_potential vp {K=1;gamma=1;lambda=-5}\n")
        .and(predicate::str::contains("#").not())
        .and(predicate::str::ends_with("run 100000\n"));

    cmd.assert().success().stdout(output_pred);
}

#[test]
fn fmt_writes_output_file() {
    let dir = tempdir().unwrap();
    let output = dir.path().join("formatted.conf");

    let mut cmd = cargo_bin_cmd!("samos-conf");
    cmd.arg("fmt")
        .arg(sample_path("active_particles.conf"))
        .arg("--output")
        .arg(&output);
    cmd.assert().success().stdout(predicate::str::is_empty());

    let written = fs::read_to_string(&output).unwrap();
    assert!(written.starts_with("messages active.msg\n"));
}

#[test]
fn parse_prints_json() {
    let mut cmd = cargo_bin_cmd!("samos-conf");
    cmd.arg("parse").arg(sample_path("active_particles.conf"));

    let output_pred = predicate::str::contains("\"kind\": \"pair_potential\"")
        .and(predicate::str::contains("\"argument\": \"soft\""));
    cmd.assert().success().stdout(output_pred);
}

#[test]
fn parse_prints_yaml() {
    let mut cmd = cargo_bin_cmd!("samos-conf");
    cmd.arg("parse")
        .arg(sample_path("active_particles.conf"))
        .arg("--format")
        .arg("yaml");
    cmd.assert()
        .success()
        .stdout(predicate::str::contains("kind: nlist"));
}

#[test]
fn tokens_lists_keywords() {
    let mut cmd = cargo_bin_cmd!("samos-conf");
    cmd.arg("tokens").arg(sample_path("active_particles.conf"));
    cmd.assert()
        .success()
        .stdout(predicate::str::contains("KEYWORD  messages"));
}

#[test]
fn syntax_error_exits_with_failure() {
    let dir = tempdir().unwrap();
    let script = dir.path().join("broken.conf");
    fs::write(&script, "run 100\nrun fast\n").unwrap();

    let mut cmd = cargo_bin_cmd!("samos-conf");
    cmd.arg("fmt").arg(&script);
    cmd.assert()
        .failure()
        .stderr(predicate::str::contains("script did not parse"));
}

#[test]
fn missing_file_exits_with_failure() {
    let mut cmd = cargo_bin_cmd!("samos-conf");
    cmd.arg("parse").arg("does-not-exist.conf");
    cmd.assert()
        .failure()
        .stderr(predicate::str::contains("does-not-exist.conf"));
}

#[test]
fn result_and_clear_work_on_run_directory() {
    let dir = tempdir().unwrap();
    for name in ["cells_100.dat", "cells_2000.dat", "cells_2000.vtp", "tissue.conf"] {
        fs::write(dir.path().join(name), "").unwrap();
    }

    let mut cmd = cargo_bin_cmd!("samos-conf");
    cmd.arg("result").arg(dir.path());
    cmd.assert()
        .success()
        .stdout(predicate::str::contains("cells_2000.dat"));

    let mut cmd = cargo_bin_cmd!("samos-conf");
    cmd.arg("clear").arg(dir.path());
    cmd.assert()
        .success()
        .stdout(predicate::str::contains("Removed 3 result files"));
    assert!(dir.path().join("tissue.conf").exists());

    let mut cmd = cargo_bin_cmd!("samos-conf");
    cmd.arg("result").arg(dir.path());
    cmd.assert().failure();
}

#[test]
fn run_reports_missing_simulator() {
    let dir = tempdir().unwrap();
    let settings = dir.path().join("settings.toml");
    fs::write(
        &settings,
        "[simulator]\nexecutable = \"samos-conf-no-such-simulator\"\n",
    )
    .unwrap();

    let mut cmd = cargo_bin_cmd!("samos-conf");
    cmd.arg("run")
        .arg(sample_path("cell_monolayer.conf"))
        .arg("--dir")
        .arg(dir.path().join("run"))
        .arg("--settings")
        .arg(&settings);
    cmd.assert()
        .failure()
        .stderr(predicate::str::contains("samos-conf-no-such-simulator"));
    assert!(dir.path().join("run").join("tissue.conf").exists());
}
