mod common;

use anyhow::Result;
use assert_cmd::Command;
use common::{TestSite, write_config};
use predicates::prelude::*;
use sfic::SNAPSHOT_FILE;
use sfic::lock::RunLock;
use tempfile::TempDir;

fn sfic() -> Result<Command> {
    let mut cmd = Command::cargo_bin("sfic")?;
    cmd.env("NO_COLOR", "1")
        .env_remove("RUST_LOG")
        .env_remove(sfic::CONFIG_ENV);
    Ok(cmd)
}

fn site_config(site: &TestSite, config_dir: &TempDir) -> Result<std::path::PathBuf> {
    write_config(
        config_dir.path(),
        &format!(
            "[[scan]]\ndir = '{}'\nmode = \"content\"\nextensions = \"php\"\n",
            site.path().display()
        ),
    )
}

#[test]
fn test_scan_reports_then_goes_quiet() -> Result<()> {
    let site = TestSite::new()?;
    site.populate()?;

    sfic()?
        .args(["scan", "--ext", "php"])
        .arg(site.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("Scan results for"))
        .stdout(predicate::str::contains("added: 3"))
        .stdout(predicate::str::contains(site.file("lib/app.php")));

    assert!(site.path().join(SNAPSHOT_FILE).exists());

    sfic()?
        .args(["scan", "--ext", "php"])
        .arg(site.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("No changes detected"));

    Ok(())
}

#[test]
fn test_scan_short_format() -> Result<()> {
    let site = TestSite::new()?;
    site.populate()?;
    sfic()?
        .args(["scan", "--mode", "content", "--ext", "php"])
        .arg(site.path())
        .assert()
        .success();

    site.remove("index.php")?;

    sfic()?
        .args(["scan", "--mode", "content", "--ext", "php", "--short"])
        .arg(site.path())
        .assert()
        .success()
        .stdout(predicate::str::contains(format!("D {}", site.file("index.php"))));

    Ok(())
}

#[test]
fn test_scan_missing_directory_fails() -> Result<()> {
    let temp = TempDir::new()?;
    sfic()?
        .arg("scan")
        .arg(temp.path().join("absent"))
        .assert()
        .failure()
        .stderr(predicate::str::contains("directory not found"));
    Ok(())
}

#[test]
fn test_show_lists_snapshot() -> Result<()> {
    let site = TestSite::new()?;
    site.write("index.php", "<?php")?;
    sfic()?
        .args(["scan", "--ext", "php"])
        .arg(site.path())
        .assert()
        .success();

    sfic()?
        .arg("show")
        .arg(site.path())
        .assert()
        .success()
        .stdout(predicate::str::contains(site.file("index.php")))
        .stdout(predicate::str::contains("1 records"));
    Ok(())
}

#[test]
fn test_show_without_snapshot_fails() -> Result<()> {
    let site = TestSite::new()?;
    sfic()?
        .arg("show")
        .arg(site.path())
        .assert()
        .failure()
        .stderr(predicate::str::contains("No snapshot found"));
    Ok(())
}

#[test]
fn test_run_prints_report() -> Result<()> {
    let site = TestSite::new()?;
    site.populate()?;
    let config_dir = TempDir::new()?;
    let config = site_config(&site, &config_dir)?;

    sfic()?
        .arg("--config")
        .arg(&config)
        .args(["run", "--no-notify"])
        .assert()
        .success()
        .stdout(predicate::str::starts_with("Scan completed in"))
        .stdout(predicate::str::contains("Added:"));

    sfic()?
        .env(sfic::CONFIG_ENV, &config)
        .args(["run", "--no-notify"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Added:").not());

    Ok(())
}

#[test]
fn test_run_without_targets_fails() -> Result<()> {
    let config_dir = TempDir::new()?;
    let config = write_config(config_dir.path(), "[notify]\nto = \"a@example.com\"\n")?;

    sfic()?
        .arg("--config")
        .arg(&config)
        .args(["run", "--no-notify"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("no scan targets configured"));
    Ok(())
}

#[test]
fn test_run_with_missing_config_fails() -> Result<()> {
    let config_dir = TempDir::new()?;
    sfic()?
        .arg("--config")
        .arg(config_dir.path().join("missing.toml"))
        .arg("run")
        .assert()
        .failure()
        .stderr(predicate::str::contains("Configuration file not found"));
    Ok(())
}

#[test]
fn test_run_refuses_to_overlap() -> Result<()> {
    let site = TestSite::new()?;
    let config_dir = TempDir::new()?;
    let config = site_config(&site, &config_dir)?;
    let lock_path = config_dir.path().join("held.lock");
    let _held = RunLock::acquire(&lock_path)?;

    sfic()?
        .arg("--config")
        .arg(&config)
        .args(["run", "--no-notify", "--lock-file"])
        .arg(&lock_path)
        .assert()
        .failure()
        .stderr(predicate::str::contains("already in progress"));

    assert!(!site.path().join(SNAPSHOT_FILE).exists());
    Ok(())
}

#[test]
fn test_check_reports_warnings() -> Result<()> {
    let config_dir = TempDir::new()?;
    let config = write_config(
        config_dir.path(),
        "[[scan]]\ndir = \"/var/www\"\nrecursive = true\n",
    )?;

    sfic()?
        .arg("--config")
        .arg(&config)
        .arg("check")
        .assert()
        .success()
        .stdout(predicate::str::contains("scan[0].recursive"))
        .stdout(predicate::str::contains("no extensions configured"))
        .stdout(predicate::str::contains("2 warnings"));
    Ok(())
}

#[test]
fn test_check_clean_config() -> Result<()> {
    let site = TestSite::new()?;
    let config_dir = TempDir::new()?;
    let config = site_config(&site, &config_dir)?;

    sfic()?
        .arg("--config")
        .arg(&config)
        .arg("check")
        .assert()
        .success()
        .stdout(predicate::str::contains("is valid (1 scan targets)"));
    Ok(())
}

#[test]
fn test_completion_generates_script() -> Result<()> {
    sfic()?
        .args(["completion", "bash"])
        .assert()
        .success()
        .stdout(predicate::str::contains("sfic"));
    Ok(())
}
