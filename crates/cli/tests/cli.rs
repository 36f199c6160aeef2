// ABOUTME: Integration tests for the devsite CLI binary.
// ABOUTME: Tests clamp output and skips, page boot, preferences, toggles, and the calculator panel.

use assert_cmd::assert::OutputAssertExt;
use assert_cmd::cargo::CommandCargoExt;
use predicates::prelude::*;
use std::fs;
use std::path::{Path, PathBuf};
use std::process::Command;
use tempfile::TempDir;

const CALC_PAGE: &str = r#"<!DOCTYPE html>
<html>
<head><title>Fluid type</title></head>
<body>
<ul class="nav-links"><li><a href="/tools/fluid-type">Fluid type</a></li><li><a href="/blog" id="nav-blog">Blog</a></li></ul>
<input id="minSize" value="16"><input id="maxSize" value="48">
<input id="minVW" value="320"><input id="maxVW" value="1600">
<input id="baseRem" value="16">
<span id="slopeOut"></span><span id="baseOut"></span><code id="clampCode"></code>
</body>
</html>"#;

const DOCS_PAGE: &str = r#"<!DOCTYPE html>
<html>
<body>
<button id="doc-menu-btn"><span class="material-icons">menu_book</span></button>
<aside id="docs-sidebar"><a class="doc-link" href="/docs/start">Start</a></aside>
<div class="post-content"><p>Short docs page body text.</p></div>
</body>
</html>"#;

fn devsite_cmd(prefs: &Path) -> Command {
    let mut cmd = Command::cargo_bin("devsite").unwrap();
    cmd.arg("--prefs").arg(prefs);
    // Keep the user's real config out of the tests.
    cmd.arg("--config").arg(prefs.with_file_name("config.toml"));
    cmd
}

fn workspace() -> (TempDir, PathBuf) {
    let dir = TempDir::new().unwrap();
    fs::write(dir.path().join("config.toml"), "").unwrap();
    let prefs = dir.path().join("prefs.json");
    (dir, prefs)
}

fn write_page(dir: &TempDir, name: &str, html: &str) -> PathBuf {
    let path = dir.path().join(name);
    fs::write(&path, html).unwrap();
    path
}

#[test]
fn clamp_defaults_print_expression() {
    let (_dir, prefs) = workspace();
    devsite_cmd(&prefs)
        .arg("clamp")
        .assert()
        .success()
        .stdout("clamp(1.000rem, 0.500rem + 2.500vw, 3.000rem)\n");
}

#[test]
fn clamp_property_declaration() {
    let (_dir, prefs) = workspace();
    devsite_cmd(&prefs)
        .args(["clamp", "--min-size", "20", "--max-size", "20", "--property", "font-size"])
        .assert()
        .success()
        .stdout("font-size: clamp(1.250rem, 1.250rem + 0.000vw, 1.250rem);\n");
}

#[test]
fn clamp_json_output() {
    let (_dir, prefs) = workspace();
    let output = devsite_cmd(&prefs)
        .args(["clamp", "--json"])
        .assert()
        .success()
        .get_output()
        .stdout
        .clone();
    let value: serde_json::Value = serde_json::from_slice(&output).unwrap();
    assert_eq!(value["slopePercent"], "2.500");
    assert_eq!(value["baseRem"], "0.500");
}

#[test]
fn clamp_degenerate_viewport_is_skipped() {
    let (_dir, prefs) = workspace();
    devsite_cmd(&prefs)
        .args(["clamp", "--min-vw", "800", "--max-vw", "800"])
        .assert()
        .code(1)
        .stdout(predicate::str::is_empty())
        .stderr(predicate::str::contains("degenerate viewport range"));
}

#[test]
fn clamp_zero_is_skipped() {
    let (_dir, prefs) = workspace();
    devsite_cmd(&prefs)
        .args(["clamp", "--base-rem", "0"])
        .assert()
        .code(1)
        .stderr(predicate::str::contains("baseRem must be a positive number"));
}

#[test]
fn config_changes_reset_values() {
    let (dir, prefs) = workspace();
    fs::write(
        dir.path().join("config.toml"),
        "[calculator]\nmax_size_px = 64\n",
    )
    .unwrap();
    let page = write_page(&dir, "calc.html", CALC_PAGE);

    devsite_cmd(&prefs)
        .arg("calc")
        .arg(&page)
        .arg("--reset")
        .assert()
        .success()
        .stdout(predicate::str::contains("clamp(1.000rem, 0.250rem + 3.750vw, 4.000rem)"))
        .stdout(predicate::str::contains(r#"value="64""#));
}

#[test]
fn calc_with_bad_input_exits_skipped() {
    let (dir, prefs) = workspace();
    let page = write_page(
        &dir,
        "calc.html",
        &CALC_PAGE.replace(r#"id="maxVW" value="1600""#, r#"id="maxVW" value="320""#),
    );

    devsite_cmd(&prefs)
        .arg("calc")
        .arg(&page)
        .assert()
        .code(1)
        .stdout(predicate::str::contains(r#"<code id="clampCode"></code>"#));
}

#[test]
fn page_boot_writes_output_file() {
    let (dir, prefs) = workspace();
    let page = write_page(&dir, "calc.html", CALC_PAGE);
    let out = dir.path().join("out.html");

    devsite_cmd(&prefs)
        .arg("page")
        .arg(&page)
        .args(["--url", "https://devsite.example/tools/fluid-type"])
        .arg("-o")
        .arg(&out)
        .assert()
        .success();

    let html = fs::read_to_string(&out).unwrap();
    assert!(html.contains("clamp(1.000rem, 0.500rem + 2.500vw, 3.000rem)"));
    assert!(html.contains(r#"data-theme="light""#));
    assert!(html.contains(r#"<a href="/tools/fluid-type" class="active">"#));
}

#[test]
fn theme_set_then_page_uses_it() {
    let (dir, prefs) = workspace();
    devsite_cmd(&prefs)
        .args(["theme", "set", "dark"])
        .assert()
        .success()
        .stdout("dark\n");
    devsite_cmd(&prefs)
        .args(["theme", "get"])
        .assert()
        .success()
        .stdout("dark\n");

    let page = write_page(&dir, "docs.html", DOCS_PAGE);
    devsite_cmd(&prefs)
        .arg("page")
        .arg(&page)
        .args(["--url", "https://devsite.example/docs/start"])
        .assert()
        .success()
        .stdout(predicate::str::contains(r#"data-theme="dark""#));
}

#[test]
fn theme_set_rejects_unknown() {
    let (_dir, prefs) = workspace();
    devsite_cmd(&prefs)
        .args(["theme", "set", "sepia"])
        .assert()
        .code(2)
        .stderr(predicate::str::contains("unknown theme"));
}

#[test]
fn lang_set_and_get() {
    let (_dir, prefs) = workspace();
    devsite_cmd(&prefs)
        .args(["lang", "get"])
        .assert()
        .success()
        .stdout("en\n");
    devsite_cmd(&prefs)
        .args(["lang", "set", "es"])
        .assert()
        .success();
    devsite_cmd(&prefs)
        .args(["lang", "get"])
        .assert()
        .success()
        .stdout("es\n");
    devsite_cmd(&prefs)
        .args(["lang", "set", "klingon"])
        .assert()
        .code(2);
}

#[test]
fn toggle_sidebar_swaps_icon() {
    let (dir, prefs) = workspace();
    let page = write_page(&dir, "docs.html", DOCS_PAGE);
    devsite_cmd(&prefs)
        .args(["toggle", "sidebar"])
        .arg(&page)
        .assert()
        .success()
        .stdout(predicate::str::contains(r#"<span class="material-icons">close</span>"#))
        .stdout(predicate::str::contains(r#"id="docs-sidebar" class="active""#));
}

#[test]
fn read_time_prints_estimate() {
    let (dir, prefs) = workspace();
    let page = write_page(&dir, "docs.html", DOCS_PAGE);
    devsite_cmd(&prefs)
        .arg("read-time")
        .arg(&page)
        .assert()
        .success()
        .stdout("1 min read\n");
}

#[test]
fn missing_file_is_an_error() {
    let (dir, prefs) = workspace();
    devsite_cmd(&prefs)
        .arg("read-time")
        .arg(dir.path().join("nope.html"))
        .assert()
        .code(2)
        .stderr(predicate::str::contains("file not found"));
}
