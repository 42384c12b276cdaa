//! Integration tests for viewstring-cli.

use std::fs;
use std::path::Path;

use assert_cmd::cargo;
use predicates::prelude::*;
use tempfile::TempDir;

fn write(root: &Path, rel: &str, content: &str) {
    let path = root.join(rel);
    fs::create_dir_all(path.parent().unwrap()).unwrap();
    fs::write(path, content).unwrap();
}

/// A content root with a layout, a shared view and a controller view.
fn site() -> TempDir {
    let dir = TempDir::new().unwrap();
    write(
        dir.path(),
        "Views/Shared/_Layout.jinja",
        "<html>{% block body %}{% endblock %}</html>",
    );
    write(
        dir.path(),
        "Views/Shared/Invoice.jinja",
        "{% extends \"Views/Shared/_Layout.jinja\" %}\
         {% block body %}Invoice {{ model.number }}{% endblock %}",
    );
    write(
        dir.path(),
        "Views/Shared/Banner.jinja",
        "{{ site }}: {{ model.title }}",
    );
    dir
}

/// `viewstring` with no user config, colour or log overrides leaking in.
fn viewstring(config_home: &Path) -> assert_cmd::Command {
    let mut cmd = cargo::cargo_bin_cmd!("viewstring");
    cmd.env("XDG_CONFIG_HOME", config_home)
        .env("HOME", config_home)
        .env("NO_COLOR", "1")
        .env_remove("RUST_LOG")
        .env_remove("VIEWSTRING__ENGINE__CONTENT_ROOT");
    cmd
}

#[test]
fn help_lists_commands() {
    let home = TempDir::new().unwrap();
    viewstring(home.path())
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("render"))
        .stdout(predicate::str::contains("locations"));
}

#[test]
fn help_describes_the_json_report() {
    let home = TempDir::new().unwrap();
    viewstring(home.path())
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("--output-format <FORMAT>"))
        .stdout(predicate::str::contains("json"));
}

#[test]
fn version_flag() {
    let home = TempDir::new().unwrap();
    viewstring(home.path())
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains(env!("CARGO_PKG_VERSION")));
}

#[test]
fn renders_view_with_model_file() {
    let home = TempDir::new().unwrap();
    let site = site();
    let model = site.path().join("model.json");
    fs::write(&model, r#"{ "number": 42 }"#).unwrap();

    viewstring(home.path())
        .current_dir(site.path())
        .args(["render", "Invoice", "--model"])
        .arg(&model)
        .assert()
        .success()
        .stdout("<html>Invoice 42</html>");
}

#[test]
fn renders_view_by_path_with_model_from_stdin() {
    let home = TempDir::new().unwrap();
    let site = site();

    viewstring(home.path())
        .args(["render", "~/Views/Shared/Invoice.jinja", "--model", "-"])
        .arg("--content-root")
        .arg(site.path())
        .write_stdin(r#"{ "number": 7 }"#)
        .assert()
        .success()
        .stdout("<html>Invoice 7</html>");
}

#[test]
fn writes_output_file() {
    let home = TempDir::new().unwrap();
    let site = site();
    let out = site.path().join("invoice.html");

    viewstring(home.path())
        .current_dir(site.path())
        .args(["render", "Invoice", "--model", "-", "--out"])
        .arg(&out)
        .write_stdin(r#"{ "number": 1 }"#)
        .assert()
        .success();

    assert_eq!(fs::read_to_string(out).unwrap(), "<html>Invoice 1</html>");
}

#[test]
fn missing_view_exits_3_and_lists_locations() {
    let home = TempDir::new().unwrap();
    let site = site();

    viewstring(home.path())
        .current_dir(site.path())
        .args(["render", "Receipt"])
        .assert()
        .code(3)
        .stderr(predicate::str::contains(
            "Unable to find view 'Receipt'. The following locations were searched:",
        ))
        .stderr(predicate::str::contains("/Views//Receipt.jinja"))
        .stderr(predicate::str::contains("/Pages/Shared/Receipt.jinja"));
}

#[test]
fn model_missing_a_field_exits_2() {
    let home = TempDir::new().unwrap();
    let site = site();

    viewstring(home.path())
        .current_dir(site.path())
        .args(["render", "Invoice"])
        .assert()
        .code(2)
        .stderr(predicate::str::contains("undefined"));
}

#[test]
fn malformed_model_exits_2() {
    let home = TempDir::new().unwrap();
    let site = site();

    viewstring(home.path())
        .current_dir(site.path())
        .args(["render", "Invoice", "--model", "-"])
        .write_stdin("{ not json")
        .assert()
        .code(2)
        .stderr(predicate::str::contains("is not valid JSON"));
}

#[test]
fn missing_content_root_exits_4() {
    let home = TempDir::new().unwrap();

    viewstring(home.path())
        .args(["render", "Invoice", "--content-root", "/definitely/not/here"])
        .assert()
        .code(4)
        .stderr(predicate::str::contains("is not a directory"));
}

#[test]
fn config_file_supplies_root_and_globals() {
    let home = TempDir::new().unwrap();
    let site = site();
    let config = home.path().join("custom.toml");
    fs::write(
        &config,
        format!(
            "[engine]\ncontent_root = {:?}\n\n[globals]\nsite = \"Shop\"\n",
            site.path().display().to_string()
        ),
    )
    .unwrap();

    viewstring(home.path())
        .arg("--config")
        .arg(&config)
        .args(["render", "Banner", "--model", "-"])
        .write_stdin(r#"{ "title": "Sale" }"#)
        .assert()
        .success()
        .stdout("Shop: Sale");
}

#[test]
fn environment_sets_content_root() {
    let home = TempDir::new().unwrap();
    let site = site();

    viewstring(home.path())
        .env("VIEWSTRING__ENGINE__CONTENT_ROOT", site.path())
        .args(["render", "Invoice", "--model", "-"])
        .write_stdin(r#"{ "number": 3 }"#)
        .assert()
        .success()
        .stdout("<html>Invoice 3</html>");
}

#[test]
fn explicit_missing_config_file_exits_4() {
    let home = TempDir::new().unwrap();

    viewstring(home.path())
        .args(["--config", "nope.toml", "config", "list"])
        .assert()
        .code(4);
}

#[test]
fn locations_mark_the_hit() {
    let home = TempDir::new().unwrap();
    let site = site();

    viewstring(home.path())
        .current_dir(site.path())
        .args(["--output-format", "json", "locations", "Invoice"])
        .assert()
        .success()
        .stdout(predicate::str::contains(r#""location": "/Views//Invoice.jinja""#))
        .stdout(predicate::str::contains(r#""exists": true"#));
}

#[test]
fn config_path_names_the_default_file() {
    let home = TempDir::new().unwrap();

    viewstring(home.path())
        .args(["config", "path"])
        .assert()
        .success()
        .stdout(predicate::str::contains("viewstring.toml"));
}

#[test]
fn config_list_shows_engine_defaults() {
    let home = TempDir::new().unwrap();

    viewstring(home.path())
        .args(["config", "list"])
        .assert()
        .success()
        .stdout(predicate::str::contains("[engine]"))
        .stdout(predicate::str::contains("/Views/{1}/{0}.jinja"));
}
