//! Tests for layering the config file between built-in defaults and the command line
use std::path::PathBuf;

use clap::Parser;
use inkshed::{Args, Config, Label};

fn write_config(dir: &tempfile::TempDir, content: &str) -> PathBuf {
    let path = dir.path().join("config.toml");
    std::fs::write(&path, content).expect("write config");
    path
}

#[test]
fn test_config_file_overrides_defaults() {
    let dir = tempfile::tempdir().expect("tempdir");
    let path = write_config(
        &dir,
        r#"
prefix = "J.Doe.Journal"
author = "J. Doe"
title = "{label|strip,slugify}"
editor = "nano -w"
converter = "cp"
converter_args = ["{input}", "{output}"]
"#,
    );

    let args = Args::parse_from(["inkshed", " Week 1 Notes "]);
    let config = Config::resolve(args, Some(&path)).expect("resolve config");
    let label = Label::new(" Week 1 Notes ").unwrap();

    assert_eq!(config.config_path.as_deref(), Some(path.as_path()));
    assert_eq!(config.prefix, "J.Doe.Journal");
    assert_eq!(config.author, "J. Doe");
    assert_eq!(config.editor.as_deref(), Some("nano -w"));
    assert_eq!(config.converter.program(), "cp");
    assert_eq!(config.title_for(&label), "week-1-notes");
}

#[test]
fn test_command_line_overrides_config_file() {
    let dir = tempfile::tempdir().expect("tempdir");
    let path = write_config(&dir, "prefix = \"FromFile\"\nauthor = \"File Author\"\n");

    let args = Args::parse_from([
        "inkshed",
        "x",
        "--config",
        path.to_str().unwrap(),
        "--prefix",
        "FromCli",
    ]);
    let config = Config::resolve(args, None).expect("resolve config");

    assert_eq!(config.prefix, "FromCli");
    assert_eq!(config.author, "File Author");
}

#[test]
fn test_missing_default_config_is_ignored() {
    let dir = tempfile::tempdir().expect("tempdir");
    let absent = dir.path().join("absent.toml");

    let args = Args::parse_from(["inkshed", "x"]);
    let config = Config::resolve(args, Some(&absent)).expect("resolve config");
    assert!(config.config_path.is_none());
    assert_eq!(config.prefix, "E.Santos.Inkshed");
}

#[test]
fn test_missing_explicit_config_is_an_error() {
    let dir = tempfile::tempdir().expect("tempdir");
    let absent = dir.path().join("absent.toml");

    let args = Args::parse_from(["inkshed", "x", "--config", absent.to_str().unwrap()]);
    let err = Config::resolve(args, None).unwrap_err();
    assert!(format!("{:#}", err).contains("failed to read config file"));
}

#[test]
fn test_unknown_keys_are_rejected() {
    let dir = tempfile::tempdir().expect("tempdir");
    let path = write_config(&dir, "subject = \"Engl\"\n");

    let args = Args::parse_from(["inkshed", "x"]);
    assert!(Config::resolve(args, Some(&path)).is_err());
}

#[test]
fn test_converter_args_need_both_placeholders() {
    let dir = tempfile::tempdir().expect("tempdir");
    let path = write_config(&dir, "converter_args = [\"{input}\"]\n");

    let args = Args::parse_from(["inkshed", "x"]);
    let err = Config::resolve(args, Some(&path)).unwrap_err();
    assert!(format!("{:#}", err).contains("{output}"));
}

#[test]
fn test_relative_directory_is_taken_from_home() {
    let dir = tempfile::tempdir().expect("tempdir");
    let path = write_config(&dir, "directory = \"Documents/inksheds\"\n");

    let args = Args::parse_from(["inkshed", "x"]);
    let config = Config::resolve(args, Some(&path)).expect("resolve config");

    let home = dirs::home_dir().expect("home dir");
    assert_eq!(config.directory, home.join("Documents/inksheds"));
}

#[test]
fn test_absolute_directory_is_kept() {
    let dir = tempfile::tempdir().expect("tempdir");
    let target = dir.path().join("out");
    let path = write_config(
        &dir,
        &format!("directory = {:?}\n", target.to_str().unwrap()),
    );

    let args = Args::parse_from(["inkshed", "x"]);
    let config = Config::resolve(args, Some(&path)).expect("resolve config");
    assert_eq!(config.directory, target);
}
