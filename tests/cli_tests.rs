//! Integration tests for the CLI layering order.

use clap::Parser;
use pulpo_config::cli::{Cli, Command};
use std::fs;
use tempfile::TempDir;

fn parse(args: &[&str]) -> Cli {
    Cli::try_parse_from(std::iter::once("pulpo-config").chain(args.iter().copied()))
        .expect("arguments should parse")
}

#[test]
fn test_files_then_overrides() {
    let temp = TempDir::new().unwrap();
    let json = temp.path().join("base.json");
    let yaml = temp.path().join("local.yaml");
    fs::write(&json, r#"{"server": {"host": "localhost", "port": 8080}, "tag": "json"}"#).unwrap();
    fs::write(&yaml, "tag: yaml\nserver:\n  port: 8081\n").unwrap();

    let cli = parse(&[
        "--yaml",
        yaml.to_str().unwrap(),
        "--json",
        json.to_str().unwrap(),
        "--set",
        "server.port=9000",
        "keys",
    ]);
    assert_eq!(cli.command, Command::Keys);

    // YAML files are applied after JSON files regardless of argument order
    let store = cli.build_store().unwrap();
    assert_eq!(*store.get("tag").unwrap(), "yaml");
    assert_eq!(*store.get("server.host").unwrap(), "localhost");
    assert_eq!(store.get_as_int("server.port").unwrap(), Some(9000));

    let keys: Vec<String> = store.keys().into_iter().collect();
    assert_eq!(keys, ["server.host", "server.port", "tag"]);
}

#[test]
fn test_repeated_json_files_layer_in_order() {
    let temp = TempDir::new().unwrap();
    let first = temp.path().join("first.json");
    let second = temp.path().join("second.json");
    fs::write(&first, r#"{"k1": "v1.1", "k2": "v1.1"}"#).unwrap();
    fs::write(&second, r#"{"k1": "v1.2"}"#).unwrap();

    let cli = parse(&[
        "--json",
        first.to_str().unwrap(),
        "--json",
        second.to_str().unwrap(),
        "json",
    ]);
    let store = cli.build_store().unwrap();
    assert_eq!(store.to_json().unwrap(), r#"{"k1": "v1.2", "k2": "v1.1"}"#);
}

#[test]
fn test_missing_file_is_an_error() {
    let cli = parse(&["--json", "/definitely/not/here.json", "show"]);
    assert!(cli.build_store().is_err());
}

#[test]
fn test_malformed_override_rejected() {
    let result = Cli::try_parse_from(["pulpo-config", "--set", "no-equals-sign", "show"]);
    assert!(result.is_err());
}
