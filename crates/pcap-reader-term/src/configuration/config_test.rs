use std::time::Duration;

use anyhow::Result;

use super::*;
use crate::application::cli;

fn matches(args: &[&str]) -> ArgMatches {
    let mut argv = vec!["pcap-reader"];
    argv.extend_from_slice(args);
    return cli::build().get_matches_from(argv);
}

async fn load_with_file(contents: &str, args: &[&str]) -> Result<Config> {
    let dir = tempfile::tempdir()?;
    let path = dir.path().join("config.toml");
    tokio::fs::write(&path, contents).await?;

    let path_str = path.to_string_lossy().to_string();
    let mut all_args = vec!["--config-file", path_str.as_str()];
    all_args.extend_from_slice(args);

    return Config::load(&cli::build(), &matches(&all_args)).await;
}

#[test]
fn it_has_defaults() {
    let config = Config::default();

    assert_eq!(config.get(ConfigKey::ApiUrl), "http://localhost:8000");
    assert_eq!(config.get(ConfigKey::LogLevel), "info");
    assert_eq!(config.get(ConfigKey::Timeout), "300");
    assert!(config.get(ConfigKey::LogFile).ends_with("pcap-reader.log"));
    assert_eq!(config.timeout().unwrap(), Duration::from_secs(300));
}

#[tokio::test]
async fn it_skips_a_missing_config_file() -> Result<()> {
    let config = Config::load(
        &cli::build(),
        &matches(&["--config-file", "/definitely/not/here.toml"]),
    )
    .await?;

    assert_eq!(config.get(ConfigKey::ApiUrl), "http://localhost:8000");
    assert_eq!(config.get(ConfigKey::ConfigFile), "/definitely/not/here.toml");
    Ok(())
}

#[tokio::test]
async fn it_reads_the_config_file() -> Result<()> {
    let config = load_with_file(
        "api-url = \"http://analysis.internal:9000\"\ntimeout = 30\nlog-level = \"debug\"\n",
        &[],
    )
    .await?;

    assert_eq!(config.get(ConfigKey::ApiUrl), "http://analysis.internal:9000");
    assert_eq!(config.get(ConfigKey::LogLevel), "debug");
    assert_eq!(config.timeout()?, Duration::from_secs(30));
    Ok(())
}

#[tokio::test]
async fn it_prefers_arguments_over_the_file() -> Result<()> {
    let config = load_with_file(
        "api-url = \"http://analysis.internal:9000\"\ntimeout = 30\n",
        &["--api-url", "https://override.test", "--timeout", "5"],
    )
    .await?;

    let client_config = config.client_config()?;
    assert_eq!(client_config.base_url, "https://override.test");
    assert_eq!(client_config.timeout, Duration::from_secs(5));
    Ok(())
}

#[tokio::test]
async fn it_rejects_invalid_choices_in_the_file() {
    let err = load_with_file("log-level = \"loud\"\n", &[])
        .await
        .unwrap_err();

    let message = err.to_string();
    assert!(message.contains("invalid value for key 'log-level': loud"));
    assert!(message.contains("error, warn, info, debug, trace"));
}

#[tokio::test]
async fn it_rejects_a_bad_timeout() {
    let err = load_with_file("timeout = 0\n", &[]).await.unwrap_err();
    assert!(err.to_string().contains("timeout must be a positive number"));

    let err = load_with_file("", &["--timeout", "soon"]).await.unwrap_err();
    assert!(err.to_string().contains("'soon'"));
}

#[tokio::test]
async fn it_rejects_a_non_http_url() {
    let err = load_with_file("api-url = \"localhost:8000\"\n", &[])
        .await
        .unwrap_err();
    assert!(err.to_string().contains("api-url must be an http"));
}

#[tokio::test]
async fn it_rejects_broken_toml() {
    assert!(load_with_file("api-url = ", &[]).await.is_err());
}

#[test]
fn it_serializes_the_default_config() {
    let toml_str = Config::serialize_default(&cli::build());

    assert!(toml_str.contains("# Base URL of the analysis service.\napi-url = \"http://localhost:8000\""));
    assert!(toml_str.contains("timeout = 300"));
    assert!(toml_str.contains("# Log verbosity. [possible values: error, warn, info, debug, trace]\nlog-level = \"info\""));
    assert!(!toml_str.contains("config-file"));

    let doc = toml_str.parse::<toml_edit::Document>().unwrap();
    assert_eq!(doc.get("timeout").and_then(|v| v.as_integer()), Some(300));
}
