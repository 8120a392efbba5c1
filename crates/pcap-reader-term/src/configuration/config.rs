#[cfg(test)]
#[path = "config_test.rs"]
mod tests;

use std::collections::HashMap;
use std::env;
use std::path;
use std::time::Duration;

use anyhow::bail;
use anyhow::Context;
use anyhow::Result;
use clap::Arg;
use clap::ArgMatches;
use clap::Command;
use pcap_reader_client::ClientConfig;
use pcap_reader_client::DEFAULT_BASE_URL;
use pcap_reader_client::DEFAULT_TIMEOUT;
use strum::EnumIter;
use strum::IntoEnumIterator;
use tokio::fs;

#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash, EnumIter, strum::Display)]
#[strum(serialize_all = "kebab-case")]
pub enum ConfigKey {
    ApiUrl,
    ConfigFile,
    LogFile,
    LogLevel,
    Timeout,
}

/// Resolved configuration. Built once at startup and read-only afterwards.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    values: HashMap<ConfigKey, String>,
}

fn find_arg(cmd: &Command, key: ConfigKey) -> Option<&Arg> {
    let long = key.to_string();
    return cmd
        .get_arguments()
        .find(|arg| return arg.get_long() == Some(long.as_str()));
}

fn possible_values(cmd: &Command, key: ConfigKey) -> Vec<String> {
    let Some(arg) = find_arg(cmd, key) else {
        return vec![];
    };

    return arg
        .get_possible_values()
        .iter()
        .map(|value| return value.get_name().to_string())
        .collect();
}

impl Default for Config {
    fn default() -> Config {
        let values = ConfigKey::iter()
            .map(|key| return (key, Config::default_value(key)))
            .collect();

        return Config { values };
    }
}

impl Config {
    pub fn get(&self, key: ConfigKey) -> &str {
        return self.values.get(&key).map(|val| val.as_str()).unwrap_or("");
    }

    fn set(&mut self, key: ConfigKey, value: &str) {
        self.values.insert(key, value.to_string());
    }

    pub fn default_value(key: ConfigKey) -> String {
        match key {
            ConfigKey::ApiUrl => return DEFAULT_BASE_URL.to_string(),
            ConfigKey::ConfigFile => {
                return dirs::config_dir()
                    .map(|dir| dir.join("pcap-reader").join("config.toml"))
                    .map(|path| path.to_string_lossy().to_string())
                    .unwrap_or_default();
            }
            ConfigKey::LogFile => {
                let dir = dirs::cache_dir()
                    .map(|dir| dir.join("pcap-reader"))
                    .unwrap_or_else(env::temp_dir);
                return dir.join("pcap-reader.log").to_string_lossy().to_string();
            }
            ConfigKey::LogLevel => return "info".to_string(),
            ConfigKey::Timeout => return DEFAULT_TIMEOUT.as_secs().to_string(),
        }
    }

    pub async fn load(cmd: &Command, matches: &ArgMatches) -> Result<Config> {
        let mut config = Config::default();

        let mut config_file = Config::default_value(ConfigKey::ConfigFile);
        if let Ok(Some(arg_config_file)) =
            matches.try_get_one::<String>(&ConfigKey::ConfigFile.to_string())
        {
            config_file = arg_config_file.to_string();
        }

        let config_path = path::PathBuf::from(&config_file);
        if !config_file.is_empty() && config_path.exists() {
            let toml_str = fs::read_to_string(&config_path)
                .await
                .with_context(|| format!("failed to read {}", config_path.display()))?;
            let doc = toml_str
                .parse::<toml_edit::Document>()
                .with_context(|| format!("{} is not valid TOML", config_path.display()))?;

            for key in ConfigKey::iter() {
                if key == ConfigKey::ConfigFile {
                    continue;
                }
                let Some(val) = doc.get(&key.to_string()) else {
                    continue;
                };

                if let Some(val_int) = val.as_integer() {
                    config.set(key, &val_int.to_string());
                } else if let Some(val_str) = val.as_str() {
                    if val_str.is_empty() {
                        continue;
                    }
                    let possible_values = possible_values(cmd, key);
                    if !possible_values.is_empty()
                        && !possible_values.contains(&val_str.to_string())
                    {
                        bail!(
                            "config.toml has an invalid value for key '{key}': {val_str}\nPossible values are: {}",
                            possible_values.join(", ")
                        );
                    }
                    config.set(key, val_str);
                } else {
                    bail!("config.toml has an unsupported value type for key '{key}'");
                }
            }
        }
        config.set(ConfigKey::ConfigFile, &config_file);

        for key in ConfigKey::iter() {
            if let Ok(Some(val)) = matches.try_get_one::<String>(&key.to_string()) {
                if val.is_empty() {
                    continue;
                }
                config.set(key, val);
            }
        }

        config.validate()?;

        tracing::debug!(
            api_url = config.get(ConfigKey::ApiUrl),
            timeout = config.get(ConfigKey::Timeout),
            config_file = config.get(ConfigKey::ConfigFile),
            "config"
        );

        return Ok(config);
    }

    fn validate(&self) -> Result<()> {
        let api_url = self.get(ConfigKey::ApiUrl);
        if !api_url.starts_with("http://") && !api_url.starts_with("https://") {
            bail!("api-url must be an http:// or https:// URL, got '{api_url}'");
        }

        self.timeout()?;
        return Ok(());
    }

    pub fn timeout(&self) -> Result<Duration> {
        let raw = self.get(ConfigKey::Timeout);
        let secs = match raw.parse::<u64>() {
            Ok(secs) if secs > 0 => secs,
            _ => bail!("timeout must be a positive number of seconds, got '{raw}'"),
        };

        return Ok(Duration::from_secs(secs));
    }

    pub fn client_config(&self) -> Result<ClientConfig> {
        return Ok(ClientConfig::new(self.get(ConfigKey::ApiUrl)).with_timeout(self.timeout()?));
    }

    pub fn serialize_default(cmd: &Command) -> String {
        let toml_str = ConfigKey::iter()
            .filter_map(|key| {
                if key == ConfigKey::ConfigFile {
                    return None;
                }

                let arg = find_arg(cmd, key)?;
                let mut description = arg
                    .get_help()
                    .map(|help| help.to_string())
                    .unwrap_or_default();
                description = description
                    .split("[default:")
                    .next()
                    .unwrap_or_default()
                    .trim()
                    .to_string();

                let possible_values = possible_values(cmd, key);
                if !possible_values.is_empty() {
                    description = format!(
                        "{description} [possible values: {}]",
                        possible_values.join(", ")
                    );
                }

                let mut val = Config::default_value(key);
                if val.is_empty() {
                    val = format!("# {key} = \"\"");
                } else if val.parse::<i64>().is_ok() {
                    val = format!("{key} = {val}");
                } else {
                    val = format!("{key} = {val:?}");
                }

                return Some(format!("# {description}\n{val}"));
            })
            .collect::<Vec<String>>()
            .join("\n\n");

        return toml_str;
    }
}
