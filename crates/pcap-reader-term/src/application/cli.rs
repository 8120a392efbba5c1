use clap::Arg;
use clap::ArgAction;
use clap::Command;

use crate::configuration::Config;
use crate::configuration::ConfigKey;

pub const ARG_FILE: &str = "file";
pub const ARG_ASK: &str = "ask";
pub const ARG_PRINT_CONFIG: &str = "print-config";

fn config_arg(key: ConfigKey, env: &'static str, help: &str) -> Arg {
    let default = Config::default_value(key);
    let mut help = help.to_string();
    if !default.is_empty() {
        help = format!("{help} [default: {default}]");
    }

    return Arg::new(key.to_string())
        .long(key.to_string())
        .env(env)
        .num_args(1)
        .help(help);
}

pub fn build() -> Command {
    return Command::new("pcap-reader")
        .about("Chat with an AI analysis of your SIP packet captures")
        .version(env!("CARGO_PKG_VERSION"))
        .arg(config_arg(
            ConfigKey::ApiUrl,
            "PCAP_READER_API_URL",
            "Base URL of the analysis service.",
        ))
        .arg(config_arg(
            ConfigKey::ConfigFile,
            "PCAP_READER_CONFIG_FILE",
            "Path to the configuration file.",
        ))
        .arg(config_arg(
            ConfigKey::LogFile,
            "PCAP_READER_LOG_FILE",
            "File the JSON logs are written to.",
        ))
        .arg(
            config_arg(ConfigKey::LogLevel, "PCAP_READER_LOG_LEVEL", "Log verbosity.")
                .value_parser(["error", "warn", "info", "debug", "trace"]),
        )
        .arg(config_arg(
            ConfigKey::Timeout,
            "PCAP_READER_TIMEOUT",
            "Seconds to wait for the analysis service before giving up on a request.",
        ))
        .arg(
            Arg::new(ARG_FILE)
                .short('f')
                .long(ARG_FILE)
                .value_name("CAPTURE")
                .num_args(1)
                .help("Analyze a capture without the terminal UI and print the conversation."),
        )
        .arg(
            Arg::new(ARG_ASK)
                .short('a')
                .long(ARG_ASK)
                .value_name("QUESTION")
                .action(ArgAction::Append)
                .requires(ARG_FILE)
                .help("Question to ask once the capture is analyzed. Can be repeated."),
        )
        .arg(
            Arg::new(ARG_PRINT_CONFIG)
                .long(ARG_PRINT_CONFIG)
                .action(ArgAction::SetTrue)
                .help("Print a default config.toml and exit."),
        );
}
