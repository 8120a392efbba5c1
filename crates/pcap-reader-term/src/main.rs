use anyhow::bail;
use anyhow::Result;
use pcap_reader_client::AnalysisClientFactory;
use pcap_reader_term::application::cli;
use pcap_reader_term::application::headless;
use pcap_reader_term::application::logging;
use pcap_reader_term::application::ui;
use pcap_reader_term::domain::models::transcript;
use pcap_reader_term::domain::models::Phase;
use pcap_reader_term::Config;

#[tokio::main]
async fn main() -> Result<()> {
    let cmd = cli::build();
    let matches = cmd.clone().get_matches();

    if matches.get_flag(cli::ARG_PRINT_CONFIG) {
        println!("{}", Config::serialize_default(&cmd));
        return Ok(());
    }

    let config = Config::load(&cmd, &matches).await?;
    let _log_guard = logging::init(&config)?;
    let client = AnalysisClientFactory::create_http_client(config.client_config()?);
    tracing::info!(api_url = client.base_url(), "starting");

    if let Some(path) = matches.get_one::<String>(cli::ARG_FILE) {
        let questions: Vec<String> = matches
            .get_many::<String>(cli::ARG_ASK)
            .map(|questions| questions.cloned().collect())
            .unwrap_or_default();

        let conversation = headless::run(client.as_ref(), path, &questions).await?;
        println!("{}", transcript(conversation.session().messages()));

        if conversation.session().phase() != Phase::HasJob {
            bail!("{path} was not analyzed");
        }
        return Ok(());
    }

    ui::run(client).await
}
