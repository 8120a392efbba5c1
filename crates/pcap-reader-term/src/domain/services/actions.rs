use std::sync::Arc;

use anyhow::Result;
use pcap_reader_client::AnalysisClient;
use pcap_reader_client::AnalysisClientBox;
use tokio::sync::mpsc;

use crate::domain::models::Action;
use crate::domain::models::Event;

pub struct ActionsService {}

impl ActionsService {
    /// Serves actions until the sending side is dropped. Each request runs in
    /// its own task and reports back as a single event, so the UI loop never
    /// waits on the network.
    pub async fn start(
        client: AnalysisClientBox,
        event_tx: mpsc::UnboundedSender<Event>,
        rx: &mut mpsc::UnboundedReceiver<Action>,
    ) -> Result<()> {
        let client: Arc<dyn AnalysisClient> = Arc::from(client);

        while let Some(action) = rx.recv().await {
            let worker_client = client.clone();
            let worker_event_tx = event_tx.clone();

            tokio::spawn(async move {
                let event = match action {
                    Action::SubmitCapture(file) => {
                        Event::CaptureAnalyzed(worker_client.submit_capture(file).await)
                    }
                    Action::AskQuestion(job_id, question) => Event::QuestionAnswered(
                        worker_client.submit_question(&job_id, &question).await,
                    ),
                    Action::HealthCheck => {
                        Event::BackendHealth(worker_client.health_check().await)
                    }
                };

                if worker_event_tx.send(event).is_err() {
                    tracing::debug!("event receiver closed before the worker finished");
                }
            });
        }

        return Ok(());
    }
}
