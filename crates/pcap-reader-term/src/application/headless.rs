use anyhow::Result;
use pcap_reader_client::AnalysisClient;

use crate::domain::models::Phase;
use crate::domain::services::captures::clean_path;
use crate::domain::services::captures::load_capture;
use crate::domain::services::Conversation;

/// Runs one upload and the given questions without a terminal. Questions are
/// skipped when the upload did not produce a job.
pub async fn run(
    client: &dyn AnalysisClient,
    path: &str,
    questions: &[String],
) -> Result<Conversation> {
    let file = load_capture(clean_path(path)).await?;

    let mut conversation = Conversation::new();
    conversation.select_capture(file)?;
    conversation.upload(client).await;

    if conversation.session().phase() != Phase::HasJob {
        tracing::warn!(path, "upload did not produce a job, skipping questions");
        return Ok(conversation);
    }

    for question in questions {
        conversation.set_draft(question);
        if !conversation.ask(client).await {
            tracing::debug!(question = %question, "empty question skipped");
            conversation.set_draft("");
        }
    }

    return Ok(conversation);
}

#[cfg(test)]
mod tests {
    use pcap_reader_client::TransportError;

    use super::*;
    use crate::domain::models::transcript;
    use crate::test_utils::analysis;
    use crate::test_utils::answer;
    use crate::test_utils::ScriptedClient;

    async fn capture_path(dir: &tempfile::TempDir) -> Result<String> {
        let path = dir.path().join("call.pcap");
        tokio::fs::write(&path, b"pcap").await?;
        Ok(path.to_string_lossy().to_string())
    }

    #[tokio::test]
    async fn test_runs_upload_then_questions() -> Result<()> {
        let dir = tempfile::tempdir()?;
        let client = ScriptedClient::new()
            .with_upload(Ok(analysis("abc")))
            .with_answer(Ok(answer("first answer")))
            .with_answer(Ok(answer("second answer")));
        let questions = vec!["one?".to_string(), "".to_string(), "two?".to_string()];

        let conversation = run(&client, &capture_path(&dir).await?, &questions).await?;

        assert_eq!(client.question_count(), 2);
        let text = transcript(conversation.session().messages());
        assert!(text.starts_with("assistant: 👋 Upload a PCAP file to begin analysis.\n\nuser: 📁 Uploaded call.pcap\n\nassistant: ✅ Analysis complete."));
        assert!(text.ends_with("user: one?\n\nassistant: first answer\n\nuser: two?\n\nassistant: second answer"));
        Ok(())
    }

    #[tokio::test]
    async fn test_stops_after_a_failed_upload() -> Result<()> {
        let dir = tempfile::tempdir()?;
        let client =
            ScriptedClient::new().with_upload(Err(TransportError::unreachable("refused")));

        let conversation = run(&client, &capture_path(&dir).await?, &["one?".to_string()]).await?;

        assert_eq!(conversation.session().phase(), Phase::NoJob);
        assert_eq!(client.question_count(), 0);
        assert_eq!(
            conversation.session().messages().last().unwrap().content(),
            "❌ Cannot reach backend API."
        );
        Ok(())
    }

    #[tokio::test]
    async fn test_fails_on_unreadable_capture() {
        let client = ScriptedClient::new();
        assert!(run(&client, "/definitely/not/here.pcap", &[]).await.is_err());
        assert_eq!(client.upload_count(), 0);
    }
}
