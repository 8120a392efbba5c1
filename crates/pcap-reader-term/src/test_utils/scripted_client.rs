use std::collections::VecDeque;
use std::sync::Mutex;

use async_trait::async_trait;
use pcap_reader_client::AnalysisClient;
use pcap_reader_client::AnalysisResult;
use pcap_reader_client::CaptureFile;
use pcap_reader_client::ChatAnswer;
use pcap_reader_client::JobId;
use pcap_reader_client::PacketStats;
use pcap_reader_client::Result;
use pcap_reader_client::TransportError;

/// Analysis client that replays queued outcomes and records every request.
#[derive(Default)]
pub struct ScriptedClient {
    uploads: Mutex<VecDeque<Result<AnalysisResult>>>,
    answers: Mutex<VecDeque<Result<ChatAnswer>>>,
    health: Mutex<Option<TransportError>>,
    pub uploaded: Mutex<Vec<CaptureFile>>,
    pub asked: Mutex<Vec<(JobId, String)>>,
}

impl ScriptedClient {
    pub fn new() -> ScriptedClient {
        return ScriptedClient::default();
    }

    pub fn with_upload(self, outcome: Result<AnalysisResult>) -> ScriptedClient {
        self.uploads.lock().unwrap().push_back(outcome);
        return self;
    }

    pub fn with_answer(self, outcome: Result<ChatAnswer>) -> ScriptedClient {
        self.answers.lock().unwrap().push_back(outcome);
        return self;
    }

    pub fn with_unhealthy(self, err: TransportError) -> ScriptedClient {
        *self.health.lock().unwrap() = Some(err);
        return self;
    }

    pub fn upload_count(&self) -> usize {
        return self.uploaded.lock().unwrap().len();
    }

    pub fn question_count(&self) -> usize {
        return self.asked.lock().unwrap().len();
    }
}

#[async_trait]
impl AnalysisClient for ScriptedClient {
    async fn submit_capture(&self, file: CaptureFile) -> Result<AnalysisResult> {
        self.uploaded.lock().unwrap().push(file);
        return self
            .uploads
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| Err(TransportError::unreachable("no scripted upload")));
    }

    async fn submit_question(&self, job_id: &JobId, question: &str) -> Result<ChatAnswer> {
        self.asked
            .lock()
            .unwrap()
            .push((job_id.clone(), question.to_string()));
        return self
            .answers
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| Err(TransportError::unreachable("no scripted answer")));
    }

    async fn health_check(&self) -> Result<()> {
        match self.health.lock().unwrap().clone() {
            Some(err) => return Err(err),
            None => return Ok(()),
        }
    }

    fn base_url(&self) -> &str {
        return "http://scripted.test";
    }
}

pub fn analysis(job_id: &str) -> AnalysisResult {
    return AnalysisResult {
        job_id: JobId::new(job_id),
        packet_stats: PacketStats {
            total_packets: 10,
            sip_packets: 4,
            rtp_packets: 6,
        },
        total_calls: 2,
        file_ai_insight: "ok".to_string(),
        file: Some("call.pcap".to_string()),
        capture_context: None,
        calls: vec![],
    };
}

pub fn answer(text: &str) -> ChatAnswer {
    return ChatAnswer {
        answer: text.to_string(),
    };
}

pub fn capture(name: &str) -> CaptureFile {
    return CaptureFile::new(name, b"\xd4\xc3\xb2\xa1".to_vec());
}
