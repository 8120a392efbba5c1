#[cfg(test)]
#[path = "report_test.rs"]
mod tests;

use pcap_reader_client::AnalysisResult;
use pcap_reader_client::TransportError;

use super::Job;

/// Renders the success summary shown after an upload. Values are used
/// verbatim, the AI insight included.
pub fn analysis_report(result: &AnalysisResult) -> String {
    let stats = &result.packet_stats;

    return format!(
        "✅ Analysis complete.\n\n\
         📄 File overview:\n\
         - Total packets: {}\n\
         - SIP packets: {}\n\
         - RTP packets: {}\n\n\
         📞 Calls:\n\
         - Total: {}\n\n\
         🧠 AI Insight:\n\
         {}\n\n\
         You can now ask questions about this PCAP.",
        stats.total_packets,
        stats.sip_packets,
        stats.rtp_packets,
        result.total_calls,
        result.file_ai_insight
    );
}

pub fn upload_echo(file_name: &str) -> String {
    return format!("📁 Uploaded {file_name}");
}

/// Text of the assistant message appended when a request fails. Uploads and
/// questions share the wording.
pub fn failure_text(err: &TransportError) -> String {
    match err {
        TransportError::Unreachable(_) => {
            return "❌ Cannot reach backend API.".to_string();
        }
        TransportError::BackendError { status, body } => {
            return format!("❌ Backend error ({status}):\n{body}");
        }
        TransportError::MalformedResponse { status, reason } => {
            return format!("❌ Backend sent an unexpected response ({status}):\n{reason}");
        }
    }
}

pub fn calls_text(job: Option<&Job>) -> String {
    let Some(job) = job else {
        return "No capture has been analyzed yet. Upload a PCAP file first.".to_string();
    };

    let file = job.file.as_deref().unwrap_or("this capture");
    let mut text = if job.calls.is_empty() {
        format!("No calls were found in {file}.")
    } else {
        let mut lines = vec![format!("📞 Calls in {file}:")];
        for (idx, call) in job.calls.iter().enumerate() {
            let call_id = call.call_id.as_deref().unwrap_or("(no Call-ID)");
            let verdict = call.final_verdict.as_deref().unwrap_or("UNKNOWN");
            let mut line = format!("{}. {call_id} - {verdict}", idx + 1);
            if let Some(root_cause) = &call.root_cause {
                line.push_str(&format!(" ({root_cause})"));
            }
            lines.push(line);
        }
        lines.join("\n")
    };

    if let Some(context) = job.capture_context.as_ref().filter(|ctx| !ctx.is_null()) {
        text.push_str(&format!("\n\n🧭 Capture context:\n{context:#}"));
    }

    return text;
}

pub fn help_text() -> String {
    let text = r#"
Type the path of a .pcap or .pcapng file and press Enter to upload it. Once the analysis is back, type questions about the capture.

COMMANDS:
- /calls (/c) - Lists the calls found in the analyzed capture.
- /quit /exit (/q) - Exit.
- /help (/h) - Provides this help menu.

HOTKEYS:
- Up arrow - Scroll up.
- Down arrow - Scroll down.
- CTRL+U - Page up.
- CTRL+D - Page down.
- CTRL+C - Exit.
        "#;

    text.trim().to_string()
}
