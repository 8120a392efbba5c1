use pcap_reader_client::AnalysisResult;
use pcap_reader_client::ChatAnswer;
use pcap_reader_client::TransportError;
use tui_textarea::Input;

#[derive(Debug)]
pub enum Event {
    CaptureAnalyzed(Result<AnalysisResult, TransportError>),
    QuestionAnswered(Result<ChatAnswer, TransportError>),
    BackendHealth(Result<(), TransportError>),
    KeyboardCharInput(Input),
    KeyboardCTRLC,
    KeyboardEnter,
    KeyboardPaste(String),
    UITick,
    UIScrollDown,
    UIScrollUp,
    UIScrollPageDown,
    UIScrollPageUp,
}
