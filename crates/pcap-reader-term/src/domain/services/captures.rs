use std::path::Path;

use anyhow::Context;
use anyhow::Result;
use pcap_reader_client::CaptureFile;

/// Strips the quotes terminals add around dropped or pasted paths.
pub fn clean_path(input: &str) -> &str {
    return input.trim().trim_matches(|c| c == '"' || c == '\'');
}

/// Reads a capture from disk. The contents are not validated; the analysis
/// service decides what it accepts.
pub async fn load_capture(path: &str) -> Result<CaptureFile> {
    let path = Path::new(path);
    let contents = tokio::fs::read(path)
        .await
        .with_context(|| format!("failed to read {}", path.display()))?;

    let file_name = path
        .file_name()
        .map(|name| name.to_string_lossy().to_string())
        .unwrap_or_else(|| path.display().to_string());

    tracing::debug!(file = %file_name, bytes = contents.len(), "capture loaded");
    return Ok(CaptureFile::new(file_name, contents));
}
