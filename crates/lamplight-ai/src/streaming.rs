//! Newline-delimited JSON (NDJSON) streaming parser.
//!
//! Ollama streams a chat reply as one JSON object per line, the last one
//! carrying `"done": true`. This module reads any reqwest response body
//! line by line and hands each decoded object to a callback.

use futures_util::StreamExt;
use serde_json::Value;
use tokio::io::AsyncBufReadExt;
use tokio_util::io::StreamReader;

use crate::AiError;

/// Parse an NDJSON stream from a reqwest response, calling `on_object` for
/// each line. Stops at the first error from the stream or the callback.
pub async fn parse_ndjson_stream(
    response: reqwest::Response,
    mut on_object: impl FnMut(Value) -> Result<(), AiError>,
) -> Result<(), AiError> {
    let byte_stream = response
        .bytes_stream()
        .map(|result| result.map_err(std::io::Error::other));
    let reader = tokio::io::BufReader::new(StreamReader::new(byte_stream));
    let mut lines = reader.lines();

    while let Some(line) = lines.next_line().await.map_err(map_io_error)? {
        if let Some(object) = parse_ndjson_line(&line)? {
            on_object(object)?;
        }
    }

    Ok(())
}

/// Decode one NDJSON line. Blank lines yield `None`.
pub fn parse_ndjson_line(line: &str) -> Result<Option<Value>, AiError> {
    let line = line.trim();
    if line.is_empty() {
        return Ok(None);
    }
    serde_json::from_str(line)
        .map(Some)
        .map_err(|e| AiError::Parse(format!("bad stream line: {e}")))
}

/// Classify a reqwest failure: timeouts are retryable, the rest are not.
pub(crate) fn map_transport_error(e: reqwest::Error) -> AiError {
    if e.is_timeout() {
        AiError::Timeout
    } else {
        AiError::Network(e.to_string())
    }
}

fn map_io_error(e: std::io::Error) -> AiError {
    let timed_out = e
        .get_ref()
        .and_then(|inner| inner.downcast_ref::<reqwest::Error>())
        .is_some_and(reqwest::Error::is_timeout);
    if timed_out {
        AiError::Timeout
    } else {
        AiError::Network(e.to_string())
    }
}
