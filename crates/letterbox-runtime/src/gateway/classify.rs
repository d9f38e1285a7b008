use serde::de::DeserializeOwned;
use std::path::Path;

use crate::{Error, Result};

/// Captured result of one scraper run.
#[derive(Debug, Clone)]
pub struct RawOutput {
    pub success: bool,
    /// Human-readable exit status, e.g. `exit status: 1`
    pub status: String,
    pub stdout: Vec<u8>,
    pub stderr: Vec<u8>,
}

/// Extract the message from a `{"error": "..."}` envelope.
///
/// Only a JSON object whose `error` field is a non-empty string counts;
/// other keys in the object are ignored.
pub fn error_envelope(stdout: &[u8]) -> Option<String> {
    let value: serde_json::Value = serde_json::from_slice(stdout).ok()?;
    match value.get("error")? {
        serde_json::Value::String(msg) if !msg.is_empty() => Some(msg.clone()),
        _ => None,
    }
}

/// Apply the outcome precedence and hand back stdout when it should be
/// decoded as a success payload.
///
/// 1. non-zero exit + error envelope -> `RemoteError`
/// 2. non-zero exit otherwise -> `ProcessFailure`
/// 3. zero exit + error envelope -> `RemoteError`
/// 4. anything else is a payload candidate
pub fn classify<'a>(executable: &Path, output: &'a RawOutput) -> Result<&'a [u8]> {
    let envelope = error_envelope(&output.stdout);

    if !output.success {
        if let Some(msg) = envelope {
            return Err(Error::RemoteError(msg));
        }
        let captured = if output.stdout.iter().all(u8::is_ascii_whitespace) {
            &output.stderr
        } else {
            &output.stdout
        };
        return Err(Error::ProcessFailure {
            executable: executable.to_path_buf(),
            status: output.status.clone(),
            output: String::from_utf8_lossy(captured).into_owned(),
        });
    }

    if let Some(msg) = envelope {
        return Err(Error::RemoteError(msg));
    }

    Ok(&output.stdout)
}

pub fn decode<T: DeserializeOwned>(executable: &str, bytes: &[u8]) -> Result<T> {
    serde_json::from_slice(bytes).map_err(|source| Error::MalformedPayload {
        executable: executable.to_string(),
        source,
    })
}
