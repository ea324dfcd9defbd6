//! Stream relay: drains pipeline fragments from a channel and edits one transport
//! message in place until the close signal arrives.
//!
//! Spawned by streaming handlers via `tokio::spawn(run_stream_relay(...))` while the
//! pipeline produces fragments on the sending side.

use chat_core::{ChatUi, Session};
use std::sync::Arc;
use std::time::{Duration, Instant};
use tokio::sync::mpsc::UnboundedReceiver;
use tracing::error;

/// One step of a streamed reply.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StreamUpdate {
    /// One incremental piece of the reply, in generation order.
    Fragment(String),
    /// Close signal: the reply is complete.
    Done,
}

/// Flush tuning for edit-based streaming transports.
#[derive(Debug, Clone)]
pub struct StreamRelayConfig {
    /// Buffered characters before an edit is flushed.
    pub chunk_chars: usize,
    /// Max delay before buffered content is flushed even if below `chunk_chars`.
    pub max_delay: Duration,
}

impl Default for StreamRelayConfig {
    fn default() -> Self {
        Self {
            chunk_chars: 50,
            max_delay: Duration::from_secs(2),
        }
    }
}

/// Drains `updates`, editing `message_id` as fragments accumulate; fragments are
/// appended in arrival order and every edit carries the concatenation so far.
/// Returns the full reply after `Done` (or after the channel closes early, e.g.
/// when the producer failed). The final edit always carries everything received.
pub async fn run_stream_relay(
    ui: Arc<dyn ChatUi>,
    session: Session,
    message_id: String,
    mut updates: UnboundedReceiver<StreamUpdate>,
    config: StreamRelayConfig,
) -> String {
    let mut full = String::new();
    let mut pending_chars = 0usize;
    let mut last_edit = Instant::now();

    while let Some(update) = updates.recv().await {
        match update {
            StreamUpdate::Fragment(fragment) => {
                pending_chars += fragment.chars().count();
                full.push_str(&fragment);
                if pending_chars >= config.chunk_chars || last_edit.elapsed() >= config.max_delay {
                    edit_with_retry(ui.as_ref(), &session, &message_id, &full).await;
                    pending_chars = 0;
                    last_edit = Instant::now();
                }
            }
            StreamUpdate::Done => break,
        }
    }

    if !full.is_empty() {
        edit_with_retry(ui.as_ref(), &session, &message_id, &full).await;
    }
    full
}

/// Edits the message with `text`, retrying on rate limit (`Retry after Ns`) and
/// treating "message is not modified" as success.
async fn edit_with_retry(ui: &dyn ChatUi, session: &Session, message_id: &str, text: &str) {
    loop {
        match ui.edit_message(session, message_id, text).await {
            Ok(()) => break,
            Err(e) => {
                let error_str = e.to_string();
                if is_message_not_modified_error(&error_str) {
                    break;
                }
                if let Some(retry_secs) = extract_retry_after_seconds(&error_str) {
                    error!(
                        error = %error_str,
                        "Failed to edit message, retrying after {}s", retry_secs
                    );
                    tokio::time::sleep(Duration::from_secs(retry_secs)).await;
                } else {
                    error!(error = %error_str, "Failed to edit streamed message");
                    break;
                }
            }
        }
    }
}

/// True when the transport reports the edit changed nothing; treated as success.
fn is_message_not_modified_error(error: &str) -> bool {
    error.contains("message is not modified") || error.contains("exactly the same")
}

/// Parses "Retry after Ns" from a transport error string; `Some(seconds)` means
/// wait and retry the edit.
fn extract_retry_after_seconds(error: &str) -> Option<u64> {
    let pattern = "Retry after ";
    let start = error.find(pattern)? + pattern.len();
    let end = error[start..].find('s')?;
    error[start..start + end].trim().parse().ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_is_message_not_modified_error() {
        assert!(is_message_not_modified_error(
            "Bad Request: message is not modified"
        ));
        assert!(is_message_not_modified_error(
            "new message content and reply markup are exactly the same"
        ));
        assert!(!is_message_not_modified_error("Bad Request: chat not found"));
    }

    #[test]
    fn test_extract_retry_after_seconds() {
        assert_eq!(
            extract_retry_after_seconds("Too Many Requests: Retry after 7s"),
            Some(7)
        );
        assert_eq!(
            extract_retry_after_seconds("Retry after 12s (flood control)"),
            Some(12)
        );
        assert_eq!(extract_retry_after_seconds("chat not found"), None);
        assert_eq!(extract_retry_after_seconds("Retry after s"), None);
    }
}
