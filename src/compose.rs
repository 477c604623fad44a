//! Message composition
//!
//! Turns an instance's persona and transcript plus fresh input into the
//! ordered message list sent to the completion endpoint.

use tracing::debug;

use crate::llm::ChatMessage;

/// Compose a request message list
///
/// Always one leading system message carrying `role` verbatim (even when
/// empty), optionally the stored history, and exactly one trailing user
/// message with `input`. History entries with empty content are skipped
/// defensively even though only the ask path writes history.
pub fn compose(role: &str, history: &[ChatMessage], input: &str, include_history: bool) -> Vec<ChatMessage> {
    debug!(
        history_len = %history.len(),
        %include_history,
        "compose: called"
    );

    let mut messages = Vec::with_capacity(2 + if include_history { history.len() } else { 0 });
    messages.push(ChatMessage::system(role));

    if include_history {
        for msg in history {
            if msg.content.is_empty() {
                debug!("compose: skipping history entry with empty content");
                continue;
            }
            messages.push(msg.clone());
        }
    }

    messages.push(ChatMessage::user(input));
    messages
}
