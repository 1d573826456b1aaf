use log::{debug, info};
use serde_json::Value;

use crate::web::models::{HistoryEntry, Message, Role};

pub const ONBOARDING_REPLY: &str =
    "Hi! I'm a lightweight demo assistant. Ask me anything, or say hello to get started.";

// Number of trailing history turns echoed back to the caller.
pub const HISTORY_WINDOW: usize = 8;

// Length, in characters, of the reversed "fun hint".
pub const HINT_CHARS: usize = 40;

/// Canned stand-in for a language model. Replies are a deterministic
/// transformation of the user's message.
#[derive(Debug, Clone, Default)]
pub struct DemoAssistant;

/// Result of a single chat turn.
#[derive(Debug)]
pub struct Exchange {
    pub reply: String,
    pub messages: Vec<Message>,
}

impl DemoAssistant {
    pub fn new() -> Self {
        Self
    }

    pub fn reply(&self, message: &str) -> String {
        if message.is_empty() {
            return ONBOARDING_REPLY.to_string();
        }

        let hint: String = message.chars().rev().take(HINT_CHARS).collect();
        format!(
            "You said: '{}'. Here's a quick thought: focus on one clear step next. (fun hint: '{}' backwards).",
            message, hint
        )
    }

    pub fn respond(&self, message: &str, history: Option<&[HistoryEntry]>) -> Exchange {
        let user_msg = message.trim();
        let reply = self.reply(user_msg);

        let mut messages = recent_history(history.unwrap_or_default());
        info!(
            "Replying to message of {} chars with {} history turns",
            user_msg.chars().count(),
            messages.len()
        );
        debug!("Reply: {}", reply);

        messages.push(Message::new(Role::User, user_msg));
        messages.push(Message::new(Role::Assistant, reply.clone()));

        Exchange { reply, messages }
    }
}

/// Keeps the last `HISTORY_WINDOW` entries, defaulting a missing role to
/// `user` and missing content to empty. Within that window, entries whose role
/// is not one of the known roles (including `null` and non-strings) are
/// dropped, as are entries whose content is present but not text.
pub fn recent_history(history: &[HistoryEntry]) -> Vec<Message> {
    let start = history.len().saturating_sub(HISTORY_WINDOW);

    history[start..].iter().filter_map(to_message).collect()
}

fn to_message(entry: &HistoryEntry) -> Option<Message> {
    let role = match &entry.role {
        None => Role::User,
        Some(Value::String(role)) => match role.parse::<Role>() {
            Ok(role) => role,
            Err(e) => {
                debug!("Dropping history entry with role {:?}", e.0);
                return None;
            }
        },
        Some(other) => {
            debug!("Dropping history entry with non-text role {}", other);
            return None;
        }
    };

    let content = match &entry.content {
        None => String::new(),
        Some(Value::String(content)) => content.clone(),
        Some(other) => {
            debug!("Dropping history entry with non-text content {}", other);
            return None;
        }
    };

    Some(Message::new(role, content))
}
