//! Turn model: one user message paired with its (possibly pending) bot reply.

/// Placeholder bot text shown while a reply is awaited.
pub const PENDING_BOT_TEXT: &str = "...";

/// Shown when the endpoint returns JSON we don't recognize.
pub const INVALID_RESPONSE_TEXT: &str = "⚠️ AI Error: Invalid response";

/// Shown when the request itself fails (network error, non-JSON body).
pub const SERVER_ERROR_TEXT: &str = "⚠️ Server error. Try again later.";

/// Format an endpoint-reported error string for transcript display.
pub fn format_endpoint_error(error: &str) -> String {
    format!("⚠️ Error: {error}")
}

/// A single exchange in the transcript. Once `bot` is no longer the pending
/// sentinel the turn is terminal and never mutated again.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Turn {
    pub user: String,
    pub bot: String,
}

impl Turn {
    pub fn pending(user: impl Into<String>) -> Self {
        Self {
            user: user.into(),
            bot: PENDING_BOT_TEXT.to_string(),
        }
    }

    pub fn resolved(user: impl Into<String>, bot: impl Into<String>) -> Self {
        Self {
            user: user.into(),
            bot: bot.into(),
        }
    }

    pub fn is_pending(&self) -> bool {
        self.bot == PENDING_BOT_TEXT
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pending_turn_carries_sentinel() {
        let turn = Turn::pending("hello");
        assert!(turn.is_pending());
        assert_eq!(turn.bot, PENDING_BOT_TEXT);
    }

    #[test]
    fn resolved_turn_is_not_pending() {
        let turn = Turn::resolved("hello", "hi there");
        assert!(!turn.is_pending());
    }

    #[test]
    fn endpoint_errors_get_the_warning_prefix() {
        assert_eq!(format_endpoint_error("rate limited"), "⚠️ Error: rate limited");
    }
}
