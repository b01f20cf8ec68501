//! Queue of table talk produced while moves are applied.

/// Messages for every seat, drained by the session after each action.
#[derive(Clone, Debug, Default)]
pub struct MessageLog {
    pending: Vec<String>,
}

impl MessageLog {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Queue a message.
    pub fn say(&mut self, message: impl Into<String>) {
        let message = message.into();
        tracing::debug!(%message, "table message");
        self.pending.push(message);
    }

    /// Take everything queued so far.
    pub fn drain(&mut self) -> Vec<String> {
        std::mem::take(&mut self.pending)
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.pending.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_drain_empties() {
        let mut log = MessageLog::new();
        log.say("one");
        log.say(String::from("two"));
        assert_eq!(log.drain(), vec!["one".to_string(), "two".to_string()]);
        assert!(log.is_empty());
    }
}
