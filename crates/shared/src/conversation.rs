use serde::{Deserialize, Serialize};

/// Maximum number of turns retained per conversation. Counted in individual
/// turns, not exchanges, so the default keeps the last six user/assistant
/// pairs.
pub const MAX_WINDOW_TURNS: usize = 12;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ChatRole {
    System,
    User,
    Assistant,
}

/// One message in a conversation, tagged with its speaker role. Serialized
/// to the chat-completions wire shape only at the gateway boundary.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Turn {
    pub role: ChatRole,
    pub content: String,
}

impl Turn {
    pub fn system(content: impl Into<String>) -> Self {
        Self {
            role: ChatRole::System,
            content: content.into(),
        }
    }

    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: ChatRole::User,
            content: content.into(),
        }
    }

    pub fn assistant(content: impl Into<String>) -> Self {
        Self {
            role: ChatRole::Assistant,
            content: content.into(),
        }
    }
}

/// Bounded recent-history buffer for one conversation. Holds at most
/// [`MAX_WINDOW_TURNS`] turns in chronological order. The system instruction
/// is never stored here; the gateway injects it at call time, so trimming
/// cannot discard it.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ConversationWindow {
    turns: Vec<Turn>,
}

impl ConversationWindow {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_turns(turns: Vec<Turn>) -> Self {
        let mut window = Self { turns };
        window.trim_to(MAX_WINDOW_TURNS);
        window
    }

    /// Records one completed exchange as a user turn followed by an
    /// assistant turn. A failed model call never reaches this method, so the
    /// window cannot end up with an unanswered user turn.
    pub fn append_exchange(
        &mut self,
        user_text: impl Into<String>,
        assistant_text: impl Into<String>,
    ) {
        self.turns.push(Turn::user(user_text));
        self.turns.push(Turn::assistant(assistant_text));
        self.trim_to(MAX_WINDOW_TURNS);
    }

    /// Keeps only the most recent `limit` turns, preserving order. Trimming
    /// an already-short window is a no-op.
    pub fn trim_to(&mut self, limit: usize) {
        if self.turns.len() > limit {
            self.turns.drain(..self.turns.len() - limit);
        }
    }

    /// Owned copy of the turn sequence, oldest first. Callers never see the
    /// internal storage, so windows cannot alias across sessions.
    pub fn snapshot(&self) -> Vec<Turn> {
        self.turns.clone()
    }

    pub fn turns(&self) -> &[Turn] {
        &self.turns
    }

    pub fn len(&self) -> usize {
        self.turns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.turns.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn append_exchange_keeps_pairs_in_order() {
        let mut window = ConversationWindow::new();
        window.append_exchange("hi", "hello");
        window.append_exchange("how are you", "fine");

        let turns = window.snapshot();
        assert_eq!(turns.len(), 4);
        assert_eq!(turns[0], Turn::user("hi"));
        assert_eq!(turns[1], Turn::assistant("hello"));
        assert_eq!(turns[2], Turn::user("how are you"));
        assert_eq!(turns[3], Turn::assistant("fine"));
    }

    #[test]
    fn window_never_exceeds_cap_and_retains_most_recent() {
        let mut window = ConversationWindow::new();
        let mut full_history = Vec::new();
        for i in 0..20 {
            let user = format!("question {i}");
            let assistant = format!("answer {i}");
            full_history.push(Turn::user(user.clone()));
            full_history.push(Turn::assistant(assistant.clone()));
            window.append_exchange(user, assistant);
            assert!(window.len() <= MAX_WINDOW_TURNS);
        }

        let expected = &full_history[full_history.len() - MAX_WINDOW_TURNS..];
        assert_eq!(window.turns(), expected);
    }

    #[test]
    fn trim_is_idempotent() {
        let mut window = ConversationWindow::new();
        for i in 0..4 {
            window.append_exchange(format!("q{i}"), format!("a{i}"));
        }

        window.trim_to(6);
        let once = window.snapshot();
        window.trim_to(6);
        assert_eq!(window.snapshot(), once);

        window.trim_to(MAX_WINDOW_TURNS);
        assert_eq!(window.snapshot(), once);
    }

    #[test]
    fn from_turns_enforces_the_cap() {
        let turns = (0..MAX_WINDOW_TURNS + 4)
            .map(|i| Turn::user(format!("turn {i}")))
            .collect::<Vec<_>>();
        let window = ConversationWindow::from_turns(turns.clone());

        assert_eq!(window.len(), MAX_WINDOW_TURNS);
        assert_eq!(window.turns(), &turns[4..]);
    }

    #[test]
    fn snapshot_is_a_copy() {
        let mut window = ConversationWindow::new();
        window.append_exchange("hi", "hello");

        let mut snapshot = window.snapshot();
        snapshot.clear();

        assert_eq!(window.len(), 2);
    }
}
