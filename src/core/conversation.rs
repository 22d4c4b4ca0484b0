//! # Conversation Log
//!
//! Append-only list of chat entries, rendered top to bottom. Entries are
//! never edited or removed one at a time; the only bulk operations are
//! [`Conversation::reset`] (clear + greeting) and [`Conversation::clear`].

use chrono::{DateTime, Local};
use serde::{Deserialize, Serialize};

#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum Sender {
    User,
    Bot,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct ChatEntry {
    pub sender: Sender,
    pub message: String,
    /// Already formatted for display.
    pub timestamp: String,
}

impl ChatEntry {
    pub fn user(message: impl Into<String>) -> Self {
        Self::now(Sender::User, message)
    }

    pub fn bot(message: impl Into<String>) -> Self {
        Self::now(Sender::Bot, message)
    }

    fn now(sender: Sender, message: impl Into<String>) -> Self {
        Self {
            sender,
            message: message.into(),
            timestamp: format_timestamp(Local::now()),
        }
    }
}

/// `10/18/2026, 3:04:05 PM`
pub fn format_timestamp(at: DateTime<Local>) -> String {
    at.format("%-m/%-d/%Y, %-I:%M:%S %p").to_string()
}

pub fn welcome_message(username: &str) -> String {
    format!("Welcome, {username}! How can I help you shop today?")
}

pub fn reset_message(username: &str) -> String {
    format!("Conversation reset. How can I assist you now, {username}?")
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct Conversation {
    entries: Vec<ChatEntry>,
}

impl Conversation {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn append(&mut self, entry: ChatEntry) {
        self.entries.push(entry);
    }

    /// Clears the log and seeds it with a single greeting for `username`.
    pub fn reset(&mut self, username: &str) {
        self.entries.clear();
        self.entries.push(ChatEntry::bot(reset_message(username)));
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }

    pub fn entries(&self) -> &[ChatEntry] {
        &self.entries
    }

    pub fn last(&self) -> Option<&ChatEntry> {
        self.entries.last()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn count_from(&self, sender: Sender) -> usize {
        self.entries.iter().filter(|e| e.sender == sender).count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_append_keeps_insertion_order() {
        let mut log = Conversation::new();
        log.append(ChatEntry::user("laptops"));
        log.append(ChatEntry::bot("Found 3 products!"));
        log.append(ChatEntry::user("cheaper"));

        let messages: Vec<&str> = log.entries().iter().map(|e| e.message.as_str()).collect();
        assert_eq!(messages, vec!["laptops", "Found 3 products!", "cheaper"]);
        assert_eq!(log.count_from(Sender::User), 2);
        assert_eq!(log.count_from(Sender::Bot), 1);
    }

    #[test]
    fn test_reset_leaves_single_greeting() {
        let mut log = Conversation::new();
        log.append(ChatEntry::user("a"));
        log.append(ChatEntry::bot("b"));

        log.reset("alice");

        assert_eq!(log.len(), 1);
        let entry = log.last().unwrap();
        assert_eq!(entry.sender, Sender::Bot);
        assert_eq!(entry.message, "Conversation reset. How can I assist you now, alice?");
    }

    #[test]
    fn test_clear_empties_log() {
        let mut log = Conversation::new();
        log.append(ChatEntry::user("a"));
        log.clear();
        assert!(log.is_empty());
        assert!(log.last().is_none());
    }

    #[test]
    fn test_welcome_message_mentions_user() {
        assert_eq!(
            welcome_message("bob"),
            "Welcome, bob! How can I help you shop today?"
        );
    }

    #[test]
    fn test_format_timestamp_is_locale_style() {
        let at = Local.with_ymd_and_hms(2024, 3, 7, 15, 4, 5).unwrap();
        assert_eq!(format_timestamp(at), "3/7/2024, 3:04:05 PM");
    }

    #[test]
    fn test_new_entries_carry_timestamp() {
        let entry = ChatEntry::user("hi");
        assert_eq!(entry.sender, Sender::User);
        assert!(!entry.timestamp.is_empty());
    }

    #[test]
    fn test_sender_serializes_lowercase() {
        assert_eq!(serde_json::to_string(&Sender::Bot).unwrap(), "\"bot\"");
        assert_eq!(serde_json::to_string(&Sender::User).unwrap(), "\"user\"");
    }
}
