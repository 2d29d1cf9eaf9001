//! # Chats and Messages
//!
//! Conversation summaries, their messages, the seed data the client starts
//! with, and the pure search filter used by the sidebar.
//!
//! ```text
//! Chat
//! ├── id, name, avatar, kind
//! ├── last_message: Option<Message>   // embedded copy, not a reference
//! ├── unread_count
//! ├── is_online: Option<bool>         // None for groups and channels
//! ├── is_pinned
//! └── handle: Option<String>
//! ```

use chrono::{DateTime, Local, Utc};

/// Sender id used for messages written by the signed-in user.
pub const LOCAL_SENDER_ID: &str = "user";

const HOUR_MS: i64 = 3_600_000;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChatKind {
    Private,
    Group,
    Channel,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeliveryStatus {
    Sent,
    Delivered,
    Read,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Message {
    pub id: String,
    pub sender_id: String,
    pub text: String,
    /// Unix time in milliseconds.
    pub timestamp: i64,
    pub status: DeliveryStatus,
    pub reply_to: Option<String>,
    pub is_edited: bool,
}

impl Message {
    /// A freshly composed message from the local user.
    pub fn outgoing(text: String, timestamp: i64) -> Self {
        Self {
            id: uuid::Uuid::new_v4().to_string(),
            sender_id: LOCAL_SENDER_ID.to_string(),
            text,
            timestamp,
            status: DeliveryStatus::Sent,
            reply_to: None,
            is_edited: false,
        }
    }

    pub fn is_own(&self) -> bool {
        self.sender_id == LOCAL_SENDER_ID
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Chat {
    pub id: String,
    pub name: String,
    pub avatar: String,
    pub kind: ChatKind,
    pub last_message: Option<Message>,
    pub unread_count: u32,
    pub is_online: Option<bool>,
    pub is_pinned: bool,
    pub handle: Option<String>,
}

impl Chat {
    /// Case-insensitive substring match against name or handle.
    /// `needle` must already be lowercase.
    fn matches(&self, needle: &str) -> bool {
        self.name.to_lowercase().contains(needle)
            || self
                .handle
                .as_deref()
                .is_some_and(|h| h.to_lowercase().contains(needle))
    }
}

/// Chats visible for `query`, in input order. An empty query keeps everything.
pub fn filter_chats<'a>(chats: &'a [Chat], query: &str) -> Vec<&'a Chat> {
    if query.is_empty() {
        return chats.iter().collect();
    }
    let needle = query.to_lowercase();
    chats.iter().filter(|chat| chat.matches(&needle)).collect()
}

/// Stable partition: pinned chats first, relative order otherwise unchanged.
pub fn sort_pinned_first(chats: &mut [Chat]) {
    chats.sort_by_key(|chat| !chat.is_pinned);
}

/// The opening message shown when a conversation is first opened.
pub fn greeting(chat: &Chat, now_ms: i64) -> Message {
    Message {
        id: format!("{}-greeting", chat.id),
        sender_id: chat.id.clone(),
        text: "Hey there!".to_string(),
        timestamp: now_ms - HOUR_MS,
        status: DeliveryStatus::Read,
        reply_to: None,
        is_edited: false,
    }
}

/// Conversations the client starts with. Timestamps are relative to `now_ms`.
pub fn seed_chats(now_ms: i64) -> Vec<Chat> {
    vec![
        Chat {
            id: "1".to_string(),
            name: "Pavel Durov".to_string(),
            avatar: "https://picsum.photos/id/64/100/100".to_string(),
            kind: ChatKind::Private,
            last_message: Some(Message {
                id: "m1".to_string(),
                sender_id: "1".to_string(),
                text: "Privacy is not for sale.".to_string(),
                timestamp: now_ms - HOUR_MS,
                status: DeliveryStatus::Read,
                reply_to: None,
                is_edited: false,
            }),
            unread_count: 2,
            is_online: Some(true),
            is_pinned: false,
            handle: Some("durov".to_string()),
        },
        Chat {
            id: "2".to_string(),
            name: "Designers Hub".to_string(),
            avatar: "https://picsum.photos/id/103/100/100".to_string(),
            kind: ChatKind::Group,
            last_message: Some(Message {
                id: "m2".to_string(),
                sender_id: LOCAL_SENDER_ID.to_string(),
                text: "Check out the new UI kit!".to_string(),
                timestamp: now_ms - 100_000,
                status: DeliveryStatus::Delivered,
                reply_to: None,
                is_edited: false,
            }),
            unread_count: 45,
            is_online: None,
            is_pinned: true,
            handle: None,
        },
        Chat {
            id: "3".to_string(),
            name: "Luminary News".to_string(),
            avatar: "https://picsum.photos/id/180/100/100".to_string(),
            kind: ChatKind::Channel,
            last_message: Some(Message {
                id: "m3".to_string(),
                sender_id: "3".to_string(),
                text: "Version 1.0 is out.".to_string(),
                timestamp: now_ms - 2 * HOUR_MS,
                status: DeliveryStatus::Read,
                reply_to: None,
                is_edited: false,
            }),
            unread_count: 3,
            is_online: None,
            is_pinned: false,
            handle: Some("luminary".to_string()),
        },
        Chat {
            id: "4".to_string(),
            name: "Alex Johnson".to_string(),
            avatar: "https://picsum.photos/id/65/100/100".to_string(),
            kind: ChatKind::Private,
            last_message: None,
            unread_count: 0,
            is_online: Some(false),
            is_pinned: false,
            handle: Some("alexj".to_string()),
        },
    ]
}

/// Format a millisecond timestamp as local `HH:MM`.
pub fn format_time(timestamp_ms: i64) -> String {
    DateTime::<Utc>::from_timestamp_millis(timestamp_ms)
        .unwrap_or_default()
        .with_timezone(&Local)
        .format("%H:%M")
        .to_string()
}
