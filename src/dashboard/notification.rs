use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::VecDeque;

/// Where a click landed relative to the notification dropdown.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum ClickTarget {
    Button,
    Panel,
    Outside,
}

#[derive(Debug, Clone, Copy, Default)]
pub struct NotificationDropdown {
    open: bool,
}

impl NotificationDropdown {
    pub fn is_open(&self) -> bool {
        self.open
    }

    /// Applies a click and returns whether the panel is open afterwards.
    pub fn click(&mut self, target: ClickTarget) -> bool {
        match target {
            ClickTarget::Button => self.open = !self.open,
            ClickTarget::Panel => {}
            ClickTarget::Outside => self.open = false,
        }
        self.open
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum NotificationLevel {
    Info,
    Warning,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Notification {
    pub id: u64,
    pub level: NotificationLevel,
    pub message: String,
    pub created_at: DateTime<Utc>,
}

/// Most recent notifications, newest first, bounded by `capacity`.
#[derive(Debug, Clone)]
pub struct NotificationFeed {
    entries: VecDeque<Notification>,
    capacity: usize,
    next_id: u64,
}

impl NotificationFeed {
    pub fn new(capacity: usize) -> Self {
        NotificationFeed {
            entries: VecDeque::new(),
            capacity,
            next_id: 1,
        }
    }

    pub fn push(&mut self, level: NotificationLevel, message: impl Into<String>) {
        if self.capacity == 0 {
            return;
        }
        let notification = Notification {
            id: self.next_id,
            level,
            message: message.into(),
            created_at: Utc::now(),
        };
        self.next_id += 1;
        self.entries.push_front(notification);
        self.entries.truncate(self.capacity);
    }

    pub fn entries(&self) -> Vec<Notification> {
        self.entries.iter().cloned().collect()
    }
}
