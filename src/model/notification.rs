//! Toast notifications raised by the submission flows

use std::collections::VecDeque;

/// Ticks a toast stays on screen (at the default 100ms tick rate, 3 seconds)
pub const NOTIFICATION_TTL: u16 = 30;

/// Toasts kept at once; the oldest is dropped first
pub const MAX_NOTIFICATIONS: usize = 3;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NotificationLevel {
    Success,
    Error,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notification {
    pub level: NotificationLevel,
    pub message: String,
    /// Remaining ticks before the toast expires
    pub ttl: u16,
}

impl Notification {
    pub fn icon(&self) -> &str {
        match self.level {
            NotificationLevel::Success => "✓",
            NotificationLevel::Error => "✗",
        }
    }
}

/// Queue of live toasts, newest last
#[derive(Debug, Default)]
pub struct Notifications {
    items: VecDeque<Notification>,
}

impl Notifications {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, level: NotificationLevel, message: impl Into<String>) {
        if self.items.len() == MAX_NOTIFICATIONS {
            self.items.pop_front();
        }
        self.items.push_back(Notification {
            level,
            message: message.into(),
            ttl: NOTIFICATION_TTL,
        });
    }

    pub fn success(&mut self, message: impl Into<String>) {
        self.push(NotificationLevel::Success, message);
    }

    pub fn error(&mut self, message: impl Into<String>) {
        self.push(NotificationLevel::Error, message);
    }

    /// Age every toast by one tick and drop the expired ones
    pub fn tick(&mut self) {
        for item in &mut self.items {
            item.ttl = item.ttl.saturating_sub(1);
        }
        self.items.retain(|item| item.ttl > 0);
    }

    /// Oldest first
    pub fn iter(&self) -> impl DoubleEndedIterator<Item = &Notification> {
        self.items.iter()
    }

    #[cfg(test)]
    pub fn latest(&self) -> Option<&Notification> {
        self.items.back()
    }

    #[cfg(test)]
    pub fn len(&self) -> usize {
        self.items.len()
    }

    #[cfg(test)]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}
