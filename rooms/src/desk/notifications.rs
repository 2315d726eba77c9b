use circular_queue::CircularQueue;
use jam_model::notification::{Notification, Severity};

use crate::ids::{now_millis, prefixed_id};

/// Bounded notification history of a desk, the oldest entries fall off first
#[derive(Debug, Clone)]
pub struct NotificationCenter {
    history: CircularQueue<Notification>,
}

impl NotificationCenter {
    pub fn new(capacity: usize) -> Self {
        NotificationCenter {
            history: CircularQueue::with_capacity(capacity.max(1)),
        }
    }

    pub fn push(&mut self, message: impl Into<String>, severity: Severity) -> Notification {
        let notification = Notification {
            id: prefixed_id("notif"),
            message: message.into(),
            severity,
            timestamp: now_millis(),
            read: false,
        };

        self.history.push(notification.clone());

        notification
    }

    /// Newest first
    pub fn iter(&self) -> impl Iterator<Item = &Notification> {
        self.history.iter()
    }

    pub fn len(&self) -> usize {
        self.history.len()
    }

    pub fn is_empty(&self) -> bool {
        self.history.is_empty()
    }

    pub fn unread(&self) -> usize {
        self.history.iter().filter(|n| !n.read).count()
    }

    pub fn mark_all_read(&mut self) {
        self.history.iter_mut().for_each(|n| n.read = true);
    }

    pub fn clear(&mut self) {
        self.history.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_history_is_capped_and_newest_first() {
        let mut center = NotificationCenter::new(3);

        for i in 0..5 {
            center.push(format!("n{}", i), Severity::Info);
        }

        let messages: Vec<&str> = center.iter().map(|n| n.message.as_str()).collect();
        assert_eq!(messages, vec!["n4", "n3", "n2"]);
        assert_eq!(center.len(), 3);
    }

    #[test]
    fn test_mark_all_read_and_clear() {
        let mut center = NotificationCenter::new(50);
        center.push("a", Severity::Success);
        center.push("b", Severity::Error);
        assert_eq!(center.unread(), 2);

        center.mark_all_read();
        assert_eq!(center.unread(), 0);

        center.clear();
        assert!(center.is_empty());
    }
}
