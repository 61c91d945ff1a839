use crate::errors::AppError;
use crate::models::{Notification, NotificationKind};
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FeedFilter {
    All,
    Unread,
    Kind(NotificationKind),
}

impl FeedFilter {
    pub fn matches(self, notification: &Notification) -> bool {
        match self {
            FeedFilter::All => true,
            FeedFilter::Unread => !notification.read,
            FeedFilter::Kind(kind) => notification.kind == kind,
        }
    }
}

impl FromStr for FeedFilter {
    type Err = AppError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_lowercase().as_str() {
            "" | "all" => Ok(FeedFilter::All),
            "unread" => Ok(FeedFilter::Unread),
            other => other.parse().map(FeedFilter::Kind),
        }
    }
}

/// Session-scoped alerts. Nothing here is persisted.
#[derive(Debug, Clone, Default)]
pub struct NotificationFeed {
    items: Vec<Notification>,
}

impl NotificationFeed {
    pub fn new(items: Vec<Notification>) -> Self {
        Self { items }
    }

    pub fn seeded() -> Self {
        Self::new(seed_notifications())
    }

    pub fn reseed(&mut self) {
        self.items = seed_notifications();
    }

    pub fn items(&self) -> &[Notification] {
        &self.items
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn filter(&self, filter: FeedFilter) -> Vec<Notification> {
        self.items
            .iter()
            .filter(|notification| filter.matches(notification))
            .cloned()
            .collect()
    }

    /// Returns whether a notification with `id` exists.
    pub fn mark_read(&mut self, id: u64) -> bool {
        match self.items.iter_mut().find(|notification| notification.id == id) {
            Some(notification) => {
                notification.read = true;
                true
            }
            None => false,
        }
    }

    pub fn mark_all_read(&mut self) {
        for notification in &mut self.items {
            notification.read = true;
        }
    }

    /// Returns whether anything was removed.
    pub fn dismiss(&mut self, id: u64) -> bool {
        let before = self.items.len();
        self.items.retain(|notification| notification.id != id);
        self.items.len() != before
    }

    pub fn unread_count(&self) -> usize {
        self.items.iter().filter(|notification| !notification.read).count()
    }

    pub fn unread_count_of(&self, kind: NotificationKind) -> usize {
        self.items
            .iter()
            .filter(|notification| notification.kind == kind && !notification.read)
            .count()
    }
}

fn seed_notifications() -> Vec<Notification> {
    let entry = |id, kind, title: &str, message: &str, time: &str, read, chat_id| Notification {
        id,
        kind,
        title: title.to_string(),
        message: message.to_string(),
        time: time.to_string(),
        read,
        chat_id,
    };

    vec![
        entry(
            1,
            NotificationKind::Meeting,
            "Upcoming Meeting",
            "Career guidance session with John Doe in 30 minutes",
            "30 min ago",
            false,
            None,
        ),
        entry(
            2,
            NotificationKind::Message,
            "New Message from John Doe",
            "Hi! How are you doing with the React project?",
            "1 hour ago",
            false,
            Some(1),
        ),
        entry(
            3,
            NotificationKind::Message,
            "New Message from Jane Smith",
            "Let me know if you need any help with the project",
            "2 hours ago",
            false,
            Some(2),
        ),
        entry(
            4,
            NotificationKind::Achievement,
            "Achievement Unlocked",
            "You completed your first mentorship session!",
            "3 hours ago",
            true,
            None,
        ),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    fn note(id: u64, kind: NotificationKind, read: bool) -> Notification {
        Notification {
            id,
            kind,
            title: format!("note {id}"),
            message: String::new(),
            time: "just now".to_string(),
            read,
            chat_id: None,
        }
    }

    fn brute_unread(feed: &NotificationFeed) -> usize {
        feed.items().iter().filter(|n| !n.read).count()
    }

    #[test]
    fn mark_then_dismiss_scenario() {
        let mut feed = NotificationFeed::new(vec![
            note(1, NotificationKind::Meeting, false),
            note(2, NotificationKind::Message, false),
            note(3, NotificationKind::Achievement, true),
        ]);
        assert_eq!(feed.unread_count(), 2);

        feed.mark_read(1);
        assert_eq!(feed.unread_count(), 1);

        feed.dismiss(2);
        assert_eq!(feed.len(), 2);
        assert_eq!(feed.unread_count(), 1);
    }

    #[test]
    fn mark_read_is_idempotent() {
        let mut once = NotificationFeed::seeded();
        let mut twice = NotificationFeed::seeded();
        once.mark_read(2);
        twice.mark_read(2);
        twice.mark_read(2);
        assert_eq!(once.items(), twice.items());
        assert!(!twice.mark_read(99));
    }

    #[test]
    fn dismiss_missing_id_is_noop() {
        let mut feed = NotificationFeed::seeded();
        assert!(feed.dismiss(3));
        assert!(!feed.dismiss(3));
        assert_eq!(feed.len(), 3);
    }

    #[test]
    fn unread_count_tracks_every_step() {
        let mut feed = NotificationFeed::seeded();
        let steps: [(bool, u64); 6] = [(true, 1), (false, 4), (true, 3), (true, 1), (false, 2), (false, 9)];
        assert_eq!(feed.unread_count(), brute_unread(&feed));
        for (read, id) in steps {
            if read {
                feed.mark_read(id);
            } else {
                feed.dismiss(id);
            }
            assert_eq!(feed.unread_count(), brute_unread(&feed));
        }
        assert_eq!(feed.unread_count(), 0);
    }

    #[test]
    fn filters_by_state_and_kind() {
        let feed = NotificationFeed::seeded();
        assert_eq!(feed.filter(FeedFilter::All).len(), 4);
        assert_eq!(feed.filter(FeedFilter::Unread).len(), 3);
        let messages = feed.filter("message".parse().unwrap());
        assert_eq!(messages.len(), 2);
        assert!(messages.iter().all(|n| n.chat_id.is_some()));
        assert_eq!(feed.unread_count_of(NotificationKind::Message), 2);
        assert!("reminder".parse::<FeedFilter>().is_err());
    }

    #[test]
    fn mark_all_then_reseed() {
        let mut feed = NotificationFeed::seeded();
        feed.mark_all_read();
        feed.dismiss(1);
        assert_eq!(feed.unread_count(), 0);
        feed.reseed();
        assert_eq!(feed.len(), 4);
        assert_eq!(feed.unread_count(), 3);
    }
}
