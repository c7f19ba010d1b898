use chrono::Utc;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NotificationKind {
    NewCourse,
    Discount,
    Welcome,
    DoubtSession,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Notification {
    pub id: String,
    pub title: String,
    pub message: String,
    pub time: String,
    pub read: bool,
    pub kind: NotificationKind,
}

/// In-session notification feed, seeded the way a fresh install shows it.
#[derive(Debug)]
pub struct NotificationCenter {
    items: Vec<Notification>,
}

impl NotificationCenter {
    pub fn new() -> Self {
        Self {
            items: vec![
                Notification {
                    id: "1".to_string(),
                    title: "🔥 New Course Added".to_string(),
                    message: "Learn AI in 4 weeks!".to_string(),
                    time: "2 hours ago".to_string(),
                    read: false,
                    kind: NotificationKind::NewCourse,
                },
                Notification {
                    id: "2".to_string(),
                    title: "💰 Discount Offer".to_string(),
                    message: "Get 30% off React Native course.".to_string(),
                    time: "1 day ago".to_string(),
                    read: false,
                    kind: NotificationKind::Discount,
                },
                Notification {
                    id: "3".to_string(),
                    title: "🎉 Welcome Bonus".to_string(),
                    message: "Get 20% off your first course!".to_string(),
                    time: "2 days ago".to_string(),
                    read: true,
                    kind: NotificationKind::Welcome,
                },
                Notification {
                    id: "4".to_string(),
                    title: "📚 Doubt Session".to_string(),
                    message: "Live doubt clearing session tomorrow at 6 PM".to_string(),
                    time: "3 days ago".to_string(),
                    read: false,
                    kind: NotificationKind::DoubtSession,
                },
            ],
        }
    }

    pub fn notify(&mut self, title: &str, message: &str, kind: NotificationKind) -> Notification {
        let notification = Notification {
            id: Uuid::new_v4().to_string(),
            title: title.to_string(),
            message: message.to_string(),
            time: Utc::now().to_rfc3339(),
            read: false,
            kind,
        };
        self.items.push(notification.clone());
        notification
    }

    /// Returns false when the id is unknown.
    pub fn mark_read(&mut self, id: &str) -> bool {
        match self.items.iter_mut().find(|n| n.id == id) {
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

    pub fn unread_count(&self) -> usize {
        self.items.iter().filter(|n| !n.read).count()
    }

    pub fn items(&self) -> &[Notification] {
        &self.items
    }
}

impl Default for NotificationCenter {
    fn default() -> Self {
        Self::new()
    }
}
