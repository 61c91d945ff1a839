use crate::errors::AppError;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Role {
    #[serde(rename = "students")]
    Student,
    #[serde(rename = "alumni")]
    Alumni,
    #[serde(rename = "admins")]
    Admin,
}

impl Role {
    pub fn key(self) -> &'static str {
        match self {
            Role::Student => "students",
            Role::Alumni => "alumni",
            Role::Admin => "admins",
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

impl FromStr for Role {
    type Err = AppError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_lowercase().as_str() {
            "students" | "student" => Ok(Role::Student),
            "alumni" => Ok(Role::Alumni),
            "admins" | "admin" => Ok(Role::Admin),
            other => Err(AppError::bad_request(format!("unknown role '{other}'"))),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EventKind {
    Registration,
    Login,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HistoryEvent {
    pub timestamp: DateTime<Utc>,
    #[serde(rename = "type")]
    pub kind: EventKind,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct RoleStats {
    pub total_registered: u64,
    pub recent_registrations: u64,
    pub total_logins: u64,
    pub recent_logins: u64,
    pub active_users: u64,
    #[serde(default)]
    pub registration_history: Vec<HistoryEvent>,
    #[serde(default)]
    pub login_history: Vec<HistoryEvent>,
}

impl RoleStats {
    fn seeded(
        total_registered: u64,
        recent_registrations: u64,
        total_logins: u64,
        recent_logins: u64,
        active_users: u64,
    ) -> Self {
        Self {
            total_registered,
            recent_registrations,
            total_logins,
            recent_logins,
            active_users,
            registration_history: Vec::new(),
            login_history: Vec::new(),
        }
    }
}

/// Per-role counters and event logs, stored as a single JSON document.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalyticsDocument {
    pub alumni: RoleStats,
    pub students: RoleStats,
}

impl Default for AnalyticsDocument {
    fn default() -> Self {
        Self {
            alumni: RoleStats::seeded(245, 12, 1834, 89, 156),
            students: RoleStats::seeded(892, 34, 4521, 234, 567),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct RecentActivity {
    pub recent_registrations: usize,
    pub recent_logins: usize,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum UserStatus {
    Online,
    Away,
    Offline,
}

impl UserStatus {
    pub fn as_str(self) -> &'static str {
        match self {
            UserStatus::Online => "online",
            UserStatus::Away => "away",
            UserStatus::Offline => "offline",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LoggedUserEntry {
    pub id: i64,
    pub name: String,
    pub email: String,
    pub login_time: String,
    pub status: UserStatus,
}

pub type LoggedUserRegistry = BTreeMap<Role, Vec<LoggedUserEntry>>;

#[derive(Debug, Clone, Deserialize)]
pub struct UserInfo {
    #[serde(default)]
    pub name: Option<String>,
    pub email: String,
}

/// The user object handed back by the external auth backend.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LoginEvent {
    pub role: String,
    #[serde(default)]
    pub first_name: String,
    #[serde(default)]
    pub last_name: String,
    pub email: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct RegistrationEvent {
    pub role: String,
}

#[derive(Debug, Deserialize)]
pub struct RecentQuery {
    pub days: Option<i64>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NotificationKind {
    Meeting,
    Message,
    Achievement,
}

impl FromStr for NotificationKind {
    type Err = AppError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_lowercase().as_str() {
            "meeting" => Ok(NotificationKind::Meeting),
            "message" => Ok(NotificationKind::Message),
            "achievement" => Ok(NotificationKind::Achievement),
            other => Err(AppError::bad_request(format!(
                "unknown notification type '{other}'"
            ))),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Notification {
    pub id: u64,
    #[serde(rename = "type")]
    pub kind: NotificationKind,
    pub title: String,
    pub message: String,
    pub time: String,
    pub read: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub chat_id: Option<u64>,
}

#[derive(Debug, Deserialize)]
pub struct FeedQuery {
    pub filter: Option<String>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FeedResponse {
    pub items: Vec<Notification>,
    pub unread_count: usize,
    pub unread_messages: usize,
}
