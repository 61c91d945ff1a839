use crate::models::{LoggedUserEntry, LoggedUserRegistry, Role, UserInfo, UserStatus};
use chrono::{DateTime, Local, Utc};

const UNKNOWN_USER: &str = "Unknown User";

/// Appends a new online entry for `role`. Repeat logins are not merged.
pub fn add_logged_user(registry: &mut LoggedUserRegistry, role: Role, info: UserInfo) {
    add_logged_user_at(registry, role, info, Utc::now());
}

pub fn add_logged_user_at(
    registry: &mut LoggedUserRegistry,
    role: Role,
    info: UserInfo,
    now: DateTime<Utc>,
) {
    let name = info
        .name
        .map(|name| name.trim().to_string())
        .filter(|name| !name.is_empty())
        .unwrap_or_else(|| UNKNOWN_USER.to_string());

    registry.entry(role).or_default().push(LoggedUserEntry {
        id: now.timestamp_millis(),
        name,
        email: info.email,
        login_time: login_time_label(now),
        status: UserStatus::Online,
    });
}

pub fn logged_users_for(registry: &LoggedUserRegistry, role: Role) -> Vec<LoggedUserEntry> {
    registry.get(&role).cloned().unwrap_or_default()
}

fn login_time_label(now: DateTime<Utc>) -> String {
    now.with_timezone(&Local)
        .format("%-m/%-d/%Y, %-I:%M:%S %p")
        .to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn info(name: Option<&str>, email: &str) -> UserInfo {
        UserInfo {
            name: name.map(str::to_string),
            email: email.to_string(),
        }
    }

    #[test]
    fn added_user_is_last_and_online() {
        let mut registry = LoggedUserRegistry::new();
        let now = Utc.with_ymd_and_hms(2026, 2, 9, 8, 30, 0).unwrap();
        add_logged_user_at(&mut registry, Role::Student, info(Some("Ada Lovelace"), "ada@uni.edu"), now);
        add_logged_user_at(&mut registry, Role::Student, info(Some("Alan Turing"), "alan@uni.edu"), now);

        let students = logged_users_for(&registry, Role::Student);
        let last = students.last().expect("missing entry");
        assert_eq!(students.len(), 2);
        assert_eq!(last.name, "Alan Turing");
        assert_eq!(last.email, "alan@uni.edu");
        assert_eq!(last.status, UserStatus::Online);
        assert_eq!(last.id, now.timestamp_millis());
        assert!(last.login_time.contains("2026"));
    }

    #[test]
    fn same_user_twice_gives_two_entries() {
        let mut registry = LoggedUserRegistry::new();
        add_logged_user(&mut registry, Role::Alumni, info(Some("Grace"), "grace@uni.edu"));
        add_logged_user(&mut registry, Role::Alumni, info(Some("Grace"), "grace@uni.edu"));
        assert_eq!(logged_users_for(&registry, Role::Alumni).len(), 2);
        assert!(logged_users_for(&registry, Role::Student).is_empty());
    }

    #[test]
    fn blank_name_becomes_unknown_user() {
        let mut registry = LoggedUserRegistry::new();
        add_logged_user(&mut registry, Role::Student, info(None, "x@uni.edu"));
        add_logged_user(&mut registry, Role::Student, info(Some("  "), "y@uni.edu"));
        let students = logged_users_for(&registry, Role::Student);
        assert!(students.iter().all(|entry| entry.name == UNKNOWN_USER));
    }
}
