use crate::errors::AppError;
use crate::models::{AnalyticsDocument, EventKind, HistoryEvent, RecentActivity, Role, RoleStats};
use chrono::{DateTime, Duration, Utc};

pub const DEFAULT_WINDOW_DAYS: i64 = 7;

/// Ceiling for `active_users` as a fraction of registered users.
const ACTIVE_RATIO_NUM: u64 = 7;
const ACTIVE_RATIO_DEN: u64 = 10;

impl AnalyticsDocument {
    pub fn stats(&self, role: Role) -> Result<&RoleStats, AppError> {
        match role {
            Role::Student => Ok(&self.students),
            Role::Alumni => Ok(&self.alumni),
            Role::Admin => Err(no_bucket(role)),
        }
    }

    pub fn stats_mut(&mut self, role: Role) -> Result<&mut RoleStats, AppError> {
        match role {
            Role::Student => Ok(&mut self.students),
            Role::Alumni => Ok(&mut self.alumni),
            Role::Admin => Err(no_bucket(role)),
        }
    }
}

fn no_bucket(role: Role) -> AppError {
    AppError::bad_request(format!("role '{role}' has no activity stats"))
}

pub fn active_ceiling(total_registered: u64) -> u64 {
    total_registered.saturating_mul(ACTIVE_RATIO_NUM) / ACTIVE_RATIO_DEN
}

pub fn record_registration(data: &mut AnalyticsDocument, role: Role) -> Result<(), AppError> {
    record_registration_at(data, role, Utc::now())
}

pub fn record_registration_at(
    data: &mut AnalyticsDocument,
    role: Role,
    now: DateTime<Utc>,
) -> Result<(), AppError> {
    let stats = data.stats_mut(role)?;
    stats.total_registered = stats.total_registered.saturating_add(1);
    stats.recent_registrations = stats.recent_registrations.saturating_add(1);
    stats.registration_history.push(HistoryEvent {
        timestamp: now,
        kind: EventKind::Registration,
    });
    Ok(())
}

pub fn record_login(data: &mut AnalyticsDocument, role: Role) -> Result<(), AppError> {
    record_login_at(data, role, Utc::now())
}

pub fn record_login_at(
    data: &mut AnalyticsDocument,
    role: Role,
    now: DateTime<Utc>,
) -> Result<(), AppError> {
    let stats = data.stats_mut(role)?;
    stats.total_logins = stats.total_logins.saturating_add(1);
    stats.recent_logins = stats.recent_logins.saturating_add(1);
    stats.login_history.push(HistoryEvent {
        timestamp: now,
        kind: EventKind::Login,
    });
    stats.active_users = stats
        .active_users
        .saturating_add(1)
        .min(active_ceiling(stats.total_registered));
    Ok(())
}

pub fn recent_activity(
    data: &AnalyticsDocument,
    role: Role,
    window_days: i64,
) -> Result<RecentActivity, AppError> {
    recent_activity_at(data, role, window_days, Utc::now())
}

pub fn recent_activity_at(
    data: &AnalyticsDocument,
    role: Role,
    window_days: i64,
    now: DateTime<Utc>,
) -> Result<RecentActivity, AppError> {
    let stats = data.stats(role)?;
    let cutoff = window_start(now, window_days);
    let after_cutoff = |events: &[HistoryEvent]| {
        events
            .iter()
            .filter(|event| event.timestamp > cutoff)
            .count()
    };

    Ok(RecentActivity {
        recent_registrations: after_cutoff(&stats.registration_history),
        recent_logins: after_cutoff(&stats.login_history),
    })
}

/// Windows reaching past chrono's range cover the whole history.
fn window_start(now: DateTime<Utc>, window_days: i64) -> DateTime<Utc> {
    Duration::try_days(window_days)
        .and_then(|window| now.checked_sub_signed(window))
        .unwrap_or(DateTime::<Utc>::MIN_UTC)
}

pub fn reset_weekly_stats(data: &mut AnalyticsDocument) {
    for stats in [&mut data.alumni, &mut data.students] {
        stats.recent_registrations = 0;
        stats.recent_logins = 0;
    }
}
