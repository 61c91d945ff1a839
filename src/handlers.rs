use crate::analytics::{self, DEFAULT_WINDOW_DAYS};
use crate::errors::AppError;
use crate::models::{
    AnalyticsDocument, FeedQuery, FeedResponse, LoggedUserEntry, LoggedUserRegistry, LoginEvent,
    NotificationKind, RecentActivity, RecentQuery, RegistrationEvent, Role, UserInfo,
};
use crate::notifications::{FeedFilter, NotificationFeed};
use crate::sessions;
use crate::state::AppState;
use crate::ui::render_index;
use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::Html,
    Json,
};
use tracing::{error, info};

pub async fn index(State(state): State<AppState>) -> Html<String> {
    let analytics = state.analytics.lock().await.clone();
    let logged_users = state.logged_users.lock().await.clone();
    Html(render_index(&analytics, &logged_users))
}

pub async fn get_analytics(State(state): State<AppState>) -> Json<AnalyticsDocument> {
    Json(state.analytics.lock().await.clone())
}

pub async fn registration(
    State(state): State<AppState>,
    Path(role): Path<String>,
) -> Result<Json<AnalyticsDocument>, AppError> {
    let role: Role = role.parse()?;
    Ok(Json(apply_registration(&state, role).await?))
}

pub async fn login(
    State(state): State<AppState>,
    Path(role): Path<String>,
) -> Result<Json<AnalyticsDocument>, AppError> {
    let role: Role = role.parse()?;
    Ok(Json(apply_login(&state, role).await?))
}

pub async fn recent_activity(
    State(state): State<AppState>,
    Path(role): Path<String>,
    Query(query): Query<RecentQuery>,
) -> Result<Json<RecentActivity>, AppError> {
    let role: Role = role.parse()?;
    let days = query.days.unwrap_or(DEFAULT_WINDOW_DAYS);
    if days < 0 {
        return Err(AppError::bad_request("days must not be negative"));
    }

    let data = state.analytics.lock().await;
    Ok(Json(analytics::recent_activity(&data, role, days)?))
}

pub async fn reset_weekly(
    State(state): State<AppState>,
) -> Result<Json<AnalyticsDocument>, AppError> {
    let mut data = state.analytics.lock().await;
    analytics::reset_weekly_stats(&mut data);
    state.analytics_store.save(&data).await?;
    info!("weekly activity counters reset");
    Ok(Json(data.clone()))
}

pub async fn get_logged_users(State(state): State<AppState>) -> Json<LoggedUserRegistry> {
    Json(state.logged_users.lock().await.clone())
}

pub async fn get_logged_users_for(
    State(state): State<AppState>,
    Path(role): Path<String>,
) -> Result<Json<Vec<LoggedUserEntry>>, AppError> {
    let role: Role = role.parse()?;
    let registry = state.logged_users.lock().await;
    Ok(Json(sessions::logged_users_for(&registry, role)))
}

pub async fn add_logged_user(
    State(state): State<AppState>,
    Path(role): Path<String>,
    Json(payload): Json<UserInfo>,
) -> Result<Json<LoggedUserRegistry>, AppError> {
    let role: Role = role.parse()?;
    Ok(Json(apply_logged_user(&state, role, payload).await?))
}

/// Login result from the auth backend. Students and alumni are counted and
/// listed; admins pass through untouched.
pub async fn login_event(
    State(state): State<AppState>,
    Json(payload): Json<LoginEvent>,
) -> Result<StatusCode, AppError> {
    let role: Role = payload.role.parse()?;
    if role == Role::Admin {
        return Ok(StatusCode::NO_CONTENT);
    }

    let name = format!("{} {}", payload.first_name.trim(), payload.last_name.trim());
    let info = UserInfo {
        name: Some(name),
        email: payload.email,
    };

    // Both documents stay locked so the count and the list move together.
    let mut data = state.analytics.lock().await;
    let mut registry = state.logged_users.lock().await;
    let previous = data.clone();

    analytics::record_login(&mut data, role)?;
    state.analytics_store.save(&data).await?;

    sessions::add_logged_user(&mut registry, role, info);
    if let Err(err) = state.users_store.save(&registry).await {
        if let Some(entries) = registry.get_mut(&role) {
            entries.pop();
        }
        *data = previous;
        if let Err(restore_err) = state.analytics_store.save(&data).await {
            error!(%role, "failed to restore activity counters: {restore_err}");
        }
        return Err(err);
    }

    info!(%role, total = data.stats(role)?.total_logins, "login recorded");
    Ok(StatusCode::NO_CONTENT)
}

pub async fn registration_event(
    State(state): State<AppState>,
    Json(payload): Json<RegistrationEvent>,
) -> Result<StatusCode, AppError> {
    let role: Role = payload.role.parse()?;
    if role != Role::Admin {
        apply_registration(&state, role).await?;
    }
    Ok(StatusCode::NO_CONTENT)
}

pub async fn get_notifications(
    State(state): State<AppState>,
    Query(query): Query<FeedQuery>,
) -> Result<Json<FeedResponse>, AppError> {
    let filter: FeedFilter = query.filter.as_deref().unwrap_or("all").parse()?;
    let feed = state.notifications.lock().await;
    Ok(Json(feed_response(&feed, filter)))
}

pub async fn mark_notification_read(
    State(state): State<AppState>,
    Path(id): Path<u64>,
) -> Json<FeedResponse> {
    let mut feed = state.notifications.lock().await;
    feed.mark_read(id);
    Json(feed_response(&feed, FeedFilter::All))
}

pub async fn mark_all_notifications_read(State(state): State<AppState>) -> Json<FeedResponse> {
    let mut feed = state.notifications.lock().await;
    feed.mark_all_read();
    Json(feed_response(&feed, FeedFilter::All))
}

pub async fn dismiss_notification(
    State(state): State<AppState>,
    Path(id): Path<u64>,
) -> Json<FeedResponse> {
    let mut feed = state.notifications.lock().await;
    feed.dismiss(id);
    Json(feed_response(&feed, FeedFilter::All))
}

pub async fn reseed_notifications(State(state): State<AppState>) -> Json<FeedResponse> {
    let mut feed = state.notifications.lock().await;
    feed.reseed();
    Json(feed_response(&feed, FeedFilter::All))
}

async fn apply_registration(state: &AppState, role: Role) -> Result<AnalyticsDocument, AppError> {
    let mut data = state.analytics.lock().await;
    analytics::record_registration(&mut data, role)?;
    state.analytics_store.save(&data).await?;
    info!(%role, total = data.stats(role)?.total_registered, "registration recorded");
    Ok(data.clone())
}

async fn apply_login(state: &AppState, role: Role) -> Result<AnalyticsDocument, AppError> {
    let mut data = state.analytics.lock().await;
    analytics::record_login(&mut data, role)?;
    state.analytics_store.save(&data).await?;
    info!(%role, total = data.stats(role)?.total_logins, "login recorded");
    Ok(data.clone())
}

async fn apply_logged_user(
    state: &AppState,
    role: Role,
    info: UserInfo,
) -> Result<LoggedUserRegistry, AppError> {
    let mut registry = state.logged_users.lock().await;
    sessions::add_logged_user(&mut registry, role, info);
    state.users_store.save(&registry).await?;
    info!(%role, "logged user added");
    Ok(registry.clone())
}

fn feed_response(feed: &NotificationFeed, filter: FeedFilter) -> FeedResponse {
    FeedResponse {
        items: feed.filter(filter),
        unread_count: feed.unread_count(),
        unread_messages: feed.unread_count_of(NotificationKind::Message),
    }
}
