use crate::handlers;
use crate::state::AppState;
use axum::{routing::{get, post}, Router};

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/", get(handlers::index))
        .route("/api/analytics", get(handlers::get_analytics))
        .route("/api/analytics/reset-weekly", post(handlers::reset_weekly))
        .route("/api/analytics/:role/registrations", post(handlers::registration))
        .route("/api/analytics/:role/logins", post(handlers::login))
        .route("/api/analytics/:role/recent", get(handlers::recent_activity))
        .route("/api/logged-users", get(handlers::get_logged_users))
        .route(
            "/api/logged-users/:role",
            get(handlers::get_logged_users_for).post(handlers::add_logged_user),
        )
        .route("/api/events/login", post(handlers::login_event))
        .route("/api/events/registration", post(handlers::registration_event))
        .route("/api/notifications", get(handlers::get_notifications))
        .route("/api/notifications/read-all", post(handlers::mark_all_notifications_read))
        .route("/api/notifications/reseed", post(handlers::reseed_notifications))
        .route("/api/notifications/:id/read", post(handlers::mark_notification_read))
        .route("/api/notifications/:id", axum::routing::delete(handlers::dismiss_notification))
        .with_state(state)
}
