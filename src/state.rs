use crate::errors::AppError;
use crate::models::{AnalyticsDocument, LoggedUserRegistry};
use crate::notifications::NotificationFeed;
use crate::storage::{ANALYTICS_FILE, JsonStore, LOGGED_USERS_FILE};
use std::{path::Path, sync::Arc};
use tokio::{fs, sync::Mutex};

#[derive(Clone)]
pub struct AppState {
    pub analytics_store: Arc<JsonStore<AnalyticsDocument>>,
    pub analytics: Arc<Mutex<AnalyticsDocument>>,
    pub users_store: Arc<JsonStore<LoggedUserRegistry>>,
    pub logged_users: Arc<Mutex<LoggedUserRegistry>>,
    pub notifications: Arc<Mutex<NotificationFeed>>,
}

impl AppState {
    pub fn new(
        analytics_store: JsonStore<AnalyticsDocument>,
        analytics: AnalyticsDocument,
        users_store: JsonStore<LoggedUserRegistry>,
        logged_users: LoggedUserRegistry,
    ) -> Self {
        Self {
            analytics_store: Arc::new(analytics_store),
            analytics: Arc::new(Mutex::new(analytics)),
            users_store: Arc::new(users_store),
            logged_users: Arc::new(Mutex::new(logged_users)),
            notifications: Arc::new(Mutex::new(NotificationFeed::seeded())),
        }
    }

    /// Loads both documents from `data_dir`. A fresh analytics document is
    /// written back immediately so the seed values survive a restart.
    pub async fn open(data_dir: &Path) -> Result<Self, AppError> {
        let analytics_store = JsonStore::new(data_dir.join(ANALYTICS_FILE));
        let users_store = JsonStore::new(data_dir.join(LOGGED_USERS_FILE));

        let analytics = analytics_store.load().await;
        if !fs::try_exists(analytics_store.path()).await? {
            analytics_store.save(&analytics).await?;
        }
        let logged_users = users_store.load().await;

        Ok(Self::new(analytics_store, analytics, users_store, logged_users))
    }
}
