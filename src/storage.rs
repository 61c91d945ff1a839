use crate::errors::AppError;
use serde::{Serialize, de::DeserializeOwned};
use std::{env, marker::PhantomData, path::Path, path::PathBuf};
use tokio::fs;
use tracing::error;

pub const ANALYTICS_FILE: &str = "userAnalytics.json";
pub const LOGGED_USERS_FILE: &str = "loggedUsers.json";

pub fn resolve_data_dir() -> PathBuf {
    if let Ok(path) = env::var("APP_DATA_DIR") {
        return PathBuf::from(path);
    }

    PathBuf::from("data")
}

/// A JSON document on disk that is always read and rewritten whole.
#[derive(Debug, Clone)]
pub struct JsonStore<T> {
    path: PathBuf,
    _doc: PhantomData<fn() -> T>,
}

impl<T> JsonStore<T>
where
    T: Serialize + DeserializeOwned + Default,
{
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            _doc: PhantomData,
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Missing or unreadable documents fall back to `T::default()`.
    pub async fn load(&self) -> T {
        match fs::read(&self.path).await {
            Ok(bytes) => match serde_json::from_slice(&bytes) {
                Ok(data) => data,
                Err(err) => {
                    error!(path = %self.path.display(), "failed to parse data file: {err}");
                    T::default()
                }
            },
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => T::default(),
            Err(err) => {
                error!(path = %self.path.display(), "failed to read data file: {err}");
                T::default()
            }
        }
    }

    pub async fn save(&self, data: &T) -> Result<(), AppError> {
        let payload = serde_json::to_vec_pretty(data)?;
        fs::write(&self.path, payload).await?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{AnalyticsDocument, LoggedUserEntry, LoggedUserRegistry, Role, UserStatus};

    fn temp_path(name: &str) -> PathBuf {
        let nanos = std::time::SystemTime::now()
            .duration_since(std::time::UNIX_EPOCH)
            .unwrap()
            .as_nanos();
        env::temp_dir().join(format!("mentorship_store_{}_{nanos}_{name}", std::process::id()))
    }

    #[tokio::test]
    async fn missing_file_loads_seed_document() {
        let store: JsonStore<AnalyticsDocument> = JsonStore::new(temp_path("missing.json"));
        let doc = store.load().await;
        assert_eq!(doc.students.total_registered, 892);
    }

    #[tokio::test]
    async fn corrupt_file_falls_back_to_default() {
        let path = temp_path("corrupt.json");
        fs::write(&path, b"{not json").await.unwrap();
        let store: JsonStore<AnalyticsDocument> = JsonStore::new(&path);
        assert_eq!(store.load().await, AnalyticsDocument::default());
        let _ = fs::remove_file(&path).await;
    }

    #[tokio::test]
    async fn save_then_load_keeps_changes() {
        let path = temp_path("saved.json");
        let store: JsonStore<AnalyticsDocument> = JsonStore::new(&path);
        let mut doc = AnalyticsDocument::default();
        doc.alumni.total_logins = 7;
        store.save(&doc).await.unwrap();
        assert_eq!(store.load().await.alumni.total_logins, 7);
        let _ = fs::remove_file(&path).await;
    }

    #[tokio::test]
    async fn logged_user_registry_reloads_role_keys() {
        let path = temp_path("users.json");
        let store: JsonStore<LoggedUserRegistry> = JsonStore::new(&path);
        let mut registry = LoggedUserRegistry::new();
        registry.insert(
            Role::Alumni,
            vec![LoggedUserEntry {
                id: 1_767_225_600_000,
                name: "Grace Hopper".to_string(),
                email: "grace@uni.edu".to_string(),
                login_time: "1/1/2026, 12:00:00 AM".to_string(),
                status: UserStatus::Away,
            }],
        );
        registry.insert(Role::Student, Vec::new());
        store.save(&registry).await.unwrap();

        assert_eq!(store.load().await, registry);
        let _ = fs::remove_file(&path).await;
    }

    #[tokio::test]
    async fn hand_written_registry_file_loads() {
        let path = temp_path("browser.json");
        let raw = r#"{"students":[{"id":5,"name":"Ada","email":"ada@uni.edu","loginTime":"2/9/2026, 8:30:00 AM","status":"online"}],"admins":[]}"#;
        fs::write(&path, raw).await.unwrap();
        let store: JsonStore<LoggedUserRegistry> = JsonStore::new(&path);

        let registry = store.load().await;
        assert_eq!(registry[&Role::Student][0].name, "Ada");
        assert_eq!(registry[&Role::Student][0].status, UserStatus::Online);
        assert!(registry[&Role::Admin].is_empty());
        assert!(!registry.contains_key(&Role::Alumni));
        let _ = fs::remove_file(&path).await;
    }
}
