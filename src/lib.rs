// Library exports for binary tools and tests
pub mod config;
pub mod errors;
pub mod middleware;
pub mod models;
pub mod routes;
pub mod services;
pub mod store;

use std::path::Path;
use std::sync::Arc;

use chrono::{Datelike, Local, NaiveDate};
use tokio::sync::RwLock;

use config::Config;
use models::menu::Weekday;
use store::AppData;

/// Application state shared across all handlers. The write lock is what
/// serializes mutations — the service is the single source of truth.
#[derive(Clone)]
pub struct AppState {
    pub data: Arc<RwLock<AppData>>,
    pub config: Arc<Config>,
}

impl AppState {
    pub fn new(config: Arc<Config>, data: AppData) -> Self {
        Self {
            data: Arc::new(RwLock::new(data)),
            config,
        }
    }

    /// The current calendar day-of-week — the only slot open for feedback.
    pub fn today(&self) -> Weekday {
        Weekday::from_chrono(Local::now().weekday())
    }

    pub fn today_date(&self) -> NaiveDate {
        Local::now().date_naive()
    }

    /// Rewrites the state snapshot. Callers must have released the write
    /// lock first.
    pub async fn persist(&self) -> anyhow::Result<()> {
        let data = self.data.read().await;
        store::save(Path::new(&self.config.state_path), &data).await
    }
}
