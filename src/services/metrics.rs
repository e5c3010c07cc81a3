use lazy_static::lazy_static;
use prometheus::{
    register_counter, register_counter_vec, register_gauge, Counter, CounterVec, Gauge,
};
use tracing::debug;

use crate::AppState;

lazy_static! {
    // ── Event counters (increment on each event) ────────────────────────────
    pub static ref VOTES_COUNTER: CounterVec = register_counter_vec!(
        "api_votes_total",
        "Votes cast, by type",
        &["type"]
    ).unwrap();

    pub static ref COMMENTS_COUNTER: Counter = register_counter!(
        "api_comments_total",
        "Comments submitted"
    ).unwrap();

    pub static ref UPLOADS_COUNTER: CounterVec = register_counter_vec!(
        "api_menu_uploads_total",
        "Menu uploads, by outcome",
        &["status"]
    ).unwrap();

    // ── Store gauges (refreshed by the collector) ───────────────────────────
    pub static ref MENU_ITEMS_GAUGE: Gauge = register_gauge!(
        "menu_items_total",
        "Food items currently on the menu"
    ).unwrap();

    pub static ref MENU_COMMENTS_GAUGE: Gauge = register_gauge!(
        "menu_comments_total",
        "Comments currently held across the menu"
    ).unwrap();

    pub static ref LEDGER_VOTES_GAUGE: Gauge = register_gauge!(
        "ledger_votes_total",
        "Vote records currently in the ledger"
    ).unwrap();

    pub static ref WASTAGE_ENTRIES_GAUGE: Gauge = register_gauge!(
        "wastage_entries_total",
        "Entries in the rolling wastage series"
    ).unwrap();
}

/// Spawn the background gauge collector (refreshes every 5 minutes).
pub fn start(state: AppState) {
    tokio::spawn(async move {
        // Initial collection on startup
        collect(&state).await;
        loop {
            tokio::time::sleep(tokio::time::Duration::from_secs(300)).await;
            collect(&state).await;
        }
    });
}

pub async fn collect(state: &AppState) {
    let data = state.data.read().await;
    MENU_ITEMS_GAUGE.set(data.menu.item_count() as f64);
    MENU_COMMENTS_GAUGE.set(data.menu.comment_count() as f64);
    LEDGER_VOTES_GAUGE.set(data.ledger.total_votes() as f64);
    WASTAGE_ENTRIES_GAUGE.set(data.wastage.entries.len() as f64);
    debug!("Metrics: store gauges refreshed");
}
