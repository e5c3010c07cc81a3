use std::path::Path;

use anyhow::Context;
use serde::{Deserialize, Serialize};

use crate::models::{feedback::VoteLedger, menu::WeekMenu, wastage::WastageLog};

/// The whole of the service's state: the menu cycle, the vote ledger and
/// the wastage series. Snapshotted whole as one JSON file.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppData {
    pub menu: WeekMenu,
    pub ledger: VoteLedger,
    pub wastage: WastageLog,
}

/// Loads the snapshot, or starts empty when none exists yet. A corrupt
/// snapshot is an error rather than a silent reset.
pub async fn load_or_init(path: &Path) -> anyhow::Result<AppData> {
    match tokio::fs::read(path).await {
        Ok(bytes) => serde_json::from_slice(&bytes)
            .with_context(|| format!("Corrupt state snapshot: {}", path.display())),
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(AppData::default()),
        Err(e) => {
            Err(anyhow::Error::from(e))
                .with_context(|| format!("Failed to read state snapshot: {}", path.display()))
        }
    }
}

/// Writes the snapshot via a temp file + rename so a crash mid-write never
/// leaves a truncated file behind.
pub async fn save(path: &Path, data: &AppData) -> anyhow::Result<()> {
    let bytes = serde_json::to_vec_pretty(data).context("Failed to serialize state")?;

    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            tokio::fs::create_dir_all(parent)
                .await
                .with_context(|| format!("Failed to create state dir: {}", parent.display()))?;
        }
    }

    let tmp = path.with_extension("tmp");
    tokio::fs::write(&tmp, &bytes)
        .await
        .with_context(|| format!("Failed to write state snapshot: {}", tmp.display()))?;
    tokio::fs::rename(&tmp, path)
        .await
        .with_context(|| format!("Failed to replace state snapshot: {}", path.display()))?;

    Ok(())
}
