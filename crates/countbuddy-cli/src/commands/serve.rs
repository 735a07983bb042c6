//! The `countbuddy serve` command.

use std::path::PathBuf;
use std::sync::Arc;

use anyhow::Result;

use countbuddy_core::config::load_config_from;
use countbuddy_progress::MemoryProgressStore;

pub async fn execute(bind: Option<String>, config_path: Option<PathBuf>) -> Result<()> {
    let config = load_config_from(config_path.as_deref())?;
    let bind = bind.unwrap_or(config.server.bind);
    countbuddy_progress::serve(&bind, Arc::new(MemoryProgressStore::new())).await
}
