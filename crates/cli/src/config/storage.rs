//! Storage Config

use std::path::PathBuf;

use clap::Args;

/// Persistent storage settings.
#[derive(Debug, Args)]
pub(crate) struct StorageConfig {
    /// Directory holding the order and profile documents
    #[arg(long, env = "DATA_DIR", default_value = "data")]
    pub data_dir: PathBuf,
}
