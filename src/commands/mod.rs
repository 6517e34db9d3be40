mod chart;
mod config_cmd;
mod record;
mod stats;

use clap::ValueEnum;
use fuel_track_core::{HttpRecordGateway, SyncRecordRepository};

pub use chart::ChartCommand;
pub use config_cmd::ConfigCommand;
pub use record::RecordCommand;
pub use stats::StatsCommand;

/// Repository wired to the HTTP backend.
pub type RecordRepository = SyncRecordRepository<HttpRecordGateway>;

#[derive(Clone, ValueEnum, Default)]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
}
