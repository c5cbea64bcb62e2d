pub mod adapters;
pub mod config;
pub mod core;
pub mod domain;
pub mod utils;

#[cfg(feature = "cli")]
pub use config::CliConfig;

pub use adapters::{game_source::SourceGameGenerator, projector::DefaultProjector, writer::SeriesWriter};
pub use config::{build_config::BuildConfig, cli::LocalStorage};
pub use crate::core::{
    engine::SeriesEngine, segmenter::build_series, series_list::SeriesListBuilder,
    win_counts::count_wins,
};
pub use utils::error::{Result, SeriesError};
