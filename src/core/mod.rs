pub mod engine;
pub mod segmenter;
pub mod series_list;
pub mod win_counts;

pub use crate::domain::model::{ListGame, SeasonSeries, SeriesListOutput, WinCounts};
pub use crate::domain::ports::{GameGenerator, GameProjector, SeriesIdFn, Storage};
pub use crate::utils::error::Result;
