use crate::config::build_config::{GameSource, ListConfig};
use crate::domain::model::{GameRecord, ListGame};
use crate::utils::error::Result;
use async_trait::async_trait;

pub trait Storage: Send + Sync {
    fn read_file(&self, path: &str) -> impl std::future::Future<Output = Result<Vec<u8>>> + Send;
    fn write_file(
        &self,
        path: &str,
        data: &[u8],
    ) -> impl std::future::Future<Output = Result<()>> + Send;
}

/// 由 matchup 與錨定比賽 id 推導系列 id
pub trait SeriesIdFn: Send + Sync {
    fn series_id(&self, matchup: &str, anchor_game_id: &str) -> String;
}

impl<F> SeriesIdFn for F
where
    F: Fn(&str, &str) -> String + Send + Sync,
{
    fn series_id(&self, matchup: &str, anchor_game_id: &str) -> String {
        self(matchup, anchor_game_id)
    }
}

/// 比賽來源，回傳依時間排序的完整比賽紀錄
#[async_trait]
pub trait GameGenerator: Send + Sync {
    async fn generate_games(&self, source: &GameSource) -> Result<Vec<GameRecord>>;
}

pub trait GameProjector: Send + Sync {
    fn to_list_game(&self, game: &GameRecord, config: &ListConfig) -> ListGame;
}
