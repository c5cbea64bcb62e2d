use crate::domain::model::{ListGame, SeasonSeries};
use crate::domain::ports::SeriesIdFn;

/// 將依時間排序的比賽切分為連續系列。
///
/// 開啟中的系列以第一場比賽 id 為錨點：後續比賽一律用
/// `id_fn(game.matchup, anchor_game_id)` 判斷是否屬於同一系列，
/// 而新系列的 id 則以新比賽自身的 id 推導。
///
/// 不檢查輸入是否依時間排序，也不合併不相鄰但 id 相同的系列。
pub fn build_series<F>(id_fn: &F, games: Vec<ListGame>, series_name: Option<&str>) -> Vec<SeasonSeries>
where
    F: SeriesIdFn + ?Sized,
{
    let mut series: Vec<SeasonSeries> = Vec::new();

    for game in games {
        let Some(current) = series.last_mut() else {
            let series_id = id_fn.series_id(&game.matchup, &game.id);
            series.push(SeasonSeries::start(series_id, game, series_name.map(str::to_string)));
            continue;
        };

        let game_series_id = id_fn.series_id(&game.matchup, &current.anchor_game_id);

        if game_series_id == current.series_id {
            current.push(game);
        } else {
            current.refresh_end();
            let series_id = id_fn.series_id(&game.matchup, &game.id);
            tracing::trace!(
                "Closing series {} ({} games), opening {}",
                current.series_id,
                current.games.len(),
                series_id
            );
            series.push(SeasonSeries::start(series_id, game, series_name.map(str::to_string)));
        }

        if let Some(open) = series.last_mut() {
            open.refresh_end();
        }
    }

    series
}
