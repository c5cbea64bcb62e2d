use crate::config::build_config::{ListConfig, SeriesConfig};
use crate::core::segmenter::build_series;
use crate::core::win_counts::count_wins;
use crate::domain::model::{
    GameList, GameRecord, ListType, SeasonSeries, SeriesData, SeriesGames, SeriesInfo,
    SeriesListOutput, SeriesSummary,
};
use crate::domain::ports::{GameGenerator, GameProjector};
use crate::utils::error::Result;
use futures::future::try_join_all;
use futures::stream::{self, StreamExt};

const DEFAULT_CONCURRENCY: usize = 5;

/// 單一系列子配置的產生結果
struct GeneratedSeries {
    season_series: Vec<SeasonSeries>,
    full_games: Vec<GameRecord>,
}

/// 單一列表配置的本地輸出，完成後整批併入共享集合
struct BuiltList {
    data: SeriesData,
    series_games: Vec<SeriesGames>,
    full_games: Vec<GameRecord>,
}

pub struct SeriesListBuilder<G: GameGenerator, P: GameProjector> {
    generator: G,
    projector: P,
    concurrency: usize,
}

impl<G: GameGenerator, P: GameProjector> SeriesListBuilder<G, P> {
    pub fn new(generator: G, projector: P) -> Self {
        Self {
            generator,
            projector,
            concurrency: DEFAULT_CONCURRENCY,
        }
    }

    /// 同時處理的列表配置數上限
    pub fn with_concurrency(mut self, concurrency: usize) -> Self {
        self.concurrency = concurrency.max(1);
        self
    }

    /// 依配置產生所有列表輸出。
    ///
    /// `lists` 依配置順序輸出；其餘集合以各列表完成的先後合併，
    /// 跨列表順序不保證，但同一列表內的順序固定。
    /// 任一來源產生失敗即中止整批，不回傳部分結果。
    ///
    /// 來源比賽須已依時間排序且分數完整，此處不做檢查。
    pub async fn build_series_list(&self, configs: &[ListConfig]) -> Result<SeriesListOutput> {
        let mut output = SeriesListOutput {
            lists: configs.iter().map(game_list_for).collect(),
            ..Default::default()
        };

        let mut pending = stream::iter(configs.iter().map(|config| self.build_list(config)))
            .buffer_unordered(self.concurrency);

        while let Some(built) = pending.next().await {
            let built = built?;
            tracing::info!(
                "✅ List built: {} ({} series, {} games)",
                built.data.url_slug,
                built.series_games.len(),
                built.full_games.len()
            );

            output.all_games.extend(built.full_games);
            output.series_games.extend(built.series_games);
            output.series.push(built.data);
        }

        Ok(output)
    }

    async fn build_list(&self, config: &ListConfig) -> Result<BuiltList> {
        tracing::debug!(
            "📥 Generating {} series source(s) for list: {}",
            config.series.len(),
            config.url_slug
        );

        let generated = try_join_all(
            config
                .series
                .iter()
                .map(|series_config| self.generate_series(series_config, config)),
        )
        .await?;

        let target_team = resolve_target_team(config);
        let mut data = SeriesData {
            name: config.name.clone(),
            url_slug: config.url_slug.clone(),
            series: Vec::new(),
            target_team: target_team.clone(),
        };
        let mut series_games = Vec::new();
        let mut full_games = Vec::new();

        for generated_series in generated {
            full_games.extend(generated_series.full_games);

            for season_series in generated_series.season_series {
                let (summary, games) = summarize(season_series, target_team.as_deref());
                data.series.push(summary);
                series_games.push(games);
            }
        }

        Ok(BuiltList {
            data,
            series_games,
            full_games,
        })
    }

    async fn generate_series(
        &self,
        series_config: &SeriesConfig,
        list_config: &ListConfig,
    ) -> Result<GeneratedSeries> {
        let full_games = self.generator.generate_games(&series_config.source).await?;
        let list_games = full_games
            .iter()
            .map(|game| self.projector.to_list_game(game, list_config))
            .collect();

        let season_series = build_series(
            &series_config.series_id,
            list_games,
            series_config.series_name.as_deref(),
        );
        tracing::debug!(
            "🔄 Segmented {} games from {} into {} series",
            full_games.len(),
            series_config.source.describe(),
            season_series.len()
        );

        Ok(GeneratedSeries {
            season_series,
            full_games,
        })
    }
}

pub fn game_list_for(config: &ListConfig) -> GameList {
    GameList {
        list_id: config.url_slug.clone(),
        name: config.name.clone(),
        description: config.description.clone(),
        list_type: ListType::from_config(&config.list_type),
    }
}

/// 目標隊伍可寫代碼或顯示名稱，統一轉成投影後的顯示名稱
fn resolve_target_team(config: &ListConfig) -> Option<String> {
    config.target_team.as_ref().map(|target| {
        config
            .team_names
            .get(target)
            .cloned()
            .unwrap_or_else(|| target.clone())
    })
}

fn summarize(series: SeasonSeries, target_team: Option<&str>) -> (SeriesSummary, SeriesGames) {
    let win_counts = count_wins(&series.games, target_team);

    let summary = SeriesSummary {
        series_id: series.series_id.clone(),
        series_name: series.series_name.clone(),
        home_team: series.home_team.clone(),
        visiting_team: series.visiting_team.clone(),
        start_date: series.date_start.clone(),
        end_date: series.date_end.clone(),
        win_counts,
    };

    let games = SeriesGames {
        url_slug: series.series_id,
        games: series.games,
        series_info: SeriesInfo {
            series_name: series.series_name,
            home_team: series.home_team,
            visiting_team: series.visiting_team,
            start_date: series.date_start,
            end_date: series.date_end,
        },
    };

    (summary, games)
}
