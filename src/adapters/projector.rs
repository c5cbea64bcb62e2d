use crate::config::build_config::ListConfig;
use crate::domain::model::{GameRecord, ListGame};
use crate::domain::ports::GameProjector;

/// 預設投影：隊名依列表的 team_names 轉換，matchup 與主客場無關
#[derive(Debug, Clone, Copy, Default)]
pub struct DefaultProjector;

impl DefaultProjector {
    /// 來源未提供 matchup 時，以排序後的兩隊代碼組成
    pub fn matchup_for(game: &GameRecord) -> String {
        if let Some(matchup) = game.matchup.as_deref().filter(|m| !m.is_empty()) {
            return matchup.to_string();
        }

        let mut teams = [game.home_team.as_str(), game.visiting_team.as_str()];
        teams.sort_unstable();
        teams.join("-")
    }
}

impl GameProjector for DefaultProjector {
    fn to_list_game(&self, game: &GameRecord, config: &ListConfig) -> ListGame {
        let team_name = |code: &str| {
            config
                .team_names
                .get(code)
                .cloned()
                .unwrap_or_else(|| code.to_string())
        };

        ListGame {
            id: game.id.clone(),
            matchup: Self::matchup_for(game),
            home_team: team_name(&game.home_team),
            visiting_team: team_name(&game.visiting_team),
            date: game.date.clone(),
            home_score: game.home_score,
            visiting_score: game.visiting_score,
        }
    }
}
