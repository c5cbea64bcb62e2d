use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// 完整比賽紀錄，由比賽來源產生
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GameRecord {
    pub id: String,
    pub date: String,
    pub home_team: String,
    pub visiting_team: String,
    pub home_score: u32,
    pub visiting_score: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub matchup: Option<String>,
    /// 來源中其他欄位原樣保留
    #[serde(flatten)]
    pub extra: BTreeMap<String, serde_json::Value>,
}

/// 列表顯示用的精簡比賽
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ListGame {
    pub id: String,
    pub matchup: String,
    pub home_team: String,
    pub visiting_team: String,
    pub date: String,
    pub home_score: u32,
    pub visiting_score: u32,
}

impl ListGame {
    /// 勝隊名稱，平手時為 None
    pub fn winner(&self) -> Option<&str> {
        if self.visiting_score > self.home_score {
            Some(&self.visiting_team)
        } else if self.home_score > self.visiting_score {
            Some(&self.home_team)
        } else {
            None
        }
    }
}

/// 分段過程中的連續系列
#[derive(Debug, Clone, PartialEq)]
pub struct SeasonSeries {
    pub series_id: String,
    pub series_name: Option<String>,
    /// 系列第一場比賽的 id，系列存續期間固定不變
    pub anchor_game_id: String,
    pub home_team: String,
    pub visiting_team: String,
    pub games: Vec<ListGame>,
    pub date_start: String,
    pub date_end: String,
}

impl SeasonSeries {
    pub fn start(series_id: String, game: ListGame, series_name: Option<String>) -> Self {
        Self {
            series_id,
            series_name,
            anchor_game_id: game.id.clone(),
            home_team: game.home_team.clone(),
            visiting_team: game.visiting_team.clone(),
            date_start: game.date.clone(),
            date_end: game.date.clone(),
            games: vec![game],
        }
    }

    pub fn push(&mut self, game: ListGame) {
        self.games.push(game);
        self.refresh_end();
    }

    /// 以最後一場比賽的日期更新 date_end
    pub fn refresh_end(&mut self) {
        if let Some(last) = self.games.last() {
            self.date_end = last.date.clone();
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ListType {
    Series,
    SeriesGroup,
}

impl ListType {
    /// 只有 "series" 對應 Series，其他值一律視為 SeriesGroup
    pub fn from_config(value: &str) -> Self {
        if value == "series" {
            ListType::Series
        } else {
            ListType::SeriesGroup
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameList {
    pub list_id: String,
    pub name: String,
    pub description: String,
    #[serde(rename = "type")]
    pub list_type: ListType,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "mode", rename_all = "snake_case")]
pub enum WinCounts {
    Symmetric {
        visiting_wins: u32,
        home_wins: u32,
    },
    TargetRelative {
        target_team: String,
        target_wins: u32,
        other_wins: u32,
    },
}

impl WinCounts {
    pub fn target_team(&self) -> Option<&str> {
        match self {
            WinCounts::Symmetric { .. } => None,
            WinCounts::TargetRelative { target_team, .. } => Some(target_team),
        }
    }

    /// 已分勝負的場數
    pub fn decided(&self) -> u32 {
        match self {
            WinCounts::Symmetric {
                visiting_wins,
                home_wins,
            } => visiting_wins + home_wins,
            WinCounts::TargetRelative {
                target_wins,
                other_wins,
                ..
            } => target_wins + other_wins,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SeriesSummary {
    pub series_id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub series_name: Option<String>,
    pub home_team: String,
    pub visiting_team: String,
    pub start_date: String,
    pub end_date: String,
    pub win_counts: WinCounts,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SeriesInfo {
    pub series_name: Option<String>,
    pub home_team: String,
    pub visiting_team: String,
    pub start_date: String,
    pub end_date: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SeriesGames {
    pub url_slug: String,
    pub games: Vec<ListGame>,
    pub series_info: SeriesInfo,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SeriesData {
    pub name: String,
    pub url_slug: String,
    pub series: Vec<SeriesSummary>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub target_team: Option<String>,
}

/// build_series_list 的四個輸出集合
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SeriesListOutput {
    pub lists: Vec<GameList>,
    pub all_games: Vec<GameRecord>,
    pub series: Vec<SeriesData>,
    pub series_games: Vec<SeriesGames>,
}

impl SeriesListOutput {
    pub fn series_count(&self) -> usize {
        self.series_games.len()
    }
}
