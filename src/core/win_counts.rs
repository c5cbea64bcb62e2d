use crate::domain::model::{ListGame, WinCounts};

/// 依主客場角色計算勝場：客隊勝記入 visiting_wins，主隊勝記入 home_wins，平手不計
pub fn count_symmetric(games: &[ListGame]) -> WinCounts {
    let mut visiting_wins = 0;
    let mut home_wins = 0;

    for game in games {
        if game.visiting_score > game.home_score {
            visiting_wins += 1;
        } else if game.home_score > game.visiting_score {
            home_wins += 1;
        }
    }

    WinCounts::Symmetric {
        visiting_wins,
        home_wins,
    }
}

/// 目標隊伍對上所有其他隊伍的勝場
pub fn count_for_target(games: &[ListGame], target_team: &str) -> WinCounts {
    let mut target_wins = 0;
    let mut other_wins = 0;

    for winner in games.iter().filter_map(ListGame::winner) {
        if winner == target_team {
            target_wins += 1;
        } else {
            other_wins += 1;
        }
    }

    WinCounts::TargetRelative {
        target_team: target_team.to_string(),
        target_wins,
        other_wins,
    }
}

pub fn count_wins(games: &[ListGame], target_team: Option<&str>) -> WinCounts {
    match target_team {
        Some(target) => count_for_target(games, target),
        None => count_symmetric(games),
    }
}
