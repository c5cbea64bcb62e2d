use crate::config::build_config::GameSource;
use crate::domain::model::GameRecord;
use crate::domain::ports::{GameGenerator, Storage};
use crate::utils::error::{Result, SeriesError};
use async_trait::async_trait;
use reqwest::Client;
use std::collections::BTreeMap;

const REQUIRED_COLUMNS: [&str; 6] = [
    "id",
    "date",
    "home_team",
    "visiting_team",
    "home_score",
    "visiting_score",
];

/// 依 GameSource 類型讀取比賽紀錄：csv/json 透過 Storage，http 透過 reqwest
pub struct SourceGameGenerator<S: Storage> {
    storage: S,
    client: Client,
}

impl<S: Storage> SourceGameGenerator<S> {
    pub fn new(storage: S) -> Self {
        Self {
            storage,
            client: Client::new(),
        }
    }

    async fn read_csv_files(&self, paths: &[String]) -> Result<Vec<GameRecord>> {
        let mut games = Vec::new();
        for path in paths {
            let data = self.storage.read_file(path).await?;
            let parsed = parse_csv_games(path, &data)?;
            tracing::debug!("📥 Read {} games from {}", parsed.len(), path);
            games.extend(parsed);
        }
        Ok(games)
    }

    async fn read_json_files(&self, paths: &[String]) -> Result<Vec<GameRecord>> {
        let mut games = Vec::new();
        for path in paths {
            let data = self.storage.read_file(path).await?;
            let parsed: Vec<GameRecord> = serde_json::from_slice(&data)
                .map_err(|e| SeriesError::generation(path.as_str(), e.to_string()))?;
            tracing::debug!("📥 Read {} games from {}", parsed.len(), path);
            games.extend(parsed);
        }
        Ok(games)
    }

    async fn fetch_games(&self, endpoint: &str, timeout_seconds: Option<u64>) -> Result<Vec<GameRecord>> {
        let mut request = self.client.get(endpoint);
        if let Some(timeout) = timeout_seconds {
            request = request.timeout(std::time::Duration::from_secs(timeout));
        }

        tracing::debug!("Making game request to: {}", endpoint);
        let response = request.send().await?;
        tracing::debug!("Game source response status: {}", response.status());

        if !response.status().is_success() {
            return Err(SeriesError::generation(
                endpoint,
                format!("unexpected status {}", response.status()),
            ));
        }

        let games: Vec<GameRecord> = response.json().await?;
        Ok(games)
    }
}

#[async_trait]
impl<S: Storage> GameGenerator for SourceGameGenerator<S> {
    async fn generate_games(&self, source: &GameSource) -> Result<Vec<GameRecord>> {
        match source {
            GameSource::Csv { paths } => self.read_csv_files(paths).await,
            GameSource::Json { paths } => self.read_json_files(paths).await,
            GameSource::Http {
                endpoint,
                timeout_seconds,
            } => self.fetch_games(endpoint, *timeout_seconds).await,
        }
    }
}

/// 解析 CSV 比賽紀錄，第一列須為標題列；非必要欄位保留在 extra
pub fn parse_csv_games(source_name: &str, data: &[u8]) -> Result<Vec<GameRecord>> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .trim(csv::Trim::All)
        .from_reader(data);

    let headers = reader
        .headers()
        .map_err(|e| SeriesError::generation(source_name, e.to_string()))?
        .clone();
    for column in REQUIRED_COLUMNS {
        if !headers.iter().any(|h| h == column) {
            return Err(SeriesError::generation(
                source_name,
                format!("missing required column '{}'", column),
            ));
        }
    }

    let mut games = Vec::new();
    for (index, row) in reader.records().enumerate() {
        let row = row.map_err(|e| SeriesError::generation(source_name, e.to_string()))?;
        // 標題列為第 1 行
        let line = index + 2;

        let mut fields: BTreeMap<&str, &str> = headers.iter().zip(row.iter()).collect();
        let mut take = |column: &str| fields.remove(column).unwrap_or_default().to_string();

        let id = take("id");
        let date = take("date");
        let home_team = take("home_team");
        let visiting_team = take("visiting_team");
        let home_score = parse_score(source_name, line, "home_score", &take("home_score"))?;
        let visiting_score =
            parse_score(source_name, line, "visiting_score", &take("visiting_score"))?;
        let matchup = Some(take("matchup")).filter(|m| !m.is_empty());

        let extra = fields
            .into_iter()
            .map(|(k, v)| (k.to_string(), serde_json::Value::String(v.to_string())))
            .collect();

        games.push(GameRecord {
            id,
            date,
            home_team,
            visiting_team,
            home_score,
            visiting_score,
            matchup,
            extra,
        });
    }

    Ok(games)
}

fn parse_score(source_name: &str, line: usize, column: &str, value: &str) -> Result<u32> {
    value.parse().map_err(|_| {
        SeriesError::generation(
            source_name,
            format!("line {}: invalid {} '{}'", line, column, value),
        )
    })
}
