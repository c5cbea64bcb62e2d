use crate::domain::ports::SeriesIdFn;
use crate::utils::error::{Result, SeriesError};
use crate::utils::validation::{self, Validate};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::Path;

const DEFAULT_CONCURRENCY: usize = 5;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BuildConfig {
    pub build: BuildSettings,
    pub output: OutputConfig,
    #[serde(default)]
    pub lists: Vec<ListConfig>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BuildSettings {
    pub name: String,
    pub description: Option<String>,
    pub concurrency: Option<usize>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OutputConfig {
    pub path: String,
    pub pretty: Option<bool>,
    pub filenames: Option<FilenameConfig>,
    pub compression: Option<CompressionConfig>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct FilenameConfig {
    pub lists: Option<String>,
    pub games: Option<String>,
    pub series: Option<String>,
    pub series_games: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CompressionConfig {
    pub enabled: bool,
    pub filename: String,
}

/// 單一輸出列表的配置
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ListConfig {
    pub name: String,
    #[serde(default)]
    pub description: String,
    pub url_slug: String,
    #[serde(rename = "type")]
    pub list_type: String,
    pub target_team: Option<String>,
    /// 隊伍代碼 -> 顯示名稱
    #[serde(default)]
    pub team_names: BTreeMap<String, String>,
    #[serde(default)]
    pub series: Vec<SeriesConfig>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SeriesConfig {
    pub series_name: Option<String>,
    #[serde(default)]
    pub series_id: SeriesIdStrategy,
    pub source: GameSource,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "strategy", rename_all = "snake_case")]
pub enum SeriesIdStrategy {
    /// 系列 id 即 matchup
    #[default]
    Matchup,
    /// "{matchup}-{anchor}"
    Anchored,
    /// 整個子配置只有一個系列
    Constant { value: String },
    /// 支援 {matchup} 與 {anchor} 佔位符
    Template { pattern: String },
}

impl SeriesIdFn for SeriesIdStrategy {
    fn series_id(&self, matchup: &str, anchor_game_id: &str) -> String {
        match self {
            SeriesIdStrategy::Matchup => matchup.to_string(),
            SeriesIdStrategy::Anchored => format!("{}-{}", matchup, anchor_game_id),
            SeriesIdStrategy::Constant { value } => value.clone(),
            SeriesIdStrategy::Template { pattern } => pattern
                .replace("{matchup}", matchup)
                .replace("{anchor}", anchor_game_id),
        }
    }
}

/// 比賽來源描述
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum GameSource {
    Csv {
        paths: Vec<String>,
    },
    Json {
        paths: Vec<String>,
    },
    Http {
        endpoint: String,
        timeout_seconds: Option<u64>,
    },
}

impl GameSource {
    /// 錯誤訊息與日誌中使用的來源名稱
    pub fn describe(&self) -> String {
        match self {
            GameSource::Csv { paths } | GameSource::Json { paths } => paths.join(","),
            GameSource::Http { endpoint, .. } => endpoint.clone(),
        }
    }
}

impl BuildConfig {
    /// 從 TOML 檔案載入配置
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(&path).map_err(SeriesError::IoError)?;
        Self::from_toml_str(&content)
    }

    /// 從 TOML 字串解析配置
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let processed_content = Self::substitute_env_vars(content)?;

        toml::from_str(&processed_content).map_err(|e| SeriesError::ConfigValidationError {
            field: "toml_parsing".to_string(),
            message: format!("TOML parsing error: {}", e),
        })
    }

    /// 替換環境變數 (例如 ${GAME_LOG_DIR})
    fn substitute_env_vars(content: &str) -> Result<String> {
        use regex::Regex;
        let re = Regex::new(r"\$\{([^}]+)\}").map_err(|e| SeriesError::ConfigValidationError {
            field: "env_substitution".to_string(),
            message: e.to_string(),
        })?;

        let result = re.replace_all(content, |caps: &regex::Captures| {
            let var_name = &caps[1];
            std::env::var(var_name).unwrap_or_else(|_| format!("${{{}}}", var_name))
        });

        Ok(result.to_string())
    }

    pub fn concurrency(&self) -> usize {
        self.build.concurrency.unwrap_or(DEFAULT_CONCURRENCY)
    }

    pub fn output_path(&self) -> &str {
        &self.output.path
    }

    pub fn pretty_output(&self) -> bool {
        self.output.pretty.unwrap_or(true)
    }

    pub fn compression(&self) -> Option<&CompressionConfig> {
        self.output.compression.as_ref().filter(|c| c.enabled)
    }

    pub fn validate_config(&self) -> Result<()> {
        validation::validate_non_empty_string("build.name", &self.build.name)?;
        validation::validate_positive_number("build.concurrency", self.concurrency(), 1)?;
        validation::validate_path("output.path", &self.output.path)?;

        if let Some(compression) = self.compression() {
            validation::validate_file_extensions(
                "output.compression.filename",
                std::slice::from_ref(&compression.filename),
                &["zip"],
            )?;
        }

        validation::validate_non_empty_list("lists", &self.lists)?;
        validation::validate_unique(
            "lists.url_slug",
            self.lists.iter().map(|l| l.url_slug.as_str()),
        )?;

        for list in &self.lists {
            list.validate()?;
        }

        Ok(())
    }
}

impl Validate for BuildConfig {
    fn validate(&self) -> Result<()> {
        self.validate_config()
    }
}

impl Validate for ListConfig {
    fn validate(&self) -> Result<()> {
        validation::validate_non_empty_string("lists.name", &self.name)?;
        validation::validate_non_empty_string("lists.url_slug", &self.url_slug)?;
        validation::validate_non_empty_string("lists.type", &self.list_type)?;
        if let Some(target) = &self.target_team {
            validation::validate_non_empty_string("lists.target_team", target)?;
        }
        validation::validate_non_empty_list(&format!("lists.{}.series", self.url_slug), &self.series)?;

        for series in &self.series {
            series.validate()?;
        }
        Ok(())
    }
}

impl Validate for SeriesConfig {
    fn validate(&self) -> Result<()> {
        match &self.series_id {
            SeriesIdStrategy::Matchup | SeriesIdStrategy::Anchored => {}
            SeriesIdStrategy::Constant { value } => {
                validation::validate_non_empty_string("series.series_id.value", value)?;
            }
            SeriesIdStrategy::Template { pattern } => {
                validation::validate_non_empty_string("series.series_id.pattern", pattern)?;
                if !pattern.contains("{matchup}") && !pattern.contains("{anchor}") {
                    return Err(SeriesError::InvalidConfigValueError {
                        field: "series.series_id.pattern".to_string(),
                        value: pattern.clone(),
                        reason: "Template must contain {matchup} or {anchor}".to_string(),
                    });
                }
            }
        }

        match &self.source {
            GameSource::Csv { paths } => {
                validation::validate_non_empty_list("series.source.paths", paths)?;
                validation::validate_file_extensions("series.source.paths", paths, &["csv"])
            }
            GameSource::Json { paths } => {
                validation::validate_non_empty_list("series.source.paths", paths)?;
                validation::validate_file_extensions("series.source.paths", paths, &["json"])
            }
            GameSource::Http { endpoint, .. } => {
                validation::validate_url("series.source.endpoint", endpoint)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    const BASIC_CONFIG: &str = r#"
[build]
name = "season-2023"
concurrency = 2

[output]
path = "./output"

[[lists]]
name = "Cubs 2023"
description = "Every Cubs series"
url_slug = "cubs-2023"
type = "series"
target_team = "CHN"

[lists.team_names]
CHN = "Chicago Cubs"

[[lists.series]]
series_name = "Regular Season"
series_id = { strategy = "matchup" }

[lists.series.source]
type = "csv"
paths = ["games/2023.csv"]

[[lists]]
name = "World Series"
url_slug = "world-series"
type = "standings"

[[lists.series]]
series_id = { strategy = "template", pattern = "ws-{matchup}" }

[lists.series.source]
type = "http"
endpoint = "https://example.com/games"
timeout_seconds = 10
"#;

    #[test]
    fn test_parse_basic_build_config() {
        let config = BuildConfig::from_toml_str(BASIC_CONFIG).unwrap();

        assert_eq!(config.build.name, "season-2023");
        assert_eq!(config.concurrency(), 2);
        assert!(config.pretty_output());
        assert!(config.compression().is_none());
        assert_eq!(config.lists.len(), 2);

        let cubs = &config.lists[0];
        assert_eq!(cubs.list_type, "series");
        assert_eq!(cubs.target_team.as_deref(), Some("CHN"));
        assert_eq!(cubs.team_names.get("CHN").unwrap(), "Chicago Cubs");
        assert_eq!(cubs.series[0].series_id, SeriesIdStrategy::Matchup);
        assert_eq!(
            cubs.series[0].source,
            GameSource::Csv {
                paths: vec!["games/2023.csv".to_string()]
            }
        );

        let ws = &config.lists[1];
        assert_eq!(ws.description, "");
        assert_eq!(
            ws.series[0].source,
            GameSource::Http {
                endpoint: "https://example.com/games".to_string(),
                timeout_seconds: Some(10)
            }
        );
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_series_id_strategies() {
        assert_eq!(SeriesIdStrategy::Matchup.series_id("A-B", "g1"), "A-B");
        assert_eq!(SeriesIdStrategy::Anchored.series_id("A-B", "g1"), "A-B-g1");
        assert_eq!(
            SeriesIdStrategy::Constant {
                value: "playoffs".to_string()
            }
            .series_id("A-B", "g1"),
            "playoffs"
        );
        assert_eq!(
            SeriesIdStrategy::Template {
                pattern: "{anchor}/{matchup}".to_string()
            }
            .series_id("A-B", "g1"),
            "g1/A-B"
        );
    }

    #[test]
    fn test_env_var_substitution() {
        std::env::set_var("SERIES_TEST_GAME_DIR", "/data/games");

        let toml_content = r#"
[build]
name = "env"

[output]
path = "./output"

[[lists]]
name = "env list"
url_slug = "env"
type = "series"

[[lists.series]]
[lists.series.source]
type = "json"
paths = ["${SERIES_TEST_GAME_DIR}/2023.json"]
"#;

        let config = BuildConfig::from_toml_str(toml_content).unwrap();
        assert_eq!(
            config.lists[0].series[0].source,
            GameSource::Json {
                paths: vec!["/data/games/2023.json".to_string()]
            }
        );
        // 未指定 series_id 時預設為 matchup
        assert_eq!(config.lists[0].series[0].series_id, SeriesIdStrategy::Matchup);

        std::env::remove_var("SERIES_TEST_GAME_DIR");
    }

    #[test]
    fn test_validation_rejects_duplicate_slugs() {
        let mut config = BuildConfig::from_toml_str(BASIC_CONFIG).unwrap();
        config.lists[1].url_slug = "cubs-2023".to_string();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_validation_rejects_bad_sources() {
        let mut config = BuildConfig::from_toml_str(BASIC_CONFIG).unwrap();
        config.lists[0].series[0].source = GameSource::Csv {
            paths: vec!["games/2023.txt".to_string()],
        };
        assert!(config.validate().is_err());

        let mut config = BuildConfig::from_toml_str(BASIC_CONFIG).unwrap();
        config.lists[1].series[0].source = GameSource::Http {
            endpoint: "not a url".to_string(),
            timeout_seconds: None,
        };
        assert!(config.validate().is_err());

        let mut config = BuildConfig::from_toml_str(BASIC_CONFIG).unwrap();
        config.lists[1].series.clear();
        assert!(matches!(
            config.validate(),
            Err(SeriesError::MissingConfigError { .. })
        ));
    }

    #[test]
    fn test_validation_rejects_template_without_placeholder() {
        let mut config = BuildConfig::from_toml_str(BASIC_CONFIG).unwrap();
        config.lists[1].series[0].series_id = SeriesIdStrategy::Template {
            pattern: "static".to_string(),
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_config_from_file() {
        let mut temp_file = NamedTempFile::new().unwrap();
        temp_file.write_all(BASIC_CONFIG.as_bytes()).unwrap();

        let config = BuildConfig::from_file(temp_file.path()).unwrap();
        assert_eq!(config.build.name, "season-2023");
    }

    #[test]
    fn test_invalid_toml_is_config_error() {
        let result = BuildConfig::from_toml_str("[build\nname = ");
        assert!(matches!(
            result,
            Err(SeriesError::ConfigValidationError { .. })
        ));
    }
}
