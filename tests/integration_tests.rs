use anyhow::Result;
use series_builder::core::WinCounts;
use series_builder::domain::model::ListType;
use series_builder::utils::validation::Validate;
use series_builder::{
    BuildConfig, DefaultProjector, LocalStorage, SeriesEngine, SeriesListBuilder, SeriesWriter,
    SourceGameGenerator,
};
use std::path::Path;
use tempfile::TempDir;

fn example_config_dir() -> String {
    format!("{}/configs", env!("CARGO_MANIFEST_DIR"))
}

fn example_config() -> BuildConfig {
    BuildConfig::from_file(format!("{}/series-example.toml", example_config_dir()))
        .expect("example config should parse")
}

#[test]
fn test_example_config_is_valid() {
    let config = example_config();
    assert!(config.validate().is_ok());
    assert_eq!(config.lists.len(), 2);
    assert_eq!(config.concurrency(), 4);
}

#[test]
fn test_example_build_counts() {
    let config = example_config();
    let generator = SourceGameGenerator::new(LocalStorage::new(example_config_dir()));
    let builder = SeriesListBuilder::new(generator, DefaultProjector).with_concurrency(1);

    let output = tokio_test::block_on(builder.build_series_list(&config.lists)).unwrap();

    assert_eq!(output.lists[0].list_type, ListType::Series);
    assert_eq!(output.lists[1].list_type, ListType::SeriesGroup);
    assert_eq!(output.all_games.len(), 12);

    let cubs = output
        .series
        .iter()
        .find(|s| s.url_slug == "cubs-2023")
        .unwrap();
    assert_eq!(cubs.target_team.as_deref(), Some("Chicago Cubs"));
    assert_eq!(cubs.series.len(), 2);
    assert_eq!(cubs.series[0].series_id, "CHN-MIL-CHN202303300");
    assert_eq!(cubs.series[0].start_date, "2023-03-30");
    assert_eq!(cubs.series[0].end_date, "2023-04-02");
    assert_eq!(cubs.series[0].home_team, "Chicago Cubs");
    assert_eq!(
        cubs.series[0].win_counts,
        WinCounts::TargetRelative {
            target_team: "Chicago Cubs".to_string(),
            target_wins: 1,
            other_wins: 1,
        }
    );
    assert_eq!(cubs.series[1].series_id, "CHN-SLN-SLN202304070");
    assert_eq!(cubs.series[1].home_team, "St. Louis Cardinals");

    let central = output
        .series
        .iter()
        .find(|s| s.url_slug == "nl-central-2023")
        .unwrap();
    let ids: Vec<_> = central.series.iter().map(|s| s.series_id.as_str()).collect();
    assert_eq!(ids, vec!["2023-CHN-MIL", "2023-CHN-SLN", "2023-MIL-SLN"]);
    assert_eq!(
        central.series[2].win_counts,
        WinCounts::Symmetric {
            visiting_wins: 1,
            home_wins: 1,
        }
    );
    assert_eq!(output.series_games.len(), 5);
}

#[tokio::test]
async fn test_end_to_end_writes_outputs() -> Result<()> {
    let temp_dir = TempDir::new()?;
    let output_path = temp_dir.path().to_str().unwrap().to_string();

    let mut config = example_config();
    config.output.path = output_path.clone();

    let generator = SourceGameGenerator::new(LocalStorage::new(example_config_dir()));
    let builder = SeriesListBuilder::new(generator, DefaultProjector);
    let writer = SeriesWriter::from_config(LocalStorage::new(output_path.clone()), &config);
    let engine = SeriesEngine::new(builder, writer);

    let result = engine.run(&config.lists).await?;
    assert_eq!(result, output_path);

    for name in ["lists.json", "games.json", "series.json", "series_games.json", "manifest.json"] {
        assert!(Path::new(&output_path).join(name).exists(), "missing {}", name);
    }

    let lists: serde_json::Value =
        serde_json::from_slice(&std::fs::read(Path::new(&output_path).join("lists.json"))?)?;
    assert_eq!(lists[0]["list_id"], "cubs-2023");
    assert_eq!(lists[1]["type"], "series-group");

    let series_games: serde_json::Value =
        serde_json::from_slice(&std::fs::read(Path::new(&output_path).join("series_games.json"))?)?;
    assert_eq!(series_games.as_array().unwrap().len(), 5);

    let games: serde_json::Value =
        serde_json::from_slice(&std::fs::read(Path::new(&output_path).join("games.json"))?)?;
    // CSV 中的額外欄位會保留在完整比賽紀錄中
    assert!(games
        .as_array()
        .unwrap()
        .iter()
        .all(|g| g.get("park").is_some()));

    Ok(())
}

#[tokio::test]
async fn test_end_to_end_with_compression() -> Result<()> {
    let temp_dir = TempDir::new()?;
    let output_path = temp_dir.path().to_str().unwrap().to_string();

    let mut config = example_config();
    config.output.path = output_path.clone();
    if let Some(compression) = config.output.compression.as_mut() {
        compression.enabled = true;
    }

    let generator = SourceGameGenerator::new(LocalStorage::new(example_config_dir()));
    let builder = SeriesListBuilder::new(generator, DefaultProjector);
    let writer = SeriesWriter::from_config(LocalStorage::new(output_path.clone()), &config);
    let engine = SeriesEngine::new(builder, writer);

    let result = engine.run(&config.lists).await?;
    assert!(result.ends_with("series_output.zip"));

    let zip_data = std::fs::read(Path::new(&output_path).join("series_output.zip"))?;
    let mut archive = zip::ZipArchive::new(std::io::Cursor::new(zip_data))?;
    assert_eq!(archive.len(), 5);
    assert!(archive.by_name("series.json").is_ok());

    Ok(())
}

#[tokio::test]
async fn test_missing_source_file_aborts_build() -> Result<()> {
    let temp_dir = TempDir::new()?;
    let output_path = temp_dir.path().to_str().unwrap().to_string();

    let config_content = format!(
        r#"
[build]
name = "broken"

[output]
path = "{}"

[[lists]]
name = "Broken"
url_slug = "broken"
type = "series"

[[lists.series]]
[lists.series.source]
type = "csv"
paths = ["does-not-exist.csv"]
"#,
        output_path.replace('\\', "/")
    );
    let config = BuildConfig::from_toml_str(&config_content)?;
    assert!(config.validate().is_ok());

    let generator = SourceGameGenerator::new(LocalStorage::new(output_path.clone()));
    let builder = SeriesListBuilder::new(generator, DefaultProjector);
    let writer = SeriesWriter::from_config(LocalStorage::new(output_path.clone()), &config);
    let engine = SeriesEngine::new(builder, writer);

    assert!(engine.run(&config.lists).await.is_err());
    // 失敗時不寫出任何部分結果
    assert!(!Path::new(&output_path).join("lists.json").exists());

    Ok(())
}
