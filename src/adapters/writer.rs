use crate::config::build_config::{BuildConfig, CompressionConfig, FilenameConfig};
use crate::domain::model::SeriesListOutput;
use crate::domain::ports::Storage;
use crate::utils::error::Result;
use serde::Serialize;
use std::io::Write;
use zip::write::{FileOptions, ZipWriter};

pub const MANIFEST_FILENAME: &str = "manifest.json";

#[derive(Debug, Clone, Serialize)]
pub struct Manifest {
    pub name: String,
    pub generated_at: String,
    pub list_count: usize,
    pub game_count: usize,
    pub series_count: usize,
    pub files: Vec<String>,
}

/// 將四個輸出集合寫成 JSON 檔案
pub struct SeriesWriter<S: Storage> {
    storage: S,
    output_root: String,
    name: String,
    pretty: bool,
    filenames: FilenameConfig,
    compression: Option<CompressionConfig>,
}

impl<S: Storage> SeriesWriter<S> {
    pub fn new(storage: S, output_root: String) -> Self {
        Self {
            storage,
            output_root,
            name: "series-build".to_string(),
            pretty: true,
            filenames: FilenameConfig::default(),
            compression: None,
        }
    }

    pub fn from_config(storage: S, config: &BuildConfig) -> Self {
        Self {
            storage,
            output_root: config.output_path().to_string(),
            name: config.build.name.clone(),
            pretty: config.pretty_output(),
            filenames: config.output.filenames.clone().unwrap_or_default(),
            compression: config.compression().cloned(),
        }
    }

    pub fn with_pretty(mut self, pretty: bool) -> Self {
        self.pretty = pretty;
        self
    }

    pub fn with_compression(mut self, compression: Option<CompressionConfig>) -> Self {
        self.compression = compression;
        self
    }

    /// 輸出檔名，依序為 lists、games、series、series_games
    pub fn filenames(&self) -> [String; 4] {
        let pick = |custom: &Option<String>, default: &str| {
            custom.clone().unwrap_or_else(|| default.to_string())
        };
        [
            pick(&self.filenames.lists, "lists.json"),
            pick(&self.filenames.games, "games.json"),
            pick(&self.filenames.series, "series.json"),
            pick(&self.filenames.series_games, "series_games.json"),
        ]
    }

    pub async fn write(&self, output: &SeriesListOutput) -> Result<String> {
        let [lists_name, games_name, series_name, series_games_name] = self.filenames();

        let mut files = vec![
            (lists_name, self.to_json(&output.lists)?),
            (games_name, self.to_json(&output.all_games)?),
            (series_name, self.to_json(&output.series)?),
            (series_games_name, self.to_json(&output.series_games)?),
        ];

        let manifest = Manifest {
            name: self.name.clone(),
            generated_at: chrono::Utc::now().to_rfc3339(),
            list_count: output.lists.len(),
            game_count: output.all_games.len(),
            series_count: output.series_count(),
            files: files.iter().map(|(name, _)| name.clone()).collect(),
        };
        files.push((MANIFEST_FILENAME.to_string(), self.to_json(&manifest)?));

        for (name, data) in &files {
            self.storage.write_file(name, data).await?;
            tracing::debug!("💾 Wrote {} ({} bytes)", name, data.len());
        }

        if let Some(compression) = &self.compression {
            let zip_data = bundle(&files)?;
            self.storage
                .write_file(&compression.filename, &zip_data)
                .await?;
            tracing::info!("📦 Compressed output saved: {}", compression.filename);
            return Ok(format!("{}/{}", self.output_root, compression.filename));
        }

        Ok(self.output_root.clone())
    }

    fn to_json<T: Serialize + ?Sized>(&self, value: &T) -> Result<Vec<u8>> {
        let data = if self.pretty {
            serde_json::to_vec_pretty(value)?
        } else {
            serde_json::to_vec(value)?
        };
        Ok(data)
    }
}

fn bundle(files: &[(String, Vec<u8>)]) -> Result<Vec<u8>> {
    let mut zip = ZipWriter::new(std::io::Cursor::new(Vec::new()));

    for (name, data) in files {
        zip.start_file::<_, ()>(name.as_str(), FileOptions::default())?;
        zip.write_all(data)?;
    }

    let cursor = zip.finish()?;
    Ok(cursor.into_inner())
}
