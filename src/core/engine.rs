use crate::adapters::writer::SeriesWriter;
use crate::config::build_config::ListConfig;
use crate::core::series_list::SeriesListBuilder;
use crate::domain::model::SeriesListOutput;
use crate::domain::ports::{GameGenerator, GameProjector, Storage};
use crate::utils::error::Result;
use std::time::Instant;

/// 建置流程：產生系列列表後寫出結果
pub struct SeriesEngine<G: GameGenerator, P: GameProjector, S: Storage> {
    builder: SeriesListBuilder<G, P>,
    writer: SeriesWriter<S>,
}

impl<G: GameGenerator, P: GameProjector, S: Storage> SeriesEngine<G, P, S> {
    pub fn new(builder: SeriesListBuilder<G, P>, writer: SeriesWriter<S>) -> Self {
        Self { builder, writer }
    }

    /// 回傳輸出位置
    pub async fn run(&self, configs: &[ListConfig]) -> Result<String> {
        let (output_path, _) = self.run_with_output(configs).await?;
        Ok(output_path)
    }

    pub async fn run_with_output(&self, configs: &[ListConfig]) -> Result<(String, SeriesListOutput)> {
        let start_time = Instant::now();
        tracing::info!("🚀 Building {} list(s)", configs.len());

        let output = self.builder.build_series_list(configs).await?;
        tracing::info!(
            "🔄 Built {} lists, {} series from {} games",
            output.lists.len(),
            output.series_count(),
            output.all_games.len()
        );

        let output_path = self.writer.write(&output).await?;
        tracing::info!(
            "💾 Output saved to: {} (duration: {:?})",
            output_path,
            start_time.elapsed()
        );

        Ok((output_path, output))
    }
}
