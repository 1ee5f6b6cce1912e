use crate::core::Pipeline;
use crate::utils::error::Result;

pub struct EtlEngine<P: Pipeline> {
    pipeline: P,
}

impl<P: Pipeline> EtlEngine<P> {
    pub fn new(pipeline: P) -> Self {
        Self { pipeline }
    }

    pub async fn run(&self) -> Result<String> {
        tracing::info!("Starting ETL process...");

        // Extract
        let batch = self.pipeline.extract().await?;
        tracing::info!(
            "📥 Extracted {} records ({} rejected rows)",
            batch.records.len(),
            batch.rejected.len()
        );

        // Transform
        let transformed = self.pipeline.transform(batch).await?;
        tracing::info!("🔧 Transformed {} records", transformed.records.len());

        // Load
        let output_path = self.pipeline.load(transformed).await?;
        tracing::info!("📁 Output saved to: {}", output_path);

        Ok(output_path)
    }
}
