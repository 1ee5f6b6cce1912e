use crate::domain::model::{ExtractBatch, TransformResult};
use crate::parser::calibration::Calibration;
use crate::utils::error::Result;
use async_trait::async_trait;

pub trait Storage: Send + Sync {
    fn read_file(&self, path: &str) -> impl std::future::Future<Output = Result<Vec<u8>>> + Send;
    fn write_file(
        &self,
        path: &str,
        data: &[u8],
    ) -> impl std::future::Future<Output = Result<()>> + Send;
}

pub trait ConfigProvider: Send + Sync {
    fn input_path(&self) -> &str;
    fn output_path(&self) -> &str;
    fn output_formats(&self) -> &[String];
    fn delimiter(&self) -> u8;
    /// Archive name when outputs should be bundled into a single ZIP.
    fn compression(&self) -> Option<&str>;
    fn parallel(&self) -> bool;
    fn calibration(&self) -> Calibration;
}

#[async_trait]
pub trait Pipeline: Send + Sync {
    async fn extract(&self) -> Result<ExtractBatch>;
    async fn transform(&self, batch: ExtractBatch) -> Result<TransformResult>;
    async fn load(&self, result: TransformResult) -> Result<String>;
}
