use crate::domain::model::ReportKind;
use crate::utils::error::Result;
use async_trait::async_trait;

/// External generative analysis source. Implementations return one untrusted
/// JSON payload per report kind; all schema checking happens downstream in
/// the validator.
#[async_trait]
pub trait AnalysisService: Send + Sync {
    async fn fetch_payload(&self, domain: &str, kind: ReportKind) -> Result<serde_json::Value>;
}

pub trait ConfigProvider: Send + Sync {
    fn domain(&self) -> &str;
    fn api_base_url(&self) -> &str;
    fn api_key(&self) -> &str;
    fn model(&self) -> &str;
    fn output_path(&self) -> &str;
    fn seed(&self) -> Option<u64>;
}

pub trait Storage: Send + Sync {
    fn read_file(&self, path: &str) -> impl std::future::Future<Output = Result<Vec<u8>>> + Send;
    fn write_file(
        &self,
        path: &str,
        data: &[u8],
    ) -> impl std::future::Future<Output = Result<()>> + Send;
}
