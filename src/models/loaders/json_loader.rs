use crate::error::{AppError, AppResult};
use crate::models::question::ExtractionArtifact;
use std::path::Path;
use tokio::fs;

/// 从 extraction.json 重新加载题目列表
///
/// 用于不重新解析源文档的重新分类与重新渲染
pub async fn load_extraction(path: &Path) -> AppResult<ExtractionArtifact> {
    let content = fs::read_to_string(path)
        .await
        .map_err(|e| AppError::read_failed(path, e))?;

    let artifact: ExtractionArtifact = serde_json::from_str(&content)?;
    tracing::info!(
        "成功加载 {} 个题目: {}",
        artifact.questions.len(),
        path.display()
    );

    Ok(artifact)
}
