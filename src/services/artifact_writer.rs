//! 产物写入服务 - 业务能力层
//!
//! 只负责"把一个产物整体写到磁盘"能力，不关心流程

use serde::Serialize;
use std::path::{Path, PathBuf};
use tracing::debug;

use crate::error::{AppError, AppResult};

/// 产物写入服务
///
/// 职责：
/// - 每个产物先写临时文件再改名，读者永远看不到写了一半的文件
/// - 自动创建缺失的目录
/// - 不关心产物内容的含义
#[derive(Debug, Clone)]
pub struct ArtifactWriter {
    output_dir: PathBuf,
}

impl ArtifactWriter {
    pub fn new(output_dir: impl Into<PathBuf>) -> Self {
        Self {
            output_dir: output_dir.into(),
        }
    }

    /// 相对输出目录的路径
    pub fn path_of(&self, relative: &str) -> PathBuf {
        self.output_dir.join(relative)
    }

    /// 写入格式化的 JSON
    pub async fn write_json<T: Serialize>(&self, relative: &str, value: &T) -> AppResult<PathBuf> {
        let content = serde_json::to_string_pretty(value)?;
        self.write_text(relative, &content).await
    }

    /// 写入文本（HTML 等）
    pub async fn write_text(&self, relative: &str, content: &str) -> AppResult<PathBuf> {
        let target = self.path_of(relative);
        write_atomic(&target, content.as_bytes()).await?;
        debug!("写入产物: {} ({} 字节)", target.display(), content.len());
        Ok(target)
    }
}

async fn write_atomic(target: &Path, bytes: &[u8]) -> AppResult<()> {
    if let Some(dir) = target.parent() {
        tokio::fs::create_dir_all(dir)
            .await
            .map_err(|e| AppError::write_failed(dir, e))?;
    }

    let mut temp = target.as_os_str().to_owned();
    temp.push(".tmp");
    let temp = PathBuf::from(temp);

    tokio::fs::write(&temp, bytes)
        .await
        .map_err(|e| AppError::write_failed(&temp, e))?;

    if let Err(e) = tokio::fs::rename(&temp, target).await {
        let _ = tokio::fs::remove_file(&temp).await;
        return Err(AppError::write_failed(target, e));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_write_json_creates_directories() {
        let dir = tempfile::tempdir().unwrap();
        let writer = ArtifactWriter::new(dir.path().join("out"));

        let path = writer
            .write_json("nested/data.json", &serde_json::json!({"a": 1}))
            .await
            .unwrap();

        assert_eq!(path, dir.path().join("out").join("nested/data.json"));
        let content = tokio::fs::read_to_string(&path).await.unwrap();
        let value: serde_json::Value = serde_json::from_str(&content).unwrap();
        assert_eq!(value["a"], 1);
        assert!(!dir.path().join("out/nested/data.json.tmp").exists());
    }

    #[tokio::test]
    async fn test_write_text_replaces_whole_file() {
        let dir = tempfile::tempdir().unwrap();
        let writer = ArtifactWriter::new(dir.path());

        writer.write_text("page.html", "<p>une version longue</p>").await.unwrap();
        writer.write_text("page.html", "<p>v2</p>").await.unwrap();

        let content = tokio::fs::read_to_string(dir.path().join("page.html")).await.unwrap();
        assert_eq!(content, "<p>v2</p>");
    }
}
