use crate::error::{AppError, AppResult};
use crate::models::group::{GroupDefinition, GroupFile};
use std::path::Path;
use tokio::fs;

/// 从 TOML 文本解析分组定义
pub fn parse_group_file(content: &str, source: &Path) -> AppResult<Vec<GroupDefinition>> {
    let file: GroupFile = toml::from_str(content).map_err(|e| AppError::GroupsParseFailed {
        path: source.to_path_buf(),
        source: e,
    })?;
    Ok(file.groups)
}

/// 从 TOML 文件加载分组定义
///
/// 文件不存在时视为没有分组（分组由编辑会话维护，可以缺席）
pub async fn load_group_file(path: &Path) -> AppResult<Vec<GroupDefinition>> {
    if !path.exists() {
        tracing::warn!("分组文件不存在，忽略: {}", path.display());
        return Ok(Vec::new());
    }

    let content = fs::read_to_string(path)
        .await
        .map_err(|e| AppError::read_failed(path, e))?;

    let groups = parse_group_file(&content, path)?;
    tracing::info!(
        "正在加载分组: {} ({} 个定义)",
        path.file_name().unwrap_or_default().to_string_lossy(),
        groups.len()
    );

    Ok(groups)
}
