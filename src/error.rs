use std::path::PathBuf;

use thiserror::Error;

/// 应用程序错误类型
///
/// 只覆盖解析层之下的结构性失败（源文件不可读、产物不可写等）。
/// 解析层的异常（截断、缺少答案区、空选项）一律记录在诊断数据中，不在此处出现。
#[derive(Debug, Error)]
pub enum AppError {
    /// 读取文件失败
    #[error("读取文件失败 ({}): {source}", path.display())]
    ReadFailed {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// 写入文件失败
    #[error("写入文件失败 ({}): {source}", path.display())]
    WriteFailed {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// JSON 序列化失败
    #[error("JSON序列化失败: {0}")]
    Json(#[from] serde_json::Error),

    /// HTML 片段序列化失败
    #[error("HTML序列化失败: {0}")]
    HtmlSerialize(#[source] std::io::Error),

    /// 分组定义文件解析失败
    #[error("分组文件解析失败 ({}): {source}", path.display())]
    GroupsParseFailed {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },

    /// 未知的模板类型
    #[error("未知的模板类型: {0}")]
    UnknownTemplateType(String),
}

// ========== 便捷构造函数 ==========

impl AppError {
    /// 创建文件读取错误
    pub fn read_failed(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        AppError::ReadFailed {
            path: path.into(),
            source,
        }
    }

    /// 创建文件写入错误
    pub fn write_failed(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        AppError::WriteFailed {
            path: path.into(),
            source,
        }
    }
}

// ========== Result 类型别名 ==========

/// 应用程序结果类型
pub type AppResult<T> = Result<T, AppError>;
