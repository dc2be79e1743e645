/// 日志工具模块
///
/// 提供日志初始化以及格式化输出的辅助函数
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

/// 初始化日志
///
/// 优先读取 `RUST_LOG`，否则按 `verbose` 选择 debug / info。
/// 重复调用是安全的（测试中会多次调用）。
pub fn init(verbose: bool) {
    let default_level = if verbose { "debug" } else { "info" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    let _ = tracing_subscriber::fmt().with_env_filter(filter).try_init();
}

/// 记录程序启动信息
///
/// # 参数
/// - `input`: 中间 HTML 路径
/// - `output_dir`: 产物目录
pub fn log_startup(input: &str, output_dir: &str) {
    info!("{}", "=".repeat(60));
    info!("🚀 程序启动 - QCM 题目抽取");
    info!("📄 输入文件: {}", input);
    info!("📁 输出目录: {}", output_dir);
    info!("{}", "=".repeat(60));
}

/// 记录单个题目抽取结果
pub fn log_question(index: usize, kind: &str, answer_count: usize, text: &str) {
    info!(
        "[题目 {}] 类型: {} | 选项: {} | 题干: {}",
        index,
        kind,
        answer_count,
        truncate_text(text, 60)
    );
}

/// 记录截断（找到题目开头但缺少分值段落）
pub fn log_truncation(offset: usize, extracted: usize) {
    warn!(
        "⚠️ 偏移 {} 处的题目缺少分值段落，抽取在此停止（已抽取 {} 题）",
        offset, extracted
    );
}

/// 打印最终统计信息
///
/// # 参数
/// - `questions`: 抽取题目数
/// - `blocks`: 渲染块数
/// - `truncated_at`: 截断位置（若有）
/// - `export_path`: 导出文件路径
pub fn print_final_stats(
    questions: usize,
    blocks: usize,
    truncated_at: Option<usize>,
    export_path: &str,
) {
    info!("\n{}", "=".repeat(60));
    info!("📊 处理完成统计");
    info!(
        "完成时间: {}",
        chrono::Local::now().format("%Y-%m-%d %H:%M:%S")
    );
    info!("{}", "=".repeat(60));
    info!("✅ 题目: {}", questions);
    info!("📦 渲染块: {}", blocks);
    match truncated_at {
        Some(offset) => warn!("❌ 截断位置: {}", offset),
        None => info!("✓ 文档完整处理"),
    }
    info!("{}", "=".repeat(60));
    info!("\n导出文件: {}", export_path);
}

/// 截断长文本用于日志显示
///
/// # 参数
/// - `text`: 原始文本
/// - `max_len`: 最大长度
///
/// # 返回
/// 返回截断后的文本
pub fn truncate_text(text: &str, max_len: usize) -> String {
    if text.chars().count() > max_len {
        text.chars().take(max_len).collect::<String>() + "..."
    } else {
        text.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_truncate_text() {
        assert_eq!(truncate_text("abc", 5), "abc");
        assert_eq!(truncate_text("abcdef", 3), "abc...");
        assert_eq!(truncate_text("éèàù", 2), "éè...");
    }
}
