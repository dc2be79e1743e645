//! 单个文档处理器 - 编排层
//!
//! ## 职责
//!
//! 本模块负责把一篇中间 HTML 变成题目列表，是文档级别的编排器。
//!
//! ## 核心功能
//!
//! 1. **隔离 body**：所有偏移都相对 `<body>` 内容
//! 2. **遍历片段**：驱动 `Segmenter`，按文档顺序分配题号
//! 3. **流程调度**：创建并复用 `QuestionFlow`
//! 4. **截断处理**：缺少分值段落时停止，但保留已抽取的题目
//! 5. **诊断收集**：每题的长度、偏移、选项数
//!
//! 抽取本身是纯计算，不做任何 I/O；产物落盘由 `batch_processor` 负责。

use tracing::{debug, info};

use crate::error::AppResult;
use crate::models::diagnostics::{Diagnostics, Truncation};
use crate::models::question::Question;
use crate::services::patterns::body_html;
use crate::services::segmenter::{SegmentStop, Segmenter};
use crate::services::type_classifier::Classification;
use crate::utils::logging;
use crate::workflow::{QuestionCtx, QuestionFlow};

/// 抽取选项
#[derive(Debug, Clone, Copy)]
pub struct ExtractOptions {
    /// 保留原始片段（`Question.raw`），供检查视图使用
    pub collect_diagnostics: bool,
}

impl Default for ExtractOptions {
    fn default() -> Self {
        Self {
            collect_diagnostics: true,
        }
    }
}

/// 一次抽取的结果
#[derive(Debug, Clone)]
pub struct Extraction {
    pub questions: Vec<Question>,
    pub diagnostics: Diagnostics,
    /// 与 `questions` 一一对应的题型判定依据
    pub classifications: Vec<Classification>,
}

impl Extraction {
    /// 截断位置（若文档在中途停止）
    pub fn truncated_at(&self) -> Option<usize> {
        self.diagnostics.truncation.map(|t| t.offset)
    }
}

/// 抽取整篇文档
///
/// # 参数
/// - `html`: 中间 HTML 全文
/// - `options`: 抽取选项
///
/// # 返回
/// 尽力而为的结果：解析层的异常只记录在诊断中；
/// 只有 HTML 序列化这类底层失败才返回错误
pub fn extract_document(html: &str, options: ExtractOptions) -> AppResult<Extraction> {
    let body = body_html(html);
    let mut diagnostics = Diagnostics::new(body.len());
    let mut questions = Vec::new();
    let mut classifications = Vec::new();

    // 创建流程对象（只创建一次，复用）
    let flow = QuestionFlow::new();
    let segmenter = Segmenter::new(body);
    let mut segments = segmenter.segments();

    for (position, fragment) in segments.by_ref().enumerate() {
        let ctx = QuestionCtx::new(position + 1, &fragment, options.collect_diagnostics);
        debug!("处理片段 {}", ctx);

        let outcome = flow.run(&fragment, &ctx)?;
        logging::log_question(
            outcome.question.index,
            outcome.question.kind.tag(),
            outcome.question.answers.len(),
            &outcome.question.statement.text,
        );

        diagnostics.items.push(outcome.diagnostic);
        classifications.push(outcome.classification);
        questions.push(outcome.question);
    }

    if let Some(SegmentStop::Truncated { offset }) = segments.stop() {
        logging::log_truncation(offset, questions.len());
        diagnostics.truncation = Some(Truncation { offset });
    }

    diagnostics.found_questions = questions.len();
    info!("✓ 抽取完成: {} 题", questions.len());

    Ok(Extraction {
        questions,
        diagnostics,
        classifications,
    })
}
