//! 题目处理上下文
//!
//! 封装"我正在处理文档中的第几题、它在哪里"这一信息

use std::fmt::Display;

use crate::models::diagnostics::SegmentOffsets;
use crate::services::segmenter::Fragment;

/// 题目处理上下文
#[derive(Debug, Clone, Copy)]
pub struct QuestionCtx {
    /// 题号（从1开始，按文档顺序）
    pub question_index: usize,

    /// 片段在 body 中的起点
    pub start: usize,

    /// 片段在 body 中的终点（不含）
    pub end: usize,

    /// 是否保留原始片段与详细诊断
    pub collect_diagnostics: bool,
}

impl QuestionCtx {
    pub fn new(question_index: usize, fragment: &Fragment<'_>, collect_diagnostics: bool) -> Self {
        Self {
            question_index,
            start: fragment.start,
            end: fragment.end,
            collect_diagnostics,
        }
    }

    /// 结合切分结果得到完整偏移
    pub fn offsets(&self, points_rel: usize, first_alpha_rel: Option<usize>) -> SegmentOffsets {
        SegmentOffsets {
            start: self.start,
            end: self.end,
            points_rel,
            first_alpha_rel,
        }
    }
}

impl Display for QuestionCtx {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "[题目#{} 偏移 {}..{}]",
            self.question_index, self.start, self.end
        )
    }
}
