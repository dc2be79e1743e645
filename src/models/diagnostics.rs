use serde::{Deserialize, Serialize};

/// 片段在 `<body>` 内的位置（字节偏移）
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SegmentOffsets {
    /// 片段起点（题号列表开标签）
    pub start: usize,
    /// 片段终点（分值段落结束，不含）
    pub end: usize,
    /// 分值段落在片段内的起点
    pub points_rel: usize,
    /// 第一个字母列表在片段内的起点（若在分值段落之前）
    pub first_alpha_rel: Option<usize>,
}

/// 单题诊断
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QuestionDiagnostic {
    pub index: usize,
    pub fragment_length: usize,
    pub statement_zone_length: usize,
    pub answers_zone_length: usize,
    pub answer_count: usize,
    /// 修复后仍然为空的选项数
    pub empty_answer_count: usize,
    pub offsets: SegmentOffsets,
}

/// 截断：找到题目开头但之后没有分值段落
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Truncation {
    /// 未闭合题目的起点（body 内偏移）
    pub offset: usize,
}

/// extraction_debug.json 的内容
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Diagnostics {
    pub phase: String,
    pub found_questions: usize,
    pub body_length: usize,
    pub items: Vec<QuestionDiagnostic>,
    pub truncation: Option<Truncation>,
}

impl Diagnostics {
    pub fn new(body_length: usize) -> Self {
        Self {
            phase: "flattened top-level <li>".to_string(),
            found_questions: 0,
            body_length,
            items: Vec::new(),
            truncation: None,
        }
    }
}
