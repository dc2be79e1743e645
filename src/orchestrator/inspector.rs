//! 检查视图 - 编排层
//!
//! 只读视图：复用同一次抽取的输出（需开启诊断收集），
//! 补充人工排查时需要的区域切片、字母列表块和题型判定依据。

use serde::Serialize;

use crate::models::diagnostics::{SegmentOffsets, Truncation};
use crate::models::question::{AnswerItem, QuestionType};
use crate::orchestrator::document_processor::Extraction;
use crate::services::patterns::{ALPHA_LIST_OPEN, POINTS_PARAGRAPH};
use crate::utils::text::html_to_text;

/// 答案区中的一个字母列表块（从一个字母列表开标签到下一个之前）
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AnswerBlock {
    pub label: String,
    pub html: String,
    pub text: String,
}

/// 单题检查记录
#[derive(Debug, Clone, Serialize)]
pub struct InspectedQuestion {
    pub index: usize,
    #[serde(rename = "type")]
    pub kind: QuestionType,
    pub type_label: &'static str,
    pub reasons: Vec<String>,
    pub full_source_html: String,
    /// 切分得到的题干区（未去包装）
    pub question_html: String,
    pub answers_html: String,
    pub points_html: String,
    pub answer_items: Vec<AnswerItem>,
    pub answers_count: usize,
    pub answer_blocks: Vec<AnswerBlock>,
    pub source_offsets: SegmentOffsets,
}

/// inspection.json 的内容
#[derive(Debug, Clone, Serialize)]
pub struct InspectionReport {
    pub body_length: usize,
    pub rows: Vec<InspectedQuestion>,
    pub truncation: Option<Truncation>,
}

impl InspectionReport {
    /// 从抽取结果构建；没有保留原始片段的题目只给出判定与选项
    pub fn from_extraction(extraction: &Extraction) -> Self {
        let rows = extraction
            .questions
            .iter()
            .zip(&extraction.diagnostics.items)
            .zip(&extraction.classifications)
            .map(|((question, diagnostic), classification)| {
                let full = question
                    .raw
                    .as_ref()
                    .map(|r| r.full_source_html.as_str())
                    .unwrap_or_default();
                let offsets = diagnostic.offsets;
                let statement_end = offsets
                    .first_alpha_rel
                    .unwrap_or(offsets.points_rel)
                    .min(full.len());

                InspectedQuestion {
                    index: question.index,
                    kind: question.kind,
                    type_label: question.kind.label(),
                    reasons: classification.reasons.clone(),
                    full_source_html: full.to_string(),
                    question_html: full[..statement_end].to_string(),
                    answers_html: question
                        .raw
                        .as_ref()
                        .map(|r| r.answers_html.clone())
                        .unwrap_or_default(),
                    points_html: POINTS_PARAGRAPH
                        .find(full)
                        .map(|m| m.as_str().to_string())
                        .unwrap_or_default(),
                    answer_items: question.answers.clone(),
                    answers_count: question.answers.len(),
                    answer_blocks: question
                        .raw
                        .as_ref()
                        .map(|r| answer_blocks(&r.answers_html))
                        .unwrap_or_default(),
                    source_offsets: offsets,
                }
            })
            .collect();

        Self {
            body_length: extraction.diagnostics.body_length,
            rows,
            truncation: extraction.diagnostics.truncation,
        }
    }
}

/// 按字母列表开标签切块，依次标为 A、B、C…
pub fn answer_blocks(answers_html: &str) -> Vec<AnswerBlock> {
    let starts: Vec<usize> = ALPHA_LIST_OPEN
        .find_iter(answers_html)
        .map(|m| m.start())
        .collect();

    starts
        .iter()
        .enumerate()
        .map(|(i, &start)| {
            let end = starts.get(i + 1).copied().unwrap_or(answers_html.len());
            let chunk = &answers_html[start..end];
            AnswerBlock {
                label: block_label(i),
                html: chunk.to_string(),
                text: html_to_text(chunk),
            }
        })
        .collect()
}

/// 0 → "A"，25 → "Z"，26 → "AA"
fn block_label(i: usize) -> String {
    let mut n = i + 1;
    let mut label = Vec::new();
    while n > 0 {
        let rem = (n - 1) % 26;
        label.push((b'A' + rem as u8) as char);
        n = (n - 1) / 26;
    }
    label.iter().rev().collect()
}
