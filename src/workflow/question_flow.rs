//! 题目处理流程 - 流程层
//!
//! 核心职责：定义"一个片段 → 一道题"的完整处理流程
//!
//! 流程顺序：
//! 1. 切分题干区 / 答案区
//! 2. 题干：提取图片，再删掉图片与空段落
//! 3. 答案区：扁平化为顶层选项
//! 4. 判定题型

use tracing::{debug, warn};

use crate::error::AppResult;
use crate::models::diagnostics::QuestionDiagnostic;
use crate::models::question::{AnswerItem, Question, RawSource, Statement};
use crate::services::answer_flattener::AnswerFlattener;
use crate::services::segmenter::Fragment;
use crate::services::type_classifier::{classify_with_reasons, Classification};
use crate::services::zone_splitter::{split_zones, Zones};
use crate::utils::text;
use crate::workflow::question_ctx::QuestionCtx;

/// 单个片段的处理结果
#[derive(Debug, Clone)]
pub struct QuestionOutcome {
    pub question: Question,
    pub diagnostic: QuestionDiagnostic,
    /// 题型判定依据（检查视图用）
    pub classification: Classification,
}

/// 题目处理流程
///
/// - 编排单个片段的处理顺序
/// - 不持有文档，不关心题号如何分配
/// - 只依赖业务能力（services）
#[derive(Debug, Clone, Default)]
pub struct QuestionFlow {
    flattener: AnswerFlattener,
}

impl QuestionFlow {
    pub fn new() -> Self {
        Self {
            flattener: AnswerFlattener::new(),
        }
    }

    pub fn run(&self, fragment: &Fragment<'_>, ctx: &QuestionCtx) -> AppResult<QuestionOutcome> {
        let zones = split_zones(fragment.html);
        if !zones.has_answers_zone() {
            debug!("{} 没有答案区", ctx);
        }

        let answers = self.flattener.flatten(&zones.answers)?;
        let statement = build_statement(&zones, &answers_images(&answers), ctx);

        let empty_answer_count = answers.iter().filter(|a| a.is_empty()).count();
        if empty_answer_count > 0 {
            warn!("{} 有 {} 个空选项（无文字也无图片）", ctx, empty_answer_count);
        }

        let classification = classify_with_reasons(&statement.text, &answers);

        let diagnostic = QuestionDiagnostic {
            index: ctx.question_index,
            fragment_length: fragment.html.len(),
            statement_zone_length: zones.statement.len(),
            answers_zone_length: zones.answers.len(),
            answer_count: answers.len(),
            empty_answer_count,
            offsets: ctx.offsets(zones.points_rel, zones.first_alpha_rel),
        };

        let raw = ctx.collect_diagnostics.then(|| RawSource {
            full_source_html: fragment.html.to_string(),
            answers_html: zones.answers.clone(),
        });

        let question = Question {
            index: ctx.question_index,
            kind: classification.kind,
            statement,
            answers,
            raw,
        };

        Ok(QuestionOutcome {
            question,
            diagnostic,
            classification,
        })
    }
}

fn answers_images(answers: &[AnswerItem]) -> Vec<&str> {
    answers
        .iter()
        .flat_map(|a| a.images.iter().map(String::as_str))
        .collect()
}

/// 图片只归属一个区域：已出现在选项里的图片不再计入题干
fn build_statement(zones: &Zones, answer_images: &[&str], ctx: &QuestionCtx) -> Statement {
    let images: Vec<String> = text::image_sources(&zones.statement)
        .into_iter()
        .filter(|src| {
            let shared = answer_images.contains(&src.as_str());
            if shared {
                debug!("{} 图片 {} 同时出现在选项中，归入选项", ctx, src);
            }
            !shared
        })
        .collect();

    let html = text::remove_images(&zones.statement);
    let text = text::html_to_text(&html);

    Statement { html, text, images }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::question::QuestionType;
    use crate::services::segmenter::Segmenter;

    fn run_single(body: &str, collect: bool) -> QuestionOutcome {
        let fragment = Segmenter::new(body).segments().next().unwrap();
        let ctx = QuestionCtx::new(1, &fragment, collect);
        QuestionFlow::new().run(&fragment, &ctx).unwrap()
    }

    #[test]
    fn test_basic_question() {
        let body = r#"<ol type="1"><li><p>Q?</p><ol type="a"><li>A</li><li>B</li></ol><p>(1 point)</p></li></ol>"#;
        let outcome = run_single(body, false);
        let q = &outcome.question;
        assert_eq!(q.index, 1);
        assert_eq!(q.kind, QuestionType::T1);
        assert_eq!(q.statement.html, "<p>Q?</p>");
        assert_eq!(q.statement.text, "Q?");
        let texts: Vec<&str> = q.answers.iter().map(|a| a.text.as_str()).collect();
        assert_eq!(texts, vec!["A", "B"]);
        assert!(q.raw.is_none());

        assert_eq!(outcome.diagnostic.answer_count, 2);
        assert_eq!(outcome.diagnostic.offsets.start, 0);
        assert_eq!(outcome.diagnostic.fragment_length, body.len() - "</li></ol>".len());
    }

    #[test]
    fn test_statement_images_are_extracted_and_stripped() {
        let body = r#"<ol type="1"><li><p>Voir la figure</p><p><img src="word/media/image1.png"></p><ol type="a"><li>A</li></ol><p>(1 point)</p>"#;
        let outcome = run_single(body, true);
        let statement = &outcome.question.statement;
        assert_eq!(statement.images, vec!["word/media/image1.png"]);
        assert_eq!(statement.html, "<p>Voir la figure</p>");
        assert!(!statement.html.contains("<img"));

        let raw = outcome.question.raw.as_ref().unwrap();
        assert!(raw.full_source_html.starts_with(r#"<ol type="1">"#));
        assert!(raw.answers_html.starts_with(r#"<ol type="a">"#));
    }

    #[test]
    fn test_unquoted_statement_image_is_kept() {
        let body = r#"<ol type="1"><li><p>Voir</p><p><img src=m/fig.png></p><ol type="a"><li>A</li></ol><p>(1 point)</p>"#;
        let outcome = run_single(body, false);
        let statement = &outcome.question.statement;
        assert_eq!(statement.html, "<p>Voir</p>");
        assert_eq!(statement.images, vec!["m/fig.png"]);
    }

    #[test]
    fn test_shared_image_belongs_to_answer_only() {
        let body = r#"<ol type="1"><li><p>Q</p><p><img src="m/a.png"></p><ol type="a"><li><img src="m/a.png"></li><li>B</li></ol><p>(1 point)</p>"#;
        let outcome = run_single(body, false);
        let q = &outcome.question;
        assert!(q.statement.images.is_empty());
        assert_eq!(q.answers[0].images, vec!["m/a.png"]);
        assert!(q.answers[1].images.is_empty());
        assert!(!q.statement.html.contains("<img"));
    }

    #[test]
    fn test_missing_answers_zone_is_t3() {
        let body = r#"<ol type="1"><li><p>Expliquez.</p><p>(2 points)</p></li></ol>"#;
        let outcome = run_single(body, false);
        assert_eq!(outcome.question.kind, QuestionType::T3);
        assert!(outcome.question.answers.is_empty());
        assert_eq!(outcome.diagnostic.answers_zone_length, 0);
        assert_eq!(outcome.diagnostic.offsets.first_alpha_rel, None);
    }

    #[test]
    fn test_unrepairable_empty_answer_is_kept() {
        let body = r#"<ol type="1"><li><p>Q</p><ol type="a"><li>A</li><li></li></ol><p>texte</p><p>(1 point)</p>"#;
        let outcome = run_single(body, false);
        assert_eq!(outcome.question.answers.len(), 2);
        assert!(outcome.question.answers[1].is_empty());
        assert_eq!(outcome.diagnostic.empty_answer_count, 1);
    }
}
