//! 打印页导出
//!
//! 渲染块 → 完整 HTML 页面（页眉 + 题目 + 内嵌打印样式）

use crate::models::group::Block;
use crate::models::question::Question;
use crate::render::templates::TemplateSet;

const PRINT_CSS: &str = include_str!("../../assets/print.css");

const INSTRUCTIONS: &str = "Une seule réponse possible par question.<br>Veuillez ne rien écrire sur ce questionnaire et vérifier de remplir la grille à part sans vous tromper dans le numéro de la question.";

/// 页眉信息
#[derive(Debug, Clone)]
pub struct ExportMeta {
    pub title: String,
    /// 问卷字母（A、B…），可以为空
    pub letter: String,
}

impl Default for ExportMeta {
    fn default() -> Self {
        Self {
            title: "QCM".to_string(),
            letter: String::new(),
        }
    }
}

/// 导出器
#[derive(Debug, Clone, Default)]
pub struct Exporter {
    templates: TemplateSet,
}

impl Exporter {
    pub fn new(templates: TemplateSet) -> Self {
        Self { templates }
    }

    fn article(&self, question: &Question) -> String {
        format!(
            r#"<article data-q="{}">{}</article>"#,
            question.index,
            self.templates.render_question(question)
        )
    }

    /// 渲染所有块，单题为 `<article>`，分组为 `<section>`
    pub fn render_questions(&self, blocks: &[Block<'_>]) -> String {
        let rendered: Vec<String> = blocks
            .iter()
            .map(|block| match block {
                Block::Single { question } => self.article(question),
                Block::Group { questions, layout } => {
                    let inner: String = questions.iter().map(|q| self.article(q)).collect();
                    format!(
                        r#"<section class="group layout-{}"><div class="gqs">{}</div></section>"#,
                        layout.as_str(),
                        inner
                    )
                }
            })
            .collect();

        format!(r#"<div class="qwrap">{}</div>"#, rendered.join("\n"))
    }

    pub fn build_header(meta: &ExportMeta) -> String {
        format!(
            r#"<div class="qcm-header"><h1>{}</h1><div class="qcm-letter">Questionnaire <span>{}</span></div><p class="note">{}</p></div>"#,
            html_escape::encode_text(&meta.title),
            html_escape::encode_text(&meta.letter),
            INSTRUCTIONS
        )
    }

    /// 完整页面
    pub fn export_page(&self, blocks: &[Block<'_>], meta: &ExportMeta) -> String {
        format!(
            r#"<!doctype html><html lang="fr"><head><meta charset="utf-8"><title>{}</title><style>{}</style></head><body>{}{}</body></html>"#,
            html_escape::encode_text(&meta.title),
            PRINT_CSS,
            Self::build_header(meta),
            self.render_questions(blocks)
        )
    }
}
