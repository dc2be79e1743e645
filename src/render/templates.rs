//! 题型模板
//!
//! 题型 → 模板源码的映射；每个题型都有内置默认模板，
//! 模板目录下的 `<TYPE>.html` 可以覆盖它。

use regex::{Captures, Regex};
use serde::Serialize;
use std::collections::HashMap;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use std::sync::LazyLock;
use tracing::{debug, info};

use crate::error::{AppError, AppResult};
use crate::models::question::{Question, QuestionType};
use crate::services::artifact_writer::ArtifactWriter;

const BASE_TEMPLATE: &str = r#"<div class="qblock" data-template="{{ template_name }}" data-type="{{ question_type }}">
  <div class="qtext"><span class="qnum">{{ question_index }}. </span>{{ statement_html }}</div>
  {{ images }}
  {{ answers_list }}
</div>"#;

const FREE_RESPONSE_TEMPLATE: &str = r#"<div class="qblock" data-template="{{ template_name }}" data-type="{{ question_type }}">
  <div class="qtext"><span class="qnum">{{ question_index }}. </span>{{ statement_html }}</div>
  {{ images }}
</div>"#;

static PLACEHOLDER: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\{\{ ([a-z_]+) \}\}").expect("placeholder regex"));

static LEADING_LI: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^<li\b").expect("leading li regex"));

/// 内置默认模板
pub fn default_template(kind: QuestionType) -> &'static str {
    match kind {
        QuestionType::T3 => FREE_RESPONSE_TEMPLATE,
        QuestionType::T1 | QuestionType::T2 | QuestionType::T4 => BASE_TEMPLATE,
    }
}

/// 可编辑模板的题型
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TypeInfo {
    pub tag: &'static str,
    pub label: &'static str,
    pub description: &'static str,
}

pub fn available_types() -> Vec<TypeInfo> {
    QuestionType::ALL
        .into_iter()
        .map(|kind| TypeInfo {
            tag: kind.tag(),
            label: kind.label(),
            description: kind.description(),
        })
        .collect()
}

/// 占位符说明
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PlaceholderDoc {
    pub tag: &'static str,
    pub description: &'static str,
    /// 仅对这些题型有意义；None 表示所有题型
    #[serde(skip_serializing_if = "Option::is_none")]
    pub types: Option<&'static [QuestionType]>,
}

const WITH_ANSWERS: &[QuestionType] = &[QuestionType::T1, QuestionType::T2, QuestionType::T4];

const PLACEHOLDERS: &[PlaceholderDoc] = &[
    PlaceholderDoc {
        tag: "{{ template_name }}",
        description: "Nom du template utilisé (utile pour du debug).",
        types: None,
    },
    PlaceholderDoc {
        tag: "{{ question_type }}",
        description: "Type détecté (T1, T2, T3, T4…).",
        types: None,
    },
    PlaceholderDoc {
        tag: "{{ question_index }}",
        description: "Numéro de la question.",
        types: None,
    },
    PlaceholderDoc {
        tag: "{{ statement_html }}",
        description: "Énoncé complet au format HTML.",
        types: None,
    },
    PlaceholderDoc {
        tag: "{{ statement_text }}",
        description: "Version texte de l'énoncé (sans balises).",
        types: None,
    },
    PlaceholderDoc {
        tag: "{{ images }}",
        description: "Bloc <div> contenant toutes les images (vide si aucune).",
        types: None,
    },
    PlaceholderDoc {
        tag: "{{ answers_list }}",
        description: "Liste <ol> déjà prête avec les propositions.",
        types: Some(WITH_ANSWERS),
    },
    PlaceholderDoc {
        tag: "{{ answers_items }}",
        description: "Propositions seules (suite de <li>).",
        types: Some(WITH_ANSWERS),
    },
    PlaceholderDoc {
        tag: "{{ answers_count }}",
        description: "Nombre de propositions détectées.",
        types: None,
    },
    PlaceholderDoc {
        tag: "{{ answers_letters }}",
        description: "Liste des lettres associées aux réponses (A, B, C…).",
        types: Some(WITH_ANSWERS),
    },
];

/// 占位符说明，可按题型过滤
pub fn placeholder_docs(kind: Option<QuestionType>) -> Vec<PlaceholderDoc> {
    PLACEHOLDERS
        .iter()
        .filter(|doc| match (kind, doc.types) {
            (Some(kind), Some(types)) => types.contains(&kind),
            _ => true,
        })
        .cloned()
        .collect()
}

/// 模板目录
#[derive(Debug, Clone)]
pub struct TemplateStore {
    dir: PathBuf,
}

impl TemplateStore {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    fn path_of(&self, kind: QuestionType) -> PathBuf {
        self.dir.join(format!("{}.html", kind.tag()))
    }

    /// 读取某题型的模板；没有覆盖文件时使用默认模板
    pub async fn load(&self, kind: QuestionType) -> AppResult<String> {
        let path = self.path_of(kind);
        match tokio::fs::read_to_string(&path).await {
            Ok(content) => {
                debug!("使用覆盖模板: {}", path.display());
                Ok(content)
            }
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(default_template(kind).to_string()),
            Err(e) => Err(AppError::read_failed(path, e)),
        }
    }

    /// 一次性读取全部题型的模板
    pub async fn load_all(&self) -> AppResult<TemplateSet> {
        let mut templates = HashMap::new();
        for kind in QuestionType::ALL {
            templates.insert(kind, self.load(kind).await?);
        }
        Ok(TemplateSet { templates })
    }

    /// 写入覆盖模板；名称按宽松规则解析，未知题型报错
    pub async fn save(&self, name: &str, content: &str) -> AppResult<PathBuf> {
        let kind = QuestionType::parse_lenient(name)
            .ok_or_else(|| AppError::UnknownTemplateType(name.to_string()))?;

        let relative = format!("{}.html", kind.tag());
        let path = ArtifactWriter::new(&self.dir)
            .write_text(&relative, content)
            .await?;
        info!("✓ 模板 {} 已保存: {}", kind, path.display());
        Ok(path)
    }
}

/// 已加载的模板集合，渲染时不再访问磁盘
#[derive(Debug, Clone)]
pub struct TemplateSet {
    templates: HashMap<QuestionType, String>,
}

impl Default for TemplateSet {
    fn default() -> Self {
        let templates = QuestionType::ALL
            .into_iter()
            .map(|kind| (kind, default_template(kind).to_string()))
            .collect();
        Self { templates }
    }
}

impl TemplateSet {
    pub fn get(&self, kind: QuestionType) -> &str {
        self.templates
            .get(&kind)
            .map(String::as_str)
            .unwrap_or_else(|| default_template(kind))
    }

    /// 渲染单道题
    pub fn render_question(&self, question: &Question) -> String {
        let answers_items: String = question
            .answers
            .iter()
            .map(|a| LEADING_LI.replace(&a.html, r#"<li class="ans""#).into_owned())
            .collect();
        let answers_list = if answers_items.is_empty() {
            String::new()
        } else {
            format!(r#"<ol class="answers" type="a">{}</ol>"#, answers_items)
        };
        let letters: Vec<String> = (0..question.answers.len())
            .map(|i| ((b'A' + (i % 26) as u8) as char).to_string())
            .collect();

        let mut values: HashMap<&str, String> = HashMap::new();
        values.insert("template_name", escape(question.kind.tag()));
        values.insert("question_type", escape(question.kind.tag()));
        values.insert("question_index", escape(&question.index.to_string()));
        values.insert("statement_html", question.statement.html.clone());
        values.insert("statement_text", escape(&question.statement.text));
        values.insert("images", images_html(&question.statement.images));
        values.insert("answers_list", answers_list);
        values.insert("answers_items", answers_items);
        values.insert("answers_count", question.answers.len().to_string());
        values.insert("answers_letters", letters.join(", "));

        substitute(self.get(question.kind), &values)
    }
}

/// 同时替换所有已知占位符；替换结果不会再被展开，未知占位符原样保留
fn substitute(template: &str, values: &HashMap<&str, String>) -> String {
    PLACEHOLDER
        .replace_all(template, |caps: &Captures| match values.get(&caps[1]) {
            Some(value) => value.clone(),
            None => caps[0].to_string(),
        })
        .into_owned()
}

fn escape(value: &str) -> String {
    html_escape::encode_quoted_attribute(value).into_owned()
}

/// 题干图片块；没有图片时为空
pub fn images_html(sources: &[String]) -> String {
    if sources.is_empty() {
        return String::new();
    }
    let tags: String = sources
        .iter()
        .map(|src| {
            format!(
                r#"<img src="{}" alt="img" class="qimg">"#,
                html_escape::encode_double_quoted_attribute(src)
            )
        })
        .collect();
    format!(r#"<div class="qimgs">{}</div>"#, tags)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::question::{AnswerItem, Statement};

    fn question(kind: QuestionType, answers: &[&str]) -> Question {
        Question {
            index: 7,
            kind,
            statement: Statement {
                html: "<p>Quel <b>choix</b> ?</p>".to_string(),
                text: "Quel choix ? <{{ images }}>".to_string(),
                images: vec!["word/media/a b.png".to_string()],
            },
            answers: answers
                .iter()
                .map(|t| AnswerItem {
                    html: format!("<li>{}</li>", t),
                    text: t.to_string(),
                    images: Vec::new(),
                })
                .collect(),
            raw: None,
        }
    }

    #[test]
    fn test_default_templates() {
        assert!(!default_template(QuestionType::T3).contains("answers_list"));
        for kind in [QuestionType::T1, QuestionType::T2, QuestionType::T4] {
            assert_eq!(default_template(kind), BASE_TEMPLATE);
        }
    }

    #[test]
    fn test_render_base_template() {
        let html = TemplateSet::default().render_question(&question(QuestionType::T1, &["A", "B"]));
        assert!(html.contains(r#"data-type="T1""#));
        assert!(html.contains(r#"<span class="qnum">7. </span><p>Quel <b>choix</b> ?</p>"#));
        assert!(html.contains(r#"<ol class="answers" type="a"><li class="ans">A</li><li class="ans">B</li></ol>"#));
        assert!(html.contains(r#"<div class="qimgs"><img src="word/media/a b.png" alt="img" class="qimg"></div>"#));
    }

    #[test]
    fn test_substitution_is_not_recursive() {
        let mut set = TemplateSet::default();
        set.templates.insert(
            QuestionType::T2,
            "{{ statement_text }}|{{ answers_count }}|{{ answers_letters }}|{{ unknown }}".to_string(),
        );
        let html = set.render_question(&question(QuestionType::T2, &["A", "B", "C"]));
        assert_eq!(html, "Quel choix ? &lt;{{ images }}&gt;|3|A, B, C|{{ unknown }}");
    }

    #[test]
    fn test_free_response_has_no_list() {
        let html = TemplateSet::default().render_question(&question(QuestionType::T3, &[]));
        assert!(!html.contains("<ol"));
        assert!(!html.contains("{{"));
    }

    #[test]
    fn test_available_types() {
        let types = available_types();
        let tags: Vec<&str> = types.iter().map(|t| t.tag).collect();
        assert_eq!(tags, vec!["T1", "T2", "T3", "T4"]);
        assert_eq!(types[3].label, "Vrai / Faux");
    }

    #[test]
    fn test_placeholder_docs_filter() {
        assert_eq!(placeholder_docs(None).len(), 10);
        let free: Vec<&str> = placeholder_docs(Some(QuestionType::T3))
            .iter()
            .map(|d| d.tag)
            .collect();
        assert_eq!(free.len(), 7);
        assert!(!free.contains(&"{{ answers_list }}"));
        assert_eq!(placeholder_docs(Some(QuestionType::T4)).len(), 10);
    }

    #[tokio::test]
    async fn test_store_override_and_save() {
        let dir = tempfile::tempdir().unwrap();
        let store = TemplateStore::new(dir.path().join("tpl"));

        assert_eq!(store.load(QuestionType::T2).await.unwrap(), BASE_TEMPLATE);

        let path = store.save("t2", "<p>{{ question_index }}</p>").await.unwrap();
        assert_eq!(path, dir.path().join("tpl").join("T2.html"));
        assert_eq!(store.load(QuestionType::T2).await.unwrap(), "<p>{{ question_index }}</p>");

        let set = store.load_all().await.unwrap();
        assert_eq!(set.get(QuestionType::T2), "<p>{{ question_index }}</p>");
        assert_eq!(set.get(QuestionType::T1), BASE_TEMPLATE);

        let err = store.save("T9", "x").await.unwrap_err();
        assert!(matches!(err, AppError::UnknownTemplateType(name) if name == "T9"));
    }
}
