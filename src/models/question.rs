use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// 题型
///
/// 由分类器推导，不由作者填写
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum QuestionType {
    /// 单选
    T1,
    /// 多选
    T2,
    /// 自由作答（无选项）
    T3,
    /// 判断（Vrai / Faux）
    T4,
}

impl QuestionType {
    pub const ALL: [QuestionType; 4] = [
        QuestionType::T1,
        QuestionType::T2,
        QuestionType::T3,
        QuestionType::T4,
    ];

    /// 标签，如 "T1"
    pub fn tag(self) -> &'static str {
        match self {
            QuestionType::T1 => "T1",
            QuestionType::T2 => "T2",
            QuestionType::T3 => "T3",
            QuestionType::T4 => "T4",
        }
    }

    /// 显示名称
    pub fn label(self) -> &'static str {
        match self {
            QuestionType::T1 => "Choix unique",
            QuestionType::T2 => "Choix multiple",
            QuestionType::T3 => "Réponse libre",
            QuestionType::T4 => "Vrai / Faux",
        }
    }

    /// 说明文字
    pub fn description(self) -> &'static str {
        match self {
            QuestionType::T1 => "Question à choix simple avec une seule réponse correcte.",
            QuestionType::T2 => "Question permettant plusieurs réponses.",
            QuestionType::T3 => "Question sans propositions (réponse à rédiger).",
            QuestionType::T4 => "Question binaire avec deux propositions.",
        }
    }

    /// 宽松解析：去掉非字母数字字符并转大写，"Q1" 与空串都视为 T1
    pub fn parse_lenient(name: &str) -> Option<Self> {
        let sanitized: String = name
            .chars()
            .filter(|c| c.is_ascii_alphanumeric() || *c == '_' || *c == '-')
            .collect::<String>()
            .to_ascii_uppercase();
        match sanitized.as_str() {
            "" | "Q1" | "T1" => Some(QuestionType::T1),
            "T2" => Some(QuestionType::T2),
            "T3" => Some(QuestionType::T3),
            "T4" => Some(QuestionType::T4),
            _ => None,
        }
    }
}

impl fmt::Display for QuestionType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.tag())
    }
}

impl FromStr for QuestionType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse_lenient(s).ok_or_else(|| s.to_string())
    }
}

/// 题干
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Statement {
    /// 去掉图片后的标记
    pub html: String,
    /// 去标签、规范化后的文本
    pub text: String,
    /// 按出现顺序的图片地址
    pub images: Vec<String>,
}

/// 单个选项（扁平化后的一个顶层 `<li>`）
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnswerItem {
    pub html: String,
    pub text: String,
    pub images: Vec<String>,
}

impl AnswerItem {
    /// 既无文字也无图片
    pub fn is_empty(&self) -> bool {
        self.text.is_empty() && self.images.is_empty()
    }
}

/// 原始片段，仅用于排查问题
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RawSource {
    pub full_source_html: String,
    pub answers_html: String,
}

/// 一道选择题
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Question {
    /// 文档顺序中的位置，从 1 开始
    pub index: usize,
    #[serde(rename = "type")]
    pub kind: QuestionType,
    pub statement: Statement,
    /// 顺序有意义：导出格式约定第一项为正确答案
    pub answers: Vec<AnswerItem>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub raw: Option<RawSource>,
}

/// extraction.json 的内容
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExtractionArtifact {
    pub questions: Vec<Question>,
    pub created_at: String,
}

impl ExtractionArtifact {
    pub fn new(questions: Vec<Question>) -> Self {
        Self {
            questions,
            created_at: chrono::Local::now().to_rfc3339(),
        }
    }
}
