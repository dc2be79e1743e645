//! 题型判定服务 - 业务能力层
//!
//! 纯函数：只看题干文本和扁平化后的选项，可以脱离原始文档重新判定

use regex::Regex;
use serde::Serialize;
use std::sync::LazyLock;

use crate::models::question::{AnswerItem, QuestionType};

static TRUE_TOKEN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\b(?:vrai|true)\b").expect("true token regex"));

static FALSE_TOKEN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\b(?:faux|false)\b").expect("false token regex"));

/// 多选提示语
static MULTI_SELECT_CUE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"\b(?:plusieurs|cocher|cochez|s[ée]lectionnez plusieurs|choisir deux|deux r[ée]ponses|au moins deux|(?:choisissez|s[ée]lectionnez)\s+\d+)\b",
    )
    .expect("multi select cue regex")
});

pub const REASON_NO_ANSWER: &str = "0 réponse → T3";
pub const REASON_TRUE_FALSE: &str = "Vrai/Faux → T4";
pub const REASON_MULTI_CUE: &str = "Indice multi-sélection dans l'énoncé";
pub const REASON_DEFAULT: &str = "Par défaut → T1";

/// 判定结果及命中的规则
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Classification {
    #[serde(rename = "type")]
    pub kind: QuestionType,
    pub reasons: Vec<String>,
}

/// 判定题型
pub fn classify(statement_text: &str, answers: &[AnswerItem]) -> QuestionType {
    classify_with_reasons(statement_text, answers).kind
}

/// 判定题型，并记录命中的规则（供检查视图使用）
///
/// 规则按顺序求值，第一个命中即返回：
/// 1. 没有选项 → T3
/// 2. 恰好两个选项且合起来同时含"真"和"假"的整词 → T4
/// 3. 题干含多选提示语 → T2
/// 4. 其余 → T1
pub fn classify_with_reasons(statement_text: &str, answers: &[AnswerItem]) -> Classification {
    let decided = |kind: QuestionType, reason: &str| Classification {
        kind,
        reasons: vec![reason.to_string()],
    };

    if answers.is_empty() {
        return decided(QuestionType::T3, REASON_NO_ANSWER);
    }

    if answers.len() == 2 {
        let joined = answers
            .iter()
            .map(|a| a.text.to_lowercase())
            .collect::<Vec<_>>()
            .join(" ");
        if TRUE_TOKEN.is_match(&joined) && FALSE_TOKEN.is_match(&joined) {
            return decided(QuestionType::T4, REASON_TRUE_FALSE);
        }
    }

    if MULTI_SELECT_CUE.is_match(&statement_text.to_lowercase()) {
        return decided(QuestionType::T2, REASON_MULTI_CUE);
    }

    decided(QuestionType::T1, REASON_DEFAULT)
}
