//! 题干 / 答案区切分 - 业务能力层
//!
//! 以第一个字母列表为界：之前是题干，之后到分值段落是答案区

use crate::services::patterns::{
    ALPHA_LIST_OPEN, LEADING_LIST_CLOSERS, LEADING_LIST_WRAPPER, POINTS_PARAGRAPH,
};

/// 切分结果
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Zones {
    /// 题干区（已去掉开头的 `<ol><li>` 包装）
    pub statement: String,
    /// 答案区（可能为空）
    pub answers: String,
    /// 分值段落在片段内的起点；没有分值段落时为片段长度
    pub points_rel: usize,
    /// 作为边界的字母列表在片段内的起点
    pub first_alpha_rel: Option<usize>,
}

impl Zones {
    pub fn has_answers_zone(&self) -> bool {
        self.first_alpha_rel.is_some()
    }
}

/// 把一个片段切成 (题干区, 答案区)
///
/// 字母列表只出现在分值段落之后（格式错误）或根本不存在时，答案区为空。
pub fn split_zones(fragment: &str) -> Zones {
    let points_rel = POINTS_PARAGRAPH
        .find(fragment)
        .map(|m| m.start())
        .unwrap_or(fragment.len());

    let first_alpha_rel = ALPHA_LIST_OPEN
        .find(fragment)
        .map(|m| m.start())
        .filter(|&start| start < points_rel);

    let (statement, answers) = match first_alpha_rel {
        Some(alpha) => (&fragment[..alpha], &fragment[alpha..points_rel]),
        None => (&fragment[..points_rel], ""),
    };

    let statement = LEADING_LIST_WRAPPER.replace(statement, "");
    let answers = LEADING_LIST_CLOSERS.replace(answers, "");

    Zones {
        statement: statement.trim_start().to_string(),
        answers: answers.into_owned(),
        points_rel,
        first_alpha_rel,
    }
}
