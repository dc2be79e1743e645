use serde::{Deserialize, Serialize};

use crate::models::question::Question;

/// 分组排版方向
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Layout {
    #[default]
    Horizontal,
    Vertical,
}

impl Layout {
    pub fn as_str(self) -> &'static str {
        match self {
            Layout::Horizontal => "horizontal",
            Layout::Vertical => "vertical",
        }
    }
}

// 只有 "vertical" 被识别，其余任何值都按 horizontal 处理
impl<'de> Deserialize<'de> for Layout {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        use serde::de::Visitor;
        use std::fmt;

        struct LayoutVisitor;

        impl<'de> Visitor<'de> for LayoutVisitor {
            type Value = Layout;

            fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
                formatter.write_str("a layout name such as \"horizontal\" or \"vertical\"")
            }

            fn visit_str<E>(self, value: &str) -> Result<Self::Value, E>
            where
                E: serde::de::Error,
            {
                if value.trim().eq_ignore_ascii_case("vertical") {
                    Ok(Layout::Vertical)
                } else {
                    Ok(Layout::Horizontal)
                }
            }
        }

        deserializer.deserialize_str(LayoutVisitor)
    }
}

/// 用户定义的分组：按题号闭区间 `[from, to]`
///
/// 只是排版建议，从不修改题目数据。重新抽取后题号可能漂移，这里不做对账。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct GroupDefinition {
    pub from: usize,
    pub to: usize,
    #[serde(default)]
    pub layout: Layout,
}

impl GroupDefinition {
    pub fn new(from: usize, to: usize, layout: Layout) -> Self {
        Self { from, to, layout }
    }

    pub fn covers(&self, index: usize) -> bool {
        self.from <= index && index <= self.to
    }
}

/// 分组文件（TOML）的根结构
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct GroupFile {
    #[serde(default)]
    pub groups: Vec<GroupDefinition>,
}

/// 渲染块：单题或一组题
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Block<'a> {
    Single {
        question: &'a Question,
    },
    Group {
        questions: Vec<&'a Question>,
        layout: Layout,
    },
}

impl<'a> Block<'a> {
    /// 块中第一道题的题号，用于排序
    pub fn first_index(&self) -> usize {
        match self {
            Block::Single { question } => question.index,
            Block::Group { questions, .. } => {
                questions.iter().map(|q| q.index).min().unwrap_or(0)
            }
        }
    }

    pub fn questions(&self) -> Vec<&'a Question> {
        match self {
            Block::Single { question } => vec![*question],
            Block::Group { questions, .. } => questions.clone(),
        }
    }
}
