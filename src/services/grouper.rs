//! 分组服务 - 业务能力层
//!
//! 纯数据重排：把题目列表和分组定义变成渲染块，不做任何解析

use tracing::debug;

use crate::models::group::{Block, GroupDefinition};
use crate::models::question::Question;

/// 构建渲染块
///
/// - 分组按 `from` 升序处理，已被前面分组认领的题不会被后面重叠的分组再认领
/// - 不在任何分组里的题各自成为单题块
/// - 认领不到任何题的分组（越界、`to < from`）被忽略
/// - 结果按块内第一道题的题号升序
pub fn build_blocks<'a>(questions: &'a [Question], groups: &[GroupDefinition]) -> Vec<Block<'a>> {
    let mut ordered: Vec<&GroupDefinition> = groups.iter().collect();
    ordered.sort_by_key(|g| g.from);

    let mut claimed = vec![false; questions.len()];
    let mut blocks = Vec::with_capacity(questions.len());

    for group in ordered {
        let mut members: Vec<&Question> = Vec::new();
        for (pos, question) in questions.iter().enumerate() {
            if !claimed[pos] && group.covers(question.index) {
                claimed[pos] = true;
                members.push(question);
            }
        }

        if members.is_empty() {
            debug!("分组 {}-{} 没有可认领的题目，忽略", group.from, group.to);
            continue;
        }

        blocks.push(Block::Group {
            questions: members,
            layout: group.layout,
        });
    }

    blocks.extend(
        questions
            .iter()
            .zip(claimed.iter())
            .filter(|(_, taken)| !**taken)
            .map(|(question, _)| Block::Single { question }),
    );

    blocks.sort_by_key(Block::first_index);
    blocks
}
