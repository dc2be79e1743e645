//! 选项扁平化服务 - 业务能力层
//!
//! 只负责"把答案区变成一串顶层选项"能力，不关心题干与题型
//!
//! ## 步骤
//! 1. 反复找到任意一个字母列表，把它的 `<li>` 子节点提升为其最近 `<li>` 祖先
//!    （没有则为列表自身）之后的兄弟节点，然后删除这个空列表
//! 2. 修复空选项：某些 DOCX 把选项的唯一内容（图片）放进了后面的 `<p>`
//! 3. 收集容器下的每个顶层 `<li>`

use markup5ever_rcdom::Handle;
use tracing::debug;

use crate::error::AppResult;
use crate::infrastructure::html_dom::{self, HtmlFragment};
use crate::models::question::AnswerItem;
use crate::utils::text::clean_text;

/// 选项扁平化服务
///
/// 职责：
/// - 消除任意层级嵌套的字母列表
/// - 修复"空 `<li>` + 后随图片段落"的已知缺陷
/// - 只处理单个题目的答案区
#[derive(Debug, Clone, Copy, Default)]
pub struct AnswerFlattener;

impl AnswerFlattener {
    pub fn new() -> Self {
        Self
    }

    /// 答案区 → 有序选项
    ///
    /// 修复后仍为空的选项原样保留（空的 [`AnswerItem`]）
    pub fn flatten(&self, answers_html: &str) -> AppResult<Vec<AnswerItem>> {
        if answers_html.trim().is_empty() {
            return Ok(Vec::new());
        }

        let fragment = HtmlFragment::parse(answers_html);
        let Some(root) = fragment.root() else {
            return Ok(Vec::new());
        };

        let promoted = promote_alpha_lists(root);
        let repaired = repair_empty_items(root);
        debug!(
            "扁平化: 移除 {} 个字母列表, 修复 {} 个空选项",
            promoted, repaired
        );

        top_level_items(root)
            .iter()
            .map(|li| {
                Ok(AnswerItem {
                    html: html_dom::outer_html(li)?,
                    text: clean_text(&html_dom::text_content(li)),
                    images: html_dom::image_sources(li),
                })
            })
            .collect()
    }
}

/// `<ol type="a">` 或带 lower-alpha 样式
fn is_alpha_list(node: &Handle) -> bool {
    if !html_dom::is_element(node, "ol") {
        return false;
    }
    let kind = html_dom::attr(node, "type").unwrap_or_default();
    let style = html_dom::attr(node, "style")
        .unwrap_or_default()
        .to_ascii_lowercase();
    kind.trim().eq_ignore_ascii_case("a") || style.contains("lower-alpha")
}

fn find_alpha_list(root: &Handle) -> Option<Handle> {
    html_dom::descendants(root)
        .into_iter()
        .find(is_alpha_list)
}

/// 列表的锚点：向上穿过连续的 `<li>` 祖先取最外层那个；没有则为列表自身
fn anchor_of(list: &Handle, root: &Handle) -> Handle {
    let mut anchor = list.clone();
    let mut ancestor = html_dom::parent(list);
    while let Some(node) = ancestor {
        if std::rc::Rc::ptr_eq(&node, root) || !html_dom::is_element(&node, "li") {
            break;
        }
        ancestor = html_dom::parent(&node);
        anchor = node;
    }
    anchor
}

/// 第 1 步：返回移除的字母列表数量
fn promote_alpha_lists(root: &Handle) -> usize {
    let mut removed = 0;
    while let Some(list) = find_alpha_list(root) {
        let mut reference = anchor_of(&list, root);
        let items: Vec<Handle> = html_dom::children(&list)
            .into_iter()
            .filter(|child| html_dom::is_element(child, "li"))
            .collect();

        for item in items {
            html_dom::insert_after(&reference, &item);
            reference = item;
        }

        html_dom::detach(&list);
        removed += 1;
    }
    removed
}

fn is_empty_item(li: &Handle) -> bool {
    !html_dom::contains_image(li) && clean_text(&html_dom::text_content(li)).is_empty()
}

/// 第 2 步：返回成功修复的选项数量
fn repair_empty_items(root: &Handle) -> usize {
    let mut repaired = 0;
    for li in top_level_items(root) {
        if !is_empty_item(&li) {
            continue;
        }
        if absorb_following_image(&li) {
            repaired += 1;
        } else {
            debug!("空选项无法修复，保留为空");
        }
    }
    repaired
}

/// 向后找第一个含图片的 `<p>` 并把其内容并入 `li`
///
/// 途中的空 `<p>` 被删除；遇到有文字的 `<p>` 或其他元素（如表格）则放弃。
/// 非元素节点（空白文本、注释）被跳过。
fn absorb_following_image(li: &Handle) -> bool {
    let mut cursor = html_dom::next_sibling(li);
    while let Some(node) = cursor {
        let Some(tag) = html_dom::tag_name(&node) else {
            cursor = html_dom::next_sibling(&node);
            continue;
        };
        if tag != "p" {
            return false;
        }

        if html_dom::contains_image(&node) {
            for child in html_dom::children(&node) {
                html_dom::append_child(li, &child);
            }
            html_dom::detach(&node);
            return true;
        }

        if clean_text(&html_dom::text_content(&node)).is_empty() {
            let next = html_dom::next_sibling(&node);
            html_dom::detach(&node);
            cursor = next;
            continue;
        }

        return false;
    }
    false
}

/// 第 3 步：容器的直接 `<li>` 子节点
fn top_level_items(root: &Handle) -> Vec<Handle> {
    html_dom::children(root)
        .into_iter()
        .filter(|child| html_dom::is_element(child, "li"))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn texts(items: &[AnswerItem]) -> Vec<&str> {
        items.iter().map(|a| a.text.as_str()).collect()
    }

    #[test]
    fn test_flat_list() {
        let items = AnswerFlattener::new()
            .flatten(r#"<ol type="a"><li>A</li><li>B</li></ol>"#)
            .unwrap();
        assert_eq!(texts(&items), vec!["A", "B"]);
        assert_eq!(items[0].html, "<li>A</li>");
        assert!(items[0].images.is_empty());
    }

    #[test]
    fn test_empty_zone() {
        assert!(AnswerFlattener::new().flatten("").unwrap().is_empty());
        assert!(AnswerFlattener::new().flatten("  \n ").unwrap().is_empty());
    }

    #[test]
    fn test_depth_invariance() {
        let flattener = AnswerFlattener::new();
        let depth1 = r#"<ol type="a"><li>Un</li><li>Deux</li><li>Trois</li></ol>"#;
        let depth2 = r#"<ol type="a"><li>Un<ol type="a"><li>Deux</li><li>Trois</li></ol></li></ol>"#;
        let depth3 = r#"<ol type="a"><li>Un<ol type="a"><li>Deux<ol style="list-style-type: lower-alpha"><li>Trois</li></ol></li></ol></li></ol>"#;

        let expected = vec!["Un", "Deux", "Trois"];
        for zone in [depth1, depth2, depth3] {
            let items = flattener.flatten(zone).unwrap();
            assert_eq!(texts(&items), expected, "zone: {}", zone);
            // 不应残留嵌套 li
            assert!(items.iter().all(|a| a.html.matches("<li").count() == 1));
        }
    }

    #[test]
    fn test_sibling_alpha_lists_are_concatenated() {
        let zone = r#"<ol type="a"><li>A</li></ol><p></p><ol type="a"><li>B</li></ol>"#;
        let items = AnswerFlattener::new().flatten(zone).unwrap();
        assert_eq!(texts(&items), vec!["A", "B"]);
    }

    #[test]
    fn test_images_inside_options() {
        let zone = r#"<ol type="a"><li>Voir <img src="word/media/image1.png"></li><li><img src="word/media/image2.png"><img src="word/media/image3.png"></li></ol>"#;
        let items = AnswerFlattener::new().flatten(zone).unwrap();
        assert_eq!(items[0].images, vec!["word/media/image1.png"]);
        assert_eq!(
            items[1].images,
            vec!["word/media/image2.png", "word/media/image3.png"]
        );
        assert_eq!(items[1].text, "");
        assert!(!items[1].is_empty());
    }

    #[test]
    fn test_repair_absorbs_image_after_empty_paragraph() {
        let zone = r#"<ol type="a"><li>A</li><li></li></ol><p> </p><p><img src="word/media/x.png"></p>"#;
        let items = AnswerFlattener::new().flatten(zone).unwrap();
        assert_eq!(items.len(), 2);
        assert_eq!(items[1].images, vec!["word/media/x.png"]);
        assert!(!items[1].is_empty());
        assert!(items[1].html.contains("<img"));
    }

    #[test]
    fn test_repair_aborts_on_text_paragraph() {
        let zone = r#"<ol type="a"><li></li></ol><p>Du texte</p><p><img src="word/media/x.png"></p>"#;
        let items = AnswerFlattener::new().flatten(zone).unwrap();
        assert_eq!(items.len(), 1);
        assert!(items[0].is_empty());
    }

    #[test]
    fn test_repair_aborts_on_table() {
        let zone = r#"<ol type="a"><li></li></ol><table><tr><td><img src="word/media/t.png"></td></tr></table><p><img src="word/media/x.png"></p>"#;
        let items = AnswerFlattener::new().flatten(zone).unwrap();
        assert_eq!(items.len(), 1);
        assert!(items[0].is_empty());
    }

    #[test]
    fn test_non_empty_item_is_not_repaired() {
        let zone = r#"<ol type="a"><li>A</li></ol><p><img src="word/media/x.png"></p>"#;
        let items = AnswerFlattener::new().flatten(zone).unwrap();
        assert_eq!(items.len(), 1);
        assert!(items[0].images.is_empty());
    }
}
