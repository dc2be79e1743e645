//! 文本与标记的小工具
//!
//! 题干在字符串层面处理（正则），选项在 DOM 层面处理，
//! 两者最终都经过 [`clean_text`] 得到同样的规范化文本。

use regex::Regex;
use std::sync::LazyLock;

static WHITESPACE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\s+").expect("whitespace regex"));

static TAG_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?s)<!--.*?-->|<[^>]*>").expect("tag regex"));

/// `src` 值可以带双引号、单引号或不带引号
static IMG_SRC_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"(?i)<img\b[^>]*?\bsrc\s*=\s*(?:"([^"]*)"|'([^']*)'|([^\s"'>]+))"#)
        .expect("img src regex")
});

static IMG_TAG_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)<img\b[^>]*>").expect("img tag regex"));

static EMPTY_P_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)<p\b[^>]*>\s*</p>").expect("empty p regex"));

/// 规范化空白：不换行空格视为空格，连续空白折叠为一个，去掉首尾
pub fn clean_text(s: &str) -> String {
    let replaced = s.replace(['\u{00A0}', '\u{202F}'], " ");
    WHITESPACE_RE.replace_all(replaced.trim(), " ").trim().to_string()
}

/// 去掉所有标签（含注释），不做规范化
pub fn strip_tags(html: &str) -> String {
    TAG_RE.replace_all(html, "").into_owned()
}

/// 标记 → 规范化纯文本（去标签、解码实体、折叠空白）
pub fn html_to_text(html: &str) -> String {
    let stripped = strip_tags(html);
    clean_text(&html_escape::decode_html_entities(&stripped))
}

/// 按出现顺序提取所有 `<img src>`
pub fn image_sources(html: &str) -> Vec<String> {
    IMG_SRC_RE
        .captures_iter(html)
        .filter_map(|cap| {
            (1..=3)
                .find_map(|i| cap.get(i))
                .map(|m| m.as_str().to_string())
        })
        .filter(|src| !src.is_empty())
        .collect()
}

/// 删除 `<img>` 标签以及因此留下的空段落
pub fn remove_images(html: &str) -> String {
    let without_imgs = IMG_TAG_RE.replace_all(html, "");
    EMPTY_P_RE.replace_all(&without_imgs, "").into_owned()
}
