//! 结构边界的正则
//!
//! 边界检测直接作用于原始文本偏移（DOM 解析器不能保证还原原始切片）。

use regex::Regex;
use std::sync::LazyLock;

/// 分值段落中允许的空白：普通空白、U+00A0、U+202F（原字符或实体形式）
const WS: &str = r"(?:\s|&nbsp;|&#160;|&#xa0;|&#8239;|&#x202f;|\x{00A0}|\x{202F})*";

/// `<ol type="1">`：题目开头
pub static DECIMAL_LIST_OPEN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"(?i)<ol\b[^>]*\btype\s*=\s*(?:"1"|'1'|1\b)[^>]*>"#).expect("decimal list regex")
});

/// `<ol type="a">` 或带 `lower-alpha` 样式的列表：答案区开头
pub static ALPHA_LIST_OPEN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r#"(?i)<ol\b[^>]*(?:\btype\s*=\s*(?:"a"|'a'|a\b)|\bstyle\s*=\s*["'][^"'>]*lower-alpha)[^>]*>"#,
    )
    .expect("alpha list regex")
});

/// `<p>(1 point)</p>`、`<p>(2,5 points)</p>`、`<p>( 1 point(s) )</p>` 等
pub static POINTS_PARAGRAPH: LazyLock<Regex> = LazyLock::new(|| {
    let pattern = format!(
        r"(?i)<p\b[^>]*>{WS}\({WS}\d+(?:[.,]\d+)?{WS}point(?:\(\s*s\s*\))?s?{WS}\){WS}</p>"
    );
    Regex::new(&pattern).expect("points paragraph regex")
});

/// 题干开头残留的 `<ol ...><li ...>` 包装
pub static LEADING_LIST_WRAPPER: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)^\s*<ol\b[^>]*>\s*<li\b[^>]*>").expect("leading wrapper regex")
});

/// 答案区开头残留的 `</li></ol>`
pub static LEADING_LIST_CLOSERS: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)^\s*(?:(?:</li>|</ol>)\s*)+").expect("leading closers regex")
});

/// `<body>` 内部
pub static BODY_INNER: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?is)<body\b[^>]*>(.*?)</body>").expect("body regex")
});

/// 文档 `<body>` 的内容；没有 `<body>` 时返回原文
pub fn body_html(html: &str) -> &str {
    BODY_INNER
        .captures(html)
        .and_then(|cap| cap.get(1))
        .map(|m| m.as_str())
        .unwrap_or(html)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_decimal_list_open() {
        assert!(DECIMAL_LIST_OPEN.is_match(r#"<ol type="1">"#));
        assert!(DECIMAL_LIST_OPEN.is_match(r#"<OL class="q" type='1' start="3">"#));
        assert!(DECIMAL_LIST_OPEN.is_match(r#"<ol type=1>"#));
        assert!(!DECIMAL_LIST_OPEN.is_match(r#"<ol type="a">"#));
        assert!(!DECIMAL_LIST_OPEN.is_match(r#"<ol type="10">"#));
        assert!(!DECIMAL_LIST_OPEN.is_match(r#"<ol>"#));
    }

    #[test]
    fn test_alpha_list_open() {
        assert!(ALPHA_LIST_OPEN.is_match(r#"<ol type="a">"#));
        assert!(ALPHA_LIST_OPEN.is_match(r#"<ol type=a class="x">"#));
        assert!(ALPHA_LIST_OPEN.is_match(r#"<ol style="list-style-type: lower-alpha">"#));
        assert!(!ALPHA_LIST_OPEN.is_match(r#"<ol type="1">"#));
        assert!(!ALPHA_LIST_OPEN.is_match(r#"<ol class="answers">"#));
    }

    #[test]
    fn test_points_paragraph_variants() {
        for p in [
            "<p>(1 point)</p>",
            "<p>(2 points)</p>",
            "<p>(2,5 points)</p>",
            "<p>(0.5 point)</p>",
            "<p class=\"x\"> (&nbsp;3&nbsp;point(s)&nbsp;) </p>",
            "<p>(\u{00A0}1\u{202F}POINT\u{00A0})</p>",
            "<p>(1 point( s ))</p>",
            "<p>(&#8239;1&#x202F;point&#xA0;)</p>",
        ] {
            assert!(POINTS_PARAGRAPH.is_match(p), "should match: {}", p);
        }
        for p in ["<p>1 point</p>", "<p>(un point)</p>", "<p>(1 point) bonus</p>"] {
            assert!(!POINTS_PARAGRAPH.is_match(p), "should not match: {}", p);
        }
    }

    #[test]
    fn test_leading_cleanup_patterns() {
        assert_eq!(
            LEADING_LIST_WRAPPER.replace(r#" <ol type="1"> <li class="x"><p>Q</p>"#, ""),
            "<p>Q</p>"
        );
        assert_eq!(
            LEADING_LIST_CLOSERS.replace("</li> </ol>\n</li><li>A</li>", ""),
            "<li>A</li>"
        );
        assert_eq!(LEADING_LIST_CLOSERS.replace("<li>A</li>", ""), "<li>A</li>");
    }

    #[test]
    fn test_body_html() {
        assert_eq!(body_html("<html><body class=\"a\">x<p>y</p></body></html>"), "x<p>y</p>");
        assert_eq!(body_html("<p>no body</p>"), "<p>no body</p>");
    }
}
