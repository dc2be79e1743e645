//! 题目切分服务 - 业务能力层
//!
//! 只负责"按位置切出每道题的原始片段"，不关心片段内部结构

use crate::services::patterns::{DECIMAL_LIST_OPEN, POINTS_PARAGRAPH};

/// 一道题的原始片段：从 `<ol type="1">` 到分值段落结束（含）
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Fragment<'a> {
    /// body 内起点
    pub start: usize,
    /// body 内终点（不含）
    pub end: usize,
    /// `body[start..end]`
    pub html: &'a str,
    /// 结束片段的分值段落
    pub points_html: &'a str,
}

/// 切分结束的原因
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SegmentStop {
    /// 再也找不到题目开头（正常结束）
    Exhausted,
    /// 找到题目开头，但其后没有分值段落
    Truncated { offset: usize },
}

/// 题目切分服务
///
/// 职责：
/// - 在 body 文本上按正则定位片段边界
/// - 片段互不重叠、从不回退
/// - 可从任意偏移重新开始
#[derive(Debug, Clone, Copy)]
pub struct Segmenter<'a> {
    body: &'a str,
}

impl<'a> Segmenter<'a> {
    pub fn new(body: &'a str) -> Self {
        Self { body }
    }

    /// 从头开始的片段序列
    pub fn segments(&self) -> Segments<'a> {
        self.segments_from(0)
    }

    /// 从指定偏移开始的片段序列
    pub fn segments_from(&self, offset: usize) -> Segments<'a> {
        Segments {
            body: self.body,
            offset: offset.min(self.body.len()),
            stop: None,
        }
    }
}

/// 惰性片段迭代器
#[derive(Debug, Clone)]
pub struct Segments<'a> {
    body: &'a str,
    offset: usize,
    stop: Option<SegmentStop>,
}

impl<'a> Segments<'a> {
    /// 迭代结束后给出结束原因；未结束时为 None
    pub fn stop(&self) -> Option<SegmentStop> {
        self.stop
    }
}

impl<'a> Iterator for Segments<'a> {
    type Item = Fragment<'a>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.stop.is_some() {
            return None;
        }

        let Some(start_match) = DECIMAL_LIST_OPEN.find_at(self.body, self.offset) else {
            self.stop = Some(SegmentStop::Exhausted);
            return None;
        };
        let start = start_match.start();

        let Some(points_match) = POINTS_PARAGRAPH.find_at(self.body, start) else {
            self.stop = Some(SegmentStop::Truncated { offset: start });
            return None;
        };
        let end = points_match.end();

        self.offset = end;
        Some(Fragment {
            start,
            end,
            html: &self.body[start..end],
            points_html: points_match.as_str(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const Q1: &str = r#"<ol type="1"><li><p>Q1?</p><ol type="a"><li>A</li></ol><p>(1 point)</p></li></ol>"#;
    const Q2: &str = r#"<ol type="1"><li><p>Q2?</p><p>(2 points)</p></li></ol>"#;

    #[test]
    fn test_segments_in_order_without_overlap() {
        let body = format!("<p>Intro</p>{Q1}<p>entre</p>{Q2}<p>fin</p>");
        let segmenter = Segmenter::new(&body);
        let mut segments = segmenter.segments();

        let first = segments.next().unwrap();
        assert!(first.html.starts_with(r#"<ol type="1">"#));
        assert!(first.html.ends_with("<p>(1 point)</p>"));
        assert_eq!(first.points_html, "<p>(1 point)</p>");
        assert_eq!(&body[first.start..first.end], first.html);

        let second = segments.next().unwrap();
        assert!(second.start >= first.end);
        assert!(second.html.ends_with("<p>(2 points)</p>"));

        assert!(segments.next().is_none());
        assert_eq!(segments.stop(), Some(SegmentStop::Exhausted));
        // 结束后保持结束
        assert!(segments.next().is_none());
    }

    #[test]
    fn test_no_question_start_is_empty() {
        let segmenter = Segmenter::new("<p>Rien ici</p><ol type=\"a\"><li>x</li></ol>");
        let mut segments = segmenter.segments();
        assert!(segments.next().is_none());
        assert_eq!(segments.stop(), Some(SegmentStop::Exhausted));
    }

    #[test]
    fn test_truncated_question_stops_segmentation() {
        let tail = r#"<ol type="1"><li><p>Q sans points</p></li></ol>"#;
        let body = format!("{Q1}{tail}{Q2}");
        let body_truncated = format!("{Q1}{tail}");
        let mut segments = Segmenter::new(&body_truncated).segments();
        assert!(segments.next().is_some());
        assert!(segments.next().is_none());
        assert_eq!(
            segments.stop(),
            Some(SegmentStop::Truncated { offset: Q1.len() })
        );

        // 边界只看位置：缺少分值段落的题会和下一题并成一个片段
        let count = Segmenter::new(&body).segments().count();
        assert_eq!(count, 2);
    }

    #[test]
    fn test_restartable() {
        let body = format!("{Q1}{Q2}");
        let segmenter = Segmenter::new(&body);
        let all: Vec<_> = segmenter.segments().collect();
        let again: Vec<_> = segmenter.segments().collect();
        assert_eq!(all, again);

        let from_second: Vec<_> = segmenter.segments_from(all[0].end).collect();
        assert_eq!(from_second, vec![all[1]]);
    }
}
