//! HTML 片段树 - 基础设施层
//!
//! 只对答案区这一小段标记建树（从不反复解析整篇文档），
//! 对外暴露移动、删除、序列化节点的能力。

use std::rc::Rc;

use html5ever::tendril::TendrilSink;
use html5ever::{
    parse_document, serialize, serialize::SerializeOpts, serialize::TraversalScope, ParseOpts,
};
use markup5ever_rcdom::{Handle, NodeData, RcDom, SerializableHandle};

use crate::error::{AppError, AppResult};

const WRAP_ID: &str = "qcm-wrap";

/// 一段解析后的 HTML 片段
///
/// 片段内容被包在一个 `<div>` 中，`root()` 即该容器
pub struct HtmlFragment {
    _dom: RcDom,
    root: Option<Handle>,
}

impl HtmlFragment {
    /// 解析片段；html5ever 会容忍未闭合或多余的结束标签
    pub fn parse(markup: &str) -> Self {
        let wrapped = format!(
            "<!DOCTYPE html><html><head><meta charset=\"utf-8\"></head><body><div id=\"{WRAP_ID}\">{markup}</div></body></html>"
        );
        let dom = parse_document(RcDom::default(), ParseOpts::default()).one(wrapped);
        let root = descendants(&dom.document)
            .into_iter()
            .find(|node| tag_name(node) == Some("div") && attr(node, "id").as_deref() == Some(WRAP_ID));

        Self { _dom: dom, root }
    }

    /// 包裹容器（解析异常时可能不存在）
    pub fn root(&self) -> Option<&Handle> {
        self.root.as_ref()
    }
}

/// 元素标签名（小写），非元素返回 None
pub fn tag_name(node: &Handle) -> Option<&str> {
    match &node.data {
        NodeData::Element { name, .. } => Some(&*name.local),
        _ => None,
    }
}

pub fn is_element(node: &Handle, tag: &str) -> bool {
    tag_name(node) == Some(tag)
}

/// 读取属性值
pub fn attr(node: &Handle, name: &str) -> Option<String> {
    match &node.data {
        NodeData::Element { attrs, .. } => attrs
            .borrow()
            .iter()
            .find(|a| a.name.local.as_ref().eq_ignore_ascii_case(name))
            .map(|a| a.value.to_string()),
        _ => None,
    }
}

/// 所有后代节点，先序（文档顺序），不含自身
pub fn descendants(node: &Handle) -> Vec<Handle> {
    let mut out = Vec::new();
    collect_descendants(node, &mut out);
    out
}

fn collect_descendants(node: &Handle, out: &mut Vec<Handle>) {
    for child in node.children.borrow().iter() {
        out.push(child.clone());
        collect_descendants(child, out);
    }
}

/// 直接子节点快照
pub fn children(node: &Handle) -> Vec<Handle> {
    node.children.borrow().clone()
}

/// 所有后代文本拼接
pub fn text_content(node: &Handle) -> String {
    let mut out = String::new();
    collect_text(node, &mut out);
    out
}

fn collect_text(node: &Handle, out: &mut String) {
    if let NodeData::Text { contents } = &node.data {
        out.push_str(&contents.borrow());
    }
    for child in node.children.borrow().iter() {
        collect_text(child, out);
    }
}

/// 后代中的图片地址（按文档顺序，忽略空 src）
pub fn image_sources(node: &Handle) -> Vec<String> {
    descendants(node)
        .iter()
        .filter(|n| is_element(n, "img"))
        .filter_map(|n| attr(n, "src"))
        .filter(|src| !src.is_empty())
        .collect()
}

pub fn contains_image(node: &Handle) -> bool {
    descendants(node).iter().any(|n| is_element(n, "img"))
}

pub fn parent(node: &Handle) -> Option<Handle> {
    let weak = node.parent.take()?;
    let parent = weak.upgrade();
    node.parent.set(Some(weak));
    parent
}

pub fn next_sibling(node: &Handle) -> Option<Handle> {
    let parent = parent(node)?;
    let siblings = parent.children.borrow();
    let position = siblings.iter().position(|c| Rc::ptr_eq(c, node))?;
    let next = siblings.get(position + 1).cloned();
    next
}

/// 从父节点中摘除
pub fn detach(node: &Handle) {
    if let Some(weak) = node.parent.take() {
        if let Some(parent) = weak.upgrade() {
            parent
                .children
                .borrow_mut()
                .retain(|child| !Rc::ptr_eq(child, node));
        }
    }
}

/// 把 `node` 插到 `reference` 之后（同一父节点下）
pub fn insert_after(reference: &Handle, node: &Handle) {
    let Some(parent) = parent(reference) else {
        return;
    };
    detach(node);
    let mut siblings = parent.children.borrow_mut();
    let position = siblings
        .iter()
        .position(|c| Rc::ptr_eq(c, reference))
        .map(|p| p + 1)
        .unwrap_or(siblings.len());
    siblings.insert(position, node.clone());
    node.parent.set(Some(Rc::downgrade(&parent)));
}

pub fn append_child(parent: &Handle, node: &Handle) {
    detach(node);
    parent.children.borrow_mut().push(node.clone());
    node.parent.set(Some(Rc::downgrade(parent)));
}

/// 序列化节点本身及其内容
pub fn outer_html(node: &Handle) -> AppResult<String> {
    let mut output = Vec::new();
    let opts = SerializeOpts {
        traversal_scope: TraversalScope::IncludeNode,
        ..Default::default()
    };
    let serializable = SerializableHandle::from(node.clone());
    serialize(&mut output, &serializable, opts).map_err(AppError::HtmlSerialize)?;

    String::from_utf8(output).map_err(|e| {
        AppError::HtmlSerialize(std::io::Error::new(std::io::ErrorKind::InvalidData, e))
    })
}
