//! 渲染层：模板与打印页导出（下游协作者，不参与解析）

pub mod exporter;
pub mod templates;

pub use exporter::{ExportMeta, Exporter};
pub use templates::{
    available_types, placeholder_docs, PlaceholderDoc, TemplateSet, TemplateStore, TypeInfo,
};
