//! 编排层（Orchestration Layer）
//!
//! ## 职责
//!
//! 本层负责一次转换的调度，是整个系统的"指挥中心"。
//!
//! ## 模块划分
//!
//! ### `batch_processor` - 应用处理器
//! - 管理一次运行的生命周期（初始化、运行）
//! - 读取输入、写出所有产物
//! - 加载分组定义并导出打印页
//! - 输出全局统计信息
//!
//! ### `document_processor` - 单个文档处理器
//! - 遍历文档中的所有片段
//! - 创建并复用 QuestionFlow
//! - 分配题号、记录截断位置
//!
//! ### `inspector` - 检查视图
//! - 基于同一次抽取结果的只读视图
//!
//! ## 层次关系
//!
//! ```text
//! batch_processor (一次运行：I/O + 渲染)
//!     ↓
//! document_processor (一篇文档 → Vec<Question>)
//!     ↓
//! workflow::QuestionFlow (一个片段 → 一道题)
//!     ↓
//! services (能力层：切分 / 扁平化 / 判定 / 分组)
//!     ↓
//! infrastructure (基础设施：HtmlFragment)
//! ```
//!
//! ## 设计原则
//!
//! 1. **单一职责**：batch_processor 管 I/O，document_processor 管解析调度
//! 2. **向下依赖**：编排层 → workflow → services → infrastructure
//! 3. **无业务逻辑**：只做调度和统计，不做具体业务判断

pub mod batch_processor;
pub mod document_processor;
pub mod inspector;

// 重新导出主要类型
pub use batch_processor::{App, RunReport};
pub use document_processor::{extract_document, ExtractOptions, Extraction};
pub use inspector::{answer_blocks, AnswerBlock, InspectedQuestion, InspectionReport};
