//! # QCM Extract
//!
//! 把 DOCX 转换器生成的中间 HTML 解析为选择题列表，并导出打印页
//!
//! ## 架构设计
//!
//! 本系统采用严格的四层架构：
//!
//! ### ① 基础设施层（Infrastructure）
//! - `infrastructure/` - 只暴露能力，不含业务规则
//! - `HtmlFragment` - 答案区的小型 DOM，支持移动、删除、序列化节点
//!
//! ### ② 业务能力层（Services）
//! - `services/` - 描述"我能做什么"，只处理单个片段
//! - `Segmenter` - 按位置切出每道题的片段
//! - `split_zones` - 题干区 / 答案区切分
//! - `AnswerFlattener` - 嵌套选项扁平化 + 空选项修复
//! - `classify` - 题型判定
//! - `build_blocks` - 分组重排
//! - `ArtifactWriter` - 原子写产物
//!
//! ### ③ 流程层（Workflow）
//! - `workflow/` - 定义"一个片段 → 一道题"的完整处理流程
//! - `QuestionCtx` - 上下文封装（题号 + 偏移）
//! - `QuestionFlow` - 流程编排（切分 → 图片 → 扁平化 → 判定）
//!
//! ### ④ 编排层（Orchestration）
//! - `orchestrator/batch_processor` - 一次运行：读输入、写产物、渲染
//! - `orchestrator/document_processor` - 单个文档：遍历片段、分配题号
//! - `orchestrator/inspector` - 检查视图
//!
//! 渲染（`render/`）是下游协作者，只消费题目列表。
//!
//! ## 模块结构

pub mod config;
pub mod error;
pub mod infrastructure;

pub mod models;
pub mod orchestrator;
pub mod render;
pub mod services;
pub mod utils;
pub mod workflow;

// 重新导出常用类型
pub use config::Config;
pub use error::{AppError, AppResult};
pub use models::question::{AnswerItem, Question, QuestionType};
pub use orchestrator::{extract_document, App, ExtractOptions, Extraction, RunReport};
pub use workflow::{QuestionCtx, QuestionFlow};
