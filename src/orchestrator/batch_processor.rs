//! 应用处理器 - 编排层
//!
//! ## 职责
//!
//! 本模块是整个应用的入口，负责一次完整转换的 I/O 与调度。
//!
//! ## 核心功能
//!
//! 1. **读取输入**：整篇读入中间 HTML
//! 2. **抽取题目**：委托 `document_processor`
//! 3. **产物落盘**：extraction.json / extraction_debug.json / inspection.json
//! 4. **分组渲染**：读取分组定义，构建渲染块，导出打印页
//! 5. **全局统计**：汇总本次运行的结果
//!
//! ## 设计特点
//!
//! - **无全局状态**：一次运行 = 一个 `Config` 进，一个 `RunReport` 出
//! - **全有或全无**：输入整篇读取，每个产物整体写入
//! - **向下委托**：解析细节全部交给 `document_processor`

use anyhow::{Context, Result};
use std::path::{Path, PathBuf};
use tracing::{info, warn};

use crate::config::Config;
use crate::error::AppError;
use crate::models::loaders::load_group_file;
use crate::models::question::ExtractionArtifact;
use crate::orchestrator::document_processor::{extract_document, ExtractOptions};
use crate::orchestrator::inspector::InspectionReport;
use crate::render::{ExportMeta, Exporter, TemplateStore};
use crate::services::artifact_writer::ArtifactWriter;
use crate::services::grouper::build_blocks;
use crate::utils::logging;

pub const EXTRACTION_FILE: &str = "extraction.json";
pub const DEBUG_FILE: &str = "extraction_debug.json";
pub const INSPECTION_FILE: &str = "inspection.json";
pub const RENDER_FILE: &str = "render/render.html";

/// 应用主结构
pub struct App {
    config: Config,
    writer: ArtifactWriter,
    templates: TemplateStore,
}

/// 一次运行的结果
#[derive(Debug, Clone)]
pub struct RunReport {
    pub question_count: usize,
    pub block_count: usize,
    pub truncated_at: Option<usize>,
    pub extraction_path: PathBuf,
    pub debug_path: PathBuf,
    pub inspection_path: Option<PathBuf>,
    pub render_path: PathBuf,
}

impl App {
    /// 初始化应用
    pub async fn initialize(config: Config) -> Result<Self> {
        logging::log_startup(&config.input_html, &config.output_dir);

        let writer = ArtifactWriter::new(&config.output_dir);
        let templates = TemplateStore::new(&config.template_dir);

        Ok(Self {
            config,
            writer,
            templates,
        })
    }

    /// 运行应用主逻辑
    pub async fn run(&self) -> Result<RunReport> {
        let input = Path::new(&self.config.input_html);
        let html = tokio::fs::read_to_string(input)
            .await
            .map_err(|e| AppError::read_failed(input, e))
            .context("无法读取中间 HTML")?;
        info!("📄 已读取输入: {} 字节", html.len());

        let extraction = extract_document(
            &html,
            ExtractOptions {
                collect_diagnostics: self.config.collect_diagnostics,
            },
        )?;

        if extraction.questions.is_empty() {
            warn!("⚠️ 文档中没有找到任何题目");
        }

        // ========== 抽取产物 ==========
        let artifact = ExtractionArtifact::new(extraction.questions.clone());
        let extraction_path = self.writer.write_json(EXTRACTION_FILE, &artifact).await?;
        let debug_path = self
            .writer
            .write_json(DEBUG_FILE, &extraction.diagnostics)
            .await?;

        let inspection_path = if self.config.collect_diagnostics {
            let report = InspectionReport::from_extraction(&extraction);
            Some(self.writer.write_json(INSPECTION_FILE, &report).await?)
        } else {
            None
        };

        // ========== 分组 + 渲染 ==========
        let groups = match &self.config.groups_file {
            Some(path) => load_group_file(Path::new(path))
                .await
                .with_context(|| format!("无法加载分组定义: {}", path))?,
            None => Vec::new(),
        };
        let blocks = build_blocks(&extraction.questions, &groups);

        let templates = self
            .templates
            .load_all()
            .await
            .with_context(|| format!("无法加载模板: {}", self.templates.dir().display()))?;
        let exporter = Exporter::new(templates);
        let meta = ExportMeta {
            title: self.config.export_title.clone(),
            letter: self.config.export_letter.clone(),
        };
        let page = exporter.export_page(&blocks, &meta);
        let render_path = self.writer.write_text(RENDER_FILE, &page).await?;

        let report = RunReport {
            question_count: extraction.questions.len(),
            block_count: blocks.len(),
            truncated_at: extraction.truncated_at(),
            extraction_path,
            debug_path,
            inspection_path,
            render_path,
        };

        logging::print_final_stats(
            report.question_count,
            report.block_count,
            report.truncated_at,
            &report.render_path.display().to_string(),
        );

        Ok(report)
    }
}
