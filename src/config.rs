/// 程序配置文件
#[derive(Clone, Debug)]
pub struct Config {
    /// 中间 HTML 文件路径（由 DOCX 转换器生成）
    pub input_html: String,
    /// 产物输出目录（extraction.json 等）
    pub output_dir: String,
    /// 分组定义文件（TOML，可选）
    pub groups_file: Option<String>,
    /// 按题型覆盖的模板目录
    pub template_dir: String,
    /// 导出页标题
    pub export_title: String,
    /// 问卷字母（A、B…）
    pub export_letter: String,
    /// 是否收集诊断信息（raw 片段 + inspection.json）
    pub collect_diagnostics: bool,
    /// 是否显示详细日志
    pub verbose_logging: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            input_html: "intermediate.html".to_string(),
            output_dir: "output".to_string(),
            groups_file: None,
            template_dir: "templates".to_string(),
            export_title: "QCM".to_string(),
            export_letter: String::new(),
            collect_diagnostics: true,
            verbose_logging: false,
        }
    }
}

impl Config {
    pub fn from_env() -> Self {
        let default = Self::default();
        Self {
            input_html: std::env::var("INPUT_HTML").unwrap_or(default.input_html),
            output_dir: std::env::var("OUTPUT_DIR").unwrap_or(default.output_dir),
            groups_file: std::env::var("GROUPS_FILE").ok().filter(|v| !v.trim().is_empty()).or(default.groups_file),
            template_dir: std::env::var("TEMPLATE_DIR").unwrap_or(default.template_dir),
            export_title: std::env::var("EXPORT_TITLE").unwrap_or(default.export_title),
            export_letter: std::env::var("EXPORT_LETTER").unwrap_or(default.export_letter),
            collect_diagnostics: std::env::var("COLLECT_DIAGNOSTICS").ok().and_then(|v| v.parse().ok()).unwrap_or(default.collect_diagnostics),
            verbose_logging: std::env::var("VERBOSE_LOGGING").ok().and_then(|v| v.parse().ok()).unwrap_or(default.verbose_logging),
        }
    }
}
