//! Sable Compiler Driver
//!
//! 串联源码注册、词法分析与诊断输出。一个 [`Session`] 持有本次运行的全部源码，
//! 诊断渲染时再按需为它们建立行索引。

pub mod error;

pub use error::{DriverError, DriverResult};
pub use sable_diagnostics::ColorMode;

use std::io::Write;
use std::path::Path;

use sable_diagnostics::{
    DiagnosticSink, FancyEmitter, ReportCache, Source, SourceId, SourceMap, TerminalEmitter,
};
use sable_syntax::{Lexer, ParseStatus, Parser, Token};

/// 诊断输出格式
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum OutputFormat {
    /// 内置的终端格式
    #[default]
    Plain,
    /// ariadne 排版
    Fancy,
}

/// 驱动配置
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DriverConfig {
    pub color: ColorMode,
    pub format: OutputFormat,
}

/// 一次编译会话
#[derive(Debug, Default)]
pub struct Session {
    config: DriverConfig,
    sources: SourceMap,
}

impl Session {
    pub fn new(config: DriverConfig) -> Self {
        Self {
            config,
            sources: SourceMap::new(),
        }
    }

    pub fn config(&self) -> &DriverConfig {
        &self.config
    }

    /// 注册内存中的源码
    pub fn add_source(&mut self, content: impl Into<String>, filename: impl Into<String>) -> SourceId {
        self.sources.add(content, filename)
    }

    /// 读取并注册源文件
    #[tracing::instrument(level = "debug", skip_all, fields(path = %path.display()))]
    pub fn add_file(&mut self, path: &Path) -> DriverResult<SourceId> {
        let content = std::fs::read_to_string(path).map_err(|source| DriverError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        tracing::debug!(bytes = content.len(), "read source file");
        Ok(self.add_source(content, path.display().to_string()))
    }

    pub fn sources(&self) -> &SourceMap {
        &self.sources
    }

    pub fn source(&self, id: SourceId) -> DriverResult<&Source> {
        self.sources.get(id).ok_or(DriverError::UnknownSource(id))
    }

    /// 完整的单元序列，以 `Eof` 结尾
    pub fn tokens(&self, id: SourceId) -> DriverResult<Vec<Token<'_>>> {
        let source = self.source(id)?;
        Ok(Lexer::new(id, source.content()).collect())
    }

    /// 检查单个源码，返回收集到的诊断
    #[tracing::instrument(level = "debug", skip(self))]
    pub fn check(&self, id: SourceId) -> DriverResult<DiagnosticSink> {
        let source = self.source(id)?;
        Ok(Self::check_source(id, source))
    }

    /// 按注册顺序检查全部源码
    pub fn check_all(&self) -> DiagnosticSink {
        let mut all = DiagnosticSink::new();
        for (id, source) in self.sources.iter() {
            all.extend(Self::check_source(id, source).into_diagnostics());
        }
        all
    }

    fn check_source(id: SourceId, source: &Source) -> DiagnosticSink {
        let mut sink = DiagnosticSink::new();
        let status = Parser::new(Lexer::new(id, source.content()), &mut sink).parse();
        tracing::debug!(
            filename = source.filename(),
            failed = status == ParseStatus::Failed,
            diagnostics = sink.len(),
            "checked source"
        );
        sink
    }

    /// 按配置的格式渲染诊断并输出统计
    #[tracing::instrument(level = "debug", skip_all, fields(count = sink.len()))]
    pub fn emit<W: Write>(
        &self,
        sink: &DiagnosticSink,
        writer: W,
        is_tty: bool,
    ) -> DriverResult<()> {
        let mut cache = ReportCache::new(&self.sources);
        cache.register_all();

        let use_colors = self.config.color.should_use_colors(is_tty);
        match self.config.format {
            OutputFormat::Plain => {
                let mut emitter =
                    TerminalEmitter::with_color_mode(writer, self.config.color, is_tty);
                sink.report(&mut emitter, &cache)?;
            }
            OutputFormat::Fancy => {
                let mut emitter = FancyEmitter::new(writer, use_colors);
                sink.report(&mut emitter, &cache)?;
            }
        }
        Ok(())
    }
}
