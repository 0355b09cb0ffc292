//! Emitter - 诊断输出器
//!
//! 负责将诊断信息格式化为带源码片段的文本：
//!
//! ```text
//! Error: Unknown character: `@`
//!  --> main.sable:3:14
//! 3 | int a = 123; @
//!   |              ^
//! ```
//!
//! 列号按字节计算，从 1 开始。

use std::io::{self, Write};

use colored::*;

use crate::cache::{CacheEntry, Line, ReportCache};
use crate::diagnostic::Diagnostic;
use crate::level::Severity;
use crate::span::Span;

/// 单行最大渲染宽度，超出部分围绕 span 起点裁剪
const RENDER_WIDTH: usize = 80;
/// 裁剪时保留的左侧上下文宽度
const LEFT_CONTEXT: usize = 40;

/// 诊断报告器
pub trait Reporter {
    /// 输出单个诊断
    fn report(&mut self, diagnostic: &Diagnostic, cache: &ReportCache<'_>) -> io::Result<()>;

    /// 输出所有诊断
    fn report_all(&mut self, diagnostics: &[Diagnostic], cache: &ReportCache<'_>) -> io::Result<()> {
        for diagnostic in diagnostics {
            self.report(diagnostic, cache)?;
        }
        Ok(())
    }

    /// 输出错误/警告统计
    fn emit_summary(&mut self, error_count: usize, warning_count: usize) -> io::Result<()>;

    fn flush(&mut self) -> io::Result<()>;
}

/// 颜色模式
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ColorMode {
    /// 根据输出是否为终端自动决定
    #[default]
    Auto,
    /// 总是使用颜色
    Always,
    /// 从不使用颜色
    Never,
}

impl ColorMode {
    pub fn should_use_colors(self, is_tty: bool) -> bool {
        match self {
            ColorMode::Auto => is_tty,
            ColorMode::Always => true,
            ColorMode::Never => false,
        }
    }
}

fn plural_s(count: usize) -> &'static str {
    if count == 1 {
        ""
    } else {
        "s"
    }
}

/// 统计行的级别与正文；没有错误和警告时为 `None`
pub(crate) fn summary(error_count: usize, warning_count: usize) -> Option<(Severity, String)> {
    let warnings = format!("{warning_count} warning{} emitted", plural_s(warning_count));
    match (error_count, warning_count) {
        (0, 0) => None,
        (0, _) => Some((Severity::Warning, warnings)),
        (errors, _) => {
            let errors = if errors == 1 {
                "previous error".to_string()
            } else {
                format!("{errors} previous errors")
            };
            let text = if warning_count > 0 {
                format!("aborting due to {errors}; {warnings}")
            } else {
                format!("aborting due to {errors}")
            };
            Some((Severity::Error, text))
        }
    }
}

/// 终端诊断输出器
pub struct TerminalEmitter<W: Write> {
    writer: W,
    /// 是否使用颜色
    use_colors: bool,
}

impl<W: Write> TerminalEmitter<W> {
    /// 创建带颜色的输出器
    pub fn new(writer: W) -> Self {
        Self {
            writer,
            use_colors: true,
        }
    }

    /// 创建无颜色的输出器
    pub fn without_colors(writer: W) -> Self {
        Self {
            writer,
            use_colors: false,
        }
    }

    /// 按颜色模式创建输出器
    pub fn with_color_mode(writer: W, mode: ColorMode, is_tty: bool) -> Self {
        Self {
            writer,
            use_colors: mode.should_use_colors(is_tty),
        }
    }

    pub fn uses_colors(&self) -> bool {
        self.use_colors
    }

    pub fn into_inner(self) -> W {
        self.writer
    }

    fn severity(&self, severity: Severity) -> String {
        if self.use_colors {
            severity.colored_name().to_string()
        } else {
            severity.name().to_string()
        }
    }

    fn gutter(&self, text: &str) -> String {
        if self.use_colors {
            text.blue().bold().to_string()
        } else {
            text.to_string()
        }
    }

    fn marks(&self, text: &str, severity: Severity) -> String {
        if !self.use_colors {
            return text.to_string();
        }
        match severity {
            Severity::Info => text.blue().bold().to_string(),
            Severity::Warning => text.yellow().bold().to_string(),
            Severity::Error => text.red().bold().to_string(),
        }
    }

    fn write_header(&mut self, diagnostic: &Diagnostic) -> io::Result<()> {
        let severity = self.severity(diagnostic.severity);
        match &diagnostic.message {
            Some(message) if self.use_colors => {
                writeln!(self.writer, "{}: {}", severity, message.as_str().bold())
            }
            Some(message) => writeln!(self.writer, "{}: {}", severity, message),
            None => writeln!(self.writer, "{}", severity),
        }
    }

    /// 输出一段代码片段；源码未注册或 span 越界时什么也不输出
    fn write_snippet(
        &mut self,
        span: &Span,
        message: Option<&str>,
        severity: Severity,
        cache: &ReportCache<'_>,
    ) -> io::Result<()> {
        let Some(entry) = cache.entry(span.source) else {
            return Ok(());
        };
        let overlapping = entry.index.lines_overlapping(span.start, span.stop);
        let lines = with_leading_newline(entry.index.lines(), overlapping, span);
        let (Some(first), Some(last)) = (lines.first(), lines.last()) else {
            return Ok(());
        };

        let column = span.start.clamp(first.start, first.stop) - first.start + 1;
        let arrow = self.gutter(" -->");
        writeln!(
            self.writer,
            "{} {}:{}:{}",
            arrow,
            entry.filename(),
            first.number,
            column
        )?;

        let width = last.number.to_string().len();
        let bar = self.gutter("|");
        for (i, line) in lines.iter().enumerate() {
            let excerpt = Excerpt::new(&entry, line, span, i == 0);

            if excerpt.text.is_empty() {
                writeln!(self.writer, "{:>width$} {}", line.number, bar)?;
            } else {
                writeln!(self.writer, "{:>width$} {} {}", line.number, bar, excerpt.text)?;
            }

            let underline = excerpt.underline();
            if underline.is_empty() {
                writeln!(self.writer, "{:width$} {}", "", bar)?;
            } else {
                let pad = " ".repeat(excerpt.mark_start);
                let marks = self.marks(&underline[excerpt.mark_start..], severity);
                writeln!(self.writer, "{:width$} {} {}{}", "", bar, pad, marks)?;
            }
        }

        if let Some(message) = message {
            let equals = self.gutter("=");
            writeln!(self.writer, "{:width$} {} {}", "", equals, message)?;
        }
        Ok(())
    }
}

/// span 起点落在某行结尾的 `\n` 上时，把该行补到最前面
fn with_leading_newline<'l>(
    all: &'l [Line],
    overlapping: &'l [Line],
    span: &Span,
) -> &'l [Line] {
    let Some(first) = overlapping.first() else {
        return overlapping;
    };
    if span.start >= first.start {
        return overlapping;
    }
    let from = first.number.saturating_sub(2);
    all.get(from..from + overlapping.len() + 1).unwrap_or(overlapping)
}

/// 一行代码在渲染窗口内的可见部分及下划线范围
struct Excerpt {
    text: String,
    /// 下划线起始列（窗口内，0 起）
    mark_start: usize,
    /// 下划线结束列（窗口内，不含）
    mark_stop: usize,
    /// span 起点是否在本行
    starts_here: bool,
}

impl Excerpt {
    fn new(entry: &CacheEntry<'_>, line: &Line, span: &Span, starts_here: bool) -> Self {
        let len = line.len();
        let cover_start = span.start.max(line.start).min(line.stop) - line.start;
        let cover_stop = span.stop.min(line.stop).max(line.start) - line.start;

        let cut = if len > RENDER_WIDTH {
            cover_start
                .saturating_sub(LEFT_CONTEXT)
                .min(len - RENDER_WIDTH)
        } else {
            0
        };
        let visible = len.min(RENDER_WIDTH);

        let bytes = entry
            .content()
            .as_bytes()
            .get(line.start + cut..line.start + cut + visible)
            .unwrap_or_default();
        let text = String::from_utf8_lossy(bytes).into_owned();

        let mark_start = cover_start.saturating_sub(cut).min(visible);
        let mut mark_stop = cover_stop.saturating_sub(cut).min(visible);
        // 起点处没有可覆盖的字节时（空 span 或落在行尾 `\n` 上）仍画一个 `^`
        if starts_here && mark_stop <= mark_start {
            mark_stop = mark_start + 1;
        }

        Self {
            text,
            mark_start,
            mark_stop: mark_stop.max(mark_start),
            starts_here,
        }
    }

    /// 下划线：`^` 标记 span 起点，`~` 标记其余覆盖部分
    fn underline(&self) -> String {
        if self.mark_stop == self.mark_start {
            return String::new();
        }
        let mut underline = " ".repeat(self.mark_start);
        if self.starts_here {
            underline.push('^');
            underline.push_str(&"~".repeat(self.mark_stop - self.mark_start - 1));
        } else {
            underline.push_str(&"~".repeat(self.mark_stop - self.mark_start));
        }
        underline
    }
}

impl<W: Write> Reporter for TerminalEmitter<W> {
    fn report(&mut self, diagnostic: &Diagnostic, cache: &ReportCache<'_>) -> io::Result<()> {
        self.write_header(diagnostic)?;

        if let Some(code) = &diagnostic.code {
            self.write_snippet(code, None, diagnostic.severity, cache)?;
            for label in &diagnostic.labels {
                self.write_snippet(
                    &label.span,
                    label.message.as_deref(),
                    diagnostic.severity,
                    cache,
                )?;
            }
        }

        writeln!(self.writer)
    }

    fn emit_summary(&mut self, error_count: usize, warning_count: usize) -> io::Result<()> {
        match summary(error_count, warning_count) {
            Some((severity, text)) => {
                let prefix = self.severity(severity);
                writeln!(self.writer, "{prefix}: {text}")
            }
            None => Ok(()),
        }
    }

    fn flush(&mut self) -> io::Result<()> {
        self.writer.flush()
    }
}
