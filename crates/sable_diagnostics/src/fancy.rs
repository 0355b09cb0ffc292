//! FancyEmitter - 基于 ariadne 的诊断输出
//!
//! 与 [`TerminalEmitter`](crate::TerminalEmitter) 渲染同一个 [`Diagnostic`]，
//! 但交给 ariadne 排版。源码同样只从 [`ReportCache`] 中已注册的条目解析。

use std::io::{self, Write};
use std::ops::Range;

use ariadne::{sources, Color, Config, Label as AriLabel, Report, ReportKind};

use crate::cache::ReportCache;
use crate::diagnostic::Diagnostic;
use crate::emitter::{summary, Reporter};
use crate::level::Severity;
use crate::span::Span;

type AriSpan = (String, Range<usize>);

/// ariadne 输出器
pub struct FancyEmitter<W: Write> {
    writer: W,
    use_colors: bool,
}

impl<W: Write> FancyEmitter<W> {
    pub fn new(writer: W, use_colors: bool) -> Self {
        Self { writer, use_colors }
    }

    pub fn into_inner(self) -> W {
        self.writer
    }

    fn kind(severity: Severity) -> ReportKind<'static> {
        match severity {
            Severity::Info => ReportKind::Custom("Info", Color::Blue),
            Severity::Warning => ReportKind::Warning,
            Severity::Error => ReportKind::Error,
        }
    }

    /// 只有已注册的源码才会参与渲染
    fn resolve(span: &Span, cache: &ReportCache<'_>) -> Option<(AriSpan, String)> {
        let entry = cache.entry(span.source)?;
        if span.stop > entry.content().len() {
            return None;
        }
        let name = entry.filename().to_string();
        Some(((name, span.range()), entry.content().to_string()))
    }
}

impl<W: Write> Reporter for FancyEmitter<W> {
    fn report(&mut self, diagnostic: &Diagnostic, cache: &ReportCache<'_>) -> io::Result<()> {
        let primary = diagnostic
            .code
            .as_ref()
            .and_then(|code| Self::resolve(code, cache));

        let (file, offset) = match &primary {
            Some(((name, range), _)) => (name.clone(), range.start),
            None => (String::from("<unknown>"), 0),
        };

        let mut builder = Report::<AriSpan>::build(Self::kind(diagnostic.severity), file.clone(), offset)
            .with_config(Config::default().with_color(self.use_colors));
        if let Some(message) = &diagnostic.message {
            builder = builder.with_message(message);
        }

        let mut texts: Vec<(String, String)> = Vec::new();
        if let Some((span, text)) = primary {
            texts.push((span.0.clone(), text));
            builder = builder.with_label(AriLabel::new(span).with_color(Color::Red));

            for label in &diagnostic.labels {
                let Some((span, text)) = Self::resolve(&label.span, cache) else {
                    continue;
                };
                if !texts.iter().any(|(name, _)| name == &span.0) {
                    texts.push((span.0.clone(), text));
                }
                let mut ari = AriLabel::new(span).with_color(Color::Blue);
                if let Some(message) = &label.message {
                    ari = ari.with_message(message);
                }
                builder = builder.with_label(ari);
            }
        }

        if texts.is_empty() {
            texts.push((file, String::new()));
        }
        builder.finish().write(sources(texts), &mut self.writer)
    }

    fn emit_summary(&mut self, error_count: usize, warning_count: usize) -> io::Result<()> {
        match summary(error_count, warning_count) {
            Some((severity, text)) if self.use_colors => {
                writeln!(self.writer, "{}: {}", severity.colored_name(), text)
            }
            Some((severity, text)) => writeln!(self.writer, "{}: {}", severity.name(), text),
            None => Ok(()),
        }
    }

    fn flush(&mut self) -> io::Result<()> {
        self.writer.flush()
    }
}
