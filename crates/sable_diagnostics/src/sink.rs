//! DiagnosticSink - 诊断收集器
//!
//! 解析阶段往里追加诊断，渲染阶段一次性交给 [`Reporter`] 输出。

use std::io;

use crate::cache::ReportCache;
use crate::diagnostic::Diagnostic;
use crate::emitter::Reporter;
use crate::level::Severity;

/// 按产生顺序保存的诊断列表
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct DiagnosticSink {
    diagnostics: Vec<Diagnostic>,
}

impl DiagnosticSink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&mut self, diagnostic: Diagnostic) {
        self.diagnostics.push(diagnostic);
    }

    pub fn has_errors(&self) -> bool {
        self.diagnostics.iter().any(Diagnostic::is_error)
    }

    /// 某一级别的诊断数量
    pub fn count(&self, severity: Severity) -> usize {
        self.diagnostics
            .iter()
            .filter(|d| d.severity == severity)
            .count()
    }

    pub fn error_count(&self) -> usize {
        self.count(Severity::Error)
    }

    pub fn warning_count(&self) -> usize {
        self.count(Severity::Warning)
    }

    pub fn diagnostics(&self) -> &[Diagnostic] {
        &self.diagnostics
    }

    pub fn into_diagnostics(self) -> Vec<Diagnostic> {
        self.diagnostics
    }

    pub fn len(&self) -> usize {
        self.diagnostics.len()
    }

    pub fn is_empty(&self) -> bool {
        self.diagnostics.is_empty()
    }

    /// 依次输出全部诊断，再输出统计行
    pub fn report(&self, reporter: &mut dyn Reporter, cache: &ReportCache<'_>) -> io::Result<()> {
        reporter.report_all(&self.diagnostics, cache)?;
        reporter.emit_summary(self.error_count(), self.warning_count())?;
        reporter.flush()
    }
}

impl Extend<Diagnostic> for DiagnosticSink {
    fn extend<T: IntoIterator<Item = Diagnostic>>(&mut self, iter: T) {
        self.diagnostics.extend(iter);
    }
}

impl FromIterator<Diagnostic> for DiagnosticSink {
    fn from_iter<T: IntoIterator<Item = Diagnostic>>(iter: T) -> Self {
        Self {
            diagnostics: iter.into_iter().collect(),
        }
    }
}
