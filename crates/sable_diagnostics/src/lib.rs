//! Sable Diagnostics
//!
//! 源码定位与诊断报告系统：源码注册表、位置信息、行索引缓存，
//! 以及把诊断渲染成带源码片段文本的报告器。
//!
//! # 核心类型
//!
//! - [`SourceMap`] / [`SourceId`] - 源码注册表与句柄
//! - [`Span`] - 源码位置信息
//! - [`Diagnostic`] / [`Label`] - 诊断信息主体与次要标注
//! - [`Severity`] - 诊断级别（Info/Warning/Error）
//! - [`ReportCache`] / [`LineIndex`] - 偏移到行号的缓存
//! - [`Reporter`] - 报告器接口，[`TerminalEmitter`] 与 [`FancyEmitter`] 为其实现
//! - [`DiagnosticSink`] - 诊断收集器
//!
//! # 示例
//!
//! ```rust
//! use sable_diagnostics::{
//!     Diagnostic, Label, ReportCache, Reporter, SourceMap, Span, TerminalEmitter,
//! };
//!
//! let mut sources = SourceMap::new();
//! let id = sources.add("a = 1;\nb = @;\n", "main.sable");
//!
//! let mut cache = ReportCache::new(&sources);
//! cache.register(id);
//!
//! let diag = Diagnostic::error()
//!     .with_message("Unknown character: `@`")
//!     .with_code(Span::new(id, 11, 12))
//!     .with_label(Label::new(Span::new(id, 11, 12)).with_message("not recognized"));
//!
//! let mut emitter = TerminalEmitter::without_colors(Vec::new());
//! emitter.report(&diag, &cache).unwrap();
//!
//! let text = String::from_utf8(emitter.into_inner()).unwrap();
//! assert!(text.contains("main.sable:2:5"));
//! ```

pub mod cache;
pub mod diagnostic;
pub mod emitter;
pub mod fancy;
pub mod level;
pub mod sink;
pub mod source;
pub mod span;

// 重新导出核心类型
pub use cache::{CacheEntry, Line, LineIndex, ReportCache};
pub use diagnostic::{Diagnostic, Label};
pub use emitter::{ColorMode, Reporter, TerminalEmitter};
pub use fancy::FancyEmitter;
pub use level::Severity;
pub use sink::DiagnosticSink;
pub use source::{Source, SourceId, SourceMap};
pub use span::{Location, Span};
