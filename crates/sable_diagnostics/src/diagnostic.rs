//! Diagnostic - 诊断信息
//!
//! 表示一个编译器诊断（错误、警告等）

use crate::level::Severity;
use crate::span::Span;

/// 次要标注：指向主位置以外的一段代码
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Label {
    pub span: Span,
    pub message: Option<String>,
}

impl Label {
    /// 创建新的标注
    pub fn new(span: Span) -> Self {
        Self {
            span,
            message: None,
        }
    }

    /// 添加标注消息
    pub fn with_message(mut self, message: impl Into<String>) -> Self {
        self.message = Some(message.into());
        self
    }
}

/// 诊断信息
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Diagnostic {
    /// 诊断级别
    pub severity: Severity,
    /// 主要消息
    pub message: Option<String>,
    /// 主要源码位置，决定头部与第一段代码片段
    pub code: Option<Span>,
    /// 次要标注，按添加顺序渲染
    pub labels: Vec<Label>,
}

impl Diagnostic {
    /// 创建新的诊断
    pub fn new(severity: Severity) -> Self {
        Self {
            severity,
            message: None,
            code: None,
            labels: Vec::new(),
        }
    }

    /// 创建错误诊断
    pub fn error() -> Self {
        Self::new(Severity::Error)
    }

    /// 创建警告诊断
    pub fn warning() -> Self {
        Self::new(Severity::Warning)
    }

    /// 创建信息诊断
    pub fn info() -> Self {
        Self::new(Severity::Info)
    }

    /// 设置消息
    pub fn with_message(mut self, message: impl Into<String>) -> Self {
        self.message = Some(message.into());
        self
    }

    /// 设置主要位置
    pub fn with_code(mut self, span: Span) -> Self {
        self.code = Some(span);
        self
    }

    /// 添加标注
    pub fn with_label(mut self, label: Label) -> Self {
        self.labels.push(label);
        self
    }

    pub fn is_error(&self) -> bool {
        self.severity.is_error()
    }
}
