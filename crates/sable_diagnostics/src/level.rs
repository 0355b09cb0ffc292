//! Severity - 诊断级别
//!
//! 只决定诊断头部的前缀，不影响控制流

use colored::*;
use std::fmt;

/// 诊断级别
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Severity {
    /// 信息 - 提示性信息
    Info,
    /// 警告 - 不阻止编译但应注意
    Warning,
    /// 错误 - 阻止编译
    Error,
}

impl Severity {
    /// 获取级别名称
    pub fn name(&self) -> &'static str {
        match self {
            Self::Info => "Info",
            Self::Warning => "Warning",
            Self::Error => "Error",
        }
    }

    /// 获取带颜色的级别名称
    pub fn colored_name(&self) -> ColoredString {
        match self {
            Self::Info => self.name().blue().bold(),
            Self::Warning => self.name().yellow().bold(),
            Self::Error => self.name().red().bold(),
        }
    }

    /// 是否为错误
    pub fn is_error(&self) -> bool {
        matches!(self, Self::Error)
    }
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_level_name() {
        assert_eq!(Severity::Info.name(), "Info");
        assert_eq!(Severity::Warning.name(), "Warning");
        assert_eq!(Severity::Error.name(), "Error");
    }

    #[test]
    fn test_is_error() {
        assert!(Severity::Error.is_error());
        assert!(!Severity::Warning.is_error());
        assert!(!Severity::Info.is_error());
    }

    #[test]
    fn test_display() {
        assert_eq!(format!("{}", Severity::Error), "Error");
        assert_eq!(format!("{}", Severity::Warning), "Warning");
    }
}
