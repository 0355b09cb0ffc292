//! Lexical Error Types
//!
//! 词法错误定义：把错误种类的词法单元翻译成带位置的诊断信息。

use sable_diagnostics::{Diagnostic, Label, Location};
use thiserror::Error;

use crate::token::{Token, TokenKind};

/// 词法错误
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LexError {
    /// 无法识别的字符
    #[error("Unknown character: `{lexeme}`")]
    UnknownCharacter { lexeme: String, location: Location },

    /// 整数超出 64 位范围
    #[error("Invalid integer literal: `{lexeme}`")]
    InvalidInteger { lexeme: String, location: Location },

    /// 浮点数无法表示
    #[error("Invalid float literal: `{lexeme}`")]
    InvalidFloat { lexeme: String, location: Location },
}

impl LexError {
    /// 从错误种类的词法单元构造；其他种类返回 `None`
    pub fn from_token(token: &Token<'_>) -> Option<Self> {
        let lexeme = token.lexeme.to_string();
        let location = token.location;
        match token.kind {
            TokenKind::Unknown => Some(Self::UnknownCharacter { lexeme, location }),
            TokenKind::IntegerError => Some(Self::InvalidInteger { lexeme, location }),
            TokenKind::FloatError => Some(Self::InvalidFloat { lexeme, location }),
            _ => None,
        }
    }

    /// 获取错误发生的位置
    pub fn location(&self) -> Location {
        match self {
            Self::UnknownCharacter { location, .. } => *location,
            Self::InvalidInteger { location, .. } => *location,
            Self::InvalidFloat { location, .. } => *location,
        }
    }

    fn explanation(&self) -> &'static str {
        match self {
            Self::UnknownCharacter { .. } => "This character is not recognized.",
            Self::InvalidInteger { .. } => "This integer does not fit in 64 bits.",
            Self::InvalidFloat { .. } => "This float cannot be represented.",
        }
    }

    /// 转换为诊断信息
    pub fn to_diagnostic(&self) -> Diagnostic {
        let location = self.location();
        Diagnostic::error()
            .with_message(self.to_string())
            .with_code(location)
            .with_label(Label::new(location).with_message(self.explanation()))
    }
}
