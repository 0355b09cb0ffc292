//! Token - 词法单元
//!
//! 每个词法单元都带有精确的源码位置与原始文本

use sable_diagnostics::Location;
use std::fmt;

/// 词法单元种类
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TokenKind {
    // --- 特殊 ---
    Eof,
    /// 无法识别的字符
    Unknown,
    /// 整数溢出
    IntegerError,
    /// 浮点数解析失败
    FloatError,

    // --- 数据 ---
    Identifier,
    Integer,
    Float,

    // --- 符号 ---
    Comma,
    Semicolon,
    Plus,
    Minus,
    Star,
    Slash,
    Assign,
}

impl TokenKind {
    /// 种类名称
    pub fn name(&self) -> &'static str {
        match self {
            Self::Eof => "Eof",
            Self::Unknown => "Unknown",
            Self::IntegerError => "IntegerError",
            Self::FloatError => "FloatError",
            Self::Identifier => "Identifier",
            Self::Integer => "Integer",
            Self::Float => "Float",
            Self::Comma => "Comma",
            Self::Semicolon => "Semicolon",
            Self::Plus => "Plus",
            Self::Minus => "Minus",
            Self::Star => "Star",
            Self::Slash => "Slash",
            Self::Assign => "Assign",
        }
    }

    /// 单字符符号对应的种类
    pub fn from_punct(byte: u8) -> Option<Self> {
        match byte {
            b',' => Some(Self::Comma),
            b';' => Some(Self::Semicolon),
            b'+' => Some(Self::Plus),
            b'-' => Some(Self::Minus),
            b'*' => Some(Self::Star),
            b'/' => Some(Self::Slash),
            b'=' => Some(Self::Assign),
            _ => None,
        }
    }

    /// 是否为词法错误
    pub fn is_error(&self) -> bool {
        matches!(self, Self::Unknown | Self::IntegerError | Self::FloatError)
    }
}

impl fmt::Display for TokenKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

/// 数值字面量的解码结果
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum TokenData {
    Integer(i64),
    Float(f64),
}

/// 词法单元
///
/// `data` 只在 `Integer` / `Float` 上存在，错误种类保留原始文本而不带数值。
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Token<'src> {
    pub kind: TokenKind,
    pub location: Location,
    pub lexeme: &'src str,
    pub data: Option<TokenData>,
}

impl<'src> Token<'src> {
    pub fn new(
        kind: TokenKind,
        location: Location,
        lexeme: &'src str,
        data: Option<TokenData>,
    ) -> Self {
        Self {
            kind,
            location,
            lexeme,
            data,
        }
    }

    pub fn is_eof(&self) -> bool {
        self.kind == TokenKind::Eof
    }

    pub fn as_integer(&self) -> Option<i64> {
        match self.data {
            Some(TokenData::Integer(value)) => Some(value),
            _ => None,
        }
    }

    pub fn as_float(&self) -> Option<f64> {
        match self.data {
            Some(TokenData::Float(value)) => Some(value),
            _ => None,
        }
    }
}

impl fmt::Display for Token<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} '{}' {}..{}",
            self.kind, self.lexeme, self.location.start, self.location.stop
        )
    }
}
