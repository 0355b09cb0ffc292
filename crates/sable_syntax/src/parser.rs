//! Parser Entry Point
//!
//! 目前没有语法规则：只消费整个单元流，把词法错误报告到诊断收集器。

use sable_diagnostics::DiagnosticSink;

use crate::lex_error::LexError;
use crate::lexer::Lexer;

/// 解析结果
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParseStatus {
    Ok,
    Failed,
}

impl ParseStatus {
    pub fn is_ok(self) -> bool {
        self == Self::Ok
    }
}

pub struct Parser<'src, 's> {
    lexer: Lexer<'src>,
    sink: &'s mut DiagnosticSink,
}

impl<'src, 's> Parser<'src, 's> {
    pub fn new(lexer: Lexer<'src>, sink: &'s mut DiagnosticSink) -> Self {
        Self { lexer, sink }
    }

    /// 读到 `Eof` 为止，每个错误单元产生一条诊断
    pub fn parse(&mut self) -> ParseStatus {
        let mut failed = false;
        loop {
            let token = self.lexer.next_token();
            if token.is_eof() {
                break;
            }
            if let Some(error) = LexError::from_token(&token) {
                tracing::debug!(%error, location = %token.location, "lexical error");
                self.sink.add(error.to_diagnostic());
                failed = true;
            }
        }

        if failed {
            ParseStatus::Failed
        } else {
            ParseStatus::Ok
        }
    }
}
