//! Sable Syntax
//!
//! 词法单元、手写词法分析器，以及把词法错误转成诊断的解析入口。

pub mod lex_error;
pub mod lexer;
pub mod parser;
pub mod token;

pub use lex_error::LexError;
pub use lexer::Lexer;
pub use parser::{ParseStatus, Parser};
pub use token::{Token, TokenData, TokenKind};

#[cfg(test)]
mod tests {
    use super::*;
    use sable_diagnostics::SourceMap;

    #[test]
    fn test_lexer_basic() {
        let code = "var a = 10 + 2.5;";
        let id = SourceMap::new().add(code, "main.sable");
        let mut lexer = Lexer::new(id, code);

        let mut next = || {
            let token = lexer.next_token();
            (token.kind, token.lexeme)
        };
        assert_eq!(next(), (TokenKind::Identifier, "var"));
        assert_eq!(next(), (TokenKind::Identifier, "a"));
        assert_eq!(next(), (TokenKind::Assign, "="));
        assert_eq!(next(), (TokenKind::Integer, "10"));
        assert_eq!(next(), (TokenKind::Plus, "+"));
        assert_eq!(next(), (TokenKind::Float, "2.5"));
        assert_eq!(next(), (TokenKind::Semicolon, ";"));
        assert_eq!(next(), (TokenKind::Eof, ""));
    }
}
