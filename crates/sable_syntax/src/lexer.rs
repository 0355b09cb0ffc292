//! Lexer - 手写词法分析器
//!
//! 按字节扫描源码，惰性产生带位置的词法单元，并始终预读一个单元。
//! 词法分析从不失败：无法识别的输入被归类为 `Unknown` / `IntegerError` /
//! `FloatError`，由调用方决定如何报告。

use std::iter::FusedIterator;

use sable_diagnostics::{Location, SourceId};

use crate::token::{Token, TokenData, TokenKind};

pub struct Lexer<'src> {
    source: SourceId,
    text: &'src str,

    pos: usize,
    start: usize,

    /// 预读的下一个单元
    peeked: Option<Token<'src>>,
    /// 迭代器已经产出 Eof
    finished: bool,
}

impl<'src> Lexer<'src> {
    pub fn new(source: SourceId, text: &'src str) -> Self {
        Self {
            source,
            text,

            pos: 0,
            start: 0,

            peeked: None,
            finished: false,
        }
    }

    pub fn source(&self) -> SourceId {
        self.source
    }

    /// 取出下一个单元，并立即预读其后的单元
    ///
    /// 到达末尾后继续调用会一直返回零长度的 `Eof`。
    pub fn next_token(&mut self) -> Token<'src> {
        let token = match self.peeked.take() {
            Some(token) => token,
            None => self.lex(),
        };
        self.peeked = Some(self.lex());
        token
    }

    /// 查看下一个单元但不消费
    pub fn peek(&mut self) -> Token<'src> {
        match self.peeked {
            Some(token) => token,
            None => {
                let token = self.lex();
                self.peeked = Some(token);
                token
            }
        }
    }

    #[inline]
    fn byte(&self, offset: usize) -> Option<u8> {
        self.text.as_bytes().get(self.pos + offset).copied()
    }

    #[inline]
    fn check(&self, offset: usize, predicate: impl Fn(u8) -> bool) -> bool {
        self.byte(offset).is_some_and(predicate)
    }

    #[inline]
    fn advance(&mut self) {
        if self.pos < self.text.len() {
            self.pos += 1;
        }
    }

    #[inline]
    fn make_location(&self) -> Location {
        Location::new(self.source, self.start, self.pos)
    }

    #[inline]
    fn make_lexeme(&self) -> &'src str {
        &self.text[self.start..self.pos]
    }

    #[inline]
    fn make_token(&self, kind: TokenKind, data: Option<TokenData>) -> Token<'src> {
        Token::new(kind, self.make_location(), self.make_lexeme(), data)
    }

    fn skip_trivia(&mut self) {
        while self.check(0, |b| matches!(b, b' ' | b'\t' | b'\r' | b'\n')) {
            self.advance();
        }
    }

    fn lex_identifier(&mut self) -> Token<'src> {
        while self.check(0, |b| b.is_ascii_alphanumeric() || b == b'_') {
            self.advance();
        }
        self.make_token(TokenKind::Identifier, None)
    }

    fn lex_digits(&mut self) {
        while self.check(0, |b| b.is_ascii_digit()) {
            self.advance();
        }
    }

    fn lex_number(&mut self) -> Token<'src> {
        self.lex_digits();

        if self.check(0, |b| b == b'.') && self.check(1, |b| b.is_ascii_digit()) {
            self.advance();
            self.lex_digits();

            // 全数字的小数只会因溢出为无穷大而失败
            return match self.make_lexeme().parse::<f64>() {
                Ok(value) if value.is_finite() => {
                    self.make_token(TokenKind::Float, Some(TokenData::Float(value)))
                }
                _ => self.make_token(TokenKind::FloatError, None),
            };
        }

        match self.make_lexeme().parse::<i64>() {
            Ok(value) => self.make_token(TokenKind::Integer, Some(TokenData::Integer(value))),
            Err(_) => self.make_token(TokenKind::IntegerError, None),
        }
    }

    /// 单个无法识别的字符；非 ASCII 时吞掉完整的 UTF-8 序列
    fn lex_unknown(&mut self) -> Token<'src> {
        let width = self.text[self.start..]
            .chars()
            .next()
            .map_or(1, char::len_utf8);
        self.pos = self.start + width;
        self.make_token(TokenKind::Unknown, None)
    }

    fn lex(&mut self) -> Token<'src> {
        self.skip_trivia();

        self.start = self.pos;
        let Some(byte) = self.byte(0) else {
            return self.make_token(TokenKind::Eof, None);
        };

        let token = match byte {
            b'a'..=b'z' | b'A'..=b'Z' | b'_' => self.lex_identifier(),
            b'0'..=b'9' => self.lex_number(),
            _ => match TokenKind::from_punct(byte) {
                Some(kind) => {
                    self.advance();
                    self.make_token(kind, None)
                }
                None => self.lex_unknown(),
            },
        };

        tracing::trace!(
            kind = %token.kind,
            start = token.location.start,
            stop = token.location.stop,
            "lexed token"
        );
        token
    }
}

/// 依次产出所有单元，包括最后的 `Eof`，之后返回 `None`
impl<'src> Iterator for Lexer<'src> {
    type Item = Token<'src>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.finished {
            return None;
        }
        let token = self.next_token();
        if token.is_eof() {
            self.finished = true;
        }
        Some(token)
    }
}

impl FusedIterator for Lexer<'_> {}
