use super::{token::*, Column, Error};
use crate::error;
use std::iter::Peekable;
use std::str::CharIndices;

type Result<T> = std::result::Result<T, Error>;

/// Splits one line of source into tokens tagged with their byte columns.
/// Any leading line number comes back as an ordinary integer literal.
pub fn lex(s: &str) -> Result<Vec<(Column, Token)>> {
    BasicLexer {
        chars: s.char_indices().peekable(),
        len: s.len(),
        remark: false,
    }
    .collect()
}

fn is_basic_whitespace(c: char) -> bool {
    c == ' ' || c == '\t' || c == '\r' || c == '\n'
}

fn is_basic_digit(c: char) -> bool {
    c.is_ascii_digit()
}

fn is_basic_alphabetic(c: char) -> bool {
    c.is_ascii_alphabetic() || c == '_'
}

fn is_basic_alphanumeric(c: char) -> bool {
    is_basic_alphabetic(c) || is_basic_digit(c)
}

// Each recognizer leaves the input untouched when it returns None.
trait Tokenizers<'a> {
    fn chars(&mut self) -> &mut Peekable<CharIndices<'a>>;
    fn offset(&mut self) -> usize;

    fn peek_char(&mut self) -> Option<char> {
        self.chars().peek().map(|&(_, ch)| ch)
    }

    fn punctuation(&mut self) -> Option<Token> {
        let token = match self.peek_char()? {
            '(' => Token::LParen,
            ')' => Token::RParen,
            ',' => Token::Comma,
            ';' => Token::Semicolon,
            '?' => Token::Word(Word::Print),
            _ => return None,
        };
        self.chars().next();
        Some(token)
    }

    fn operator(&mut self) -> Option<Token> {
        use Operator::*;
        let op = match self.peek_char()? {
            '^' => Caret,
            '*' => Multiply,
            '/' => Divide,
            '%' => Modulus,
            '+' => Plus,
            '-' => Minus,
            '=' => Equal,
            '<' => Less,
            '>' => Greater,
            _ => return None,
        };
        self.chars().next();
        let op = match (op, self.peek_char()) {
            (Less, Some('=')) => LessEqual,
            (Less, Some('>')) => NotEqual,
            (Greater, Some('=')) => GreaterEqual,
            _ => return Some(Token::Operator(op)),
        };
        self.chars().next();
        Some(Token::Operator(op))
    }

    fn string(&mut self) -> Result<Option<Token>> {
        if self.peek_char() != Some('"') {
            return Ok(None);
        }
        let start = self.offset();
        self.chars().next();
        let mut s = String::new();
        loop {
            match self.chars().next() {
                Some((_, '"')) => {
                    if self.peek_char() == Some('"') {
                        self.chars().next();
                        s.push('"');
                        continue;
                    }
                    return Ok(Some(Token::Literal(Literal::String(s))));
                }
                Some((_, ch)) => s.push(ch),
                None => {
                    let col = start..self.offset();
                    return Err(error!(UnterminatedString, ..&col));
                }
            }
        }
    }

    fn number(&mut self) -> Result<Option<Token>> {
        match self.peek_char() {
            Some(ch) if is_basic_digit(ch) => {}
            _ => return Ok(None),
        }
        let start = self.offset();
        let mut s = String::new();
        while let Some(ch) = self.peek_char() {
            if !is_basic_digit(ch) {
                break;
            }
            s.push(ch);
            self.chars().next();
        }
        if self.peek_char() != Some('.') {
            if s.parse::<i64>().is_ok() {
                return Ok(Some(Token::Literal(Literal::Integer(s))));
            }
            return Ok(Some(Token::Literal(Literal::Float(s))));
        }
        s.push('.');
        self.chars().next();
        let mut fraction = 0;
        while let Some(ch) = self.peek_char() {
            if !is_basic_digit(ch) {
                break;
            }
            s.push(ch);
            self.chars().next();
            fraction += 1;
        }
        if fraction == 0 {
            let col = start..self.offset();
            return Err(error!(MalformedNumber, ..&col; "EXPECTED DIGITS AFTER DECIMAL POINT"));
        }
        Ok(Some(Token::Literal(Literal::Float(s))))
    }

    fn alphabetic(&mut self) -> Option<Token> {
        match self.peek_char() {
            Some(ch) if is_basic_alphabetic(ch) => {}
            _ => return None,
        }
        let mut s = String::new();
        while let Some(ch) = self.peek_char() {
            if !is_basic_alphanumeric(ch) {
                break;
            }
            s.push(ch);
            self.chars().next();
        }
        match Token::from_word(&s) {
            Some(token) => Some(token),
            None => Some(Token::Ident(s)),
        }
    }
}

struct BasicLexer<'a> {
    chars: Peekable<CharIndices<'a>>,
    len: usize,
    remark: bool,
}

impl<'a> Tokenizers<'a> for BasicLexer<'a> {
    fn chars(&mut self) -> &mut Peekable<CharIndices<'a>> {
        &mut self.chars
    }

    fn offset(&mut self) -> usize {
        match self.chars.peek() {
            Some(&(index, _)) => index,
            None => self.len,
        }
    }
}

impl<'a> BasicLexer<'a> {
    fn recognize(&mut self) -> Result<Token> {
        if let Some(token) = self.punctuation() {
            return Ok(token);
        }
        if let Some(token) = self.operator() {
            return Ok(token);
        }
        if let Some(token) = self.string()? {
            return Ok(token);
        }
        if let Some(token) = self.number()? {
            return Ok(token);
        }
        if let Some(token) = self.alphabetic() {
            return Ok(token);
        }
        let start = self.offset();
        self.chars.next();
        let col = start..self.offset();
        Err(error!(UnrecognizedCharacter, ..&col))
    }
}

impl<'a> Iterator for BasicLexer<'a> {
    type Item = Result<(Column, Token)>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.remark {
            return None;
        }
        while let Some(ch) = self.peek_char() {
            if !is_basic_whitespace(ch) {
                break;
            }
            self.chars.next();
        }
        self.chars.peek()?;
        let start = self.offset();
        match self.recognize() {
            Ok(token) => {
                if let Token::Word(Word::Rem) = token {
                    self.remark = true;
                }
                Some(Ok((start..self.offset(), token)))
            }
            Err(error) => {
                self.remark = true;
                Some(Err(error))
            }
        }
    }
}
