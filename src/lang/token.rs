use super::{Error, LineNumber, MaxValue};
use crate::error;
use std::convert::TryFrom;

#[derive(Debug, PartialEq, Clone)]
pub enum Token {
    Literal(Literal),
    Word(Word),
    Operator(Operator),
    Ident(String),
    LParen,
    RParen,
    Comma,
    Semicolon,
}

impl Token {
    /// Keywords and word operators, matched case-insensitively.
    pub fn from_word(s: &str) -> Option<Token> {
        let upper = s.to_ascii_uppercase();
        if let Some(word) = Word::from_str(&upper) {
            return Some(Token::Word(word));
        }
        match upper.as_str() {
            "AND" => Some(Token::Operator(Operator::And)),
            "OR" => Some(Token::Operator(Operator::Or)),
            "NOT" => Some(Token::Operator(Operator::Not)),
            _ => None,
        }
    }
}

impl std::fmt::Display for Token {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        use Token::*;
        match self {
            Literal(s) => write!(f, "{}", s),
            Word(s) => write!(f, "{}", s),
            Operator(s) => write!(f, "{}", s),
            Ident(s) => write!(f, "{}", s),
            LParen => write!(f, "("),
            RParen => write!(f, ")"),
            Comma => write!(f, ","),
            Semicolon => write!(f, ";"),
        }
    }
}

impl TryFrom<&Token> for LineNumber {
    type Error = Error;
    fn try_from(token: &Token) -> Result<Self, Self::Error> {
        let msg = "INVALID LINE NUMBER";
        if let Token::Literal(Literal::Integer(s)) = token {
            if let Ok(line) = s.parse::<u16>() {
                if line <= LineNumber::max_value() {
                    return Ok(Some(line));
                }
            }
        }
        Err(error!(SyntaxError; msg))
    }
}

/// Numeric literals keep the digits exactly as written; strings hold
/// the decoded text with doubled quotes already collapsed.
#[derive(Debug, PartialEq, Clone)]
pub enum Literal {
    Integer(String),
    Float(String),
    String(String),
}

impl std::fmt::Display for Literal {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        use Literal::*;
        match self {
            Integer(s) => write!(f, "{}", s),
            Float(s) => write!(f, "{}", s),
            String(s) => write!(f, "\"{}\"", s.replace('"', "\"\"")),
        }
    }
}

#[derive(Debug, PartialEq, Clone, Copy)]
pub enum Word {
    Dim,
    End,
    Goto,
    Input,
    Let,
    List,
    Load,
    New,
    Print,
    Quit,
    Rem,
    Run,
    Save,
}

impl Word {
    fn from_str(s: &str) -> Option<Word> {
        use Word::*;
        Some(match s {
            "DIM" => Dim,
            "END" => End,
            "GOTO" => Goto,
            "INPUT" => Input,
            "LET" => Let,
            "LIST" => List,
            "LOAD" => Load,
            "NEW" => New,
            "PRINT" => Print,
            "QUIT" => Quit,
            "REM" => Rem,
            "RUN" => Run,
            "SAVE" => Save,
            _ => return None,
        })
    }
}

impl std::fmt::Display for Word {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        use Word::*;
        match self {
            Dim => write!(f, "DIM"),
            End => write!(f, "END"),
            Goto => write!(f, "GOTO"),
            Input => write!(f, "INPUT"),
            Let => write!(f, "LET"),
            List => write!(f, "LIST"),
            Load => write!(f, "LOAD"),
            New => write!(f, "NEW"),
            Print => write!(f, "PRINT"),
            Quit => write!(f, "QUIT"),
            Rem => write!(f, "REM"),
            Run => write!(f, "RUN"),
            Save => write!(f, "SAVE"),
        }
    }
}

#[derive(Debug, PartialEq, Clone, Copy)]
pub enum Operator {
    Caret,
    Multiply,
    Divide,
    Modulus,
    Plus,
    Minus,
    Equal,
    NotEqual,
    Less,
    LessEqual,
    Greater,
    GreaterEqual,
    Not,
    And,
    Or,
}

impl std::fmt::Display for Operator {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        use Operator::*;
        match self {
            Caret => write!(f, "^"),
            Multiply => write!(f, "*"),
            Divide => write!(f, "/"),
            Modulus => write!(f, "%"),
            Plus => write!(f, "+"),
            Minus => write!(f, "-"),
            Equal => write!(f, "="),
            NotEqual => write!(f, "<>"),
            Less => write!(f, "<"),
            LessEqual => write!(f, "<="),
            Greater => write!(f, ">"),
            GreaterEqual => write!(f, ">="),
            Not => write!(f, "NOT"),
            And => write!(f, "AND"),
            Or => write!(f, "OR"),
        }
    }
}
