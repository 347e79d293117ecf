use super::ast::Statement;
use super::{lex, parse, Error, LineNumber};

/// One line of source: optional line number, the statement text as typed
/// and its syntax tree. A numbered line without a statement is a deletion.
#[derive(Debug, PartialEq)]
pub struct Line {
    number: LineNumber,
    source: String,
    statement: Option<Statement>,
}

impl Line {
    pub fn new(s: &str) -> Result<Line, Error> {
        let tokens = lex(s)?;
        let (number, statement) = parse(&tokens)?;
        let body = match number {
            Some(_) => tokens[0].0.end,
            None => 0,
        };
        Ok(Line {
            number,
            source: s[body..].trim().to_string(),
            statement,
        })
    }

    pub fn number(&self) -> LineNumber {
        self.number
    }

    pub fn is_direct(&self) -> bool {
        self.number.is_none()
    }

    pub fn is_empty(&self) -> bool {
        self.statement.is_none()
    }

    pub fn statement(&self) -> Option<&Statement> {
        self.statement.as_ref()
    }

    pub fn source(&self) -> &str {
        &self.source
    }
}

impl std::fmt::Display for Line {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        match self.number {
            Some(number) => write!(f, "{} {}", number, self.source),
            None => write!(f, "{}", self.source),
        }
    }
}
