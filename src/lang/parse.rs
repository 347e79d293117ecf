use super::{ast::*, token::*, Column, Error, LineNumber, MaxValue};
use crate::error;
use std::convert::TryFrom;
use std::rc::Rc;

type Result<T> = std::result::Result<T, Error>;

/// Parses one lexed line. A leading integer literal is the line number.
/// A numbered line with nothing after the number yields no statement,
/// which marks the line for deletion.
pub fn parse(tokens: &[(Column, Token)]) -> Result<(LineNumber, Option<Statement>)> {
    let mut line_number = None;
    let mut tokens = tokens;
    if let Some((col, token @ Token::Literal(Literal::Integer(_)))) = tokens.first() {
        line_number = match LineNumber::try_from(token) {
            Ok(ln) => ln,
            Err(e) => return Err(e.in_column(col)),
        };
        tokens = &tokens[1..];
    }
    match Parser::parse(tokens, line_number.is_none()) {
        Err(e) => Err(e.in_line_number(line_number)),
        Ok(r) => Ok((line_number, r)),
    }
}

struct Parser<'a> {
    tokens: &'a [(Column, Token)],
    pos: usize,
    col: Column,
    direct: bool,
}

impl<'a> Parser<'a> {
    fn parse(tokens: &'a [(Column, Token)], direct: bool) -> Result<Option<Statement>> {
        let mut parse = Parser {
            tokens,
            pos: 0,
            col: 0..0,
            direct,
        };
        if parse.peek().is_none() {
            if direct {
                return Ok(Some(Statement::Nop(0..0)));
            }
            return Ok(None);
        }
        let statement = match parse.statement() {
            Ok(s) => s,
            Err(e) => return Err(e.in_column(&parse.col)),
        };
        if parse.next().is_some() {
            return Err(error!(SyntaxError, ..&parse.col; "UNEXPECTED TOKEN"));
        }
        Ok(Some(statement))
    }

    fn column(&self) -> Column {
        self.col.clone()
    }

    fn peek_column(&self) -> Column {
        match self.tokens.get(self.pos) {
            Some((col, _)) => col.clone(),
            None => self.col.end..self.col.end,
        }
    }

    fn next(&mut self) -> Option<&'a Token> {
        match self.tokens.get(self.pos) {
            Some((col, token)) => {
                self.pos += 1;
                self.col = col.clone();
                Some(token)
            }
            None => {
                let end = self.tokens.last().map_or(0, |(col, _)| col.end);
                self.col = end..end;
                None
            }
        }
    }

    fn peek(&self) -> Option<&'a Token> {
        self.tokens.get(self.pos).map(|(_, token)| token)
    }

    fn statement(&mut self) -> Result<Statement> {
        match self.peek() {
            Some(Token::Word(word)) => {
                self.next();
                Statement::for_word(self, *word)
            }
            Some(Token::Ident(_)) => self.assignment(),
            Some(_) if self.direct => {
                let column = self.peek_column();
                Ok(Statement::PrintLine(column, vec![self.expression()?]))
            }
            _ => {
                self.next();
                Err(error!(SyntaxError; "EXPECTED STATEMENT"))
            }
        }
    }

    // Implicit LET. In direct mode anything else starting with a name is
    // a bare expression to be echoed.
    fn assignment(&mut self) -> Result<Statement> {
        let start = self.pos;
        let column = self.peek_column();
        let var = self.variable()?;
        if let Some(Token::Operator(Operator::Equal)) = self.peek() {
            self.next();
            return Ok(Statement::Let(column, var, self.expression()?));
        }
        if !self.direct {
            self.next();
            return Err(error!(SyntaxError; "EXPECTED ="));
        }
        self.pos = start;
        Ok(Statement::PrintLine(column, vec![self.expression()?]))
    }

    fn expression(&mut self) -> Result<Expression> {
        fn parse(this: &mut Parser, priority: usize) -> Result<Expression> {
            let mut lhs = match this.next() {
                Some(Token::LParen) => {
                    let expr = this.expression()?;
                    this.expect(Token::RParen)?;
                    expr
                }
                Some(Token::Ident(name)) => {
                    let column = this.column();
                    match this.peek() {
                        Some(Token::LParen) => {
                            Expression::Array(column, name.as_str().into(), this.expression_list()?)
                        }
                        _ => Expression::Var(column, name.as_str().into()),
                    }
                }
                Some(Token::Literal(lit)) => Expression::for_literal(this.column(), lit)?,
                Some(Token::Operator(op)) => {
                    let column = this.column();
                    let op = match UnaryOp::for_operator(op) {
                        Some(op) => op,
                        None => return Err(error!(SyntaxError; "EXPECTED EXPRESSION")),
                    };
                    let operand = parse(this, op.operand_priority())?;
                    Expression::Unary(column, op, Box::new(operand))
                }
                _ => return Err(error!(SyntaxError; "EXPECTED EXPRESSION")),
            };
            loop {
                let op = match this.peek() {
                    Some(Token::Operator(op)) => match BinaryOp::for_operator(op) {
                        Some(op) => op,
                        None => break,
                    },
                    _ => break,
                };
                let op_priority = op.priority();
                if op_priority < priority {
                    break;
                }
                this.next();
                let column = this.column();
                let rhs = match op.associativity() {
                    Associativity::Left => parse(this, op_priority + 1)?,
                    Associativity::Right => parse(this, op_priority)?,
                };
                lhs = Expression::Binary(column, op, Box::new(lhs), Box::new(rhs));
            }
            Ok(lhs)
        }
        parse(self, 0)
    }

    fn expression_list(&mut self) -> Result<Vec<Expression>> {
        self.expect(Token::LParen)?;
        let mut v: Vec<Expression> = vec![];
        loop {
            v.push(self.expression()?);
            match self.next() {
                Some(Token::RParen) => return Ok(v),
                Some(Token::Comma) => continue,
                _ => return Err(error!(SyntaxError; "EXPECTED END OR SEPARATOR")),
            }
        }
    }

    fn variable(&mut self) -> Result<Variable> {
        let name: Ident = match self.next() {
            Some(Token::Ident(name)) => name.as_str().into(),
            _ => return Err(error!(SyntaxError; "EXPECTED IDENTIFIER")),
        };
        let column = self.column();
        match self.peek() {
            Some(Token::LParen) => Ok(Variable::Array(column, name, self.expression_list()?)),
            _ => Ok(Variable::Unary(column, name)),
        }
    }

    fn variable_list(&mut self) -> Result<Vec<Variable>> {
        let mut v = vec![self.variable()?];
        while let Some(Token::Comma) = self.peek() {
            self.next();
            v.push(self.variable()?);
        }
        Ok(v)
    }

    fn line_number(&mut self) -> Result<Option<u16>> {
        match self.peek() {
            Some(token @ Token::Literal(Literal::Integer(_))) => {
                self.next();
                LineNumber::try_from(token)
            }
            _ => Ok(None),
        }
    }

    fn file_name(&mut self) -> Result<Option<Rc<str>>> {
        match self.peek() {
            None => Ok(None),
            Some(Token::Literal(Literal::String(s))) => {
                self.next();
                Ok(Some(s.as_str().into()))
            }
            Some(_) => {
                self.next();
                Err(error!(SyntaxError; "EXPECTED FILE NAME"))
            }
        }
    }

    fn expect(&mut self, token: Token) -> Result<()> {
        if let Some(t) = self.next() {
            if *t == token {
                return Ok(());
            }
        }
        use Token::*;
        Err(error!(SyntaxError;
            match token {
                Literal(_) => {"EXPECTED LITERAL"}
                Word(_) => {"EXPECTED RESERVED WORD"}
                Operator(_) => {"EXPECTED OPERATOR"}
                Ident(_) => {"EXPECTED IDENTIFIER"}
                LParen => {"EXPECTED LEFT PARENTHESIS"}
                RParen => {"EXPECTED RIGHT PARENTHESIS"}
                Comma => {"EXPECTED COMMA"}
                Semicolon => {"EXPECTED SEMICOLON"}
            }
        ))
    }
}

impl UnaryOp {
    fn for_operator(op: &Operator) -> Option<UnaryOp> {
        match op {
            Operator::Minus => Some(UnaryOp::Negate),
            Operator::Plus => Some(UnaryOp::Plus),
            Operator::Not => Some(UnaryOp::Not),
            _ => None,
        }
    }
}

impl BinaryOp {
    fn for_operator(op: &Operator) -> Option<BinaryOp> {
        use Operator::*;
        Some(match op {
            Caret => BinaryOp::Power,
            Multiply => BinaryOp::Multiply,
            Divide => BinaryOp::Divide,
            Modulus => BinaryOp::Modulus,
            Plus => BinaryOp::Add,
            Minus => BinaryOp::Subtract,
            Equal => BinaryOp::Equal,
            NotEqual => BinaryOp::NotEqual,
            Less => BinaryOp::Less,
            LessEqual => BinaryOp::LessEqual,
            Greater => BinaryOp::Greater,
            GreaterEqual => BinaryOp::GreaterEqual,
            And => BinaryOp::And,
            Or => BinaryOp::Or,
            Not => return None,
        })
    }
}

impl Expression {
    fn for_literal(col: Column, lit: &Literal) -> Result<Expression> {
        match lit {
            Literal::Integer(s) => match s.parse() {
                Ok(n) => Ok(Expression::Integer(col, n)),
                Err(_) => Err(error!(MalformedNumber)),
            },
            Literal::Float(s) => match s.parse() {
                Ok(n) => Ok(Expression::Float(col, n)),
                Err(_) => Err(error!(MalformedNumber)),
            },
            Literal::String(s) => Ok(Expression::String(col, s.as_str().into())),
        }
    }
}

impl Statement {
    fn for_word(parse: &mut Parser, word: Word) -> Result<Statement> {
        let column = parse.column();
        use Word::*;
        match word {
            Dim => Self::r#dim(parse, column),
            End => Ok(Statement::End(column)),
            Goto => Ok(Statement::Goto(column, parse.expression()?)),
            Input => Self::r#input(parse, column),
            Let => Self::r#let(parse, column),
            List => Self::r#list(parse, column),
            Load => Ok(Statement::Load(column, parse.file_name()?)),
            New => Ok(Statement::New(column)),
            Print => Self::r#print(parse, column),
            Quit => Ok(Statement::Quit(column)),
            Rem => Ok(Statement::Nop(column)),
            Run => Ok(Statement::Run(column)),
            Save => Ok(Statement::Save(column, parse.file_name()?)),
        }
    }

    fn r#dim(parse: &mut Parser, column: Column) -> Result<Statement> {
        let vars = parse.variable_list()?;
        for var in &vars {
            if let Variable::Unary(col, _) = var {
                parse.col = col.clone();
                return Err(error!(SyntaxError; "NOT AN ARRAY"));
            }
        }
        Ok(Statement::Dim(column, vars))
    }

    fn r#input(parse: &mut Parser, column: Column) -> Result<Statement> {
        let mut prompt = None;
        if let Some(Token::Literal(Literal::String(s))) = parse.peek() {
            parse.next();
            prompt = Some(s.as_str().into());
            match parse.next() {
                Some(Token::Semicolon) | Some(Token::Comma) => {}
                _ => return Err(error!(SyntaxError; "EXPECTED SEPARATOR")),
            }
        }
        Ok(Statement::Input(column, prompt, parse.variable_list()?))
    }

    fn r#let(parse: &mut Parser, column: Column) -> Result<Statement> {
        let var = parse.variable()?;
        parse.expect(Token::Operator(Operator::Equal))?;
        let expr = parse.expression()?;
        Ok(Statement::Let(column, var, expr))
    }

    fn r#list(parse: &mut Parser, column: Column) -> Result<Statement> {
        let max = LineNumber::max_value();
        let from = parse.line_number()?;
        let range = match parse.peek() {
            Some(Token::Operator(Operator::Minus)) => {
                parse.next();
                let to = parse.line_number()?;
                from.unwrap_or(0)..=to.unwrap_or(max)
            }
            _ => match from {
                Some(n) => n..=n,
                None => 0..=max,
            },
        };
        Ok(Statement::List(column, range))
    }

    fn r#print(parse: &mut Parser, column: Column) -> Result<Statement> {
        let mut v: Vec<Expression> = vec![];
        if parse.peek().is_none() {
            return Ok(Statement::PrintLine(column, v));
        }
        loop {
            v.push(parse.expression()?);
            match parse.next() {
                None => return Ok(Statement::PrintLine(column, v)),
                Some(Token::Comma) => {}
                Some(Token::Semicolon) => {
                    if parse.peek().is_none() {
                        return Ok(Statement::Print(column, v));
                    }
                }
                Some(_) => return Err(error!(SyntaxError; "EXPECTED END OR SEPARATOR")),
            }
        }
    }
}
