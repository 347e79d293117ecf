use super::Column;
use std::ops::RangeInclusive;
use std::rc::Rc;

pub type Ident = Rc<str>;

#[derive(Debug, PartialEq)]
pub enum Statement {
    Dim(Column, Vec<Variable>),
    End(Column),
    Goto(Column, Expression),
    Input(Column, Option<Rc<str>>, Vec<Variable>),
    Let(Column, Variable, Expression),
    List(Column, RangeInclusive<u16>),
    Load(Column, Option<Rc<str>>),
    New(Column),
    Nop(Column),
    Print(Column, Vec<Expression>),
    PrintLine(Column, Vec<Expression>),
    Quit(Column),
    Run(Column),
    Save(Column, Option<Rc<str>>),
}

#[derive(Debug, PartialEq)]
pub enum Variable {
    Unary(Column, Ident),
    Array(Column, Ident, Vec<Expression>),
}

#[derive(Debug, PartialEq)]
pub enum Expression {
    Integer(Column, i64),
    Float(Column, f64),
    String(Column, Rc<str>),
    Var(Column, Ident),
    Array(Column, Ident, Vec<Expression>),
    Unary(Column, UnaryOp, Box<Expression>),
    Binary(Column, BinaryOp, Box<Expression>, Box<Expression>),
}

#[derive(Debug, PartialEq, Clone, Copy)]
pub enum UnaryOp {
    Negate,
    Plus,
    Not,
}

#[derive(Debug, PartialEq, Clone, Copy)]
pub enum BinaryOp {
    Power,
    Multiply,
    Divide,
    Modulus,
    Add,
    Subtract,
    Equal,
    NotEqual,
    Less,
    LessEqual,
    Greater,
    GreaterEqual,
    And,
    Or,
}

#[derive(Debug, PartialEq, Clone, Copy)]
pub enum Associativity {
    Left,
    Right,
}

impl UnaryOp {
    /// Lowest binary priority allowed inside the operand.
    /// `-2^2` is `-(2^2)` and `NOT A = B` is `NOT (A = B)`.
    pub fn operand_priority(&self) -> usize {
        match self {
            UnaryOp::Negate | UnaryOp::Plus => 7,
            UnaryOp::Not => 3,
        }
    }
}

impl BinaryOp {
    pub fn priority(&self) -> usize {
        use BinaryOp::*;
        match self {
            Or => 1,
            And => 2,
            Equal | NotEqual | Less | LessEqual | Greater | GreaterEqual => 4,
            Add | Subtract => 5,
            Multiply | Divide | Modulus => 6,
            Power => 8,
        }
    }

    pub fn associativity(&self) -> Associativity {
        match self {
            BinaryOp::Power => Associativity::Right,
            _ => Associativity::Left,
        }
    }
}

impl Expression {
    pub fn column(&self) -> Column {
        use Expression::*;
        match self {
            Integer(col, ..)
            | Float(col, ..)
            | String(col, ..)
            | Var(col, ..)
            | Array(col, ..)
            | Unary(col, ..)
            | Binary(col, ..) => col.clone(),
        }
    }
}

pub trait Visitor {
    fn visit_statement(&mut self, _: &Statement) {}
    fn visit_variable(&mut self, _: &Variable) {}
    fn visit_expression(&mut self, _: &Expression) {}
}

pub trait AcceptVisitor {
    fn accept<V: Visitor>(&self, visitor: &mut V);
}

impl AcceptVisitor for Variable {
    fn accept<V: Visitor>(&self, visitor: &mut V) {
        if let Variable::Array(_, _, vec_expr) = self {
            for expr in vec_expr {
                expr.accept(visitor);
            }
        }
        visitor.visit_variable(self)
    }
}

impl AcceptVisitor for Statement {
    fn accept<V: Visitor>(&self, visitor: &mut V) {
        use Statement::*;
        match self {
            End(_) | List(..) | Load(..) | New(_) | Nop(_) | Quit(_) | Run(_) | Save(..) => {}
            Dim(_, vec_var) | Input(_, _, vec_var) => {
                for var in vec_var {
                    var.accept(visitor);
                }
            }
            Goto(_, expr) => {
                expr.accept(visitor);
            }
            Let(_, var, expr) => {
                var.accept(visitor);
                expr.accept(visitor);
            }
            Print(_, vec_expr) | PrintLine(_, vec_expr) => {
                for expr in vec_expr {
                    expr.accept(visitor);
                }
            }
        }
        visitor.visit_statement(self)
    }
}

impl AcceptVisitor for Expression {
    fn accept<V: Visitor>(&self, visitor: &mut V) {
        use Expression::*;
        match self {
            Integer(..) | Float(..) | String(..) | Var(..) => {}
            Array(_, _, vec_expr) => {
                for expr in vec_expr {
                    expr.accept(visitor);
                }
            }
            Unary(_, _, expr) => expr.accept(visitor),
            Binary(_, _, expr1, expr2) => {
                expr1.accept(visitor);
                expr2.accept(visitor);
            }
        }
        visitor.visit_expression(self)
    }
}
