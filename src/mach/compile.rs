use super::{Action, Opcode, Stack, Val};
use crate::error;
use crate::lang::ast::{self, AcceptVisitor};
use crate::lang::{Column, Error};
use std::rc::Rc;

type Result<T> = std::result::Result<T, Error>;

/// Translate one statement into an `Action`.
///
/// Names are resolved and values computed only when the action runs,
/// since a variable's type is whatever its last assignment produced.
pub fn compile(statement: &ast::Statement) -> Result<Action> {
    Visitor::compile(statement)
}

struct Visitor {
    comp: Compiler,
    error: Option<Error>,
}

impl Visitor {
    fn compile(statement: &ast::Statement) -> Result<Action> {
        let mut this = Visitor {
            comp: Compiler::new(),
            error: None,
        };
        statement.accept(&mut this);
        match this.error {
            Some(error) => Err(error),
            None => Ok(Action::new(this.comp.prog.into_vec())),
        }
    }

    fn check(&mut self, result: Result<()>) {
        if let Err(error) = result {
            if self.error.is_none() {
                self.error = Some(error);
            }
        }
    }
}

impl ast::Visitor for Visitor {
    fn visit_statement(&mut self, statement: &ast::Statement) {
        if self.error.is_some() {
            return;
        }
        let result = self.comp.statement(statement);
        debug_assert!(result.is_err() || self.comp.var.is_empty());
        debug_assert!(result.is_err() || self.comp.expr.is_empty());
        self.check(result);
    }
    fn visit_variable(&mut self, var: &ast::Variable) {
        if self.error.is_some() {
            return;
        }
        let result = self.comp.variable(var);
        self.check(result);
    }
    fn visit_expression(&mut self, expression: &ast::Expression) {
        if self.error.is_some() {
            return;
        }
        let mut prog: Stack<Opcode> = Stack::new("COMPILED EXPRESSION TOO LARGE");
        let result = match self.comp.expression(&mut prog, expression) {
            Ok(col) => self
                .comp
                .expr
                .push((col.clone(), prog))
                .map_err(|e| e.in_column(&col)),
            Err(e) => Err(e),
        };
        self.check(result);
    }
}

/// Assignment target with its index expressions already compiled.
struct Lvalue {
    col: Column,
    name: Rc<str>,
    indices: Option<(usize, Stack<Opcode>)>,
}

struct Compiler {
    var: Stack<Lvalue>,
    expr: Stack<(Column, Stack<Opcode>)>,
    prog: Stack<Opcode>,
}

impl Compiler {
    fn new() -> Compiler {
        Compiler {
            var: Stack::new("COMPILER VARIABLE OVERFLOW"),
            expr: Stack::new("COMPILER EXPRESSION OVERFLOW"),
            prog: Stack::new("PROGRAM TOO LARGE"),
        }
    }

    fn pop_indices(&mut self, len: usize) -> Result<Stack<Opcode>> {
        let mut ops: Stack<Opcode> = Stack::new("COMPILED EXPRESSION TOO LARGE");
        for (_col, mut sub) in self.expr.pop_n(len)? {
            ops.append(&mut sub)?;
        }
        Ok(ops)
    }

    fn variable(&mut self, var: &ast::Variable) -> Result<()> {
        use ast::Variable;
        let lvalue = match var {
            Variable::Unary(col, name) => Lvalue {
                col: col.clone(),
                name: name.clone(),
                indices: None,
            },
            Variable::Array(col, name, vec_expr) => Lvalue {
                col: col.clone(),
                name: name.clone(),
                indices: Some((vec_expr.len(), self.pop_indices(vec_expr.len())?)),
            },
        };
        self.var.push(lvalue)
    }

    fn expression(&mut self, prog: &mut Stack<Opcode>, expr: &ast::Expression) -> Result<Column> {
        fn literal(prog: &mut Stack<Opcode>, col: &Column, val: Val) -> Result<Column> {
            prog.push(Opcode::Literal(val))?;
            Ok(col.clone())
        }
        fn unary(this: &mut Compiler, prog: &mut Stack<Opcode>, op: Opcode) -> Result<()> {
            let (_, mut ops) = this.expr.pop()?;
            prog.append(&mut ops)?;
            prog.push(op)
        }
        fn binary(this: &mut Compiler, prog: &mut Stack<Opcode>, op: Opcode) -> Result<()> {
            let (_, mut rhs) = this.expr.pop()?;
            let (_, mut lhs) = this.expr.pop()?;
            prog.append(&mut lhs)?;
            prog.append(&mut rhs)?;
            prog.push(op)
        }
        use ast::{BinaryOp, Expression, UnaryOp};
        match expr {
            Expression::Integer(col, val) => literal(prog, col, Val::Integer(*val)),
            Expression::Float(col, val) => literal(prog, col, Val::Float(*val)),
            Expression::String(col, val) => literal(prog, col, Val::String(val.clone())),
            Expression::Var(col, name) => {
                prog.push(Opcode::Push(name.clone()))?;
                Ok(col.clone())
            }
            Expression::Array(col, name, vec_expr) => {
                let mut ops = self.pop_indices(vec_expr.len())?;
                prog.append(&mut ops)?;
                prog.push(Opcode::PushArr(name.clone(), vec_expr.len()))?;
                Ok(col.clone())
            }
            Expression::Unary(col, op, _) => {
                let opcode = match op {
                    UnaryOp::Negate => Opcode::Neg,
                    UnaryOp::Plus => Opcode::Pos,
                    UnaryOp::Not => Opcode::Not,
                };
                unary(self, prog, opcode)?;
                Ok(col.clone())
            }
            Expression::Binary(col, op, ..) => {
                let opcode = match op {
                    BinaryOp::Power => Opcode::Exp,
                    BinaryOp::Multiply => Opcode::Mul,
                    BinaryOp::Divide => Opcode::Div,
                    BinaryOp::Modulus => Opcode::Mod,
                    BinaryOp::Add => Opcode::Add,
                    BinaryOp::Subtract => Opcode::Sub,
                    BinaryOp::Equal => Opcode::Eq,
                    BinaryOp::NotEqual => Opcode::NotEq,
                    BinaryOp::Less => Opcode::Lt,
                    BinaryOp::LessEqual => Opcode::LtEq,
                    BinaryOp::Greater => Opcode::Gt,
                    BinaryOp::GreaterEqual => Opcode::GtEq,
                    BinaryOp::And => Opcode::And,
                    BinaryOp::Or => Opcode::Or,
                };
                binary(self, prog, opcode)?;
                Ok(col.clone())
            }
        }
    }

    fn statement(&mut self, statement: &ast::Statement) -> Result<()> {
        use ast::Statement;
        match statement {
            Statement::Dim(_, vec_var) => self.r#dim(vec_var.len()),
            Statement::End(_) => self.prog.push(Opcode::End),
            Statement::Goto(..) => self.r#goto(),
            Statement::Input(_, prompt, vec_var) => self.r#input(prompt, vec_var.len()),
            Statement::Let(..) => self.r#let(),
            Statement::List(_, range) => self.prog.push(Opcode::List(range.clone())),
            Statement::Load(_, name) => self.prog.push(Opcode::Load(name.clone())),
            Statement::New(_) => self.prog.push(Opcode::New),
            Statement::Nop(_) => Ok(()),
            Statement::Print(_, vec_expr) => self.r#print(vec_expr.len()),
            Statement::PrintLine(_, vec_expr) => {
                self.r#print(vec_expr.len())?;
                self.prog.push(Opcode::NewLine)
            }
            Statement::Quit(_) => self.prog.push(Opcode::Quit),
            Statement::Run(_) => self.prog.push(Opcode::Run),
            Statement::Save(_, name) => self.prog.push(Opcode::Save(name.clone())),
        }
    }

    fn store(&mut self, lvalue: Lvalue) -> Result<()> {
        match lvalue.indices {
            None => self.prog.push(Opcode::Pop(lvalue.name)),
            Some((len, mut ops)) => {
                self.prog.append(&mut ops)?;
                self.prog.push(Opcode::PopArr(lvalue.name, len))
            }
        }
    }

    fn r#dim(&mut self, len: usize) -> Result<()> {
        for lvalue in self.var.pop_n(len)? {
            match lvalue.indices {
                None => return Err(error!(SyntaxError, ..&lvalue.col; "NOT AN ARRAY")),
                Some((len, mut ops)) => {
                    self.prog.append(&mut ops)?;
                    self.prog.push(Opcode::DimArr(lvalue.name, len))?;
                }
            }
        }
        Ok(())
    }

    fn r#goto(&mut self) -> Result<()> {
        let (_, mut ops) = self.expr.pop()?;
        self.prog.append(&mut ops)?;
        self.prog.push(Opcode::Jump)
    }

    fn r#input(&mut self, prompt: &Option<Rc<str>>, len: usize) -> Result<()> {
        let vars = self.var.pop_n(len)?;
        self.prog.push(Opcode::Input(prompt.clone(), len))?;
        for lvalue in vars {
            self.store(lvalue)?;
        }
        Ok(())
    }

    fn r#let(&mut self) -> Result<()> {
        let (_, mut ops) = self.expr.pop()?;
        let lvalue = self.var.pop()?;
        self.prog.append(&mut ops)?;
        self.store(lvalue)
    }

    fn r#print(&mut self, len: usize) -> Result<()> {
        for (_, mut ops) in self.expr.pop_n(len)? {
            self.prog.append(&mut ops)?;
            self.prog.push(Opcode::Print)?;
        }
        Ok(())
    }
}
