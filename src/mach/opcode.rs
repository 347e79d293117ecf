use super::Val;
use std::ops::RangeInclusive;
use std::rc::Rc;

/// ## Virtual machine instruction set
///
/// The BASIC virtual machine has no registers.
/// Every operation is performed on the stack.
///
/// For example: `LET A=3*B` compiles to `[Literal(3), Push(B), Mul, Pop(A)]`
///
/// See <https://en.wikipedia.org/wiki/Reverse_Polish_notation>

#[derive(Clone, PartialEq)]
pub enum Opcode {
    // *** Stack manipulation
    /// Push literal value on to the stack.
    Literal(Val),
    /// Push stack value of named variable. Infallible.
    Push(Rc<str>),
    /// Pop the given number of indices, then push the array element.
    PushArr(Rc<str>, usize),
    /// Pop stack value to named variable. This is the `LET` statement.
    Pop(Rc<str>),
    /// Pop the given number of indices, then pop the value to store.
    PopArr(Rc<str>, usize),
    /// Pop the given number of bounds and declare the array.
    DimArr(Rc<str>, usize),

    // *** Branch control
    /// Pop a line number and jump there. Only valid while running.
    Jump,
    End,
    Run,

    // *** Statements
    Input(Option<Rc<str>>, usize),
    List(RangeInclusive<u16>),
    Load(Option<Rc<str>>),
    New,
    NewLine,
    Print,
    Quit,
    Save(Option<Rc<str>>),

    // *** Expression operations
    Neg,
    Pos,
    Exp,
    Mul,
    Div,
    Mod,
    Add,
    Sub,
    Eq,
    NotEq,
    Lt,
    LtEq,
    Gt,
    GtEq,
    Not,
    And,
    Or,
}

impl std::fmt::Debug for Opcode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.to_string())
    }
}

impl std::fmt::Display for Opcode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        use Opcode::*;
        match self {
            Literal(val) => match val {
                Val::String(s) => write!(f, "Literal(\"{}\")", s),
                _ => write!(f, "Literal({})", val),
            },
            Push(s) => write!(f, "Push({})", s),
            PushArr(s, n) => write!(f, "PushArr({}, {})", s, n),
            Pop(s) => write!(f, "Pop({})", s),
            PopArr(s, n) => write!(f, "PopArr({}, {})", s, n),
            DimArr(s, n) => write!(f, "DimArr({}, {})", s, n),

            Jump => write!(f, "Jump"),
            End => write!(f, "End"),
            Run => write!(f, "Run"),

            Input(Some(s), n) => write!(f, "Input(\"{}\", {})", s, n),
            Input(None, n) => write!(f, "Input({})", n),
            List(range) => write!(f, "List({}-{})", range.start(), range.end()),
            Load(Some(s)) => write!(f, "Load(\"{}\")", s),
            Load(None) => write!(f, "Load"),
            New => write!(f, "New"),
            NewLine => write!(f, "NewLine"),
            Print => write!(f, "Print"),
            Quit => write!(f, "Quit"),
            Save(Some(s)) => write!(f, "Save(\"{}\")", s),
            Save(None) => write!(f, "Save"),

            Neg => write!(f, "Neg"),
            Pos => write!(f, "Pos"),
            Exp => write!(f, "Exp"),
            Mul => write!(f, "Mul"),
            Div => write!(f, "Div"),
            Mod => write!(f, "Mod"),
            Add => write!(f, "Add"),
            Sub => write!(f, "Sub"),
            Eq => write!(f, "Eq"),
            NotEq => write!(f, "NotEq"),
            Lt => write!(f, "Lt"),
            LtEq => write!(f, "LtEq"),
            Gt => write!(f, "Gt"),
            GtEq => write!(f, "GtEq"),
            Not => write!(f, "Not"),
            And => write!(f, "And"),
            Or => write!(f, "Or"),
        }
    }
}

/// A compiled statement. Holds no reference to any runtime so the same
/// action can be executed again, or by a different session.
#[derive(Clone, PartialEq)]
pub struct Action {
    ops: Rc<[Opcode]>,
}

impl Action {
    pub fn new(ops: Vec<Opcode>) -> Action {
        Action { ops: ops.into() }
    }

    pub fn ops(&self) -> &[Opcode] {
        &self.ops
    }
}

impl std::fmt::Debug for Action {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:?}", self.ops)
    }
}
