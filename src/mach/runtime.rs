use super::{compile, Action, Console, Opcode, Operation, Program, Repository, Stack, Val, Var};
use crate::error;
use crate::lang::{Error, Line, LineNumber};
use std::convert::TryFrom;
use std::ops::RangeInclusive;
use std::rc::Rc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

type Result<T> = std::result::Result<T, Error>;

/// ## Session lifecycle
///
/// `Closing` is a run in progress after `QUIT`; it becomes `Closed`
/// when the run ends. `Disposed` is terminal.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum State {
    Ready,
    Running,
    Closing,
    Closed,
    Disposed,
}

impl State {
    fn can_become(self, to: State) -> bool {
        use State::*;
        match (self, to) {
            (Disposed, _) => false,
            (_, Disposed) => true,
            (Ready, Running) | (Ready, Closed) => true,
            (Running, Ready) | (Running, Closing) => true,
            (Closing, Closing) | (Closing, Closed) => true,
            (Closed, Closing) | (Closed, Closed) => true,
            _ => false,
        }
    }

    pub fn is_running(self) -> bool {
        self == State::Running || self == State::Closing
    }

    pub fn is_closed(self) -> bool {
        self == State::Closing || self == State::Closed
    }
}

/// How a `RUN` ended when it did not end in an error.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    Completed,
    Broken,
}

/// What the run loop does after an action.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flow {
    Continue,
    Jump(u16),
    Stop,
}

/// ## Session environment
///
/// Owns the stored program, the variables and the collaborators.
/// Every public operation checks the lifecycle state first.
pub struct Runtime {
    program: Program,
    vars: Var,
    state: State,
    console: Option<Box<dyn Console>>,
    repository: Option<Box<dyn Repository>>,
    interrupted: Arc<AtomicBool>,
    last_name: Option<Rc<str>>,
    last_run: Option<Outcome>,
}

impl Runtime {
    pub fn new(console: Box<dyn Console>, repository: Box<dyn Repository>) -> Runtime {
        let interrupted = Arc::new(AtomicBool::new(false));
        Runtime::with_interrupt(console, repository, interrupted)
    }

    /// Share an interrupt flag that the collaborators can raise too.
    pub fn with_interrupt(
        console: Box<dyn Console>,
        repository: Box<dyn Repository>,
        interrupted: Arc<AtomicBool>,
    ) -> Runtime {
        Runtime {
            program: Program::new(),
            vars: Var::new(),
            state: State::Ready,
            console: Some(console),
            repository: Some(repository),
            interrupted,
            last_name: None,
            last_run: None,
        }
    }

    pub fn state(&self) -> State {
        self.state
    }

    pub fn is_running(&self) -> bool {
        self.state.is_running()
    }

    pub fn is_closed(&self) -> bool {
        self.state.is_closed()
    }

    pub fn is_disposed(&self) -> bool {
        self.state == State::Disposed
    }

    pub fn program(&self) -> &Program {
        &self.program
    }

    pub fn var(&self, name: &str) -> Val {
        self.vars.fetch(name)
    }

    pub fn last_used_name(&self) -> Option<&str> {
        self.last_name.as_deref()
    }

    /// Shared flag sampled between statements. Setting it breaks a run.
    pub fn interrupt_handle(&self) -> Arc<AtomicBool> {
        self.interrupted.clone()
    }

    pub fn interrupt(&self) {
        self.interrupted.store(true, Ordering::SeqCst);
    }

    /// Accept one line of text from the user. Numbered lines are stored
    /// (or deleted), anything else executes immediately. Returns the
    /// outcome when the line ran the program.
    pub fn enter(&mut self, text: &str) -> Result<Option<Outcome>> {
        self.alive()?;
        if text.chars().count() > super::MAX_LINE_LEN {
            return Err(error!(LineBufferOverflow));
        }
        let line = Line::new(text)?;
        if !line.is_direct() {
            self.program.insert(line)?;
            return Ok(None);
        }
        let action = match line.statement() {
            Some(statement) => compile(statement)?,
            None => return Ok(None),
        };
        self.last_run = None;
        self.execute(&action)?;
        Ok(self.last_run.take())
    }

    pub fn run(&mut self) -> Result<Outcome> {
        self.alive()?;
        if self.is_running() {
            return Err(error!(AlreadyRunning));
        }
        let running = if self.state.is_closed() {
            State::Closing
        } else {
            State::Running
        };
        self.transition(running)?;
        self.interrupted.store(false, Ordering::SeqCst);
        let result = self.run_lines();
        let stopped = if self.state.is_closed() {
            State::Closed
        } else {
            State::Ready
        };
        self.transition(stopped)?;
        result
    }

    fn run_lines(&mut self) -> Result<Outcome> {
        let mut next = self.program.first();
        while let Some(number) = next {
            if self.interrupted.swap(false, Ordering::SeqCst) {
                return Ok(Outcome::Broken);
            }
            let action = match self.program.action(number) {
                Some(action) => action,
                None => break,
            };
            let flow = self.execute(&action).map_err(|e| {
                if e.is_direct() {
                    e.in_line_number(Some(number))
                } else {
                    e
                }
            })?;
            next = match flow {
                Flow::Continue => self.program.after(number),
                Flow::Stop => None,
                Flow::Jump(target) => {
                    if !self.program.contains(target) {
                        return Err(error!(UndefinedLine, Some(number); format!("NO LINE {}", target)));
                    }
                    Some(target)
                }
            };
        }
        Ok(Outcome::Completed)
    }

    pub fn end(&mut self) -> Result<Flow> {
        self.alive()?;
        if !self.is_running() {
            return Err(error!(IllegalDirect; "END OUTSIDE RUN"));
        }
        Ok(Flow::Stop)
    }

    pub fn goto(&mut self, number: u16) -> Result<Flow> {
        self.alive()?;
        if !self.is_running() {
            return Err(error!(IllegalDirect; "GOTO OUTSIDE RUN"));
        }
        Ok(Flow::Jump(number))
    }

    pub fn close(&mut self) -> Result<()> {
        self.alive()?;
        let closed = if self.is_running() {
            State::Closing
        } else {
            State::Closed
        };
        self.transition(closed)
    }

    /// Release the collaborators. Safe to call more than once.
    pub fn dispose(&mut self) {
        if self.is_disposed() {
            return;
        }
        self.console = None;
        self.repository = None;
        self.program.clear();
        self.vars.clear();
        self.state = State::Disposed;
    }

    pub fn new_program(&mut self) -> Result<()> {
        self.alive()?;
        if self.is_running() {
            return Err(error!(IllegalDirect; "NEW WHILE RUNNING"));
        }
        self.program.clear();
        self.vars.clear();
        Ok(())
    }

    pub fn load(&mut self, name: Option<&str>) -> Result<()> {
        self.alive()?;
        let name = Runtime::file_name(name)?;
        if self.is_running() {
            return Err(error!(IllegalDirect; "LOAD WHILE RUNNING"));
        }
        let lines = match self.repository.as_mut() {
            Some(repository) => repository.load(name)?,
            None => return Err(error!(SessionDisposed)),
        };
        let mut program = Program::new();
        for line in lines {
            if line.is_direct() {
                return Err(error!(DirectStatementInFile; line.to_string()));
            }
            program.insert(line)?;
        }
        self.program = program;
        self.vars.clear();
        self.last_name = Some(name.into());
        Ok(())
    }

    pub fn save(&mut self, name: Option<&str>) -> Result<()> {
        self.alive()?;
        let name = Runtime::file_name(name)?;
        let repository = match self.repository.as_mut() {
            Some(repository) => repository,
            None => return Err(error!(SessionDisposed)),
        };
        let lines: Vec<&Line> = self.program.lines().collect();
        repository.save(name, &lines)?;
        self.last_name = Some(name.into());
        Ok(())
    }

    /// Write each stored line numbered within `range`, then a blank row.
    pub fn list(&mut self, range: RangeInclusive<u16>) -> Result<()> {
        self.alive()?;
        let console = match self.console.as_mut() {
            Some(console) => console,
            None => return Err(error!(SessionDisposed)),
        };
        for line in self.program.range(range) {
            console.write(&line.to_string())?;
            console.write_line()?;
        }
        console.write_line()
    }

    /// Run one compiled statement against this session.
    pub fn execute(&mut self, action: &Action) -> Result<Flow> {
        fn unary(stack: &mut Stack<Val>, f: fn(Val) -> Result<Val>) -> Result<()> {
            let val = stack.pop()?;
            stack.push(f(val)?)
        }
        fn binary(stack: &mut Stack<Val>, f: fn(Val, Val) -> Result<Val>) -> Result<()> {
            let (lhs, rhs) = stack.pop_2()?;
            stack.push(f(lhs, rhs)?)
        }
        self.alive()?;
        let mut stack: Stack<Val> = Stack::new("EXPRESSION TOO COMPLEX");
        for op in action.ops() {
            match op {
                Opcode::Literal(val) => stack.push(val.clone())?,
                Opcode::Push(name) => stack.push(self.vars.fetch(name))?,
                Opcode::PushArr(name, len) => {
                    let arr = stack.pop_n(*len)?;
                    let val = self.vars.fetch_array(name, arr)?;
                    stack.push(val)?;
                }
                Opcode::Pop(name) => {
                    let val = stack.pop()?;
                    self.vars.store(name, val)?;
                }
                Opcode::PopArr(name, len) => {
                    let arr = stack.pop_n(*len)?;
                    let val = stack.pop()?;
                    self.vars.store_array(name, arr, val)?;
                }
                Opcode::DimArr(name, len) => {
                    let arr = stack.pop_n(*len)?;
                    self.vars.dimension_array(name, arr)?;
                }
                Opcode::Jump => {
                    let val = stack.pop()?;
                    return match LineNumber::try_from(val)? {
                        Some(number) => self.goto(number),
                        None => Err(error!(UndefinedLine)),
                    };
                }
                Opcode::End => return self.end(),
                Opcode::Run => {
                    let outcome = self.run()?;
                    self.last_run = Some(outcome);
                }
                Opcode::Input(prompt, len) => {
                    if !self.input(&mut stack, prompt.as_deref(), *len)? {
                        return Ok(Flow::Continue);
                    }
                }
                Opcode::List(range) => self.list(range.clone())?,
                Opcode::Load(name) => self.load(name.as_deref())?,
                Opcode::New => self.new_program()?,
                Opcode::NewLine => self.console()?.write_line()?,
                Opcode::Print => {
                    let val = stack.pop()?;
                    self.console()?.write(&val.to_string())?;
                }
                Opcode::Quit => {
                    let running = self.is_running();
                    self.close()?;
                    if running {
                        return Ok(Flow::Stop);
                    }
                }
                Opcode::Save(name) => self.save(name.as_deref())?,
                Opcode::Neg => unary(&mut stack, Operation::negate)?,
                Opcode::Pos => unary(&mut stack, Operation::plus)?,
                Opcode::Not => unary(&mut stack, Operation::not)?,
                Opcode::Exp => binary(&mut stack, Operation::power)?,
                Opcode::Mul => binary(&mut stack, Operation::multiply)?,
                Opcode::Div => binary(&mut stack, Operation::divide)?,
                Opcode::Mod => binary(&mut stack, Operation::modulus)?,
                Opcode::Add => binary(&mut stack, Operation::sum)?,
                Opcode::Sub => binary(&mut stack, Operation::subtract)?,
                Opcode::Eq => binary(&mut stack, Operation::equal)?,
                Opcode::NotEq => binary(&mut stack, Operation::not_equal)?,
                Opcode::Lt => binary(&mut stack, Operation::less)?,
                Opcode::LtEq => binary(&mut stack, Operation::less_equal)?,
                Opcode::Gt => binary(&mut stack, Operation::greater)?,
                Opcode::GtEq => binary(&mut stack, Operation::greater_equal)?,
                Opcode::And => binary(&mut stack, Operation::and)?,
                Opcode::Or => binary(&mut stack, Operation::or)?,
            }
        }
        Ok(Flow::Continue)
    }

    /// Read one line and push `len` fields with the first on top.
    /// Returns false when the read was interrupted.
    fn input(&mut self, stack: &mut Stack<Val>, prompt: Option<&str>, len: usize) -> Result<bool> {
        let console = self.console()?;
        console.write(prompt.unwrap_or("? "))?;
        let text = console.read_line()?;
        if self.interrupted.load(Ordering::SeqCst) {
            return Ok(false);
        }
        let fields: Vec<&str> = text.split(',').collect();
        if fields.len() < len {
            return Err(error!(InputPastEnd));
        }
        for field in fields[..len].iter().rev() {
            stack.push(Val::from_input(field))?;
        }
        Ok(true)
    }

    fn console(&mut self) -> Result<&mut Box<dyn Console>> {
        match self.console.as_mut() {
            Some(console) => Ok(console),
            None => Err(error!(SessionDisposed)),
        }
    }

    fn alive(&self) -> Result<()> {
        if self.is_disposed() {
            Err(error!(SessionDisposed))
        } else {
            Ok(())
        }
    }

    fn transition(&mut self, to: State) -> Result<()> {
        if self.state.can_become(to) {
            self.state = to;
            return Ok(());
        }
        Err(match self.state {
            State::Disposed => error!(SessionDisposed),
            State::Running | State::Closing if to.is_running() => error!(AlreadyRunning),
            _ => error!(InternalError; format!("{:?} TO {:?}", self.state, to)),
        })
    }

    fn file_name(name: Option<&str>) -> Result<&str> {
        match name {
            Some(name) if !name.trim().is_empty() => Ok(name),
            _ => Err(error!(BadFileName)),
        }
    }
}

impl Drop for Runtime {
    fn drop(&mut self) {
        self.dispose()
    }
}
