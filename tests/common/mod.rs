#![allow(dead_code)]
use basic::lang::{Error, Line};
use basic::mach::{Console, Repository, Runtime};
use std::cell::RefCell;
use std::collections::{HashMap, VecDeque};
use std::rc::Rc;

type Result<T> = std::result::Result<T, Error>;

/// Records everything written and answers reads from a script.
#[derive(Clone, Default)]
pub struct Transcript {
    output: Rc<RefCell<String>>,
    input: Rc<RefCell<VecDeque<String>>>,
}

impl Transcript {
    pub fn take(&self) -> String {
        std::mem::take(&mut *self.output.borrow_mut())
    }
    pub fn type_line(&self, s: &str) {
        self.input.borrow_mut().push_back(s.to_string());
    }
}

impl Console for Transcript {
    fn write(&mut self, text: &str) -> Result<()> {
        self.output.borrow_mut().push_str(text);
        Ok(())
    }
    fn write_line(&mut self) -> Result<()> {
        self.output.borrow_mut().push('\n');
        Ok(())
    }
    fn read_line(&mut self) -> Result<String> {
        Ok(self.input.borrow_mut().pop_front().unwrap_or_default())
    }
}

/// Keeps saved programs in memory, as their listing text.
#[derive(Clone, Default)]
pub struct Shelf {
    files: Rc<RefCell<HashMap<String, Vec<String>>>>,
    pub last_name: Rc<RefCell<Option<String>>>,
}

impl Shelf {
    pub fn put(&self, name: &str, lines: &[&str]) {
        let text = lines.iter().map(|s| s.to_string()).collect();
        self.files.borrow_mut().insert(name.to_string(), text);
    }
    pub fn get(&self, name: &str) -> Option<Vec<String>> {
        self.files.borrow().get(name).cloned()
    }
}

impl Repository for Shelf {
    fn load(&mut self, name: &str) -> Result<Vec<Line>> {
        *self.last_name.borrow_mut() = Some(name.to_string());
        match self.files.borrow().get(name) {
            Some(lines) => lines.iter().map(|s| Line::new(s)).collect(),
            None => Err(basic::error!(FileNotFound)),
        }
    }
    fn save(&mut self, name: &str, lines: &[&Line]) -> Result<()> {
        *self.last_name.borrow_mut() = Some(name.to_string());
        let text = lines.iter().map(|l| l.to_string()).collect();
        self.files.borrow_mut().insert(name.to_string(), text);
        Ok(())
    }
}

pub struct Session {
    pub runtime: Runtime,
    pub console: Transcript,
    pub shelf: Shelf,
}

pub fn session() -> Session {
    let console = Transcript::default();
    let shelf = Shelf::default();
    let runtime = Runtime::new(Box::new(console.clone()), Box::new(shelf.clone()));
    Session {
        runtime,
        console,
        shelf,
    }
}

/// Enter one line and return what it printed. Errors print the way
/// the terminal shows them.
pub fn exec(s: &mut Session, line: &str) -> String {
    if let Err(error) = s.runtime.enter(line) {
        s.console.output.borrow_mut().push_str(&format!("?{}\n", error));
    }
    s.console.take()
}

/// Enter lines that are expected to succeed.
pub fn enter(s: &mut Session, lines: &[&str]) {
    for line in lines {
        if let Err(error) = s.runtime.enter(line) {
            panic!("{} : {}", line, error);
        }
    }
}
