use crate::lang::{Error, Line};
use crate::mach::{Console, Repository, Runtime};
use std::cell::RefCell;
use std::collections::{HashMap, VecDeque};
use std::rc::Rc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;


type Result<T> = std::result::Result<T, Error>;

/// Console that records output and plays back scripted input.
#[derive(Clone, Default)]
pub(super) struct Transcript {
    output: Rc<RefCell<String>>,
    input: Rc<RefCell<VecDeque<String>>>,
    breaker: Rc<RefCell<Option<Arc<AtomicBool>>>>,
}

impl Transcript {
    pub(super) fn output(&self) -> String {
        self.output.borrow().clone()
    }
    pub(super) fn type_line(&self, s: &str) {
        self.input.borrow_mut().push_back(s.to_string());
    }
    /// Raise the flag on every write, like a user holding down Ctrl-C.
    pub(super) fn break_on_write(&self, flag: Arc<AtomicBool>) {
        *self.breaker.borrow_mut() = Some(flag);
    }
}

impl Console for Transcript {
    fn write(&mut self, text: &str) -> Result<()> {
        self.output.borrow_mut().push_str(text);
        if let Some(flag) = self.breaker.borrow().as_ref() {
            flag.store(true, Ordering::SeqCst);
        }
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

#[derive(Clone, Default)]
pub(super) struct Shelf {
    files: Rc<RefCell<HashMap<String, Vec<String>>>>,
}

impl Shelf {
    pub(super) fn file(&self, name: &str) -> Option<Vec<String>> {
        self.files.borrow().get(name).cloned()
    }
}

impl Repository for Shelf {
    fn load(&mut self, name: &str) -> Result<Vec<Line>> {
        match self.files.borrow().get(name) {
            Some(lines) => lines.iter().map(|s| Line::new(s)).collect(),
            None => Err(crate::error!(FileNotFound)),
        }
    }
    fn save(&mut self, name: &str, lines: &[&Line]) -> Result<()> {
        let text = lines.iter().map(|l| l.to_string()).collect();
        self.files.borrow_mut().insert(name.to_string(), text);
        Ok(())
    }
}

pub(super) fn session() -> (Runtime, Transcript, Shelf) {
    let console = Transcript::default();
    let shelf = Shelf::default();
    let runtime = Runtime::new(Box::new(console.clone()), Box::new(shelf.clone()));
    (runtime, console, shelf)
}

pub(super) fn enter_all(runtime: &mut Runtime, lines: &[&str]) {
    for line in lines {
        if let Err(e) = runtime.enter(line) {
            panic!("{} : {}", line, e);
        }
    }
}
