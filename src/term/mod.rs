extern crate ansi_term;
extern crate ctrlc;
extern crate linefeed;
use crate::error;
use crate::lang::{Error, Line};
use crate::mach::{Console, Outcome, Repository, Runtime};
use ansi_term::Style;
use linefeed::{DefaultTerminal, Interface, ReadResult, Signal};
use std::cell::RefCell;
use std::fs::File;
use std::io::{BufRead, BufReader, ErrorKind, Write};
use std::rc::Rc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

type Result<T> = std::result::Result<T, Error>;

pub fn main() {
    if let Err(error) = main_loop() {
        eprintln!("{}", error);
    }
}

fn main_loop() -> std::io::Result<()> {
    let command = Interface::new("BASIC")?;
    let input = Interface::new("INPUT")?;
    input.set_report_signal(Signal::Interrupt, true);
    let pending = Rc::new(RefCell::new(String::new()));
    let interrupted = Arc::new(AtomicBool::new(false));
    let console = TerminalConsole {
        interface: input,
        pending: pending.clone(),
        interrupted: interrupted.clone(),
    };
    let int_moved = interrupted.clone();
    if let Err(error) = ctrlc::set_handler(move || {
        int_moved.store(true, Ordering::SeqCst);
    }) {
        eprintln!("{}", error);
    }
    let mut runtime =
        Runtime::with_interrupt(Box::new(console), Box::new(FileRepository {}), interrupted);

    command.write_fmt(format_args!("{}\n", Style::new().bold().paint("NUMBERED BASIC")))?;
    if let Some(path) = std::env::args().nth(1) {
        if let Err(error) = runtime.load(Some(&path)) {
            report(&command, &error)?;
        }
    }

    let mut print_ready = true;
    while !runtime.is_closed() {
        if print_ready {
            print_ready = false;
            command.write_fmt(format_args!("READY.\n"))?;
        }
        let string = match command.read_line()? {
            ReadResult::Input(string) => string,
            ReadResult::Signal(_) | ReadResult::Eof => break,
        };
        if string.trim().is_empty() {
            continue;
        }
        let result = runtime.enter(&string);
        let rest = std::mem::take(&mut *pending.borrow_mut());
        if !rest.is_empty() {
            command.write_fmt(format_args!("{}\n", rest))?;
        }
        match result {
            Ok(Some(Outcome::Completed)) => print_ready = true,
            Ok(Some(Outcome::Broken)) => {
                command.write_fmt(format_args!("{}\n", Style::new().bold().paint("BREAK")))?;
                print_ready = true;
            }
            Ok(None) => {}
            Err(error) => {
                report(&command, &error)?;
                print_ready = true;
            }
        }
        command.add_history_unique(string);
    }
    runtime.dispose();
    Ok(())
}

fn report(interface: &Interface<DefaultTerminal>, error: &Error) -> std::io::Result<()> {
    interface.write_fmt(format_args!(
        "{}\n",
        Style::new().bold().paint(format!("?{}", error))
    ))
}

fn io_error(error: std::io::Error) -> Error {
    match error.kind() {
        ErrorKind::NotFound => error!(FileNotFound; error.to_string()),
        _ => error!(DiskIoError; error.to_string()),
    }
}

/// Output without a line ending is held back and becomes the prompt
/// of the next read, so `INPUT` prompts stay on the input line.
struct TerminalConsole {
    interface: Interface<DefaultTerminal>,
    pending: Rc<RefCell<String>>,
    interrupted: Arc<AtomicBool>,
}

impl Console for TerminalConsole {
    fn write(&mut self, text: &str) -> Result<()> {
        self.pending.borrow_mut().push_str(text);
        Ok(())
    }

    fn write_line(&mut self) -> Result<()> {
        let text = std::mem::take(&mut *self.pending.borrow_mut());
        self.interface
            .write_fmt(format_args!("{}\n", text))
            .map_err(io_error)
    }

    fn read_line(&mut self) -> Result<String> {
        let prompt = std::mem::take(&mut *self.pending.borrow_mut());
        self.interface.set_prompt(&prompt).map_err(io_error)?;
        match self.interface.read_line().map_err(io_error)? {
            ReadResult::Input(string) => {
                self.interface.add_history_unique(string.clone());
                Ok(string)
            }
            ReadResult::Signal(_) | ReadResult::Eof => {
                self.interface.set_buffer("").map_err(io_error)?;
                self.interface
                    .lock_reader()
                    .cancel_read_line()
                    .map_err(io_error)?;
                self.interrupted.store(true, Ordering::SeqCst);
                Ok(String::new())
            }
        }
    }
}

/// Programs stored as plain text files, one `"<n> <statement>"` per line.
struct FileRepository {}

impl Repository for FileRepository {
    fn load(&mut self, name: &str) -> Result<Vec<Line>> {
        let reader = BufReader::new(File::open(name).map_err(io_error)?);
        let mut lines = vec![];
        for string in reader.lines() {
            let string = string.map_err(io_error)?;
            if string.trim().is_empty() {
                continue;
            }
            let line = Line::new(&string)?;
            if line.is_direct() {
                return Err(error!(DirectStatementInFile; string));
            }
            lines.push(line);
        }
        Ok(lines)
    }

    fn save(&mut self, name: &str, lines: &[&Line]) -> Result<()> {
        let mut file = File::create(name).map_err(io_error)?;
        for line in lines {
            writeln!(file, "{}", line).map_err(io_error)?;
        }
        Ok(())
    }
}
