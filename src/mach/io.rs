use crate::lang::{Error, Line};

type Result<T> = std::result::Result<T, Error>;

/// Text input and output for `PRINT`, `INPUT` and `LIST`.
pub trait Console {
    fn write(&mut self, text: &str) -> Result<()>;
    fn write_line(&mut self) -> Result<()>;
    /// Blocks until a full line is available. The line ending is removed.
    fn read_line(&mut self) -> Result<String>;
}

/// Named storage for whole programs.
///
/// Lines travel in ascending order. Each has the text form
/// `"<line number> <statement source>"`.
pub trait Repository {
    fn load(&mut self, name: &str) -> Result<Vec<Line>>;
    fn save(&mut self, name: &str, lines: &[&Line]) -> Result<()>;
}
