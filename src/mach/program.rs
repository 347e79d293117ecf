use super::{compile, Action};
use crate::error;
use crate::lang::{Error, Line};
use std::collections::BTreeMap;
use std::ops::RangeInclusive;

type Result<T> = std::result::Result<T, Error>;

/// ## Stored program
///
/// Lines sorted by number, each compiled once when entered.

#[derive(Debug, Default)]
pub struct Program {
    lines: BTreeMap<u16, (Line, Action)>,
}

impl Program {
    pub fn new() -> Program {
        Program::default()
    }

    /// Store a numbered line, replacing any line with the same number.
    /// A line with no statement deletes instead.
    pub fn insert(&mut self, line: Line) -> Result<()> {
        let number = match line.number() {
            Some(number) => number,
            None => return Err(error!(InternalError; "DIRECT LINE IN PROGRAM")),
        };
        let action = match line.statement() {
            Some(statement) => compile(statement).map_err(|e| {
                if e.is_direct() {
                    e.in_line_number(Some(number))
                } else {
                    e
                }
            })?,
            None => {
                self.lines.remove(&number);
                return Ok(());
            }
        };
        self.lines.insert(number, (line, action));
        Ok(())
    }

    pub fn clear(&mut self) {
        self.lines.clear()
    }

    pub fn len(&self) -> usize {
        self.lines.len()
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    pub fn contains(&self, number: u16) -> bool {
        self.lines.contains_key(&number)
    }

    pub fn first(&self) -> Option<u16> {
        self.lines.keys().next().copied()
    }

    pub fn after(&self, number: u16) -> Option<u16> {
        use std::ops::Bound::{Excluded, Unbounded};
        self.lines
            .range((Excluded(number), Unbounded))
            .next()
            .map(|(n, _)| *n)
    }

    pub fn action(&self, number: u16) -> Option<Action> {
        self.lines.get(&number).map(|(_, action)| action.clone())
    }

    pub fn lines(&self) -> impl Iterator<Item = &Line> {
        self.lines.values().map(|(line, _)| line)
    }

    /// Lines numbered within `range`. An inverted range is empty.
    pub fn range(&self, range: RangeInclusive<u16>) -> impl Iterator<Item = &Line> {
        let range = if range.start() > range.end() {
            1..=0
        } else {
            range
        };
        self.lines.range(range).map(|(_, (line, _))| line)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn program(lines: &[&str]) -> Program {
        let mut p = Program::new();
        for s in lines {
            p.insert(Line::new(s).unwrap()).unwrap();
        }
        p
    }

    #[test]
    fn test_sorted_and_replaced() {
        let p = program(&["30 END", "10 PRINT 1", "20 PRINT 2", "10 PRINT 9"]);
        let listed: Vec<String> = p.lines().map(|l| l.to_string()).collect();
        assert_eq!(listed, vec!["10 PRINT 9", "20 PRINT 2", "30 END"]);
        assert_eq!(p.first(), Some(10));
        assert_eq!(p.after(10), Some(20));
        assert_eq!(p.after(30), None);
        assert_eq!(p.after(15), Some(20));
    }

    #[test]
    fn test_empty_line_deletes() {
        let mut p = program(&["10 PRINT 1", "20 REM"]);
        p.insert(Line::new("10").unwrap()).unwrap();
        assert_eq!(p.len(), 1);
        assert!(!p.contains(10));
        assert!(p.contains(20));
        p.insert(Line::new("99").unwrap()).unwrap();
        assert_eq!(p.len(), 1);
    }

    #[test]
    fn test_range() {
        let p = program(&["10 END", "20 END", "30 END", "40 END", "50 END", "60 END"]);
        let numbers: Vec<_> = p.range(25..=45).map(|l| l.number()).collect();
        assert_eq!(numbers, vec![Some(30), Some(40)]);
        assert_eq!(p.range(45..=25).count(), 0);
        assert_eq!(p.range(30..=30).count(), 1);
    }

    #[test]
    fn test_direct_rejected() {
        let mut p = Program::new();
        assert!(p.insert(Line::new("PRINT 1").unwrap()).is_err());
    }
}
