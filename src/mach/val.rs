use crate::error;
use crate::lang::{Error, LineNumber, MaxValue};
use std::convert::TryFrom;
use std::rc::Rc;

type Result<T> = std::result::Result<T, Error>;

/// ## Runtime values

#[derive(Debug, Clone, PartialEq)]
pub enum Val {
    Integer(i64),
    Float(f64),
    String(Rc<str>),
}

impl Val {
    /// Text typed at an INPUT prompt becomes an Integer, else a Float,
    /// else stays a String. Words like `inf` or `nan` stay text.
    pub fn from_input(s: &str) -> Val {
        let trimmed = s.trim();
        if let Ok(n) = trimmed.parse::<i64>() {
            return Val::Integer(n);
        }
        if trimmed.bytes().any(|b| b.is_ascii_digit()) {
            if let Ok(n) = trimmed.parse::<f64>() {
                return Val::Float(n);
            }
        }
        Val::String(trimmed.into())
    }

    pub fn is_true(&self) -> Result<bool> {
        match self {
            Val::Integer(n) => Ok(*n != 0),
            Val::Float(n) => Ok(*n != 0.0),
            Val::String(_) => Err(error!(TypeMismatch; "EXPECTED NUMBER")),
        }
    }

    pub fn from_bool(b: bool) -> Val {
        if b {
            Val::Integer(-1)
        } else {
            Val::Integer(0)
        }
    }
}

impl std::fmt::Display for Val {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        use Val::*;
        match self {
            Integer(n) => write!(f, "{}", n),
            Float(n) => write!(f, "{}", n),
            String(s) => write!(f, "{}", s),
        }
    }
}

impl TryFrom<Val> for i64 {
    type Error = Error;
    fn try_from(val: Val) -> std::result::Result<Self, Self::Error> {
        match val {
            Val::Integer(n) => Ok(n),
            Val::Float(n) => {
                let n = n.round();
                if n.is_finite() && n >= i64::MIN as f64 && n <= i64::MAX as f64 {
                    Ok(n as i64)
                } else {
                    Err(error!(Overflow))
                }
            }
            Val::String(_) => Err(error!(TypeMismatch)),
        }
    }
}

impl TryFrom<Val> for LineNumber {
    type Error = Error;
    fn try_from(val: Val) -> std::result::Result<Self, Self::Error> {
        let n = match val {
            Val::Integer(n) => n,
            Val::Float(n) if n.fract() == 0.0 && n.is_finite() => n as i64,
            Val::Float(_) => return Err(error!(UndefinedLine; "INVALID LINE NUMBER")),
            Val::String(_) => return Err(error!(TypeMismatch; "INVALID LINE NUMBER")),
        };
        if n >= 0 && n <= LineNumber::max_value() as i64 {
            Ok(Some(n as u16))
        } else {
            Err(error!(UndefinedLine; "INVALID LINE NUMBER"))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_input() {
        assert_eq!(Val::from_input("42"), Val::Integer(42));
        assert_eq!(Val::from_input(" -7 "), Val::Integer(-7));
        assert_eq!(Val::from_input("2.5"), Val::Float(2.5));
        assert_eq!(Val::from_input("ten"), Val::String("ten".into()));
        assert_eq!(Val::from_input("1e3"), Val::Float(1000.0));
        assert_eq!(Val::from_input("nan"), Val::String("nan".into()));
        assert_eq!(Val::from_input(" -Infinity"), Val::String("-Infinity".into()));
    }

    #[test]
    fn test_line_number() {
        assert_eq!(LineNumber::try_from(Val::Integer(30)).unwrap(), Some(30));
        assert_eq!(LineNumber::try_from(Val::Float(30.0)).unwrap(), Some(30));
        assert!(LineNumber::try_from(Val::Integer(70000)).is_err());
        assert!(LineNumber::try_from(Val::String("30".into())).is_err());
    }

    #[test]
    fn test_display() {
        assert_eq!(Val::Float(3.5).to_string(), "3.5");
        assert_eq!(Val::Integer(-3).to_string(), "-3");
        assert_eq!(Val::String("hi".into()).to_string(), "hi");
    }
}
