use super::Val;
use crate::error;
use crate::lang::Error;
use std::convert::TryFrom;

type Result<T> = std::result::Result<T, Error>;

/// ## Operator dispatch on value tags
///
/// Integer op Integer stays Integer. Any Float operand widens the other
/// side and the result is Float. Division always works in Float.
/// Strings only meet other strings.

pub struct Operation {}

impl Operation {
    pub fn negate(val: Val) -> Result<Val> {
        use Val::*;
        match val {
            Integer(n) => match n.checked_neg() {
                Some(i) => Ok(Integer(i)),
                None => Err(error!(Overflow)),
            },
            Float(n) => Ok(Float(-n)),
            String(_) => Err(error!(TypeMismatch)),
        }
    }

    pub fn plus(val: Val) -> Result<Val> {
        match val {
            Val::String(_) => Err(error!(TypeMismatch)),
            _ => Ok(val),
        }
    }

    pub fn not(val: Val) -> Result<Val> {
        Ok(Val::from_bool(!val.is_true()?))
    }

    pub fn and(lhs: Val, rhs: Val) -> Result<Val> {
        let l = lhs.is_true()?;
        let r = rhs.is_true()?;
        Ok(Val::from_bool(l && r))
    }

    pub fn or(lhs: Val, rhs: Val) -> Result<Val> {
        let l = lhs.is_true()?;
        let r = rhs.is_true()?;
        Ok(Val::from_bool(l || r))
    }

    pub fn sum(lhs: Val, rhs: Val) -> Result<Val> {
        use Val::*;
        match lhs {
            String(l) => match rhs {
                String(r) => Ok(String((l.to_string() + &r).into())),
                _ => Err(error!(TypeMismatch)),
            },
            Integer(l) => match rhs {
                Integer(r) => match l.checked_add(r) {
                    Some(i) => Ok(Integer(i)),
                    None => Err(error!(Overflow)),
                },
                Float(r) => Ok(Float(l as f64 + r)),
                String(_) => Err(error!(TypeMismatch)),
            },
            Float(l) => match rhs {
                Integer(r) => Ok(Float(l + r as f64)),
                Float(r) => Ok(Float(l + r)),
                String(_) => Err(error!(TypeMismatch)),
            },
        }
    }

    pub fn subtract(lhs: Val, rhs: Val) -> Result<Val> {
        use Val::*;
        match lhs {
            Integer(l) => match rhs {
                Integer(r) => match l.checked_sub(r) {
                    Some(i) => Ok(Integer(i)),
                    None => Err(error!(Overflow)),
                },
                Float(r) => Ok(Float(l as f64 - r)),
                String(_) => Err(error!(TypeMismatch)),
            },
            Float(l) => match rhs {
                Integer(r) => Ok(Float(l - r as f64)),
                Float(r) => Ok(Float(l - r)),
                String(_) => Err(error!(TypeMismatch)),
            },
            String(_) => Err(error!(TypeMismatch)),
        }
    }

    pub fn multiply(lhs: Val, rhs: Val) -> Result<Val> {
        use Val::*;
        match lhs {
            Integer(l) => match rhs {
                Integer(r) => match l.checked_mul(r) {
                    Some(i) => Ok(Integer(i)),
                    None => Err(error!(Overflow)),
                },
                Float(r) => Ok(Float(l as f64 * r)),
                String(_) => Err(error!(TypeMismatch)),
            },
            Float(l) => match rhs {
                Integer(r) => Ok(Float(l * r as f64)),
                Float(r) => Ok(Float(l * r)),
                String(_) => Err(error!(TypeMismatch)),
            },
            String(_) => Err(error!(TypeMismatch)),
        }
    }

    pub fn divide(lhs: Val, rhs: Val) -> Result<Val> {
        let l = Operation::widen(lhs)?;
        let r = Operation::widen(rhs)?;
        if r == 0.0 {
            return Err(error!(DivisionByZero));
        }
        Ok(Val::Float(l / r))
    }

    pub fn modulus(lhs: Val, rhs: Val) -> Result<Val> {
        use Val::*;
        match (lhs, rhs) {
            (Integer(l), Integer(r)) => match l.checked_rem(r) {
                Some(i) => Ok(Integer(i)),
                None => {
                    if r == 0 {
                        Err(error!(DivisionByZero))
                    } else {
                        Err(error!(Overflow))
                    }
                }
            },
            (lhs, rhs) => {
                let l = Operation::widen(lhs)?;
                let r = Operation::widen(rhs)?;
                if r == 0.0 {
                    return Err(error!(DivisionByZero));
                }
                Ok(Float(l % r))
            }
        }
    }

    /// Integer to a non-negative Integer power stays Integer while it fits.
    pub fn power(lhs: Val, rhs: Val) -> Result<Val> {
        use Val::*;
        if let (Integer(l), Integer(r)) = (&lhs, &rhs) {
            if let Ok(exp) = u32::try_from(*r) {
                if let Some(i) = l.checked_pow(exp) {
                    return Ok(Integer(i));
                }
            }
        }
        let l = Operation::widen(lhs)?;
        let r = Operation::widen(rhs)?;
        Ok(Float(l.powf(r)))
    }

    pub fn equal(lhs: Val, rhs: Val) -> Result<Val> {
        Ok(Val::from_bool(Operation::equal_bool(lhs, rhs)?))
    }

    pub fn not_equal(lhs: Val, rhs: Val) -> Result<Val> {
        Ok(Val::from_bool(!Operation::equal_bool(lhs, rhs)?))
    }

    pub fn less(lhs: Val, rhs: Val) -> Result<Val> {
        Ok(Val::from_bool(Operation::less_bool(lhs, rhs)?))
    }

    pub fn less_equal(lhs: Val, rhs: Val) -> Result<Val> {
        Ok(Val::from_bool(Operation::less_equal_bool(lhs, rhs)?))
    }

    pub fn greater(lhs: Val, rhs: Val) -> Result<Val> {
        Ok(Val::from_bool(Operation::less_bool(rhs, lhs)?))
    }

    pub fn greater_equal(lhs: Val, rhs: Val) -> Result<Val> {
        Ok(Val::from_bool(Operation::less_equal_bool(rhs, lhs)?))
    }

    fn widen(val: Val) -> Result<f64> {
        match val {
            Val::Integer(n) => Ok(n as f64),
            Val::Float(n) => Ok(n),
            Val::String(_) => Err(error!(TypeMismatch)),
        }
    }

    fn equal_bool(lhs: Val, rhs: Val) -> Result<bool> {
        use Val::*;
        match lhs {
            Integer(l) => match rhs {
                Integer(r) => Ok(l == r),
                Float(r) => Ok(l as f64 == r),
                String(_) => Err(error!(TypeMismatch)),
            },
            Float(l) => match rhs {
                Integer(r) => Ok(l == r as f64),
                Float(r) => Ok(l == r),
                String(_) => Err(error!(TypeMismatch)),
            },
            String(l) => match rhs {
                String(r) => Ok(l == r),
                _ => Err(error!(TypeMismatch)),
            },
        }
    }

    fn less_bool(lhs: Val, rhs: Val) -> Result<bool> {
        use Val::*;
        match lhs {
            Integer(l) => match rhs {
                Integer(r) => Ok(l < r),
                Float(r) => Ok((l as f64) < r),
                String(_) => Err(error!(TypeMismatch)),
            },
            Float(l) => match rhs {
                Integer(r) => Ok(l < r as f64),
                Float(r) => Ok(l < r),
                String(_) => Err(error!(TypeMismatch)),
            },
            String(l) => match rhs {
                String(r) => Ok(l < r),
                _ => Err(error!(TypeMismatch)),
            },
        }
    }

    fn less_equal_bool(lhs: Val, rhs: Val) -> Result<bool> {
        use Val::*;
        match lhs {
            Integer(l) => match rhs {
                Integer(r) => Ok(l <= r),
                Float(r) => Ok((l as f64) <= r),
                String(_) => Err(error!(TypeMismatch)),
            },
            Float(l) => match rhs {
                Integer(r) => Ok(l <= r as f64),
                Float(r) => Ok(l <= r),
                String(_) => Err(error!(TypeMismatch)),
            },
            String(l) => match rhs {
                String(r) => Ok(l <= r),
                _ => Err(error!(TypeMismatch)),
            },
        }
    }
}
