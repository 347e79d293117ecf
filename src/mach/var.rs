use super::Val;
use crate::error;
use crate::lang::Error;
use std::collections::HashMap;
use std::convert::TryFrom;
use std::rc::Rc;

type Result<T> = std::result::Result<T, Error>;

/// Bound given to an array that is used before any `DIM`.
const DEFAULT_BOUND: usize = 10;

/// ## Variable memory
///
/// Names are case-insensitive. A variable takes the type of whatever
/// was last stored in it. Array elements are kept sparse under a key
/// built from the indices, so `DIM A(1000,1000)` costs nothing up front.

#[derive(Debug, Default)]
pub struct Var {
    vars: HashMap<Rc<str>, Val>,
    dims: HashMap<Rc<str>, Vec<usize>>,
}

impl Var {
    pub fn new() -> Var {
        Var::default()
    }

    pub fn clear(&mut self) {
        self.vars.clear();
        self.dims.clear();
    }

    pub fn len(&self) -> usize {
        self.vars.len()
    }

    pub fn is_empty(&self) -> bool {
        self.vars.is_empty()
    }

    pub fn fetch(&self, var_name: &str) -> Val {
        match self.vars.get(var_name.to_ascii_uppercase().as_str()) {
            Some(val) => val.clone(),
            None => Val::Integer(0),
        }
    }

    pub fn store(&mut self, var_name: &str, value: Val) -> Result<()> {
        let key: Rc<str> = var_name.to_ascii_uppercase().into();
        self.insert(key, value)
    }

    pub fn fetch_array(&mut self, var_name: &str, arr: Vec<Val>) -> Result<Val> {
        let key = self.build_array_key(var_name, arr)?;
        Ok(match self.vars.get(&key) {
            Some(val) => val.clone(),
            None => Val::Integer(0),
        })
    }

    pub fn store_array(&mut self, var_name: &str, arr: Vec<Val>, value: Val) -> Result<()> {
        let key = self.build_array_key(var_name, arr)?;
        self.insert(key, value)
    }

    pub fn dimension_array(&mut self, var_name: &str, arr: Vec<Val>) -> Result<()> {
        let name: Rc<str> = var_name.to_ascii_uppercase().into();
        if self.dims.contains_key(&name) {
            return Err(error!(RedimensionedArray));
        }
        let bounds = self.vec_val_to_vec_usize(arr)?;
        self.dims.insert(name, bounds);
        Ok(())
    }

    fn insert(&mut self, key: Rc<str>, value: Val) -> Result<()> {
        if self.vars.len() > u16::max_value() as usize && !self.vars.contains_key(&key) {
            return Err(error!(OutOfMemory));
        }
        self.vars.insert(key, value);
        Ok(())
    }

    fn build_array_key(&mut self, var_name: &str, arr: Vec<Val>) -> Result<Rc<str>> {
        let name: Rc<str> = var_name.to_ascii_uppercase().into();
        let requested = self.vec_val_to_vec_usize(arr)?;
        let dimensioned = self
            .dims
            .entry(name.clone())
            .or_insert_with(|| vec![DEFAULT_BOUND; requested.len()]);
        if dimensioned.len() != requested.len() {
            return Err(error!(SubscriptOutOfRange));
        }
        for (r, d) in requested.iter().zip(dimensioned.iter()) {
            if r > d {
                return Err(error!(SubscriptOutOfRange));
            }
        }
        let mut s: String = requested.iter().map(|r| format!("{},", r)).collect();
        s.push_str(&name);
        Ok(s.into())
    }

    fn vec_val_to_vec_usize(&self, arr: Vec<Val>) -> Result<Vec<usize>> {
        let mut vec_usize: Vec<usize> = vec![];
        for v in arr {
            let i = i64::try_from(v)?;
            match usize::try_from(i) {
                Ok(i) => vec_usize.push(i),
                Err(_) => return Err(error!(SubscriptOutOfRange)),
            }
        }
        Ok(vec_usize)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::lang::ErrorCode;

    #[test]
    fn test_names_ignore_case() {
        let mut v = Var::new();
        v.store("Count", Val::Integer(3)).unwrap();
        assert_eq!(v.fetch("COUNT"), Val::Integer(3));
        v.store("count", Val::String("x".into())).unwrap();
        assert_eq!(v.fetch("Count"), Val::String("x".into()));
        assert_eq!(v.len(), 1);
    }

    #[test]
    fn test_unassigned_is_zero() {
        let mut v = Var::new();
        assert_eq!(v.fetch("A"), Val::Integer(0));
        assert_eq!(
            v.fetch_array("A", vec![Val::Integer(2)]).unwrap(),
            Val::Integer(0)
        );
    }

    #[test]
    fn test_auto_dimension() {
        let mut v = Var::new();
        v.store_array("A", vec![Val::Integer(10)], Val::Integer(1))
            .unwrap();
        let e = v
            .store_array("A", vec![Val::Integer(11)], Val::Integer(1))
            .unwrap_err();
        assert_eq!(e.code(), ErrorCode::SubscriptOutOfRange as u16);
        let e = v
            .fetch_array("A", vec![Val::Integer(1), Val::Integer(1)])
            .unwrap_err();
        assert_eq!(e.code(), ErrorCode::SubscriptOutOfRange as u16);
    }

    #[test]
    fn test_dimension() {
        let mut v = Var::new();
        v.dimension_array("B", vec![Val::Integer(20), Val::Integer(2)])
            .unwrap();
        v.store_array("b", vec![Val::Float(19.6), Val::Integer(2)], Val::Integer(7))
            .unwrap();
        assert_eq!(
            v.fetch_array("B", vec![Val::Integer(20), Val::Integer(2)])
                .unwrap(),
            Val::Integer(7)
        );
        let e = v.dimension_array("B", vec![Val::Integer(5)]).unwrap_err();
        assert_eq!(e.code(), ErrorCode::RedimensionedArray as u16);
        let e = v
            .fetch_array("B", vec![Val::Integer(-1), Val::Integer(0)])
            .unwrap_err();
        assert_eq!(e.code(), ErrorCode::SubscriptOutOfRange as u16);
    }

    #[test]
    fn test_array_and_scalar_are_separate() {
        let mut v = Var::new();
        v.store("A", Val::Integer(1)).unwrap();
        v.store_array("A", vec![Val::Integer(0)], Val::Integer(2))
            .unwrap();
        assert_eq!(v.fetch("A"), Val::Integer(1));
    }
}
