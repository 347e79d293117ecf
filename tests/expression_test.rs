mod common;
use common::*;

#[test]
fn test_precedence() {
    let mut s = session();
    assert_eq!(exec(&mut s, "?1+2*3"), "7\n");
    assert_eq!(exec(&mut s, "?(1+2)*3"), "9\n");
    assert_eq!(exec(&mut s, "?1 + 7*3%4"), "2\n");
}

#[test]
fn test_associativity() {
    let mut s = session();
    assert_eq!(exec(&mut s, "?8-3-2"), "3\n");
    assert_eq!(exec(&mut s, "?2^3^2"), "512\n");
    assert_eq!(exec(&mut s, "?-2^2"), "-4\n");
}

#[test]
fn test_numeric_coercion() {
    let mut s = session();
    assert_eq!(exec(&mut s, "?1+2.5"), "3.5\n");
    assert_eq!(exec(&mut s, "?7/2"), "3.5\n");
    assert_eq!(exec(&mut s, "?8/2"), "4\n");
    assert_eq!(exec(&mut s, "?7.5%2"), "1.5\n");
    assert_eq!(exec(&mut s, "?2^10"), "1024\n");
    assert_eq!(exec(&mut s, "?2^-1"), "0.5\n");
}

#[test]
fn test_string_concatenation() {
    let mut s = session();
    assert_eq!(exec(&mut s, r#"?"a"+"b""#), "ab\n");
    assert_eq!(exec(&mut s, r#"?"a"+1"#), "?TYPE MISMATCH\n");
    assert_eq!(exec(&mut s, r#"?1-"a""#), "?TYPE MISMATCH\n");
    assert_eq!(exec(&mut s, r#"?-"a""#), "?TYPE MISMATCH\n");
}

#[test]
fn test_comparisons() {
    let mut s = session();
    assert_eq!(exec(&mut s, "?1<2"), "-1\n");
    assert_eq!(exec(&mut s, "?2<=1.5"), "0\n");
    assert_eq!(exec(&mut s, "?3=3.0"), "-1\n");
    assert_eq!(exec(&mut s, "?3<>3"), "0\n");
    assert_eq!(exec(&mut s, r#"?"abc"<"abd""#), "-1\n");
    assert_eq!(exec(&mut s, r#"?"b">="a""#), "-1\n");
    assert_eq!(exec(&mut s, r#"?"1"=1"#), "?TYPE MISMATCH\n");
}

#[test]
fn test_logic() {
    let mut s = session();
    assert_eq!(exec(&mut s, "?NOT 0"), "-1\n");
    assert_eq!(exec(&mut s, "?NOT 1 = 1"), "0\n");
    assert_eq!(exec(&mut s, "?1 AND 0"), "0\n");
    assert_eq!(exec(&mut s, "?0 OR 2.5"), "-1\n");
    assert_eq!(exec(&mut s, "?1 < 2 AND 2 < 3"), "-1\n");
    assert_eq!(exec(&mut s, r#"?NOT "x""#), "?TYPE MISMATCH IN; EXPECTED NUMBER\n");
}

#[test]
fn test_arithmetic_faults() {
    let mut s = session();
    assert_eq!(exec(&mut s, "?1/0"), "?DIVISION BY ZERO\n");
    assert_eq!(exec(&mut s, "?1%0"), "?DIVISION BY ZERO\n");
    assert_eq!(exec(&mut s, "?9223372036854775807+1"), "?OVERFLOW\n");
    assert_eq!(exec(&mut s, "?2^64"), "18446744073709552000\n");
}

#[test]
fn test_variables() {
    let mut s = session();
    assert_eq!(exec(&mut s, "?Q"), "0\n");
    assert_eq!(exec(&mut s, "A=1"), "");
    assert_eq!(exec(&mut s, "a=a+1.5"), "");
    assert_eq!(exec(&mut s, "?A"), "2.5\n");
    assert_eq!(exec(&mut s, r#"LET a="x""#), "");
    assert_eq!(exec(&mut s, "?A"), "x\n");
}
