mod common;
use common::*;

#[test]
fn test_list_range() {
    let mut s = session();
    enter(
        &mut s,
        &["10 END", "20 END", "30 END", "40 END", "50 END", "60 END"],
    );
    assert_eq!(exec(&mut s, "LIST 25-45"), "30 END\n40 END\n\n");
    assert_eq!(exec(&mut s, "LIST 50"), "50 END\n\n");
    assert_eq!(exec(&mut s, "LIST -20"), "10 END\n20 END\n\n");
    assert_eq!(exec(&mut s, "LIST 55-"), "60 END\n\n");
}

#[test]
fn test_list_inverted_range_is_empty() {
    let mut s = session();
    enter(&mut s, &["10 END", "20 END"]);
    assert_eq!(exec(&mut s, "LIST 45-25"), "\n");
    assert_eq!(exec(&mut s, "LIST 20-10"), "\n");
    assert_eq!(exec(&mut s, "LIST"), "10 END\n20 END\n\n");
}

#[test]
fn test_input_words_stay_text() {
    let mut s = session();
    s.console.type_line("nan,inf,2e1");
    assert_eq!(exec(&mut s, "INPUT A,B,C"), "? ");
    assert_eq!(exec(&mut s, "?A;B;C"), "naninf20\n");
    assert_eq!(exec(&mut s, "?A+1"), "?TYPE MISMATCH\n");
}

#[test]
fn test_list_keeps_source_text() {
    let mut s = session();
    enter(&mut s, &["20 rem  Hello World", "10 print 1 ;2"]);
    assert_eq!(exec(&mut s, "LIST"), "10 print 1 ;2\n20 rem  Hello World\n\n");
}

#[test]
fn test_delete_line() {
    let mut s = session();
    enter(&mut s, &["10 PRINT 1", "20 PRINT 2", "10"]);
    assert_eq!(exec(&mut s, "LIST"), "20 PRINT 2\n\n");
    assert_eq!(exec(&mut s, "RUN"), "2\n");
}

#[test]
fn test_syntax_error_keeps_old_line() {
    let mut s = session();
    enter(&mut s, &["10 PRINT 1"]);
    assert!(exec(&mut s, "10 PRINT 1 2").starts_with("?SYNTAX ERROR"));
    assert_eq!(exec(&mut s, "LIST"), "10 PRINT 1\n\n");
    assert!(exec(&mut s, "10 1+2").starts_with("?SYNTAX ERROR"));
}

#[test]
fn test_input() {
    let mut s = session();
    s.console.type_line("5,hello");
    enter(&mut s, &["10 INPUT \"N\"; N, S", "20 PRINT N*2;S"]);
    assert_eq!(exec(&mut s, "RUN"), "N10hello\n");
    s.console.type_line("3");
    assert_eq!(exec(&mut s, "INPUT A"), "? ");
    assert_eq!(exec(&mut s, "?A"), "3\n");
    s.console.type_line("1");
    assert_eq!(exec(&mut s, "INPUT A,B"), "? ?INPUT PAST END\n");
}

#[test]
fn test_arrays() {
    let mut s = session();
    assert_eq!(exec(&mut s, "A(10)=7"), "");
    assert_eq!(exec(&mut s, "?A(10);A(0)"), "70\n");
    assert_eq!(exec(&mut s, "A(11)=1"), "?SUBSCRIPT OUT OF RANGE\n");
    assert_eq!(exec(&mut s, "?A(1,1)"), "?SUBSCRIPT OUT OF RANGE\n");
    assert_eq!(exec(&mut s, "DIM A(20)"), "?REDIMENSIONED ARRAY\n");
    assert_eq!(exec(&mut s, "DIM B(2,3)"), "");
    assert_eq!(exec(&mut s, "B(2,3)=\"x\""), "");
    assert_eq!(exec(&mut s, "?B(1.6,3)"), "x\n");
    assert_eq!(exec(&mut s, "?B(3,1)"), "?SUBSCRIPT OUT OF RANGE\n");
    assert_eq!(exec(&mut s, "?B(-1,1)"), "?SUBSCRIPT OUT OF RANGE\n");
}

#[test]
fn test_arrays_and_scalars_are_separate() {
    let mut s = session();
    enter(&mut s, &["A=1", "A(1)=2"]);
    assert_eq!(exec(&mut s, "?A;A(1)"), "12\n");
}

#[test]
fn test_new() {
    let mut s = session();
    enter(&mut s, &["10 PRINT 1", "X=3", "NEW"]);
    assert_eq!(exec(&mut s, "LIST"), "\n");
    assert_eq!(exec(&mut s, "?X"), "0\n");
}

#[test]
fn test_direct_control_flow() {
    let mut s = session();
    assert_eq!(exec(&mut s, "GOTO 10"), "?ILLEGAL DIRECT IN; GOTO OUTSIDE RUN\n");
    assert_eq!(exec(&mut s, "END"), "?ILLEGAL DIRECT IN; END OUTSIDE RUN\n");
}

#[test]
fn test_goto_computed() {
    let mut s = session();
    enter(
        &mut s,
        &[
            "10 L = 3",
            "20 GOTO L * 10",
            "25 PRINT \"NO\"",
            "30 PRINT \"YES\"",
        ],
    );
    assert_eq!(exec(&mut s, "RUN"), "YES\n");
    enter(&mut s, &["10 L = 4"]);
    assert_eq!(exec(&mut s, "RUN"), "?UNDEFINED LINE IN 20; NO LINE 40\n");
}

#[test]
fn test_run_keeps_variables() {
    let mut s = session();
    enter(&mut s, &["10 X = X + 1", "20 PRINT X"]);
    assert_eq!(exec(&mut s, "RUN"), "1\n");
    assert_eq!(exec(&mut s, "RUN"), "2\n");
}

#[test]
fn test_save_and_load() {
    let mut s = session();
    enter(&mut s, &["10 PRINT \"HI\"", "SAVE \"hello\""]);
    assert_eq!(s.shelf.get("hello"), Some(vec!["10 PRINT \"HI\"".to_string()]));
    s.shelf.put("other", &["10 PRINT 2", "5 PRINT 1"]);
    enter(&mut s, &["A=9", "LOAD \"other\""]);
    assert_eq!(exec(&mut s, "RUN"), "1\n2\n");
    assert_eq!(exec(&mut s, "?A"), "0\n");
    assert_eq!(exec(&mut s, "LOAD \"missing\""), "?FILE NOT FOUND\n");
    assert_eq!(exec(&mut s, "LIST"), "5 PRINT 1\n10 PRINT 2\n\n");
}

#[test]
fn test_load_rejects_direct_lines() {
    let mut s = session();
    s.shelf.put("bad", &["10 PRINT 1", "PRINT 2"]);
    enter(&mut s, &["10 PRINT \"KEEP\""]);
    assert!(exec(&mut s, "LOAD \"bad\"").starts_with("?DIRECT STATEMENT IN FILE"));
    assert_eq!(exec(&mut s, "RUN"), "KEEP\n");
}

#[test]
fn test_quit() {
    let mut s = session();
    assert_eq!(exec(&mut s, "QUIT"), "");
    assert!(s.runtime.is_closed());
}
