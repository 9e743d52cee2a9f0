mod common;

use common::{eval_and_stack, native_interpreter, numbers};
use std::rc::Rc;
use test_case::test_case;
use wafer::{
    lang::{
        code::Node,
        parsing::parse_source,
        tokenizing::{LexemeKind, tokenize_from_source},
    },
    runtime::{
        data_structures::value::Value,
        error::ErrorKind,
        interpreter::{CodeManagement, InterpreterStack, WordManagement},
    },
};

fn error_of(source: &str) -> String {
    match eval_and_stack(source) {
        Ok(stack) => panic!("expected {:?} to fail, got stack {:?}", source, stack),
        Err(error) => error.to_string(),
    }
}

/// Collect every node below the given one, the node itself excluded.
fn descendants(node: &Rc<Node>, found: &mut Vec<Rc<Node>>) {
    for child in &node.children {
        found.push(child.clone());
        descendants(child, found);
    }
}

#[test_case(": f 1 ; f f"; "definition")]
#[test_case("1 { 0 } 2"; "loop")]
#[test_case(": outer { : inner 1 ; 0 } ; outer"; "nested definition in loop")]
#[test_case("{ { { 0 } 0 } 0 }"; "nested loops")]
#[test_case("# only a comment\n"; "comment only")]
fn balanced_programs_parse_into_a_tree(source: &str) {
    let root = parse_source("<test>", source).unwrap();
    let mut nodes = Vec::new();

    descendants(&root, &mut nodes);

    // Every node sits in exactly one child list.
    for node in &nodes {
        let mut parents = vec![root.clone()];
        parents.extend(nodes.iter().cloned());

        let holders: usize = parents
            .iter()
            .map(|parent| {
                parent
                    .children
                    .iter()
                    .filter(|child| Rc::ptr_eq(child, node))
                    .count()
            })
            .sum();

        assert_eq!(holders, 1, "{} is held {} times", node, holders);
    }
}

#[test]
fn escaped_newline_in_string() {
    let lexemes = tokenize_from_source("<test>", r#""hello\nworld""#).unwrap();

    assert_eq!(lexemes.len(), 1);
    assert_eq!(lexemes[0].kind(), LexemeKind::String);
    assert_eq!(lexemes[0].text(), "hello\nworld");
}

#[test]
fn raw_newline_in_string_fails() {
    let error = tokenize_from_source("<test>", "\"hello\nworld\"").unwrap_err();

    assert_eq!(error.kind(), &ErrorKind::NewlineInString);
    assert!(error.to_string().ends_with("unexpected newline in string"));
}

#[test_case("1.5", LexemeKind::Number, "1.5"; "fraction")]
#[test_case("-5", LexemeKind::Number, "-5"; "negative")]
#[test_case("+7", LexemeKind::Number, "+7"; "positive sign")]
#[test_case("-", LexemeKind::Word, "-"; "lone minus is a word")]
#[test_case("-x", LexemeKind::Word, "-x"; "sign without digit is a word")]
fn number_lexemes(source: &str, kind: LexemeKind, text: &str) {
    let lexemes = tokenize_from_source("<test>", source).unwrap();

    assert_eq!(lexemes.len(), 1);
    assert_eq!(lexemes[0].kind(), kind);
    assert_eq!(lexemes[0].text(), text);
}

#[test]
fn trailing_point_is_malformed() {
    let error = tokenize_from_source("<test>", "1.").unwrap_err();

    assert_eq!(error.kind(), &ErrorKind::MalformedNumber("1.".to_string()));
}

#[test]
fn definitions_run_against_natives() {
    assert_eq!(eval_and_stack(": double 2 * ; 21 double").unwrap(), numbers(&[42.0]));
}

#[test]
fn loops_count_down_and_stop_at_zero() {
    let (mut interpreter, output) = native_interpreter();

    interpreter.process_source("<test>", "5 dup { dup print 1 - dup }").unwrap();

    assert_eq!(output.text(), "54321");
    assert_eq!(interpreter.stack(), &numbers(&[0.0]));
}

#[test]
fn false_loop_condition_skips_the_body() {
    assert_eq!(eval_and_stack("7 0 { 99 } 8").unwrap(), numbers(&[7.0, 8.0]));
}

#[test]
fn redefinition_replaces_the_old_body() {
    assert_eq!(eval_and_stack(": f 1 ; : f 2 ; f f").unwrap(), numbers(&[2.0, 2.0]));
}

#[test]
fn redefinition_does_not_touch_a_running_body() {
    // g redefines f halfway through the old body of f.
    let source = ": g : f 20 ; ; : f 1 g 2 ; f f";

    assert_eq!(eval_and_stack(source).unwrap(), numbers(&[1.0, 2.0, 20.0]));
}

#[test]
fn definitions_bind_when_executed() {
    let error = error_of("f : f 1 ;");

    assert_eq!(error, "<test>:1:1: undefined word: `f`");
}

#[test_case("{ }", "<test>:1:1: empty stack"; "loop with nothing pushed")]
#[test_case("1 +", "<test>:1:3: builtin failed: `+` (empty stack)"; "native with no operands")]
#[test_case("\n  drop", "<test>:2:3: builtin failed: `drop` (empty stack)"; "position of the word")]
fn empty_stack_is_an_error(source: &str, expected: &str) {
    assert_eq!(error_of(source), expected);
}

#[test]
fn undefined_words_are_named_with_their_position() {
    assert_eq!(error_of("1 2\n   frobnicate"), "<test>:2:4: undefined word: `frobnicate`");
}

#[test]
fn loop_condition_must_be_a_number() {
    assert_eq!(error_of("\"yes\" { 0 }"), "<test>:1:7: loop cond should be number, got `text`");
}

#[test]
fn type_errors_from_natives() {
    assert_eq!(
        error_of("1 \"two\" +"),
        "<test>:1:9: builtin failed: `+` (expected number value, got `text`)"
    );
}

#[test]
fn deep_word_chains_do_not_recurse_on_the_host_stack() {
    // Every iteration calls through a chain of words.
    let source = "
        : a 1 + ;
        : b a a ;
        : c b b ;
        0 100000 dup { swap c swap 1 - dup } drop
    ";

    assert_eq!(eval_and_stack(source).unwrap(), numbers(&[400000.0]));
}

#[test]
fn recursion_through_the_dictionary() {
    // countdown calls itself while the top of the stack is non-zero.
    let source = ": countdown dup { 1 - countdown 0 } ; 10000 countdown";

    assert_eq!(eval_and_stack(source).unwrap(), numbers(&[0.0]));
}

#[test]
fn unterminated_blocks_are_not_executed() {
    let (mut interpreter, output) = native_interpreter();
    let error = interpreter.process_source("<test>", "\"side effect\" print : f 1").unwrap_err();

    assert_eq!(error.kind(), &ErrorKind::UnterminatedDefinition("f".to_string()));
    assert_eq!(output.text(), "");
    assert!(interpreter.find_word("f").is_none());
}

#[test]
fn errors_stop_at_the_first_failure() {
    let (mut interpreter, output) = native_interpreter();
    let result = interpreter.process_source("<test>", "\"a\" print missing \"b\" print");

    assert!(result.is_err());
    assert_eq!(output.text(), "a");
    assert!(interpreter.scopes().is_empty());

    // The interpreter stays usable after an error.
    interpreter.process_source("<test>", "\"c\" print").unwrap();
    assert_eq!(output.text(), "ac");
}

#[test]
fn strings_and_numbers_push_values() {
    assert_eq!(
        eval_and_stack("1 \"two\" -3.25").unwrap(),
        vec![Value::Number(1.0), Value::Text("two".to_string()), Value::Number(-3.25)]
    );
}

#[test]
fn comments_are_ignored() {
    assert_eq!(eval_and_stack("1 # 2 3\n4").unwrap(), numbers(&[1.0, 4.0]));
}
