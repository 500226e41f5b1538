mod common;

use common::{eval_and_output, eval_and_stack, new_interpreter, run_source};
use rforth::lang::compilation::{compile_words, define_word_from_tokens};
use rforth::lang::source_buffer::SourceLocation;
use rforth::lang::tokenizing::tokenize_from_source;
use rforth::runtime::data_structures::dictionary::{WordInfo, WordRuntime, WordType};
use rforth::runtime::data_structures::value::Value;
use rforth::runtime::error::ErrorKind;
use rforth::runtime::interpreter::{
    InterpreterStack, SessionEnd, SourceManagement, WordManagement, native_handler,
};
use std::{cell::Cell, rc::Rc};
use test_case::test_case;

#[test_case(": square dup * ; 5 square", &[25]; "square")]
#[test_case(": square dup * ; 2 square square", &[16]; "invoked twice")]
#[test_case(": add3 3 + ; 1 add3 10 add3", &[4, 13]; "uses the stack at invocation time")]
#[test_case(": nothing ; 1 nothing", &[1]; "empty body")]
#[test_case(": 2x 2 * ; 4 2x", &[8]; "any token can be a name")]
#[test_case(": five\n5\n;\nfive", &[5]; "definition across lines")]
#[test_case(": square dup * ; : quad square square ; 2 quad", &[16]; "words built on words")]
#[test_case(": dup 42 ; 1 dup ?dup", &[1, 42, 42]; "redefining a primitive")]
#[test_case(": x 1 ; : x x x ; x", &[1, 1]; "body sees the previous definition")]
#[test_case(": foo 1 ; : bar foo ; : foo 2 ; bar foo", &[1, 2]; "callers keep the old definition")]
#[test_case(": def : ; def five 5 ; five", &[5]; "colon inside a body reads at invocation")]
fn defines_words(source: &str, expected: &[i64]) {
    assert_eq!(eval_and_stack(source), expected);
}

#[test]
fn defined_words_are_scripted() {
    let (mut interpreter, _) = new_interpreter();
    interpreter.process_source("<test>", "\n : square dup * ;").unwrap();

    let word = interpreter.find_word("square").unwrap();

    assert_eq!(word.word_type(), WordType::Scripted);
    assert_eq!(word.runtime(), WordRuntime::Normal);
    assert_eq!(word.location().line(), 2);
    assert_eq!(word.location().column(), 4);
    assert_eq!(word.description(), "User defined word.");
}

#[test]
fn immediate_words_run_while_compiling() {
    let (mut interpreter, _) = new_interpreter();
    let count = Rc::new(Cell::new(0));
    let seen = count.clone();

    interpreter.define_word(WordInfo::new(
        "mark".to_string(),
        SourceLocation::new(),
        WordRuntime::Immediate,
        WordType::Native,
        native_handler(move |_, _| {
            seen.set(seen.get() + 1);
            Ok(())
        }),
    ));

    interpreter.process_source("<test>", ": pair 1 mark 2 ;").unwrap();
    assert_eq!(count.get(), 1);

    interpreter.process_source("<test>", "pair pair").unwrap();
    assert_eq!(count.get(), 1);
    assert_eq!(
        interpreter.stack(),
        &vec![Value::Int(1), Value::Int(2), Value::Int(1), Value::Int(2)]
    );
}

#[test_case(": foo 1 \\ ignored ; 99\n 2 ; foo", &[1, 2]; "comment hides the semicolon")]
#[test_case(": foo 1 \\ note\n ; foo foo 7", &[1, 1, 7]; "comment leaves nothing behind")]
#[test_case(": foo \\\n 3 ; foo", &[3]; "comment at the end of a line")]
#[test_case(": foo bogus \\ note ;\n 1 2 + ;\n", &[]; "comment hides the semicolon of an abandoned body")]
#[test_case(": foo 7 \\ note ;\n 1 2 + ;\n", &[]; "comment hides the semicolon of a compiled body")]
fn comments_inside_definitions(source: &str, expected: &[i64]) {
    assert_eq!(eval_and_stack(source), expected);
}

#[test]
fn unknown_word_abandons_the_definition() {
    let (mut interpreter, output) = new_interpreter();
    let end = interpreter
        .process_source("<test>", ": bad 1 bogus 2 ; 3")
        .unwrap();

    assert_eq!(end, SessionEnd::EndOfInput);
    assert_eq!(interpreter.stack(), &vec![Value::Int(3)]);
    assert_eq!(output.contents(), "unknown word: bogus\n");
    assert!(interpreter.find_word("bad").is_none());
}

#[test]
fn abandoned_body_still_honors_comments() {
    let (result, stack, output) = run_source(": foo bogus \\ note ;\n 1 2 + ;\n foo");

    assert_eq!(result.unwrap(), SessionEnd::EndOfInput);
    assert!(stack.is_empty());
    assert_eq!(output, "unknown word: bogus\nunknown word: foo\n");
}

#[test]
fn abandoned_body_is_never_run() {
    assert_eq!(eval_and_output(": bad bogus . ; 3 ."), "unknown word: bogus\n3");
}

#[test]
fn abandoned_definition_keeps_the_old_word() {
    assert_eq!(eval_and_stack(": foo 1 ; : foo bogus ; foo"), vec![1]);
}

#[test_case(": foo 1 2"; "missing semicolon")]
#[test_case(":"; "missing name")]
#[test_case(": foo"; "name only")]
#[test_case(": foo bogus"; "unknown word and no semicolon")]
fn truncated_definitions_are_fatal(source: &str) {
    let (mut interpreter, _) = new_interpreter();
    let error = interpreter.process_source("<test>", source).unwrap_err();

    assert_eq!(error.kind(), &ErrorKind::TruncatedDefinition);
    assert!(error.is_fatal());
    assert!(interpreter.find_word("foo").is_none());
}

#[test]
fn bye_inside_a_word_stops_the_replay() {
    let (result, stack, output) = run_source(": stop 1 bye 2 . ; stop 3");

    assert_eq!(result.unwrap(), SessionEnd::Terminated);
    assert_eq!(stack, vec![Value::Int(1)]);
    assert_eq!(output, "");
}

#[test]
fn words_from_tokens() {
    let (mut interpreter, _) = new_interpreter();
    let tokens = tokenize_from_source("<tokens>", "dup *").unwrap();

    define_word_from_tokens(&mut interpreter, SourceLocation::new(), "square", &tokens).unwrap();
    interpreter.process_source("<test>", "6 square").unwrap();

    assert_eq!(interpreter.stack(), &vec![Value::Int(36)]);
}

#[test]
fn words_from_tokens_fail_on_unknown_words() {
    let (mut interpreter, _) = new_interpreter();
    let tokens = tokenize_from_source("<tokens>", "dup frob").unwrap();

    let error = define_word_from_tokens(&mut interpreter, SourceLocation::new(), "square", &tokens)
        .unwrap_err();

    assert_eq!(error.kind(), &ErrorKind::UnknownWord("frob".to_string()));
    assert_eq!(error.location().clone().unwrap().column(), 5);
    assert!(interpreter.find_word("square").is_none());
}

#[test]
fn immediate_words_leave_no_step() {
    let (mut interpreter, _) = new_interpreter();
    let tokens = tokenize_from_source("<tokens>", "1 \\ 2").unwrap();

    let function = compile_words(&mut interpreter, &tokens).unwrap();

    assert_eq!(function.len(), 2);
}

#[test]
fn aliases_share_behavior() {
    let (mut interpreter, _) = new_interpreter();

    interpreter.process_source("<test>", ": square dup * ;").unwrap();
    interpreter.alias_word("sq", "square").unwrap();
    interpreter.process_source("<test>", "3 sq").unwrap();

    assert_eq!(interpreter.stack(), &vec![Value::Int(9)]);
    assert_eq!(
        interpreter.find_word("sq").unwrap().word_type(),
        WordType::Scripted
    );
}

#[test]
fn alias_of_a_missing_word_fails() {
    let (mut interpreter, _) = new_interpreter();
    let error = interpreter.alias_word("sq", "square").unwrap_err();

    assert_eq!(error.kind(), &ErrorKind::NoSuchWord("square".to_string()));
    assert!(interpreter.find_word("sq").is_none());
}
