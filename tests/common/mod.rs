#![allow(dead_code)]

use rforth::lang::source_buffer::SourceBuffer;
use rforth::runtime::built_ins::register_builtin_words;
use rforth::runtime::data_structures::value::Value;
use rforth::runtime::error::Result;
use rforth::runtime::interpreter::forth_interpreter::ForthInterpreter;
use rforth::runtime::interpreter::{InterpreterStack, SessionEnd, SourceManagement};
use std::cell::RefCell;
use std::io::{self, Write};
use std::rc::Rc;

/// An output channel the test can read back after the interpreter is done with it.
#[derive(Clone, Default)]
pub struct SharedOutput(Rc<RefCell<Vec<u8>>>);

impl SharedOutput {
    pub fn contents(&self) -> String {
        String::from_utf8_lossy(&self.0.borrow()).to_string()
    }
}

impl Write for SharedOutput {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.0.borrow_mut().extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

/// A fully registered interpreter with no pending input.
pub fn new_interpreter() -> (ForthInterpreter, SharedOutput) {
    let output = SharedOutput::default();
    let mut interpreter = ForthInterpreter::new(
        SourceBuffer::from_source("<empty>", ""),
        Box::new(output.clone()),
    );

    register_builtin_words(&mut interpreter).unwrap();
    (interpreter, output)
}

/// Run the source through a fresh interpreter, returning how the session ended, the final stack
/// and everything that was printed.
pub fn run_source(source: &str) -> (Result<SessionEnd>, Vec<Value>, String) {
    let (mut interpreter, output) = new_interpreter();
    let result = interpreter.process_source("<test>", source);

    (result, interpreter.stack().clone(), output.contents())
}

/// Run the source and return the stack as integers, panicking on fatal errors.
pub fn eval_and_stack(source: &str) -> Vec<i64> {
    let (result, stack, output) = run_source(source);

    result.unwrap_or_else(|err| panic!("{:?} failed: {} (output {:?})", source, err, output));
    stack.iter().map(|value| value.get_int_val()).collect()
}

/// Run the source and return what it printed.
pub fn eval_and_output(source: &str) -> String {
    let (result, _, output) = run_source(source);

    result.unwrap_or_else(|err| panic!("{:?} failed: {}", source, err));
    output
}
