use crate::{
    location_here,
    runtime::{
        built_ins::{PrimitiveWord, register_primitives, require_depth},
        data_structures::{dictionary::WordRuntime, value::Value},
        error,
        interpreter::Interpreter,
    },
};

/// Helper for the binary math words.  Checks the depth, pops `a` and `b` and pushes `op(a, b)`.
/// `b` is the value that was on top of the stack.
fn math_op(
    interpreter: &mut dyn Interpreter,
    name: &str,
    op: fn(Value, Value) -> Value,
) -> error::Result<()> {
    if !require_depth(interpreter, name, 2)? {
        return Ok(());
    }

    let b = interpreter.pop()?;
    let a = interpreter.pop()?;

    interpreter.push(op(a, b));
    Ok(())
}

/// Add 2 numbers.
///
/// Signature: `a b -- a+b`
fn word_plus(interpreter: &mut dyn Interpreter, name: &str) -> error::Result<()> {
    math_op(interpreter, name, |a, b| a + b)
}

/// Multiply 2 numbers.
///
/// Signature: `a b -- a*b`
fn word_mult(interpreter: &mut dyn Interpreter, name: &str) -> error::Result<()> {
    math_op(interpreter, name, |a, b| a * b)
}

/// Subtract the top value from the one below it.
///
/// Signature: `a b -- a-b`
fn word_subtract(interpreter: &mut dyn Interpreter, name: &str) -> error::Result<()> {
    math_op(interpreter, name, |a, b| a - b)
}

/// Divide the second value by the top value.  Integer division floors, and an integer division by
/// zero is reported and clears the stack.
///
/// Signature: `a b -- a/b`
fn word_divide(interpreter: &mut dyn Interpreter, name: &str) -> error::Result<()> {
    if !require_depth(interpreter, name, 2)? {
        return Ok(());
    }

    let b = interpreter.pop()?;
    let a = interpreter.pop()?;

    match a.checked_div(b) {
        Some(result) => interpreter.push(result),
        None => {
            interpreter.print(&format!("{} division by zero\n", name))?;
            interpreter.clear_stack();
        }
    }

    Ok(())
}

const ARITHMETIC_WORDS: &[PrimitiveWord] = &[
    PrimitiveWord {
        name: "plus",
        alias: Some("+"),
        handler: word_plus,
        runtime: WordRuntime::Normal,
        description: "Add 2 numbers.",
        signature: "a b -- a+b",
    },
    PrimitiveWord {
        name: "mult",
        alias: Some("*"),
        handler: word_mult,
        runtime: WordRuntime::Normal,
        description: "Multiply 2 numbers.",
        signature: "a b -- a*b",
    },
    PrimitiveWord {
        name: "subtract",
        alias: Some("-"),
        handler: word_subtract,
        runtime: WordRuntime::Normal,
        description: "Subtract the top number from the one below it.",
        signature: "a b -- a-b",
    },
    PrimitiveWord {
        name: "divide",
        alias: Some("/"),
        handler: word_divide,
        runtime: WordRuntime::Normal,
        description: "Divide the second number by the top number.",
        signature: "a b -- a/b",
    },
];

pub fn register_simple_arithmetic_words(interpreter: &mut dyn Interpreter) -> error::Result<()> {
    register_primitives(interpreter, location_here!(), ARITHMETIC_WORDS)
}
