use crate::{
    location_here,
    runtime::{
        built_ins::{PrimitiveWord, register_primitives, require_depth},
        data_structures::dictionary::WordRuntime,
        error,
        interpreter::Interpreter,
    },
};

/// Duplicate the top value on the data stack.
///
/// Signature: `value -- value value`
fn word_dup(interpreter: &mut dyn Interpreter, name: &str) -> error::Result<()> {
    if !require_depth(interpreter, name, 1)? {
        return Ok(());
    }

    let value = interpreter.pop()?;

    interpreter.push(value);
    interpreter.push(value);

    Ok(())
}

/// Duplicate the top value, but only if there is one.  An empty stack is not an error.
///
/// Signature: `value -- value value`
fn word_q_dup(interpreter: &mut dyn Interpreter, _name: &str) -> error::Result<()> {
    if let Some(value) = interpreter.stack().last().copied() {
        interpreter.push(value);
    }

    Ok(())
}

/// Drop the top value on the data stack.
///
/// Signature: `value -- `
fn word_drop(interpreter: &mut dyn Interpreter, name: &str) -> error::Result<()> {
    if !require_depth(interpreter, name, 1)? {
        return Ok(());
    }

    let _ = interpreter.pop()?;

    Ok(())
}

/// Swap the top 2 values on the data stack.
///
/// Signature: `a b -- b a`
fn word_swap(interpreter: &mut dyn Interpreter, name: &str) -> error::Result<()> {
    if !require_depth(interpreter, name, 2)? {
        return Ok(());
    }

    let b = interpreter.pop()?;
    let a = interpreter.pop()?;

    interpreter.push(b);
    interpreter.push(a);

    Ok(())
}

/// Make a copy of the second value and place it on top.
///
/// Signature: `a b -- a b a`
fn word_over(interpreter: &mut dyn Interpreter, name: &str) -> error::Result<()> {
    if !require_depth(interpreter, name, 2)? {
        return Ok(());
    }

    let b = interpreter.pop()?;
    let a = interpreter.pop()?;

    interpreter.push(a);
    interpreter.push(b);
    interpreter.push(a);

    Ok(())
}

/// Rotate the third value to the top of the stack.
///
/// Signature: `a b c -- b c a`
fn word_rot(interpreter: &mut dyn Interpreter, name: &str) -> error::Result<()> {
    if !require_depth(interpreter, name, 3)? {
        return Ok(());
    }

    let c = interpreter.pop()?;
    let b = interpreter.pop()?;
    let a = interpreter.pop()?;

    interpreter.push(b);
    interpreter.push(c);
    interpreter.push(a);

    Ok(())
}

const STACK_WORDS: &[PrimitiveWord] = &[
    PrimitiveWord {
        name: "dup",
        alias: None,
        handler: word_dup,
        runtime: WordRuntime::Normal,
        description: "Duplicate the top value.",
        signature: "a -- a a",
    },
    PrimitiveWord {
        name: "q_dup",
        alias: Some("?dup"),
        handler: word_q_dup,
        runtime: WordRuntime::Normal,
        description: "Duplicate the top value if there is one.",
        signature: "a -- a a",
    },
    PrimitiveWord {
        name: "drop",
        alias: None,
        handler: word_drop,
        runtime: WordRuntime::Normal,
        description: "Discard the top value.",
        signature: "a --",
    },
    PrimitiveWord {
        name: "swap",
        alias: None,
        handler: word_swap,
        runtime: WordRuntime::Normal,
        description: "Swap the top 2 values.",
        signature: "a b -- b a",
    },
    PrimitiveWord {
        name: "over",
        alias: None,
        handler: word_over,
        runtime: WordRuntime::Normal,
        description: "Copy the second value to the top.",
        signature: "a b -- a b a",
    },
    PrimitiveWord {
        name: "rot",
        alias: None,
        handler: word_rot,
        runtime: WordRuntime::Normal,
        description: "Rotate the third value to the top.",
        signature: "a b c -- b c a",
    },
];

/// Register the stack manipulation words.
pub fn register_stack_words(interpreter: &mut dyn Interpreter) -> error::Result<()> {
    register_primitives(interpreter, location_here!(), STACK_WORDS)
}
