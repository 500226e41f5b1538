use crate::lang::tokenizing::NumberType;
use std::{
    fmt::{self, Debug, Display, Formatter},
    ops::{Add, Mul, Sub},
};

/// Everything the data stack can hold.  The language only knows numbers, words never end up on
/// the stack.
#[derive(Clone, Copy, PartialEq)]
pub enum Value {
    /// We have an integer value.  Represented as an i64.
    Int(i64),

    /// A floating-point value.  Represented as a f64.
    Float(f64),
}

/// Convert an arbitrary data type to a Value.
pub trait ToValue {
    fn to_value(&self) -> Value;
}

impl ToValue for i64 {
    fn to_value(&self) -> Value {
        Value::Int(*self)
    }
}

impl ToValue for f64 {
    fn to_value(&self) -> Value {
        Value::Float(*self)
    }
}

impl ToValue for NumberType {
    fn to_value(&self) -> Value {
        match self {
            NumberType::Int(value) => Value::Int(*value),
            NumberType::Float(value) => Value::Float(*value),
        }
    }
}

impl From<i64> for Value {
    fn from(value: i64) -> Value {
        value.to_value()
    }
}

impl From<f64> for Value {
    fn from(value: f64) -> Value {
        value.to_value()
    }
}

/// Floats always show a fractional part so they can be told apart from integers in a stack dump.
fn format_float(value: f64) -> String {
    if value.is_nan() {
        "NaN".to_string()
    } else if value.is_infinite() {
        let text = if value > 0.0 { "Infinity" } else { "-Infinity" };
        text.to_string()
    } else if value.abs() >= 1e16 {
        format!("{:e}", value)
    } else if value.fract() == 0.0 {
        format!("{:.1}", value)
    } else {
        format!("{}", value)
    }
}

impl Display for Value {
    fn fmt(&self, f: &mut Formatter) -> fmt::Result {
        match self {
            Value::Int(value) => write!(f, "{}", value),
            Value::Float(value) => write!(f, "{}", format_float(*value)),
        }
    }
}

impl Debug for Value {
    fn fmt(&self, f: &mut Formatter) -> fmt::Result {
        match self {
            Value::Int(value) => write!(f, "{} i", value),
            Value::Float(value) => write!(f, "{} f", format_float(*value)),
        }
    }
}

/// Integer division rounding toward negative infinity.  `None` on overflow or a zero divisor.
fn floor_div(a: i64, b: i64) -> Option<i64> {
    let quotient = a.checked_div(b)?;

    if a % b != 0 && ((a < 0) != (b < 0)) {
        quotient.checked_sub(1)
    } else {
        Some(quotient)
    }
}

impl Value {
    pub fn is_int(&self) -> bool {
        matches!(self, Value::Int(_))
    }

    pub fn is_float(&self) -> bool {
        matches!(self, Value::Float(_))
    }

    pub fn either_is_float(a: &Value, b: &Value) -> bool {
        a.is_float() || b.is_float()
    }

    /// The value as an integer, floats are truncated.
    pub fn get_int_val(&self) -> i64 {
        match self {
            Value::Int(value) => *value,
            Value::Float(value) => *value as i64,
        }
    }

    pub fn get_float_val(&self) -> f64 {
        match self {
            Value::Int(value) => *value as f64,
            Value::Float(value) => *value,
        }
    }

    /// Apply an arithmetic operation.  Mixed operands are computed as floats, and integer results
    /// that would overflow are promoted to floats as well.
    fn arithmetic(
        a: Value,
        b: Value,
        iop: fn(i64, i64) -> Option<i64>,
        fop: fn(f64, f64) -> f64,
    ) -> Value {
        if !Value::either_is_float(&a, &b)
            && let Some(result) = iop(a.get_int_val(), b.get_int_val())
        {
            return result.to_value();
        }

        fop(a.get_float_val(), b.get_float_val()).to_value()
    }

    /// Divide `self` by `divisor`.  Integer division floors.  Returns `None` only for an integer
    /// division by zero, float division follows IEEE rules.
    pub fn checked_div(self, divisor: Value) -> Option<Value> {
        if !Value::either_is_float(&self, &divisor) && divisor.get_int_val() == 0 {
            return None;
        }

        Some(Value::arithmetic(self, divisor, floor_div, |a, b| a / b))
    }
}

impl Add for Value {
    type Output = Value;

    fn add(self, other: Value) -> Value {
        Value::arithmetic(self, other, i64::checked_add, |a, b| a + b)
    }
}

impl Sub for Value {
    type Output = Value;

    fn sub(self, other: Value) -> Value {
        Value::arithmetic(self, other, i64::checked_sub, |a, b| a - b)
    }
}

impl Mul for Value {
    type Output = Value;

    fn mul(self, other: Value) -> Value {
        Value::arithmetic(self, other, i64::checked_mul, |a, b| a * b)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display() {
        assert_eq!(Value::Int(-4).to_string(), "-4");
        assert_eq!(Value::Float(3.0).to_string(), "3.0");
        assert_eq!(Value::Float(2.5).to_string(), "2.5");
        assert_eq!(Value::Float(1.0 / 0.0).to_string(), "Infinity");
    }

    #[test]
    fn mixed_arithmetic_promotes_to_float() {
        assert_eq!(Value::Int(1) + Value::Float(2.5), Value::Float(3.5));
        assert_eq!(Value::Int(6) * Value::Int(7), Value::Int(42));
        assert_eq!(Value::Int(2) - Value::Int(5), Value::Int(-3));
    }

    #[test]
    fn overflow_promotes_to_float() {
        assert_eq!(
            Value::Int(i64::MAX) + Value::Int(1),
            Value::Float(i64::MAX as f64 + 1.0)
        );
    }

    #[test]
    fn division_floors() {
        assert_eq!(Value::Int(7).checked_div(Value::Int(2)), Some(Value::Int(3)));
        assert_eq!(Value::Int(-7).checked_div(Value::Int(2)), Some(Value::Int(-4)));
        assert_eq!(Value::Int(7).checked_div(Value::Int(-2)), Some(Value::Int(-4)));
        assert_eq!(Value::Int(-8).checked_div(Value::Int(2)), Some(Value::Int(-4)));
        assert_eq!(
            Value::Int(7).checked_div(Value::Float(2.0)),
            Some(Value::Float(3.5))
        );
    }

    #[test]
    fn integer_division_by_zero() {
        assert_eq!(Value::Int(1).checked_div(Value::Int(0)), None);
        assert_eq!(
            Value::Float(1.0).checked_div(Value::Int(0)),
            Some(Value::Float(f64::INFINITY))
        );
    }
}
