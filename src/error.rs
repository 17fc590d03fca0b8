use std::fmt::{Display, Formatter};

use thiserror::Error;

/// The fallible primitives. Used to report which operation rejected its operand.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Op {
    Div,
    Ln,
    Sqrt,
    Powf,
}

impl Display for Op {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            Op::Div => "div",
            Op::Ln => "ln",
            Op::Sqrt => "sqrt",
            Op::Powf => "powf",
        };
        write!(f, "{name}")
    }
}

/// Where strict mode found a NaN or infinity.
/// The index is the position of the input or output the value belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Quantity {
    Input(usize),
    Value(usize),
    Tangent(usize),
    /// The result of the n-th dual operation of the evaluation, counting from zero.
    /// Only reported if all outputs are finite.
    Intermediate(usize),
}

impl Display for Quantity {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Quantity::Input(i) => write!(f, "input {i}"),
            Quantity::Value(i) => write!(f, "value of output {i}"),
            Quantity::Tangent(i) => write!(f, "tangent of output {i}"),
            Quantity::Intermediate(i) => write!(f, "result of operation {i}"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Error)]
pub enum AdError {
    /// The primal of the operand is outside the domain of `op`.
    #[error("{op}: operand {operand} is outside the domain")]
    Domain { op: Op, operand: f64 },

    /// The primal is defined at `operand`, the derivative is not.
    #[error("{op}: derivative is undefined at {operand}")]
    UndefinedDerivative { op: Op, operand: f64 },

    /// Only raised by drivers in strict mode.
    #[error("non-finite {quantity}")]
    NonFinite { quantity: Quantity },
}

pub type Result<T> = std::result::Result<T, AdError>;
