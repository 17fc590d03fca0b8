use std::{
    fmt::Debug,
    ops::{Add, Mul, Neg, Sub},
};

use crate::{AdError, Op, Result};

/// The number capability. A function written only in terms of `Num` (and `Float`)
/// can be evaluated on plain reals, or on dual numbers to get its derivatives.
///
/// Division is the one arithmetic operation that can fail, so it is a method
/// returning `Result` rather than an `ops::Div` implementation.
pub trait Num:
    'static
    + Clone
    + Debug
    + PartialEq
    + Add<Self, Output = Self>
    + Sub<Self, Output = Self>
    + Mul<Self, Output = Self>
    + Neg<Output = Self>
{
    /// Construct a constant from a literal.
    fn from_f64(value: f64) -> Self;

    #[must_use]
    fn zero() -> Self {
        Self::from_f64(0.0)
    }

    #[must_use]
    fn one() -> Self {
        Self::from_f64(1.0)
    }

    /// The real part, i.e. the primal all the way down.
    /// Use this to branch on values; branching on the concrete type is never needed.
    fn to_f64(&self) -> f64;

    /// True if every component, primal and tangents, is finite.
    fn is_finite(&self) -> bool;

    /// Divide, failing with a domain error if the real part of `rhs` is exactly zero.
    ///
    /// # Errors
    /// `AdError::Domain` for a zero divisor.
    fn try_div(&self, rhs: &Self) -> Result<Self>;

    /// Raise to a non-negative integer power.
    #[must_use]
    fn powi(&self, n: u32) -> Self;
}

/// Transcendental functions. See `Num`.
pub trait Float: Num {
    #[must_use]
    fn sin(&self) -> Self;
    #[must_use]
    fn cos(&self) -> Self;
    #[must_use]
    fn tan(&self) -> Self;
    #[must_use]
    fn atan(&self) -> Self;
    #[must_use]
    fn tanh(&self) -> Self;
    #[must_use]
    fn exp(&self) -> Self;

    /// Natural logarithm.
    ///
    /// # Errors
    /// `AdError::Domain` if the real part is not positive.
    fn ln(&self) -> Result<Self>;

    /// # Errors
    /// `AdError::Domain` if the real part is negative.
    /// On duals, `AdError::UndefinedDerivative` at zero when the tangent is non-zero.
    fn sqrt(&self) -> Result<Self>;

    /// Raise self to a real power.
    ///
    /// # Errors
    /// `AdError::Domain` if the real part of the base is negative.
    /// On duals with base zero and a non-zero tangent, `AdError::UndefinedDerivative`
    /// if the exponent is below one (or not positive, for the exponent's own tangent).
    fn powf(&self, exponent: &Self) -> Result<Self>;
}

macro_rules! impl_float {
    ($t:ident) => {
        impl Num for $t {
            #[allow(clippy::cast_possible_truncation, clippy::unnecessary_cast)]
            fn from_f64(value: f64) -> Self {
                value as $t
            }

            fn to_f64(&self) -> f64 {
                f64::from(*self)
            }

            fn is_finite(&self) -> bool {
                $t::is_finite(*self)
            }

            #[allow(clippy::float_cmp)]
            fn try_div(&self, rhs: &Self) -> Result<Self> {
                if *rhs == 0.0 {
                    return Err(AdError::Domain {
                        op: Op::Div,
                        operand: f64::from(*rhs),
                    });
                }
                Ok(*self / *rhs)
            }

            #[allow(clippy::cast_possible_truncation, clippy::unnecessary_cast)]
            fn powi(&self, n: u32) -> Self {
                match i32::try_from(n) {
                    Ok(n) => $t::powi(*self, n),
                    // every u32 is exact in f64, so the parity of n survives
                    Err(_) => f64::from(*self).powf(f64::from(n)) as $t,
                }
            }
        }

        impl Float for $t {
            fn sin(&self) -> Self {
                $t::sin(*self)
            }

            fn cos(&self) -> Self {
                $t::cos(*self)
            }

            fn tan(&self) -> Self {
                $t::tan(*self)
            }

            fn atan(&self) -> Self {
                $t::atan(*self)
            }

            fn tanh(&self) -> Self {
                $t::tanh(*self)
            }

            fn exp(&self) -> Self {
                $t::exp(*self)
            }

            fn ln(&self) -> Result<Self> {
                if *self <= 0.0 {
                    return Err(AdError::Domain {
                        op: Op::Ln,
                        operand: f64::from(*self),
                    });
                }
                Ok($t::ln(*self))
            }

            fn sqrt(&self) -> Result<Self> {
                if *self < 0.0 {
                    return Err(AdError::Domain {
                        op: Op::Sqrt,
                        operand: f64::from(*self),
                    });
                }
                Ok($t::sqrt(*self))
            }

            fn powf(&self, exponent: &Self) -> Result<Self> {
                if *self < 0.0 {
                    return Err(AdError::Domain {
                        op: Op::Powf,
                        operand: f64::from(*self),
                    });
                }
                Ok($t::powf(*self, *exponent))
            }
        }
    };
}

impl_float!(f32);
impl_float!(f64);
