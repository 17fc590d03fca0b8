use std::convert::Infallible;

use crate::{num::Float, num::Num, tangent::Tangent, AdError, Op};

/// A trait that represents the operation on the primal value, and returns the
/// operation on the tangents as `Self`. `f` computes the primal and keeps
/// whatever partial derivatives the tangent step needs, so the derivative
/// multipliers reuse the primal computation instead of redoing it.
pub(crate) trait UnaryOp<T>
where
    Self: Sized,
{
    type Args: ?Sized;
    type Error;
    fn f(a: &T, args: &Self::Args) -> Result<(Self, T), Self::Error>;
}

/// Same as `UnaryOp`, but for binary operations.
pub(crate) trait BinaryOp<T>
where
    Self: Sized,
{
    type Error;
    fn f(a: &T, b: &T) -> Result<(Self, T), Self::Error>;
}

/// Pushes a tangent of the operand through a unary operation: `da -> f'(a)·da`.
pub(crate) trait UnaryDiffOp<T>: UnaryOp<T> {
    fn df_dfda<D: Tangent<T>>(&self, da: &D) -> Result<D, Self::Error>;
}

/// Same as `UnaryDiffOp`, but for binary operations, one method per operand.
pub(crate) trait BinaryDiffOp<T>: BinaryOp<T> {
    fn df_dfda<D: Tangent<T>>(&self, da: &D) -> Result<D, Self::Error>;
    fn df_dfdb<D: Tangent<T>>(&self, db: &D) -> Result<D, Self::Error>;
}

pub(crate) struct AddOp;

impl<T: Num> BinaryOp<T> for AddOp {
    type Error = Infallible;
    fn f(a: &T, b: &T) -> Result<(Self, T), Self::Error> {
        Ok((AddOp, a.clone() + b.clone()))
    }
}

impl<T: Num> BinaryDiffOp<T> for AddOp {
    fn df_dfda<D: Tangent<T>>(&self, da: &D) -> Result<D, Self::Error> {
        Ok(da.clone())
    }

    fn df_dfdb<D: Tangent<T>>(&self, db: &D) -> Result<D, Self::Error> {
        Ok(db.clone())
    }
}

pub(crate) struct SubOp;

impl<T: Num> BinaryOp<T> for SubOp {
    type Error = Infallible;
    fn f(a: &T, b: &T) -> Result<(Self, T), Self::Error> {
        Ok((SubOp, a.clone() - b.clone()))
    }
}

impl<T: Num> BinaryDiffOp<T> for SubOp {
    fn df_dfda<D: Tangent<T>>(&self, da: &D) -> Result<D, Self::Error> {
        Ok(da.clone())
    }

    fn df_dfdb<D: Tangent<T>>(&self, db: &D) -> Result<D, Self::Error> {
        Ok(db.negate())
    }
}

pub(crate) struct MulOp<T>(T, T);

impl<T: Num> BinaryOp<T> for MulOp<T> {
    type Error = Infallible;
    fn f(a: &T, b: &T) -> Result<(Self, T), Self::Error> {
        Ok((MulOp(a.clone(), b.clone()), a.clone() * b.clone()))
    }
}

impl<T: Num> BinaryDiffOp<T> for MulOp<T> {
    fn df_dfda<D: Tangent<T>>(&self, da: &D) -> Result<D, Self::Error> {
        Ok(da.scale(&self.1))
    }

    fn df_dfdb<D: Tangent<T>>(&self, db: &D) -> Result<D, Self::Error> {
        Ok(db.scale(&self.0))
    }
}

/// Keeps `1/b` and `a/b²`.
pub(crate) struct DivOp<T>(T, T);

impl<T: Num> BinaryOp<T> for DivOp<T> {
    type Error = AdError;
    fn f(a: &T, b: &T) -> Result<(Self, T), Self::Error> {
        let r = a.try_div(b)?;
        let inv_b = T::one().try_div(b)?;
        let r_over_b = r.clone() * inv_b.clone();
        Ok((DivOp(inv_b, r_over_b), r))
    }
}

impl<T: Num> BinaryDiffOp<T> for DivOp<T> {
    fn df_dfda<D: Tangent<T>>(&self, da: &D) -> Result<D, Self::Error> {
        Ok(da.scale(&self.0))
    }

    fn df_dfdb<D: Tangent<T>>(&self, db: &D) -> Result<D, Self::Error> {
        Ok(db.scale(&self.1).negate())
    }
}

/// Keeps base, exponent and result.
pub(crate) struct PowfOp<T>(T, T, T);

impl<T: Float> PowfOp<T> {
    #[allow(clippy::float_cmp)]
    fn is_zero_base(&self) -> bool {
        self.0.to_f64() == 0.0
    }

    fn undefined(&self) -> AdError {
        AdError::UndefinedDerivative {
            op: Op::Powf,
            operand: self.0.to_f64(),
        }
    }
}

impl<T: Float> BinaryOp<T> for PowfOp<T> {
    type Error = AdError;
    fn f(a: &T, b: &T) -> Result<(Self, T), Self::Error> {
        let r = a.powf(b)?;
        Ok((PowfOp(a.clone(), b.clone(), r.clone()), r))
    }
}

impl<T: Float> BinaryDiffOp<T> for PowfOp<T> {
    fn df_dfda<D: Tangent<T>>(&self, da: &D) -> Result<D, Self::Error> {
        if self.is_zero_base() {
            // b·0^(b-1): zero for b > 1, b for b = 1, unbounded below that.
            if self.1.to_f64() < 1.0 {
                return Err(self.undefined());
            }
            let k = self.1.clone() * self.0.powf(&(self.1.clone() - T::one()))?;
            return Ok(da.scale(&k));
        }
        // b·a^(b-1) = b·r/a
        let k = self.1.clone() * self.2.try_div(&self.0)?;
        Ok(da.scale(&k))
    }

    fn df_dfdb<D: Tangent<T>>(&self, db: &D) -> Result<D, Self::Error> {
        if self.is_zero_base() {
            // 0^b is constant for b > 0.
            if self.1.to_f64() > 0.0 {
                return Ok(D::zero_tangent());
            }
            return Err(self.undefined());
        }
        let k = self.0.ln()? * self.2.clone();
        Ok(db.scale(&k))
    }
}

pub(crate) struct NegOp;

impl<T: Num> UnaryOp<T> for NegOp {
    type Args = ();
    type Error = Infallible;
    fn f(a: &T, _: &Self::Args) -> Result<(Self, T), Self::Error> {
        Ok((NegOp, -a.clone()))
    }
}

impl<T: Num> UnaryDiffOp<T> for NegOp {
    fn df_dfda<D: Tangent<T>>(&self, da: &D) -> Result<D, Self::Error> {
        Ok(da.negate())
    }
}

/// Keeps `n·a^(n-1)`.
pub(crate) struct PowiOp<T>(T);

impl<T: Num> UnaryOp<T> for PowiOp<T> {
    type Args = u32;
    type Error = Infallible;
    fn f(a: &T, n: &Self::Args) -> Result<(Self, T), Self::Error> {
        let n = *n;
        let r = a.powi(n);
        // closed form; n = 0 must not touch a^(-1).
        let k = if n == 0 {
            T::zero()
        } else {
            T::from_f64(f64::from(n)) * a.powi(n - 1)
        };
        Ok((PowiOp(k), r))
    }
}

impl<T: Num> UnaryDiffOp<T> for PowiOp<T> {
    fn df_dfda<D: Tangent<T>>(&self, da: &D) -> Result<D, Self::Error> {
        Ok(da.scale(&self.0))
    }
}

// The transcendental ops below all keep f'(a) and scale by it.

pub(crate) struct SinOp<T>(T);

impl<T: Float> UnaryOp<T> for SinOp<T> {
    type Args = ();
    type Error = Infallible;
    fn f(a: &T, _: &Self::Args) -> Result<(Self, T), Self::Error> {
        Ok((SinOp(a.cos()), a.sin()))
    }
}

impl<T: Float> UnaryDiffOp<T> for SinOp<T> {
    fn df_dfda<D: Tangent<T>>(&self, da: &D) -> Result<D, Self::Error> {
        Ok(da.scale(&self.0))
    }
}

pub(crate) struct CosOp<T>(T);

impl<T: Float> UnaryOp<T> for CosOp<T> {
    type Args = ();
    type Error = Infallible;
    fn f(a: &T, _: &Self::Args) -> Result<(Self, T), Self::Error> {
        Ok((CosOp(-a.sin()), a.cos()))
    }
}

impl<T: Float> UnaryDiffOp<T> for CosOp<T> {
    fn df_dfda<D: Tangent<T>>(&self, da: &D) -> Result<D, Self::Error> {
        Ok(da.scale(&self.0))
    }
}

pub(crate) struct TanOp<T>(T);

impl<T: Float> UnaryOp<T> for TanOp<T> {
    type Args = ();
    type Error = Infallible;
    fn f(a: &T, _: &Self::Args) -> Result<(Self, T), Self::Error> {
        let r = a.tan();
        Ok((TanOp(T::one() + r.clone() * r.clone()), r))
    }
}

impl<T: Float> UnaryDiffOp<T> for TanOp<T> {
    fn df_dfda<D: Tangent<T>>(&self, da: &D) -> Result<D, Self::Error> {
        Ok(da.scale(&self.0))
    }
}

pub(crate) struct AtanOp<T>(T);

impl<T: Float> UnaryOp<T> for AtanOp<T> {
    type Args = ();
    type Error = Infallible;
    fn f(a: &T, _: &Self::Args) -> Result<(Self, T), Self::Error> {
        // 1/(1+a²) = cos²(atan(a)), which needs no division.
        let r = a.atan();
        let c = r.cos();
        Ok((AtanOp(c.clone() * c), r))
    }
}

impl<T: Float> UnaryDiffOp<T> for AtanOp<T> {
    fn df_dfda<D: Tangent<T>>(&self, da: &D) -> Result<D, Self::Error> {
        Ok(da.scale(&self.0))
    }
}

pub(crate) struct TanhOp<T>(T);

impl<T: Float> UnaryOp<T> for TanhOp<T> {
    type Args = ();
    type Error = Infallible;
    fn f(a: &T, _: &Self::Args) -> Result<(Self, T), Self::Error> {
        let r = a.tanh();
        Ok((TanhOp(T::one() - r.clone() * r.clone()), r))
    }
}

impl<T: Float> UnaryDiffOp<T> for TanhOp<T> {
    fn df_dfda<D: Tangent<T>>(&self, da: &D) -> Result<D, Self::Error> {
        Ok(da.scale(&self.0))
    }
}

pub(crate) struct ExpOp<T>(T);

impl<T: Float> UnaryOp<T> for ExpOp<T> {
    type Args = ();
    type Error = Infallible;
    fn f(a: &T, _: &Self::Args) -> Result<(Self, T), Self::Error> {
        let r = a.exp();
        Ok((ExpOp(r.clone()), r))
    }
}

impl<T: Float> UnaryDiffOp<T> for ExpOp<T> {
    fn df_dfda<D: Tangent<T>>(&self, da: &D) -> Result<D, Self::Error> {
        Ok(da.scale(&self.0))
    }
}

pub(crate) struct LnOp<T>(T);

impl<T: Float> UnaryOp<T> for LnOp<T> {
    type Args = ();
    type Error = AdError;
    fn f(a: &T, _: &Self::Args) -> Result<(Self, T), Self::Error> {
        let r = a.ln()?;
        Ok((LnOp(T::one().try_div(a)?), r))
    }
}

impl<T: Float> UnaryDiffOp<T> for LnOp<T> {
    fn df_dfda<D: Tangent<T>>(&self, da: &D) -> Result<D, Self::Error> {
        Ok(da.scale(&self.0))
    }
}

/// Keeps the result; the multiplier `1/(2·√a)` only exists away from zero.
pub(crate) struct SqrtOp<T>(T);

impl<T: Float> UnaryOp<T> for SqrtOp<T> {
    type Args = ();
    type Error = AdError;
    fn f(a: &T, _: &Self::Args) -> Result<(Self, T), Self::Error> {
        let r = a.sqrt()?;
        Ok((SqrtOp(r.clone()), r))
    }
}

impl<T: Float> UnaryDiffOp<T> for SqrtOp<T> {
    #[allow(clippy::float_cmp)]
    fn df_dfda<D: Tangent<T>>(&self, da: &D) -> Result<D, Self::Error> {
        if self.0.to_f64() == 0.0 {
            return Err(AdError::UndefinedDerivative {
                op: Op::Sqrt,
                operand: 0.0,
            });
        }
        let k = T::one().try_div(&(self.0.clone() + self.0.clone()))?;
        Ok(da.scale(&k))
    }
}
