use std::{
    convert::Infallible,
    fmt::{Display, Formatter},
    ops::{Add, Mul, Neg, Sub},
};

use crate::{
    ad_ops::{
        AddOp, AtanOp, BinaryDiffOp, CosOp, DivOp, ExpOp, LnOp, MulOp, NegOp, PowfOp, PowiOp,
        SinOp, SqrtOp, SubOp, TanOp, TanhOp, UnaryDiffOp,
    },
    num::{Float, Num},
    tangent::{Partials, Tangent},
    Result,
};

/// A dual number `value + tangent·ε` with `ε² = 0`.
///
/// `T` is the primal type and `D` the tangent payload: `D = T` differentiates with
/// respect to one variable, `D = Partials<T>` with respect to many at once.
/// Because `Dual` is itself a `Float`, it can be nested: `Dual<Dual<f64>>` carries
/// second derivatives.
///
/// Duals are immutable; every operation returns a new one.
#[derive(Clone, Copy, Debug, PartialEq)]
#[must_use]
pub struct Dual<T, D = T> {
    value: T,
    tangent: D,
}

/// A dual number with a vector of partial derivatives as tangent.
pub type DualVec<T> = Dual<T, Partials<T>>;

impl<T, D> Dual<T, D> {
    pub fn new(value: T, tangent: D) -> Self {
        Dual { value, tangent }
    }

    pub fn primal(&self) -> &T {
        &self.value
    }

    pub fn tangent(&self) -> &D {
        &self.tangent
    }

    pub fn into_primal(self) -> T {
        self.value
    }

    pub fn into_parts(self) -> (T, D) {
        (self.value, self.tangent)
    }
}

impl<T: Num, D: Tangent<T>> Dual<T, D> {
    /// A constant: its tangent is zero.
    pub fn lift(value: T) -> Self {
        Dual {
            value,
            tangent: D::zero_tangent(),
        }
    }

    #[must_use]
    pub fn is_constant(&self) -> bool {
        self.tangent.is_zero_tangent()
    }

    fn observed(self) -> Self {
        crate::options::observe(|| self.value.is_finite() && self.tangent.all_finite());
        self
    }

    pub(crate) fn try_unary<Op: UnaryDiffOp<T>>(
        &self,
        args: &Op::Args,
    ) -> std::result::Result<Self, Op::Error> {
        let (op, value) = Op::f(&self.value, args)?;
        let tangent = if self.tangent.is_zero_tangent() {
            D::zero_tangent()
        } else {
            op.df_dfda(&self.tangent)?
        };
        Ok(Dual { value, tangent }.observed())
    }

    pub(crate) fn unary<Op: UnaryDiffOp<T, Error = Infallible>>(&self, args: &Op::Args) -> Self {
        match self.try_unary::<Op>(args) {
            Ok(r) => r,
            Err(never) => match never {},
        }
    }

    pub(crate) fn try_binary<Op: BinaryDiffOp<T>>(
        &self,
        rhs: &Self,
    ) -> std::result::Result<Self, Op::Error> {
        let (op, value) = Op::f(&self.value, &rhs.value)?;
        let tangent = match (self.is_constant(), rhs.is_constant()) {
            (true, true) => D::zero_tangent(),
            (false, true) => op.df_dfda(&self.tangent)?,
            (true, false) => op.df_dfdb(&rhs.tangent)?,
            (false, false) => op
                .df_dfda(&self.tangent)?
                .elementwise_add(&op.df_dfdb(&rhs.tangent)?),
        };
        Ok(Dual { value, tangent }.observed())
    }

    pub(crate) fn binary<Op: BinaryDiffOp<T, Error = Infallible>>(&self, rhs: &Self) -> Self {
        match self.try_binary::<Op>(rhs) {
            Ok(r) => r,
            Err(never) => match never {},
        }
    }
}

impl<T: Num> Dual<T> {
    /// The independent variable of a single-variable function: tangent one.
    pub fn variable(value: T) -> Self {
        Dual {
            value,
            tangent: T::one(),
        }
    }
}

impl<T: Num> Dual<T, Partials<T>> {
    /// Input `index` of `width` independent variables, seeded with the unit
    /// vector `e_index`.
    ///
    /// # Panics
    /// If `index >= width`.
    pub fn seed(value: T, index: usize, width: usize) -> Self {
        Dual {
            value,
            tangent: Partials::unit(index, width),
        }
    }

    /// The first `width` partial derivatives.
    #[must_use]
    pub fn partials(&self, width: usize) -> Vec<T> {
        self.tangent.to_dense(width)
    }
}

crate::math_macros::impl_bin_op!(Add, add, AddOp);
crate::math_macros::impl_bin_op!(Sub, sub, SubOp);
crate::math_macros::impl_bin_op!(Mul, mul, MulOp<T>);

crate::math_macros::impl_un_op!(Neg, neg, NegOp);

impl<T: Num, D: Tangent<T> + 'static> Num for Dual<T, D> {
    fn from_f64(value: f64) -> Self {
        Dual::lift(T::from_f64(value))
    }

    fn to_f64(&self) -> f64 {
        self.value.to_f64()
    }

    fn is_finite(&self) -> bool {
        self.value.is_finite() && self.tangent.all_finite()
    }

    fn try_div(&self, rhs: &Self) -> Result<Self> {
        self.try_binary::<DivOp<T>>(rhs)
    }

    fn powi(&self, n: u32) -> Self {
        self.unary::<PowiOp<T>>(&n)
    }
}

impl<T: Float, D: Tangent<T> + 'static> Float for Dual<T, D> {
    fn sin(&self) -> Self {
        self.unary::<SinOp<T>>(&())
    }

    fn cos(&self) -> Self {
        self.unary::<CosOp<T>>(&())
    }

    fn tan(&self) -> Self {
        self.unary::<TanOp<T>>(&())
    }

    fn atan(&self) -> Self {
        self.unary::<AtanOp<T>>(&())
    }

    fn tanh(&self) -> Self {
        self.unary::<TanhOp<T>>(&())
    }

    fn exp(&self) -> Self {
        self.unary::<ExpOp<T>>(&())
    }

    fn ln(&self) -> Result<Self> {
        self.try_unary::<LnOp<T>>(&())
    }

    fn sqrt(&self) -> Result<Self> {
        self.try_unary::<SqrtOp<T>>(&())
    }

    fn powf(&self, exponent: &Self) -> Result<Self> {
        self.try_binary::<PowfOp<T>>(exponent)
    }
}

impl<T: Display, D: Display> Display for Dual<T, D> {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} + {}ε", self.value, self.tangent)
    }
}

#[cfg(test)]
mod tests {

    use crate::{AdError, Op};

    use super::*;

    #[test]
    fn test_product_rule_drops_eps_squared() {
        let x = Dual::variable(3.0);
        let y = x * x;
        assert_eq!(y, Dual::new(9.0, 6.0));
    }

    #[test]
    fn test_constants_stay_constant() {
        let c: Dual<f64> = Dual::lift(2.0);
        let r = c.exp() * c + c;
        assert!(r.is_constant());
        assert_eq!(*r.primal(), 2.0f64.exp() * 2.0 + 2.0);
    }

    #[test]
    fn test_borrowed_ops() {
        let a: DualVec<f64> = Dual::seed(2.0, 0, 2);
        let b: DualVec<f64> = Dual::seed(5.0, 1, 2);
        let r = &a * &b - &a + -&b;
        assert_eq!(*r.primal(), 2.0 * 5.0 - 2.0 - 5.0);
        assert_eq!(r.partials(2), vec![5.0 - 1.0, 2.0 - 1.0]);
    }

    #[test]
    fn test_division() {
        let x = Dual::variable(2.0f64);
        let one: Dual<f64> = Dual::lift(1.0);
        let r = one.try_div(&x).unwrap();
        assert_eq!(r, Dual::new(0.5, -0.25));
        assert_eq!(
            x.try_div(&Dual::lift(0.0)),
            Err(AdError::Domain {
                op: Op::Div,
                operand: 0.0
            })
        );
    }

    #[test]
    fn test_powi_closed_form() {
        let x = Dual::variable(0.0f64);
        assert_eq!(x.powi(0), Dual::new(1.0, 0.0));
        assert_eq!(x.powi(1), Dual::new(0.0, 1.0));
        let x = Dual::variable(2.0);
        assert_eq!(x.powi(3), Dual::new(8.0, 12.0));
    }

    #[test]
    fn test_sqrt_at_zero() {
        let c: Dual<f64> = Dual::lift(0.0);
        assert_eq!(c.sqrt(), Ok(Dual::new(0.0, 0.0)));
        assert_eq!(
            Dual::variable(0.0f64).sqrt(),
            Err(AdError::UndefinedDerivative {
                op: Op::Sqrt,
                operand: 0.0
            })
        );
    }

    #[test]
    fn test_powf_zero_base() {
        let two: Dual<f64> = Dual::lift(2.0);
        assert_eq!(Dual::<f64>::lift(0.0).powf(&two), Ok(Dual::new(0.0, 0.0)));
        // b·0^(b-1)
        assert_eq!(Dual::variable(0.0f64).powf(&two), Ok(Dual::new(0.0, 0.0)));
        assert_eq!(
            Dual::variable(0.0f64).powf(&Dual::lift(1.0)),
            Ok(Dual::new(0.0, 1.0))
        );
        assert_eq!(
            Dual::variable(0.0f64).powf(&Dual::lift(0.5)),
            Err(AdError::UndefinedDerivative {
                op: Op::Powf,
                operand: 0.0
            })
        );
    }

    #[test]
    fn test_powf_zero_base_variable_exponent() {
        let zero: Dual<f64> = Dual::lift(0.0);
        assert_eq!(zero.powf(&Dual::variable(2.0)), Ok(Dual::new(0.0, 0.0)));
        assert!(matches!(
            zero.powf(&Dual::variable(0.0)),
            Err(AdError::UndefinedDerivative { op: Op::Powf, .. })
        ));
    }

    #[test]
    fn test_powf_matches_powi_at_zero() {
        // x^2.5 and x^2 at 0, first and second derivative
        let x: Dual<Dual<f64>> = Dual::new(Dual::variable(0.0), Dual::lift(1.0));
        let two = Dual::lift(Dual::lift(2.0));
        assert_eq!(x.powf(&two), Ok(x.powi(2)));
        let r = x.powf(&Dual::lift(Dual::lift(2.5))).unwrap();
        assert_eq!(r, Dual::new(Dual::new(0.0, 0.0), Dual::new(0.0, 0.0)));
    }

    #[test]
    fn test_nested_structure() {
        // x = (2 + 1ε₁) + (1 + 0ε₁)ε₂
        let x: Dual<Dual<f64>> = Dual::new(Dual::variable(2.0), Dual::lift(1.0));
        let y = x * x * x;
        assert_eq!(*y.primal(), Dual::new(8.0, 12.0));
        assert_eq!(*y.tangent(), Dual::new(12.0, 12.0));
    }

    #[test]
    fn test_nested_zero_primal_tangent_is_not_constant() {
        // the outer tangent has primal 0 but a non-zero inner tangent.
        let t: Dual<f64> = Dual::new(0.0, 2.0);
        let x: Dual<Dual<f64>> = Dual::new(Dual::variable(1.0), t);
        assert!(!x.is_constant());
    }

    #[test]
    fn test_display() {
        assert_eq!(format!("{}", Dual::new(1.5, 2.0)), "1.5 + 2ε");
        let v: DualVec<f64> = Dual::seed(3.0, 1, 2);
        assert_eq!(format!("{v}"), "3 + [0, 1]ε");
    }

    #[test]
    fn test_send_sync() {
        fn is_send_sync<S: Send + Sync>() {}
        is_send_sync::<Dual<f64>>();
        is_send_sync::<DualVec<f32>>();
        is_send_sync::<Dual<Dual<f64>>>();
    }
}
