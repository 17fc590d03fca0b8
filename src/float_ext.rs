use crate::{num::Float, Result};

/// Functions built from the `Num` and `Float` primitives.
/// They have no derivative rules of their own: differentiating them just
/// differentiates the primitives they are made of.
#[allow(clippy::module_name_repetitions)]
pub trait FloatExt: Float
where
    Self: Sized,
{
    #[must_use]
    fn square(&self) -> Self {
        self.clone() * self.clone()
    }

    /// # Errors
    /// `AdError::Domain` at zero.
    fn recip(&self) -> Result<Self> {
        Self::one().try_div(self)
    }

    /// The logistic function, written via tanh so that it needs no division.
    #[must_use]
    fn sigmoid(&self) -> Self {
        let half = Self::from_f64(0.5);
        half.clone() * (Self::one() + (half * self.clone()).tanh())
    }

    /// `ln(1 + exp(x))`.
    ///
    /// # Errors
    /// Propagates the domain check of `ln`; `1 + exp(x)` is positive for every finite `x`.
    fn softplus(&self) -> Result<Self> {
        (Self::one() + self.exp()).ln()
    }

    /// `sqrt(x² + y²)`.
    ///
    /// # Errors
    /// Propagates the checks of `sqrt`.
    fn hypot(&self, other: &Self) -> Result<Self> {
        (self.square() + other.square()).sqrt()
    }
}

impl<T: Float> FloatExt for T {}
