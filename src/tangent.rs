use std::fmt::{Debug, Display, Formatter};

use crate::num::Num;

/// The tangent payload of a dual number with primal type `T`.
///
/// Tangents form a vector space over `T`: they can be added, negated and scaled
/// by a primal value. That is all the chain rule needs, because an operator only
/// ever multiplies incoming tangents by partial derivatives of the primal.
pub trait Tangent<T>: Clone + Debug + PartialEq {
    /// The zero tangent: the tangent of a constant.
    fn zero_tangent() -> Self;

    /// Structural check. Operators skip propagation for zero tangents.
    fn is_zero_tangent(&self) -> bool;

    fn all_finite(&self) -> bool;

    #[must_use]
    fn elementwise_add(&self, other: &Self) -> Self;

    #[must_use]
    fn elementwise_sub(&self, other: &Self) -> Self;

    #[must_use]
    fn negate(&self) -> Self;

    /// Multiply every component by `k`.
    #[must_use]
    fn scale(&self, k: &T) -> Self;
}

// single-variable case: the tangent has the same type as the primal.
impl<T: Num> Tangent<T> for T {
    fn zero_tangent() -> Self {
        T::zero()
    }

    fn is_zero_tangent(&self) -> bool {
        *self == T::zero()
    }

    fn all_finite(&self) -> bool {
        self.is_finite()
    }

    fn elementwise_add(&self, other: &Self) -> Self {
        self.clone() + other.clone()
    }

    fn elementwise_sub(&self, other: &Self) -> Self {
        self.clone() - other.clone()
    }

    fn negate(&self) -> Self {
        -self.clone()
    }

    fn scale(&self, k: &T) -> Self {
        self.clone() * k.clone()
    }
}

/// A vector of partial derivatives, one per independent variable.
///
/// The empty vector is the zero tangent of any width, so constants don't need to
/// know how many variables are being seeded.
#[derive(Clone, Debug)]
pub struct Partials<T>(Vec<T>);

impl<T: Num> Partials<T> {
    #[must_use]
    pub fn new(components: Vec<T>) -> Self {
        Partials(components)
    }

    /// The unit seed `e_index` of width `width`.
    ///
    /// # Panics
    /// If `index >= width`.
    #[must_use]
    pub fn unit(index: usize, width: usize) -> Self {
        assert!(
            index < width,
            "seed index {index} out of bounds for {width} variables"
        );
        let mut components = vec![T::zero(); width];
        components[index] = T::one();
        Partials(components)
    }

    /// Number of stored components. Zero for the implicit zero tangent.
    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// The partial derivative with respect to variable `index`.
    #[must_use]
    pub fn get(&self, index: usize) -> T {
        self.0.get(index).cloned().unwrap_or_else(T::zero)
    }

    /// All `width` components, with the implicit zeros filled in.
    #[must_use]
    pub fn to_dense(&self, width: usize) -> Vec<T> {
        (0..width).map(|i| self.get(i)).collect()
    }

    fn zip_with(&self, other: &Self, f: impl Fn(&T, &T) -> T) -> Self {
        assert_eq!(
            self.0.len(),
            other.0.len(),
            "partials have different widths - likely seeds from two different passes mixed together"
        );
        Partials(self.0.iter().zip(&other.0).map(|(a, b)| f(a, b)).collect())
    }
}

impl<T: Num> Tangent<T> for Partials<T> {
    fn zero_tangent() -> Self {
        Partials(Vec::new())
    }

    fn is_zero_tangent(&self) -> bool {
        self.0.iter().all(|c| *c == T::zero())
    }

    fn all_finite(&self) -> bool {
        self.0.iter().all(Num::is_finite)
    }

    fn elementwise_add(&self, other: &Self) -> Self {
        if self.0.is_empty() {
            return other.clone();
        }
        if other.0.is_empty() {
            return self.clone();
        }
        self.zip_with(other, |a, b| a.clone() + b.clone())
    }

    fn elementwise_sub(&self, other: &Self) -> Self {
        if other.0.is_empty() {
            return self.clone();
        }
        if self.0.is_empty() {
            return other.negate();
        }
        self.zip_with(other, |a, b| a.clone() - b.clone())
    }

    fn negate(&self) -> Self {
        Partials(self.0.iter().map(|c| -c.clone()).collect())
    }

    fn scale(&self, k: &T) -> Self {
        Partials(self.0.iter().map(|c| c.clone() * k.clone()).collect())
    }
}

// empty and all-zeros are the same tangent.
impl<T: Num> PartialEq for Partials<T> {
    fn eq(&self, other: &Self) -> bool {
        let width = self.0.len().max(other.0.len());
        (0..width).all(|i| self.get(i) == other.get(i))
    }
}

impl<T: Display> Display for Partials<T> {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "[")?;
        for (i, c) in self.0.iter().enumerate() {
            if i > 0 {
                write!(f, ", ")?;
            }
            Display::fmt(c, f)?;
        }
        write!(f, "]")
    }
}
