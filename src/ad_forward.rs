//! Forward-mode drivers.
//!
//! A driver seeds dual inputs at a point, evaluates the function once per pass,
//! and reads value and tangents back from the result. There is no trace: each
//! operator computes the tangent of its result as soon as it runs.
//!
//! The cost of forward mode grows with the number of inputs seeded. The
//! single-seed drivers (`partial`, `value_and_diffn`) do one pass per input with a
//! scalar tangent; the simultaneous drivers (`value_and_gradient`,
//! `value_and_jacfwd`) do a single pass with an n-wide tangent, which is O(n)
//! work per operator. Either way forward mode suits functions with few inputs
//! and many outputs.
//!
//! Every driver is available as a method on `Options`, and as a free function
//! that uses `Options::default()`.
use crate::{num::Num, tangent::Partials, Dual, DualVec, Matrix, Options, Result};

fn single_seed_pass<T: Num, F>(f: &F, at: &[T], index: usize) -> Result<Dual<T>>
where
    F: Fn(&[Dual<T>]) -> Result<Dual<T>>,
{
    let vars: Vec<_> = at
        .iter()
        .enumerate()
        .map(|(i, x)| {
            if i == index {
                Dual::variable(x.clone())
            } else {
                Dual::lift(x.clone())
            }
        })
        .collect();
    f(&vars)
}

fn direction_seeds<T: Num>(at: &[T], v: &[T]) -> Vec<Dual<T>> {
    assert_eq!(
        at.len(),
        v.len(),
        "point and tangent vector must have the same length"
    );
    at.iter()
        .zip(v)
        .map(|(x, dx)| Dual::new(x.clone(), dx.clone()))
        .collect()
}

fn simultaneous_seeds<T: Num>(at: &[T]) -> Vec<DualVec<T>> {
    let n = at.len();
    at.iter()
        .enumerate()
        .map(|(i, x)| Dual::seed(x.clone(), i, n))
        .collect()
}

impl Options {
    /// Value and derivative of a function of one variable at `at`.
    ///
    /// # Errors
    /// Any error raised by an operator in `f`, or `AdError::NonFinite` in strict mode.
    pub fn value_and_diff1<T: Num, F>(&self, f: F, at: &T) -> Result<(T, T)>
    where
        F: Fn(Dual<T>) -> Result<Dual<T>>,
    {
        log::trace!("value_and_diff1: seeding 1 input");
        self.check_inputs(std::slice::from_ref(at))?;
        let result = self.evaluate(|| {
            let result = f(Dual::variable(at.clone()))?;
            self.check_output(0, &result)?;
            Ok(result)
        })?;
        Ok(result.into_parts())
    }

    /// Derivative of a function of one variable at `at`.
    ///
    /// # Errors
    /// See `value_and_diff1`.
    pub fn diff1<T: Num, F>(&self, f: F, at: &T) -> Result<T>
    where
        F: Fn(Dual<T>) -> Result<Dual<T>>,
    {
        Ok(self.value_and_diff1(f, at)?.1)
    }

    /// Value and partial derivative with respect to input `index`, from a single
    /// pass in which all other inputs are constants.
    ///
    /// # Errors
    /// Any error raised by an operator in `f`, or `AdError::NonFinite` in strict mode.
    ///
    /// # Panics
    /// If `index >= at.len()`.
    pub fn partial<T: Num, F>(&self, f: F, at: &[T], index: usize) -> Result<(T, T)>
    where
        F: Fn(&[Dual<T>]) -> Result<Dual<T>>,
    {
        assert!(
            index < at.len(),
            "partial derivative index {index} out of bounds for {} inputs",
            at.len()
        );
        log::trace!("partial: seeding input {index} of {}", at.len());
        self.check_inputs(at)?;
        let result = self.evaluate(|| {
            let result = single_seed_pass(&f, at, index)?;
            self.check_output(0, &result)?;
            Ok(result)
        })?;
        Ok(result.into_parts())
    }

    /// Value and directional derivative `∇f·v` at `at`.
    ///
    /// # Errors
    /// Any error raised by an operator in `f`, or `AdError::NonFinite` in strict mode.
    ///
    /// # Panics
    /// If `at` and `v` have different lengths.
    pub fn jvp<T: Num, F>(&self, f: F, at: &[T], v: &[T]) -> Result<(T, T)>
    where
        F: Fn(&[Dual<T>]) -> Result<Dual<T>>,
    {
        log::trace!("jvp: seeding {} inputs along a direction", at.len());
        self.check_inputs(at)?;
        let result = self.evaluate(|| {
            let result = f(&direction_seeds(at, v))?;
            self.check_output(0, &result)?;
            Ok(result)
        })?;
        Ok(result.into_parts())
    }

    /// Values and Jacobian-vector product `J·v` of a function with several outputs.
    ///
    /// # Errors
    /// Any error raised by an operator in `f`, or `AdError::NonFinite` in strict mode.
    ///
    /// # Panics
    /// If `at` and `v` have different lengths.
    pub fn jvpn<T: Num, F>(&self, f: F, at: &[T], v: &[T]) -> Result<(Vec<T>, Vec<T>)>
    where
        F: Fn(&[Dual<T>]) -> Result<Vec<Dual<T>>>,
    {
        log::trace!("jvpn: seeding {} inputs along a direction", at.len());
        self.check_inputs(at)?;
        let results = self.evaluate(|| {
            let results = f(&direction_seeds(at, v))?;
            self.check_outputs(&results)?;
            Ok(results)
        })?;
        Ok(results.into_iter().map(Dual::into_parts).unzip())
    }

    /// Value and gradient, assembled from one single-seed pass per input.
    ///
    /// # Errors
    /// Any error raised by an operator in `f`, or `AdError::NonFinite` in strict mode.
    pub fn value_and_diffn<T: Num, F>(&self, f: F, at: &[T]) -> Result<(T, Vec<T>)>
    where
        F: Fn(&[Dual<T>]) -> Result<Dual<T>>,
    {
        log::trace!("value_and_diffn: {} single-seed passes", at.len());
        self.check_inputs(at)?;
        self.evaluate(|| {
            if at.is_empty() {
                let result = f(&[])?;
                self.check_output(0, &result)?;
                return Ok((result.into_primal(), Vec::new()));
            }

            let first = single_seed_pass(&f, at, 0)?;
            self.check_output(0, &first)?;
            let (value, first) = first.into_parts();
            let mut gradient = Vec::with_capacity(at.len());
            gradient.push(first);
            for i in 1..at.len() {
                let result = single_seed_pass(&f, at, i)?;
                self.check_output(0, &result)?;
                gradient.push(result.into_parts().1);
            }
            Ok((value, gradient))
        })
    }

    /// Value and gradient from a single pass in which every input is seeded with
    /// its unit vector.
    ///
    /// # Errors
    /// Any error raised by an operator in `f`, or `AdError::NonFinite` in strict mode.
    pub fn value_and_gradient<T: Num, F>(&self, f: F, at: &[T]) -> Result<(T, Vec<T>)>
    where
        F: Fn(&[DualVec<T>]) -> Result<DualVec<T>>,
    {
        log::trace!("value_and_gradient: seeding {} inputs", at.len());
        self.check_inputs(at)?;
        let result = self.evaluate(|| {
            let result = f(&simultaneous_seeds(at))?;
            self.check_output(0, &result)?;
            Ok(result)
        })?;
        let gradient = result.partials(at.len());
        Ok((result.into_primal(), gradient))
    }

    /// Gradient from a single simultaneous pass.
    ///
    /// # Errors
    /// See `value_and_gradient`.
    pub fn gradient<T: Num, F>(&self, f: F, at: &[T]) -> Result<Vec<T>>
    where
        F: Fn(&[DualVec<T>]) -> Result<DualVec<T>>,
    {
        Ok(self.value_and_gradient(f, at)?.1)
    }

    /// Values and Jacobian of a function with several outputs, from a single pass.
    /// The Jacobian has one row per output and one column per input.
    ///
    /// # Errors
    /// Any error raised by an operator in `f`, or `AdError::NonFinite` in strict mode.
    pub fn value_and_jacfwd<T: Num, F>(&self, f: F, at: &[T]) -> Result<(Vec<T>, Matrix<T>)>
    where
        F: Fn(&[DualVec<T>]) -> Result<Vec<DualVec<T>>>,
    {
        let n = at.len();
        log::trace!("value_and_jacfwd: seeding {n} inputs");
        self.check_inputs(at)?;
        let results = self.evaluate(|| {
            let results = f(&simultaneous_seeds(at))?;
            self.check_outputs(&results)?;
            Ok(results)
        })?;
        let rows = results.iter().map(|r| r.partials(n)).collect();
        let values = results.into_iter().map(Dual::into_primal).collect();
        Ok((values, Matrix::from_rows(n, rows)))
    }

    /// Jacobian from a single simultaneous pass.
    ///
    /// # Errors
    /// See `value_and_jacfwd`.
    pub fn jacfwd<T: Num, F>(&self, f: F, at: &[T]) -> Result<Matrix<T>>
    where
        F: Fn(&[DualVec<T>]) -> Result<Vec<DualVec<T>>>,
    {
        Ok(self.value_and_jacfwd(f, at)?.1)
    }

    /// Value, first and second derivative of a function of one variable,
    /// from one pass over nested duals.
    ///
    /// # Errors
    /// Any error raised by an operator in `f`, or `AdError::NonFinite` in strict mode.
    pub fn value_and_diff2nd<T: Num, F>(&self, f: F, at: &T) -> Result<(T, T, T)>
    where
        F: Fn(Dual<Dual<T>>) -> Result<Dual<Dual<T>>>,
    {
        log::trace!("value_and_diff2nd: seeding 1 input at depth 2");
        self.check_inputs(std::slice::from_ref(at))?;
        // (x + ε₁) + (1 + 0ε₁)ε₂
        let x = Dual::new(Dual::variable(at.clone()), Dual::lift(T::one()));
        let result = self.evaluate(|| {
            let result = f(x)?;
            self.check_output(0, &result)?;
            Ok(result)
        })?;
        let (inner, outer) = result.into_parts();
        let (value, first) = inner.into_parts();
        let (_, second) = outer.into_parts();
        Ok((value, first, second))
    }

    /// Value, gradient and Hessian from one pass over nested vector duals.
    ///
    /// # Errors
    /// Any error raised by an operator in `f`, or `AdError::NonFinite` in strict mode.
    pub fn value_and_hessian<T: Num, F>(&self, f: F, at: &[T]) -> Result<(T, Vec<T>, Matrix<T>)>
    where
        F: Fn(&[DualVec<DualVec<T>>]) -> Result<DualVec<DualVec<T>>>,
    {
        let n = at.len();
        log::trace!("value_and_hessian: seeding {n} inputs at depth 2");
        self.check_inputs(at)?;
        let vars: Vec<_> = simultaneous_seeds(at)
            .into_iter()
            .enumerate()
            .map(|(i, x)| Dual::new(x, Partials::unit(i, n)))
            .collect();
        let result = self.evaluate(|| {
            let result = f(&vars)?;
            self.check_output(0, &result)?;
            Ok(result)
        })?;
        let (inner, outer) = result.into_parts();
        let gradient = inner.partials(n);
        let rows = (0..n).map(|j| outer.get(j).partials(n)).collect();
        Ok((inner.into_primal(), gradient, Matrix::from_rows(n, rows)))
    }

    /// Hessian from one nested pass.
    ///
    /// # Errors
    /// See `value_and_hessian`.
    pub fn hessian<T: Num, F>(&self, f: F, at: &[T]) -> Result<Matrix<T>>
    where
        F: Fn(&[DualVec<DualVec<T>>]) -> Result<DualVec<DualVec<T>>>,
    {
        Ok(self.value_and_hessian(f, at)?.2)
    }
}

/// Compute the value and derivative of a function of one variable at the given primal.
///
/// # Errors
/// Any error raised by an operator in `f`.
pub fn value_and_diff1<T: Num, F>(f: F, at: &T) -> Result<(T, T)>
where
    F: Fn(Dual<T>) -> Result<Dual<T>>,
{
    Options::default().value_and_diff1(f, at)
}

/// Compute the derivative of a function of one variable at the given primal.
///
/// # Errors
/// Any error raised by an operator in `f`.
pub fn diff1<T: Num, F>(f: F, at: &T) -> Result<T>
where
    F: Fn(Dual<T>) -> Result<Dual<T>>,
{
    Options::default().diff1(f, at)
}

/// Compute the value and the partial derivative with respect to input `index`.
///
/// # Errors
/// Any error raised by an operator in `f`.
///
/// # Panics
/// If `index >= at.len()`.
pub fn partial<T: Num, F>(f: F, at: &[T], index: usize) -> Result<(T, T)>
where
    F: Fn(&[Dual<T>]) -> Result<Dual<T>>,
{
    Options::default().partial(f, at, index)
}

/// Compute the value and the directional derivative of `f` along `v`.
///
/// # Errors
/// Any error raised by an operator in `f`.
///
/// # Panics
/// If `at` and `v` have different lengths.
pub fn jvp<T: Num, F>(f: F, at: &[T], v: &[T]) -> Result<(T, T)>
where
    F: Fn(&[Dual<T>]) -> Result<Dual<T>>,
{
    Options::default().jvp(f, at, v)
}

/// Compute a forward-mode Jacobian-vector product of `f` evaluated at the given primals.
///
/// # Errors
/// Any error raised by an operator in `f`.
///
/// # Panics
/// If `at` and `v` have different lengths.
pub fn jvpn<T: Num, F>(f: F, at: &[T], v: &[T]) -> Result<(Vec<T>, Vec<T>)>
where
    F: Fn(&[Dual<T>]) -> Result<Vec<Dual<T>>>,
{
    Options::default().jvpn(f, at, v)
}

/// Compute the value and the gradient with one pass per input.
///
/// # Errors
/// Any error raised by an operator in `f`.
pub fn value_and_diffn<T: Num, F>(f: F, at: &[T]) -> Result<(T, Vec<T>)>
where
    F: Fn(&[Dual<T>]) -> Result<Dual<T>>,
{
    Options::default().value_and_diffn(f, at)
}

/// Compute the value and the gradient in a single pass.
///
/// # Errors
/// Any error raised by an operator in `f`.
pub fn value_and_gradient<T: Num, F>(f: F, at: &[T]) -> Result<(T, Vec<T>)>
where
    F: Fn(&[DualVec<T>]) -> Result<DualVec<T>>,
{
    Options::default().value_and_gradient(f, at)
}

/// Compute the gradient in a single pass.
///
/// # Errors
/// Any error raised by an operator in `f`.
pub fn gradient<T: Num, F>(f: F, at: &[T]) -> Result<Vec<T>>
where
    F: Fn(&[DualVec<T>]) -> Result<DualVec<T>>,
{
    Options::default().gradient(f, at)
}

/// Compute the values and the Jacobian of `f` at the given primals.
///
/// # Errors
/// Any error raised by an operator in `f`.
pub fn value_and_jacfwd<T: Num, F>(f: F, at: &[T]) -> Result<(Vec<T>, Matrix<T>)>
where
    F: Fn(&[DualVec<T>]) -> Result<Vec<DualVec<T>>>,
{
    Options::default().value_and_jacfwd(f, at)
}

/// Jacobian of `f` evaluated at `at` using forward-mode AD.
///
/// # Errors
/// Any error raised by an operator in `f`.
pub fn jacfwd<T: Num, F>(f: F, at: &[T]) -> Result<Matrix<T>>
where
    F: Fn(&[DualVec<T>]) -> Result<Vec<DualVec<T>>>,
{
    Options::default().jacfwd(f, at)
}

/// Compute the value, first and second derivative of a function of one variable.
///
/// # Errors
/// Any error raised by an operator in `f`.
pub fn value_and_diff2nd<T: Num, F>(f: F, at: &T) -> Result<(T, T, T)>
where
    F: Fn(Dual<Dual<T>>) -> Result<Dual<Dual<T>>>,
{
    Options::default().value_and_diff2nd(f, at)
}

/// Compute the value, gradient and Hessian of `f` at the given primals.
///
/// # Errors
/// Any error raised by an operator in `f`.
pub fn value_and_hessian<T: Num, F>(f: F, at: &[T]) -> Result<(T, Vec<T>, Matrix<T>)>
where
    F: Fn(&[DualVec<DualVec<T>>]) -> Result<DualVec<DualVec<T>>>,
{
    Options::default().value_and_hessian(f, at)
}

/// Hessian of `f` evaluated at `at`.
///
/// # Errors
/// Any error raised by an operator in `f`.
pub fn hessian<T: Num, F>(f: F, at: &[T]) -> Result<Matrix<T>>
where
    F: Fn(&[DualVec<DualVec<T>>]) -> Result<DualVec<DualVec<T>>>,
{
    Options::default().hessian(f, at)
}
