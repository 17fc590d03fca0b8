//! Forward-mode automatic differentiation on dual numbers.
//!
//! Write a function once against `Num`/`Float`, then evaluate it on `f64` to get
//! its value, or hand it to a driver to get derivatives:
//!
//! ```
//! use dualken::{value_and_diff1, value_and_gradient, Float, Num, Result};
//!
//! fn f<N: Float>(x: N) -> Result<N> {
//!     Ok(x.sin() * x.exp())
//! }
//!
//! fn g<N: Num>(x: &[N]) -> Result<N> {
//!     Ok(x[0].clone() * x[0].clone() * x[1].clone())
//! }
//!
//! let (value, derivative) = value_and_diff1(f, &1.0).unwrap();
//! assert_eq!(value, f(1.0).unwrap());
//! assert!((derivative - 1.0f64.exp() * (1.0f64.sin() + 1.0f64.cos())).abs() < 1e-12);
//!
//! assert_eq!(value_and_gradient(g, &[2.0, 3.0]), Ok((12.0, vec![12.0, 4.0])));
//! ```
#![warn(clippy::pedantic)]

mod ad_forward;
mod ad_ops;
mod dual;
mod error;
mod float_ext;
mod math_macros;
mod matrix;
mod matrix_display;
pub mod num;
mod options;
mod tangent;

pub use ad_forward::{
    diff1, gradient, hessian, jacfwd, jvp, jvpn, partial, value_and_diff1, value_and_diff2nd,
    value_and_diffn, value_and_gradient, value_and_hessian, value_and_jacfwd,
};
pub use dual::{Dual, DualVec};
pub use error::{AdError, Op, Quantity, Result};
pub use float_ext::FloatExt;
pub use matrix::Matrix;
pub use num::{Float, Num};
pub use options::Options;
pub use tangent::{Partials, Tangent};
