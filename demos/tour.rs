use dualken::{
    diff1, gradient, jacfwd, value_and_diff1, Dual, DualVec, Float, Num, Options, Partials,
    Result,
};

/// A macro to print the result of an expression and the expression itself.
macro_rules! do_example {
    ($e:expr) => {
        println!(">>> {}", stringify!($e));
        let result = $e;
        println!("{result}");
    };
    ($e:expr, $debug:literal) => {
        println!(">>> {}", stringify!($e));
        let result = $e;
        println!("{result:?}");
    };
}

/// A macro to print the result of an expression, the expression itself,
/// and bind the result to a variable.
macro_rules! let_example {
    ($t:ident, $e:expr) => {
        println!(">>> {}", stringify!(let $t = $e));
        let $t = $e;
        println!("{}", $t);
    };
    ($t:ident, $e:expr, $debug:literal) => {
        println!(">>> {}", stringify!(let $t = $e));
        let $t = $e;
        println!("{:?}", $t);
    };
}

// written once against the number traits...
fn poly<N: Num>(x: N) -> Result<N> {
    Ok(x.clone() * x.clone() + N::from_f64(3.0) * x + N::from_f64(5.0))
}

fn x2y<N: Num>(x: &[N]) -> Result<N> {
    Ok(x[0].clone() * x[0].clone() * x[1].clone())
}

fn polar<N: Float>(x: &[N]) -> Result<Vec<N>> {
    let (r, theta) = (x[0].clone(), x[1].clone());
    Ok(vec![r.clone() * theta.cos(), r * theta.sin()])
}

fn main() -> Result<()> {
    // dual numbers
    let_example!(x, Dual::variable(3.0));
    let_example!(c, Dual::lift(2.0));
    do_example!(x * x);
    do_example!(x * c + c);
    do_example!(x.sin());
    do_example!(x.ln()?);
    do_example!(c.try_div(&x)?);

    // ...evaluated on plain numbers, or differentiated
    do_example!(poly(2.0)?);
    do_example!(value_and_diff1(poly, &2.0)?, true);
    do_example!(diff1(|x| diff1(poly, &x), &2.0)?);

    // vector tangents
    let_example!(a, DualVec::seed(2.0, 0, 2));
    let_example!(b, DualVec::seed(3.0, 1, 2));
    do_example!(x2y(&[a, b])?);
    do_example!(gradient(x2y, &[2.0, 3.0])?, true);
    do_example!(Partials::new(vec![1.0, 0.5]));

    // jacobians are matrices
    do_example!(jacfwd(polar, &[2.0, 0.5])?);
    let_example!(j, jacfwd(polar, &[2.0, 0.5])?);
    println!("{j:.3}");

    // errors
    do_example!(value_and_diff1(|x: Dual<f64>| x.ln(), &-1.0), true);
    do_example!(value_and_diff1(|x: Dual<f64>| x.sqrt(), &0.0), true);
    do_example!(
        Options::new()
            .strict(true)
            .value_and_diff1(|x: Dual<f64>| Ok(x.exp()), &1000.0),
        true
    );
    Ok(())
}
