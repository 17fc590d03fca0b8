use dualken::{diff1, value_and_diff1, value_and_diff2nd, Dual, Float, FloatExt, Num, Result};

const POINTS: [f64; 4] = [0.5, 1.0, 2.0, 3.5];

fn assert_close(actual: f64, expected: f64, what: &str, at: f64) {
    assert!(
        (actual - expected).abs() <= 1e-4 * expected.abs().max(1.0),
        "{what} at {at}\r\nleft : {actual:?}\r\nright: {expected:?}"
    );
}

/// Test that the first derivative of a function of one variable is correct, given the
/// expected derivative (symbolically derived). The value must be exactly what the same
/// function computes on plain numbers.
fn test_df<E: Float>(
    f: impl Fn(Dual<E>) -> Result<Dual<E>>,
    ft: impl Fn(E) -> Result<E>,
    df: impl Fn(f64) -> f64,
) {
    for at in POINTS {
        let x = E::from_f64(at);
        let (f_actual, df_actual) = value_and_diff1(&f, &x).unwrap();
        assert_eq!(f_actual, ft(x).unwrap(), "value at {at}");
        assert_close(df_actual.to_f64(), df(at), "df", at);
    }
}

/// Test that the second derivative is correct, both with nested drivers and with
/// `value_and_diff2nd`.
fn test_ddf<E: Float>(
    f: impl Fn(Dual<Dual<E>>) -> Result<Dual<Dual<E>>>,
    dft: impl Fn(f64) -> f64,
    ddf: impl Fn(f64) -> f64,
) {
    for at in POINTS {
        let x = E::from_f64(at);
        let (df_actual, ddf_actual) = value_and_diff1(|x| diff1(&f, &x), &x).unwrap();
        assert_close(df_actual.to_f64(), dft(at), "df", at);
        assert_close(ddf_actual.to_f64(), ddf(at), "ddf", at);

        let (_, df_actual, ddf_actual) = value_and_diff2nd(&f, &x).unwrap();
        assert_close(df_actual.to_f64(), dft(at), "df (diff2nd)", at);
        assert_close(ddf_actual.to_f64(), ddf(at), "ddf (diff2nd)", at);
    }
}

fn f_id<N: Num>(x: N) -> Result<N> {
    Ok(x)
}

fn f_const<N: Num>(_: N) -> Result<N> {
    Ok(N::from_f64(3.0))
}

#[test]
fn test_derivative_id_and_constant() {
    do_test_id_and_constant::<f32>();
    do_test_id_and_constant::<f64>();
}

fn do_test_id_and_constant<E: Float>() {
    test_df::<E>(f_id, f_id, |_| 1.0);
    test_ddf::<E>(f_id, |_| 1.0, |_| 0.0);
    test_df::<E>(f_const, f_const, |_| 0.0);
    test_ddf::<E>(f_const, |_| 0.0, |_| 0.0);
}

fn f_poly<N: Num>(x: N) -> Result<N> {
    Ok(x.clone() * x.clone() + N::from_f64(3.0) * x + N::from_f64(5.0))
}

#[test]
fn test_derivative_poly() {
    do_test_poly::<f32>();
    do_test_poly::<f64>();
    assert_eq!(value_and_diff1(f_poly, &2.0), Ok((15.0, 7.0)));
}

fn do_test_poly<E: Float>() {
    test_df::<E>(f_poly, f_poly, |a| 2.0 * a + 3.0);
    test_ddf::<E>(f_poly, |a| 2.0 * a + 3.0, |_| 2.0);
}

fn f_sub_neg<N: Num>(x: N) -> Result<N> {
    Ok(N::from_f64(2.0) - x.clone() * x.clone() + -x)
}

#[test]
fn test_derivative_sub_neg() {
    do_test_sub_neg::<f32>();
    do_test_sub_neg::<f64>();
}

fn do_test_sub_neg<E: Float>() {
    test_df::<E>(f_sub_neg, f_sub_neg, |a| -2.0 * a - 1.0);
    test_ddf::<E>(f_sub_neg, |a| -2.0 * a - 1.0, |_| -2.0);
}

fn f_div<N: Num>(x: N) -> Result<N> {
    N::one().try_div(&(x + N::one()))
}

#[test]
fn test_derivative_div() {
    do_test_div::<f32>();
    do_test_div::<f64>();
}

fn do_test_div<E: Float>() {
    test_df::<E>(f_div, f_div, |a| -1.0 / ((a + 1.0) * (a + 1.0)));
    test_ddf::<E>(
        f_div,
        |a| -1.0 / ((a + 1.0) * (a + 1.0)),
        |a| 2.0 / (a + 1.0).powi(3),
    );
}

fn f_powi<N: Num>(x: N) -> Result<N> {
    Ok(x.powi(4))
}

#[test]
fn test_derivative_powi() {
    do_test_powi::<f32>();
    do_test_powi::<f64>();
}

fn do_test_powi<E: Float>() {
    test_df::<E>(f_powi, f_powi, |a| 4.0 * a.powi(3));
    test_ddf::<E>(f_powi, |a| 4.0 * a.powi(3), |a| 12.0 * a * a);
}

fn f_powf<N: Float>(x: N) -> Result<N> {
    x.powf(&N::from_f64(2.5))
}

fn f_powf_exponent<N: Float>(x: N) -> Result<N> {
    N::from_f64(2.0).powf(&x)
}

#[test]
fn test_derivative_powf() {
    do_test_powf::<f32>();
    do_test_powf::<f64>();
}

fn do_test_powf<E: Float>() {
    test_df::<E>(f_powf, f_powf, |a| 2.5 * a.powf(1.5));
    test_ddf::<E>(f_powf, |a| 2.5 * a.powf(1.5), |a| 3.75 * a.sqrt());
    let ln2 = 2.0f64.ln();
    test_df::<E>(f_powf_exponent, f_powf_exponent, |a| 2.0f64.powf(a) * ln2);
    test_ddf::<E>(
        f_powf_exponent,
        |a| 2.0f64.powf(a) * ln2,
        |a| 2.0f64.powf(a) * ln2 * ln2,
    );
}

fn f_ln<N: Float>(x: N) -> Result<N> {
    x.ln()
}

#[test]
fn test_derivative_ln() {
    do_test_ln::<f32>();
    do_test_ln::<f64>();
}

fn do_test_ln<E: Float>() {
    test_df::<E>(f_ln, f_ln, |a| 1.0 / a);
    test_ddf::<E>(f_ln, |a| 1.0 / a, |a| -1.0 / (a * a));
}

fn f_sqrt<N: Float>(x: N) -> Result<N> {
    x.sqrt()
}

#[test]
fn test_derivative_sqrt() {
    do_test_sqrt::<f32>();
    do_test_sqrt::<f64>();
}

fn do_test_sqrt<E: Float>() {
    test_df::<E>(f_sqrt, f_sqrt, |a| 0.5 / a.sqrt());
    test_ddf::<E>(f_sqrt, |a| 0.5 / a.sqrt(), |a| -0.25 / a.powf(1.5));
}

fn f_exp<N: Float>(x: N) -> Result<N> {
    Ok(x.exp())
}

#[test]
fn test_derivative_exp() {
    do_test_exp::<f32>();
    do_test_exp::<f64>();
}

fn do_test_exp<E: Float>() {
    test_df::<E>(f_exp, f_exp, f64::exp);
    test_ddf::<E>(f_exp, f64::exp, f64::exp);
}

fn f_sin<N: Float>(x: N) -> Result<N> {
    Ok(x.sin())
}

fn f_cos<N: Float>(x: N) -> Result<N> {
    Ok(x.cos())
}

#[test]
fn test_derivative_trig() {
    do_test_trig::<f32>();
    do_test_trig::<f64>();
}

fn do_test_trig<E: Float>() {
    test_df::<E>(f_sin, f_sin, f64::cos);
    test_ddf::<E>(f_sin, f64::cos, |a| -a.sin());
    test_df::<E>(f_cos, f_cos, |a| -a.sin());
    test_ddf::<E>(f_cos, |a| -a.sin(), |a| -a.cos());
}

fn f_tan<N: Float>(x: N) -> Result<N> {
    Ok(x.tan())
}

fn f_atan<N: Float>(x: N) -> Result<N> {
    Ok(x.atan())
}

fn f_tanh<N: Float>(x: N) -> Result<N> {
    Ok(x.tanh())
}

#[test]
fn test_derivative_tan_atan_tanh() {
    do_test_tan_atan_tanh::<f32>();
    do_test_tan_atan_tanh::<f64>();
}

fn do_test_tan_atan_tanh<E: Float>() {
    fn sec2(a: f64) -> f64 {
        1.0 / (a.cos() * a.cos())
    }
    test_df::<E>(f_tan, f_tan, sec2);
    test_ddf::<E>(f_tan, sec2, |a| 2.0 * a.tan() * sec2(a));
    test_df::<E>(f_atan, f_atan, |a| 1.0 / (1.0 + a * a));
    test_ddf::<E>(
        f_atan,
        |a| 1.0 / (1.0 + a * a),
        |a| -2.0 * a / ((1.0 + a * a) * (1.0 + a * a)),
    );
    test_df::<E>(f_tanh, f_tanh, |a| 1.0 - a.tanh() * a.tanh());
    test_ddf::<E>(
        f_tanh,
        |a| 1.0 - a.tanh() * a.tanh(),
        |a| -2.0 * a.tanh() * (1.0 - a.tanh() * a.tanh()),
    );
}

fn f_sin_exp<N: Float>(x: N) -> Result<N> {
    Ok(x.sin() * x.exp())
}

#[test]
fn test_product_rule() {
    do_test_product_rule::<f32>();
    do_test_product_rule::<f64>();

    let (_, df) = value_and_diff1(f_sin_exp, &1.0).unwrap();
    let expected = 1.0f64.exp() * (1.0f64.sin() + 1.0f64.cos());
    assert!((df - expected).abs() <= 1e-9 * expected.abs());
}

fn do_test_product_rule<E: Float>() {
    test_df::<E>(f_sin_exp, f_sin_exp, |a| a.exp() * (a.sin() + a.cos()));
    test_ddf::<E>(
        f_sin_exp,
        |a| a.exp() * (a.sin() + a.cos()),
        |a| 2.0 * a.exp() * a.cos(),
    );
}

fn f_chain<N: Float>(x: N) -> Result<N> {
    Ok(x.exp().sin())
}

#[test]
fn test_chain_rule() {
    do_test_chain_rule::<f32>();
    do_test_chain_rule::<f64>();
}

fn do_test_chain_rule<E: Float>() {
    test_df::<E>(f_chain, f_chain, |a| a.exp().cos() * a.exp());
    test_ddf::<E>(
        f_chain,
        |a| a.exp().cos() * a.exp(),
        |a| a.exp() * a.exp().cos() - a.exp() * a.exp() * a.exp().sin(),
    );
}

fn f_sigmoid<N: Float>(x: N) -> Result<N> {
    Ok(x.sigmoid())
}

fn f_softplus<N: Float>(x: N) -> Result<N> {
    x.softplus()
}

#[test]
fn test_derivative_composites() {
    do_test_composites::<f32>();
    do_test_composites::<f64>();
}

fn do_test_composites<E: Float>() {
    fn sigmoid(a: f64) -> f64 {
        1.0 / (1.0 + (-a).exp())
    }
    test_df::<E>(f_sigmoid, f_sigmoid, |a| sigmoid(a) * (1.0 - sigmoid(a)));
    test_ddf::<E>(
        f_sigmoid,
        |a| sigmoid(a) * (1.0 - sigmoid(a)),
        |a| sigmoid(a) * (1.0 - sigmoid(a)) * (1.0 - 2.0 * sigmoid(a)),
    );
    test_df::<E>(f_softplus, f_softplus, sigmoid);
    test_ddf::<E>(f_softplus, sigmoid, |a| sigmoid(a) * (1.0 - sigmoid(a)));
}
