use dualken::{
    diff1, gradient, hessian, jacfwd, jvpn, value_and_gradient, Float, FloatExt, Result,
};
use rand::{rngs::StdRng, SeedableRng};
use rand_distr::{Distribution, StandardNormal};

// Following JAX's Autodiff Cookbook https://jax.readthedocs.io/en/latest/notebooks/autodiff_cookbook.html
// but everything is forward mode.

const INPUTS: [[f64; 3]; 4] = [
    [0.52, 1.12, 0.77],
    [0.88, -1.08, 0.15],
    [0.52, 0.06, -1.30],
    [0.74, -2.49, 1.39],
];
const TARGETS: [f64; 4] = [1.0, 1.0, 0.0, 1.0];

// Outputs probability of a label being true.
fn predict<N: Float>(w: &[N], b: &N, inputs: &[f64; 3]) -> N {
    let mut z = b.clone();
    for (wi, xi) in w.iter().zip(inputs) {
        z = z + wi.clone() * N::from_f64(*xi);
    }
    z.sigmoid()
}

// Training loss is the negative log-likelihood of the training examples.
// The parameters are packed as [w0, w1, w2, b].
fn loss<N: Float>(params: &[N]) -> Result<N> {
    let (w, b) = params.split_at(3);
    let mut total = N::zero();
    for (inputs, target) in INPUTS.iter().zip(TARGETS) {
        let pred = predict(w, &b[0], inputs);
        let t = N::from_f64(target);
        let label_prob = pred.clone() * t.clone() + (N::one() - pred) * (N::one() - t);
        total = total - label_prob.ln()?;
    }
    Ok(total)
}

fn main() -> Result<()> {
    // ## Gradients
    // ### Starting with `grad`

    fn tanh<N: Float>(x: N) -> Result<N> {
        Ok(x.tanh())
    }
    let dr = diff1(tanh, &2.0)?;
    println!("dr: {dr}");

    let ddr = diff1(|t| diff1(tanh, &t), &2.0)?;
    println!("ddr: {ddr}");

    let dddr = diff1(|t| diff1(|t| diff1(tanh, &t), &t), &2.0)?;
    println!("dddr: {dddr}");

    // Random initial parameters.
    let key = 0;
    let mut rng = StdRng::seed_from_u64(key);
    let params: Vec<f64> = StandardNormal.sample_iter(&mut rng).take(4).collect();

    // Differentiate loss wrt w and b, in one pass.
    let params_grad = gradient(loss, &params)?;
    println!("w_grad: {:?}", &params_grad[..3]);
    println!("b_grad: {}", params_grad[3]);

    // ### Evaluate a function and its gradient using `value_and_grad`

    let (loss_value, _) = value_and_gradient(loss, &params)?;
    println!("loss value: {loss_value}");
    println!("loss value: {}", loss(&params)?);

    // ### Checking against numerical differences

    let eps = 1e-4;
    let mut shifted = params.clone();
    shifted[3] += eps / 2.0;
    let plus = loss(&shifted)?;
    shifted[3] -= eps;
    let minus = loss(&shifted)?;
    println!("b_grad_numerical: {}", (plus - minus) / eps);
    println!("b_grad_autodiff:  {}", params_grad[3]);

    // ### Hessian-vector products, forward-over-forward

    let v: Vec<f64> = StandardNormal.sample_iter(&mut rng).take(4).collect();
    let (_, hvp) = jvpn(|p| gradient(loss, p), &params, &v)?;
    println!("hvp: {hvp:?}");

    // ### Jacobians and Hessians using jacfwd

    fn predictions<N: Float>(w: &[N]) -> Result<Vec<N>> {
        let b = N::from_f64(0.5);
        Ok(INPUTS.iter().map(|inputs| predict(w, &b, inputs)).collect())
    }
    let j = jacfwd(predictions, &params[..3])?;
    println!("jacfwd result, with shape {:?}", j.shape());
    println!("{j:.4}");

    let h = hessian(loss, &params)?;
    println!("hessian, with shape {:?}", h.shape());
    println!("{h:.4}");
    Ok(())
}
