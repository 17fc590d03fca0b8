use std::thread;

use dualken::{value_and_gradient, Float, Result};

// Duals are Send + Sync and every evaluation seeds its own inputs, so a batch of
// points can be split across threads with no synchronization.

fn himmelblau<N: Float>(x: &[N]) -> Result<N> {
    let (a, b) = (x[0].clone(), x[1].clone());
    let u = a.clone() * a.clone() + b.clone() - N::from_f64(11.0);
    let v = a + b.clone() * b - N::from_f64(7.0);
    Ok(u.powi(2) + v.powi(2))
}

fn main() -> Result<()> {
    let _ = env_logger::builder().try_init();

    let points: Vec<[f64; 2]> = (0..32u32)
        .map(|i| {
            let t = f64::from(i) / 32.0 * std::f64::consts::TAU;
            [4.0 * t.cos(), 4.0 * t.sin()]
        })
        .collect();

    let results = thread::scope(|s| {
        let handles: Vec<_> = points
            .chunks(8)
            .map(|chunk| {
                s.spawn(move || {
                    chunk
                        .iter()
                        .map(|p| value_and_gradient(himmelblau, p))
                        .collect::<Vec<_>>()
                })
            })
            .collect();
        handles
            .into_iter()
            .flat_map(|handle| handle.join().expect("worker thread panicked"))
            .collect::<Result<Vec<_>>>()
    })?;

    for (p, (value, grad)) in points.iter().zip(&results) {
        println!(
            "f({:6.3}, {:6.3}) = {value:8.3}   ∇f = [{:8.3}, {:8.3}]",
            p[0], p[1], grad[0], grad[1]
        );
    }
    Ok(())
}
