use std::cell::Cell;

use crate::{num::Num, tangent::Tangent, AdError, Dual, Quantity, Result};

/// Driver configuration.
///
/// The default is what the free driver functions use: NaN and infinity
/// propagate silently, as in IEEE 754. In strict mode a driver checks every
/// input, the result of every dual operation while the function runs, and the
/// value and tangent of every output, and fails with `AdError::NonFinite`.
///
/// Operators can't fail, so a non-finite intermediate is recorded when it is
/// produced and reported when the function returns. Non-finite outputs are
/// reported in preference to intermediates, and the first non-finite
/// intermediate in evaluation order is the one reported.
///
/// Strict mode applies to the thread the driver runs on. Drivers nested inside
/// a strict evaluation are checked by it as well, and report their own
/// non-finite intermediates if they are strict themselves.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
#[must_use]
pub struct Options {
    strict: bool,
}

#[derive(Debug, Clone, Copy, Default)]
struct StrictState {
    operations: usize,
    first_non_finite: Option<usize>,
}

thread_local! {
    static STRICT: Cell<Option<StrictState>> = const { Cell::new(None) };
}

/// Count one dual operation of a strict evaluation, and remember it if its
/// result is not finite. Does nothing outside strict mode.
pub(crate) fn observe(is_finite: impl FnOnce() -> bool) {
    STRICT.with(|strict| {
        if let Some(mut state) = strict.get() {
            if state.first_non_finite.is_none() && !is_finite() {
                log::debug!(
                    "strict mode: operation {} is not finite",
                    state.operations
                );
                state.first_non_finite = Some(state.operations);
            }
            state.operations += 1;
            strict.set(Some(state));
        }
    });
}

/// Strict state for the duration of one driver call. Restores the state of
/// any enclosing strict evaluation on drop.
struct StrictScope {
    enclosing: Option<StrictState>,
}

impl StrictScope {
    fn enter() -> Self {
        let enclosing = STRICT.with(|strict| strict.replace(Some(StrictState::default())));
        StrictScope { enclosing }
    }

    fn first_non_finite(&self) -> Option<usize> {
        STRICT.with(|strict| strict.get().and_then(|state| state.first_non_finite))
    }
}

impl Drop for StrictScope {
    fn drop(&mut self) {
        STRICT.with(|strict| strict.set(self.enclosing));
    }
}

impl Options {
    pub fn new() -> Self {
        Options::default()
    }

    pub fn strict(self, strict: bool) -> Self {
        Options { strict }
    }

    #[must_use]
    pub fn is_strict(&self) -> bool {
        self.strict
    }

    fn non_finite(quantity: Quantity) -> AdError {
        log::debug!("strict mode: non-finite {quantity}");
        AdError::NonFinite { quantity }
    }

    /// Run one driver evaluation, watching intermediates in strict mode.
    /// `eval` seeds, evaluates and checks the outputs; its errors win.
    pub(crate) fn evaluate<R>(&self, eval: impl FnOnce() -> Result<R>) -> Result<R> {
        if !self.strict {
            return eval();
        }
        let scope = StrictScope::enter();
        let result = eval()?;
        match scope.first_non_finite() {
            Some(i) => Err(Self::non_finite(Quantity::Intermediate(i))),
            None => Ok(result),
        }
    }

    pub(crate) fn check_inputs<T: Num>(&self, at: &[T]) -> Result<()> {
        if !self.strict {
            return Ok(());
        }
        match at.iter().position(|x| !x.is_finite()) {
            Some(i) => Err(Self::non_finite(Quantity::Input(i))),
            None => Ok(()),
        }
    }

    pub(crate) fn check_output<T: Num, D: Tangent<T>>(
        &self,
        index: usize,
        output: &Dual<T, D>,
    ) -> Result<()> {
        if !self.strict {
            return Ok(());
        }
        if !output.primal().is_finite() {
            return Err(Self::non_finite(Quantity::Value(index)));
        }
        if !output.tangent().all_finite() {
            return Err(Self::non_finite(Quantity::Tangent(index)));
        }
        Ok(())
    }

    pub(crate) fn check_outputs<T: Num, D: Tangent<T>>(
        &self,
        outputs: &[Dual<T, D>],
    ) -> Result<()> {
        outputs
            .iter()
            .enumerate()
            .try_for_each(|(i, output)| self.check_output(i, output))
    }
}
