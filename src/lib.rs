#![doc(test(attr(deny(warnings))))]

//! Peseta tracks recurring category budgets: it resolves the period a budget
//! is currently in, classifies spend against the limit, and summarizes which
//! budgets need attention. The heavy lifting lives in `peseta-core`; this crate
//! wires it to snapshot files, user preferences and the `peseta_cli` shell.

pub mod cli;
pub mod errors;
pub mod snapshot;
pub mod utils;

use std::sync::Once;

static INIT_TRACING: Once = Once::new();

/// Initializes global tracing and emits a startup info log.
pub fn init() {
    INIT_TRACING.call_once(|| {
        utils::init_tracing();
        tracing::info!("Peseta tracing initialized.");
    });
}

#[cfg(test)]
mod tests {
    #[test]
    fn init_does_not_panic() {
        super::init();
        super::init();
    }
}
