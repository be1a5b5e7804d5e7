//! Compare three ways of summing 1..=n, both in-process and isolated.
//!
//! Run with:
//!
//! ```text
//! cargo run --release --example compare_sums
//! ```

use anyhow::Context;
use formbench::{benchmark_dual_context, candidate, Binding, Options};

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "formbench=debug".into()),
        )
        .init();

    let n = 1_000_000u64;
    let candidates = vec![
        candidate!("fold", (1..=n).fold(0, |a, b| a + b)),
        candidate!("sum", (1..=n).sum::<u64>()),
        candidate!("formula", n * (n + 1) / 2),
    ];
    let bindings = vec![Binding::new("n", "1_000_000u64")];
    let options = Options {
        iterations: 100,
        check_equivalence: true,
        ..Options::default()
    };

    let table = benchmark_dual_context(candidates, &bindings, &options)
        .context("comparison run failed")?;
    println!("{table}");
    Ok(())
}
