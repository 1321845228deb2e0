//! Walk through the accelerator operations on small tensors
//!
//! Run with: RUST_LOG=tenacc_exec=debug cargo run --example basic_ops

use anyhow::{anyhow, Result};
use tenacc::prelude::*;
use tenacc::tracing_support::{init_tracing, TracingConfig};
use tracing::info;

fn unwrap_value(outcome: Outcome<TensorValue>) -> Result<TensorValue> {
    outcome
        .value()
        .ok_or_else(|| anyhow!("accelerator abstained"))
}

fn main() -> Result<()> {
    init_tracing(TracingConfig::default())?;

    let acc = CpuAccelerator::with_hints(ExecHints::new().with_default_rounding(RoundingMode::Nearest));
    let ctx = acc.context();

    let x = real_tensor(&[2, 2], Precision::Single, &[1.0, 2.0, 3.0, 4.0]);
    let id = real_tensor(&[2, 2], Precision::Single, &[1.0, 0.0, 0.0, 1.0]);

    let sum = unwrap_value(acc.add(&x, &id, &ctx)?)?;
    info!(values = ?real_values(&sum)?, "x + I");

    let product = unwrap_value(acc.matmul(&x, &id, &ctx)?)?;
    info!(values = ?real_values(&product)?, shape = ?product.meta.shape, "x * I");

    let diag = unwrap_value(acc.diag(&x, &ctx)?)?;
    info!(values = ?real_values(&diag)?, "diag(x)");

    let trace = unwrap_value(acc.trace(&x, &ctx)?)?;
    info!(values = ?real_values(&trace)?, "trace(x)");

    for mode in [RoundingMode::Up, RoundingMode::Down] {
        let third = unwrap_value(acc.scalar_div(
            &real_tensor(&[1], Precision::Half, &[1.0]),
            &real_scalar(Precision::Half, 3.0),
            &mode,
        )?)?;
        info!(%mode, values = ?real_values(&third)?, "1 / 3 in binary16");
    }

    let mut uint = x.clone();
    uint.meta.kind = Kind::Uint;
    match acc.add(&uint, &uint, &ctx)? {
        Outcome::Unsupported => info!("uint tensors fall back to the host"),
        Outcome::Value(_) => return Err(anyhow!("uint add should abstain")),
    }

    let short = real_tensor(&[3], Precision::Single, &[1.0, 2.0, 3.0]);
    match acc.add(&x, &short, &ctx) {
        Err(err) => info!(%err, "mismatched operands are fatal"),
        Ok(_) => return Err(anyhow!("shape mismatch should be fatal")),
    }

    Ok(())
}
