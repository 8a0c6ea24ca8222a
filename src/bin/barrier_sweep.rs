//! Output expected return and break-even probability across all barrier depths
//!
//! Usage: cargo run --bin barrier_sweep -- [output.csv]
//! Product terms other than the barrier come from the reference product.
//! Set AUTOCALL_SEED for reproducible early-exit draws.

use anyhow::{Context, Result};
use autocall_simulator::{
    product::{ProductConfiguration, ProtectionType, BARRIER_STEP_PERCENT, MAX_BARRIER_PERCENT, MIN_BARRIER_PERCENT},
    runner::SimulationRunner,
    simulation::SimulationConfig,
};
use std::env;
use std::fs::File;
use std::io::Write;
use std::time::Instant;

fn main() -> Result<()> {
    env_logger::init();

    let output_path = env::args()
        .nth(1)
        .unwrap_or_else(|| "barrier_sweep.csv".to_string());

    let mut barriers = Vec::new();
    let mut barrier = MIN_BARRIER_PERCENT;
    while barrier <= MAX_BARRIER_PERCENT {
        barriers.push(barrier);
        barrier += BARRIER_STEP_PERCENT;
    }

    let runner = SimulationRunner::new(SimulationConfig::from_env());
    let start = Instant::now();

    let mut file = File::create(&output_path)
        .with_context(|| format!("failed to create {}", output_path))?;
    writeln!(file, "ProtectionType,Barrier,ExpectedReturn,MaxGain,MaxLoss,BreakEvenProbability")?;

    let mut rows = 0;
    for protection in [ProtectionType::Guaranteed, ProtectionType::Protected] {
        let product = ProductConfiguration::default().with_protection_type(protection);
        let sweep = runner
            .barrier_sweep(&product, &barriers)
            .context("barrier sweep failed")?;

        for point in &sweep {
            writeln!(file, "{},{},{:.6},{:.6},{:.6},{:.4}",
                protection.as_str(),
                point.barrier_percent,
                point.result.expected_return,
                point.result.max_gain,
                point.result.max_loss,
                point.result.break_even_probability,
            )?;
            rows += 1;
        }
    }

    println!("Written {} rows to {} in {:?}", rows, output_path, start.elapsed());
    Ok(())
}
