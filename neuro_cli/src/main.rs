//! Console harness for the neuro_nn library.
//!
//! Trains a 2-3-1 sigmoid network on XOR, printing its outputs before and
//! after training, then checks the backpropagated gradients against finite
//! differences.
//!
//! Initial weights come from a fixed seed so every run prints the same
//! numbers. Set `RUST_LOG=debug` for construction details.

use neuro_nn::{
    analytic_weight_gradients, max_grad_error, numerical_weight_gradients, xor_examples, Network,
    TrainingConfig, TrainingData,
};
use rand::rngs::StdRng;
use rand::SeedableRng;

const LAYER_SIZES: [usize; 3] = [2, 3, 1];
const SEED: u64 = 42;

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    if let Err(e) = run() {
        log::error!("{}", e);
        std::process::exit(1);
    }
}

fn run() -> neuro_nn::Result<()> {
    println!("=== XOR with a {:?} sigmoid network ===\n", LAYER_SIZES);

    let mut network = build_network()?;

    let examples = xor_examples();

    println!("Before training:");
    print_outputs(&mut network, &examples)?;

    let config = TrainingConfig::new().log_interval(10_000);
    let result = network.train_with_config(&examples, &config)?;

    println!("\nAfter {} epochs:", result.epochs);
    print_outputs(&mut network, &examples)?;
    println!("  MSE = {:.6}", network.mean_squared_error(&examples)?);

    // Gradient check on the trained network
    println!("\n=== Gradient check ===\n");
    let eps = 1e-6;
    let tolerance = 1e-6;
    let mut worst: f64 = 0.0;
    for example in &examples {
        let analytic = analytic_weight_gradients(&network, example)?;
        let numeric = numerical_weight_gradients(&network, example, eps)?;
        let err = max_grad_error(&analytic, &numeric);
        println!("  {:?}: max |backprop - fd| = {:.2e}", example.inputs, err);
        worst = worst.max(err);
    }

    if worst < tolerance {
        println!("\nPASS: Max error ({:.2e}) < tolerance ({:.2e})", worst, tolerance);
    } else {
        println!("\nFAIL: Max error ({:.2e}) >= tolerance ({:.2e})", worst, tolerance);
        std::process::exit(1);
    }

    Ok(())
}

fn build_network() -> neuro_nn::Result<Network> {
    log::info!("Seeding initial weights with {}", SEED);
    Network::with_rng(&LAYER_SIZES, &mut StdRng::seed_from_u64(SEED))
}

fn print_outputs(network: &mut Network, examples: &[TrainingData]) -> neuro_nn::Result<()> {
    for example in examples {
        let output = network.run(&example.inputs)?;
        println!(
            "  XOR({:.0}, {:.0}) = {:.4} (target {:.0})",
            example.inputs[0], example.inputs[1], output[0], example.targets[0]
        );
    }
    Ok(())
}
