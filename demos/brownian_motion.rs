// demos/brownian_motion.rs
use log::info;
use nalgebra::Vector3;
use ndarray::Array1;
use overdamped_langevin::integrator::overdamped::OverdampedLangevin;
use overdamped_langevin::params::LangevinParams;
use overdamped_langevin::rng::{self, RngFactory};
use overdamped_langevin::LangevinResult;

/// Free particles: mean squared displacement grows as 2 D t per component.
fn free_diffusion() -> LangevinResult<()> {
    println!("1. Free diffusion in one dimension");

    let params = LangevinParams::new(1.0, 1e-3, 0.5)?;
    let mut rng = rng::seed_rng_from_u64(42);
    let particles = 5_000;
    let force = Array1::<f64>::zeros(particles);
    let mut x = Array1::<f64>::zeros(particles);

    for block in 1..=5 {
        for _ in 0..200 {
            x = OverdampedLangevin::step_array(&x, &force, &params, &mut rng)?;
        }
        let t = (block * 200) as f64 * params.dt;
        let msd = x.iter().map(|v| v * v).sum::<f64>() / particles as f64;
        println!(
            "   t = {:.2}: MSD = {:.5} (expected {:.5})",
            t,
            msd,
            2.0 * params.diffusion_coeff * t
        );
    }
    Ok(())
}

/// Particles in a harmonic well `U = k |x|² / 2` relax to ⟨x_i²⟩ = 1/(β k).
fn harmonic_well() -> LangevinResult<()> {
    println!("\n2. Three-dimensional harmonic well");

    let k = 4.0;
    let params = LangevinParams::from_temperature(1.0, 0.5, 1e-3, 1.0)?;
    let factory = RngFactory::new(2024);
    let mut rng = factory.create_counter_rng(0);

    let mut points = vec![Vector3::new(1.0, -1.0, 0.5); 2_000];
    for _ in 0..5_000 {
        let forces: Vec<Vector3<f64>> = points.iter().map(|p| -p * k).collect();
        points = OverdampedLangevin::step_points(&points, &forces, &params, &mut rng)?;
    }

    let mean_sq = points.iter().map(|p| p.norm_squared()).sum::<f64>() / (3 * points.len()) as f64;
    println!(
        "   <x^2> per component = {:.4} (equilibrium {:.4})",
        mean_sq,
        1.0 / (params.beta * k)
    );
    Ok(())
}

/// An invalid timestep is refused before any noise is drawn.
fn invalid_input() {
    println!("\n3. Invalid input");

    let x = Array1::<f64>::zeros(3);
    let force = Array1::<f64>::zeros(3);
    let mut rng = rng::seed_rng_from_u64(1);
    match OverdampedLangevin::update_positions(&x, &force, 1.0, -0.1, 1.0, &mut rng) {
        Ok(_) => println!("   Unexpected: should have failed"),
        Err(e) => println!("   Caught error: {}", e),
    }
}

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    println!("Overdamped Langevin Demo");
    println!("========================\n");

    if let Err(e) = free_diffusion().and_then(|_| harmonic_well()) {
        log::error!("demo failed: {}", e);
        std::process::exit(1);
    }
    invalid_input();

    info!("demo complete");
}
