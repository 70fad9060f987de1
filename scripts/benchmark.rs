// scripts/benchmark.rs
use log::{error, info, warn};
use ndarray::Array2;
use overdamped_langevin::error::LangevinResult;
use overdamped_langevin::integrator::overdamped::OverdampedLangevin;
use overdamped_langevin::params::{LangevinParams, NoisePrecision};
use overdamped_langevin::rng::RngFactory;
use rayon::prelude::*;
use std::env;
use std::error::Error;
use std::fs::File;
use std::io::{self, Write};
use std::time::Instant;

const DEFAULT_STEPS: usize = 200;
const DEFAULT_REPLICAS: usize = 64;

struct Timer {
    start_time: Instant,
}

impl Timer {
    fn new() -> Timer {
        Timer {
            start_time: Instant::now(),
        }
    }

    fn start(&mut self) {
        self.start_time = Instant::now();
    }

    fn elapsed_ms(&self) -> f64 {
        self.start_time.elapsed().as_secs_f64() * 1000.0
    }
}

#[derive(Debug)]
struct SystemInfo {
    os: String,
    cpu_cores: usize,
    rustc_flags: String,
    rayon_threads: usize,
}

impl SystemInfo {
    fn gather() -> Self {
        Self {
            os: env::consts::OS.to_string(),
            cpu_cores: num_cpus::get(),
            rustc_flags: env::var("RUSTFLAGS").unwrap_or_else(|_| "default".to_string()),
            rayon_threads: rayon::current_num_threads(),
        }
    }
}

/// Sizes taken from the command line: `benchmark [steps] [replicas]`
#[derive(Debug, Clone, Copy)]
struct BenchConfig {
    steps: usize,
    replicas: usize,
}

impl BenchConfig {
    fn from_args() -> Result<Self, String> {
        let args: Vec<String> = env::args().skip(1).collect();
        let parse = |index: usize, default: usize, name: &str| -> Result<usize, String> {
            match args.get(index) {
                Some(raw) => raw
                    .parse::<usize>()
                    .ok()
                    .filter(|&value| value > 0)
                    .ok_or_else(|| format!("{} must be a positive integer, got '{}'", name, raw)),
                None => Ok(default),
            }
        };

        Ok(BenchConfig {
            steps: parse(0, DEFAULT_STEPS, "steps")?,
            replicas: parse(1, DEFAULT_REPLICAS, "replicas")?,
        })
    }
}

#[derive(Debug)]
struct BenchmarkResult {
    name: String,
    elements: usize,
    time_ms: f64,
    throughput_elements_per_sec: f64,
    measured_variance: f64,
    expected_variance: f64,
}

impl BenchmarkResult {
    fn relative_error(&self) -> f64 {
        (self.measured_variance - self.expected_variance).abs() / self.expected_variance
    }
}

// Free diffusion of `particles` 3-d points; returns the per-component variance
// of the final displacement divided by the number of steps.
fn run_trajectory(
    particles: usize,
    steps: usize,
    params: &LangevinParams,
    factory: &RngFactory,
    stream: u64,
) -> LangevinResult<f64> {
    let mut rng = factory.create_counter_rng(stream);
    let force = Array2::<f32>::zeros((particles, 3));
    let start = Array2::<f32>::zeros((particles, 3));
    let mut x = start.clone();

    for _ in 0..steps {
        x = OverdampedLangevin::step_array(&x, &force, params, &mut rng)?;
    }

    let n = (particles * 3) as f64;
    let mean_sq = x
        .iter()
        .zip(start.iter())
        .map(|(a, b)| {
            let d = (*a - *b) as f64;
            d * d
        })
        .sum::<f64>()
        / n;
    Ok(mean_sq / steps as f64)
}

fn run_serial_benchmarks(config: &BenchConfig) -> LangevinResult<Vec<BenchmarkResult>> {
    let mut results = Vec::new();
    let factory = RngFactory::new(42);

    for &particles in &[1_000usize, 10_000, 100_000] {
        for precision in [NoisePrecision::Native, NoisePrecision::Single] {
            let params = LangevinParams::new(1.0, 1e-3, 1.0)?.with_precision(precision);
            info!("serial: {} particles, {:?} noise", particles, precision);

            let mut timer = Timer::new();
            timer.start();
            let measured = run_trajectory(particles, config.steps, &params, &factory, 0)?;
            let time_ms = timer.elapsed_ms();

            let elements = particles * 3 * config.steps;
            results.push(BenchmarkResult {
                name: format!("Serial {}k particles ({:?})", particles / 1000, precision),
                elements,
                time_ms,
                throughput_elements_per_sec: elements as f64 / (time_ms / 1000.0),
                measured_variance: measured,
                expected_variance: params.displacement_variance(),
            });
        }
    }

    Ok(results)
}

fn run_replica_benchmark(config: &BenchConfig) -> LangevinResult<BenchmarkResult> {
    let particles = 1_000;
    let params = LangevinParams::new(1.0, 1e-3, 1.0)?;
    let factory = RngFactory::new(7);
    info!(
        "replicas: {} independent chains of {} particles",
        config.replicas, particles
    );

    let mut timer = Timer::new();
    timer.start();
    let per_replica = (0..config.replicas)
        .into_par_iter()
        .map(|replica| run_trajectory(particles, config.steps, &params, &factory, replica as u64))
        .collect::<LangevinResult<Vec<f64>>>()?;
    let time_ms = timer.elapsed_ms();

    let measured = per_replica.iter().sum::<f64>() / per_replica.len() as f64;
    let elements = config.replicas * particles * 3 * config.steps;
    Ok(BenchmarkResult {
        name: format!("Parallel {} replicas", config.replicas),
        elements,
        time_ms,
        throughput_elements_per_sec: elements as f64 / (time_ms / 1000.0),
        measured_variance: measured,
        expected_variance: params.displacement_variance(),
    })
}

fn write_results_to_csv(
    results: &[BenchmarkResult],
    system_info: &SystemInfo,
    config: &BenchConfig,
    filename: &str,
) -> io::Result<()> {
    let mut file = File::create(filename)?;

    writeln!(file, "# System Information")?;
    writeln!(file, "# OS: {}", system_info.os)?;
    writeln!(file, "# CPU Cores: {}", system_info.cpu_cores)?;
    writeln!(file, "# RUSTFLAGS: {}", system_info.rustc_flags)?;
    writeln!(file, "# Rayon Threads: {}", system_info.rayon_threads)?;
    writeln!(file, "# Steps: {}", config.steps)?;
    writeln!(
        file,
        "# Benchmark Date: {}",
        chrono::Utc::now().format("%Y-%m-%d %H:%M:%S UTC")
    )?;
    writeln!(file, "#")?;

    writeln!(
        file,
        "Benchmark,Elements,Time_ms,Throughput_elements_per_sec,Measured_Variance,Expected_Variance,Relative_Error"
    )?;

    for result in results {
        writeln!(
            file,
            "{},{},{:.2},{:.0},{:.6e},{:.6e},{:.6}",
            result.name,
            result.elements,
            result.time_ms,
            result.throughput_elements_per_sec,
            result.measured_variance,
            result.expected_variance,
            result.relative_error()
        )?;
    }

    Ok(())
}

fn run() -> Result<(), Box<dyn Error>> {
    let config = BenchConfig::from_args()?;
    let system_info = SystemInfo::gather();

    println!("overdamped-langevin Benchmark");
    println!("=============================\n");
    println!("System Information:");
    println!("  OS: {}", system_info.os);
    println!("  CPU Cores: {}", system_info.cpu_cores);
    println!("  RUSTFLAGS: {}", system_info.rustc_flags);
    println!("  Rayon Threads: {}", system_info.rayon_threads);
    println!("  Steps per trajectory: {}", config.steps);
    println!();

    let mut all_results = run_serial_benchmarks(&config)?;
    all_results.push(run_replica_benchmark(&config)?);

    println!("\n{:=<96}", "");
    println!("BENCHMARK RESULTS");
    println!("{:=<96}", "");
    println!(
        "{:<36} {:>12} {:>12} {:>15} {:>12} {:>10}",
        "Benchmark", "Elements", "Time (ms)", "Throughput", "Var/step", "Rel Error"
    );
    println!("{:-<96}", "");

    for result in &all_results {
        println!(
            "{:<36} {:>12} {:>12.2} {:>15.0} {:>12.4e} {:>9.2}%",
            result.name,
            result.elements,
            result.time_ms,
            result.throughput_elements_per_sec,
            result.measured_variance,
            result.relative_error() * 100.0
        );
        if result.relative_error() > 0.1 {
            warn!(
                "{}: measured variance {:.4e} far from expected {:.4e}",
                result.name, result.measured_variance, result.expected_variance
            );
        }
    }
    println!("{:=<96}", "");

    let timestamp = chrono::Utc::now().format("%Y%m%d_%H%M%S");
    let filename = format!("benchmark_results_{}.csv", timestamp);
    write_results_to_csv(&all_results, &system_info, &config, &filename)?;
    info!("results written to {}", filename);

    println!("\nBenchmark complete!");
    println!("Run: cargo run --bin benchmark --release -- [steps] [replicas]");
    Ok(())
}

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    if let Err(e) = run() {
        error!("benchmark failed: {}", e);
        std::process::exit(1);
    }
}
