// tests/step_properties_test.rs
use ndarray::{arr1, Array, Array2, ArrayD, IxDyn};
use overdamped_langevin::error::LangevinError;
use overdamped_langevin::integrator::overdamped::OverdampedLangevin;
use overdamped_langevin::params::{LangevinParams, NoisePrecision};
use overdamped_langevin::rng::{self, ReplayNoise, RngFactory, ZeroNoise};

fn sample_configuration() -> Array2<f64> {
    Array::from_shape_fn((4, 3), |(i, j)| 0.3 * i as f64 - 0.7 * j as f64)
}

fn sample_force() -> Array2<f64> {
    Array::from_shape_fn((4, 3), |(i, j)| (i as f64 + 1.0) * (j as f64 - 1.0))
}

#[test]
fn test_shape_is_preserved_for_every_rank() {
    let params = LangevinParams::default();
    let mut rng = rng::seed_rng_from_u64(7);

    for shape in [vec![5], vec![3, 2], vec![2, 3, 4], vec![1, 1, 1, 1, 6]] {
        let current = ArrayD::<f64>::zeros(IxDyn(&shape));
        let force = ArrayD::<f64>::ones(IxDyn(&shape));
        let next = OverdampedLangevin::step_array(&current, &force, &params, &mut rng)
            .expect("Matching shapes");
        assert_eq!(next.shape(), current.shape());
    }
}

#[test]
fn test_zero_noise_gives_pure_drift() {
    let (beta, dt, diffusion_coeff) = (1.7, 0.002, 0.35);
    let current = sample_configuration();
    let force = sample_force();

    let next = OverdampedLangevin::update_positions(
        &current,
        &force,
        beta,
        dt,
        diffusion_coeff,
        &mut ZeroNoise,
    )
    .expect("Valid inputs");

    let expected = &current + &(&force * (diffusion_coeff * dt * beta));
    for (a, b) in next.iter().zip(expected.iter()) {
        assert!((a - b).abs() < 1e-12, "drift mismatch: {} vs {}", a, b);
    }
}

#[test]
fn test_zero_force_zero_noise_is_fixed_point() {
    let params = LangevinParams::new(3.0, 0.1, 2.0).expect("Valid parameters");
    let current = sample_configuration();
    let force = Array2::<f64>::zeros((4, 3));

    let next = OverdampedLangevin::step_array(&current, &force, &params, &mut ZeroNoise)
        .expect("Valid inputs");
    assert_eq!(next, current);
}

#[test]
fn test_non_positive_timestep_is_rejected_without_side_effects() {
    let current = sample_configuration();
    let force = sample_force();

    for dt in [0.0, -1.0] {
        let mut noise = ReplayNoise::new(vec![1.0]);
        let err = OverdampedLangevin::update_positions(&current, &force, 1.0, dt, 1.0, &mut noise)
            .unwrap_err();

        match err {
            LangevinError::InvalidParameter {
                parameter,
                constraint,
                ..
            } => {
                assert_eq!(parameter, "dt");
                assert_eq!(constraint, "timestep must be positive");
            }
            other => panic!("expected InvalidParameter, got {:?}", other),
        }
        assert_eq!(noise.consumed(), 0, "no draw may happen on failure");
    }

    assert_eq!(current, sample_configuration());
    assert_eq!(force, sample_force());
}

#[test]
fn test_other_parameters_are_rejected() {
    let current = arr1(&[1.0, 2.0]);
    let force = arr1(&[0.0, 0.0]);

    let err = OverdampedLangevin::update_positions(&current, &force, 1.0, 0.1, 0.0, &mut ZeroNoise)
        .unwrap_err();
    assert!(err.to_string().contains("diffusion coefficient must be positive"));

    let err = OverdampedLangevin::update_positions(&current, &force, -1.0, 0.1, 1.0, &mut ZeroNoise)
        .unwrap_err();
    assert!(err.to_string().contains("temperature parameter must be positive"));
}

#[test]
fn test_parameters_checked_before_shapes() {
    let current = Array2::<f64>::zeros((3, 2));
    let force = Array2::<f64>::zeros((3, 3));

    let err = OverdampedLangevin::update_positions(&current, &force, 1.0, 0.0, 1.0, &mut ZeroNoise)
        .unwrap_err();
    assert!(matches!(err, LangevinError::InvalidParameter { .. }));
}

#[test]
fn test_shape_mismatch_is_rejected() {
    let params = LangevinParams::default();
    let current = Array2::<f64>::zeros((3, 2));
    let force = Array2::<f64>::zeros((3, 3));
    let mut noise = ReplayNoise::new(vec![0.5]);

    let err = OverdampedLangevin::step_array(&current, &force, &params, &mut noise).unwrap_err();
    assert_eq!(
        err,
        LangevinError::ShapeMismatch {
            position: vec![3, 2],
            force: vec![3, 3],
        }
    );
    assert!(err
        .to_string()
        .contains("force and position must have the same shape"));
    assert_eq!(noise.consumed(), 0);
}

#[test]
fn test_rank_mismatch_is_rejected() {
    let params = LangevinParams::default();
    let current = Array2::<f64>::zeros((3, 2));
    let force = arr1(&[0.0; 6]);

    let err = OverdampedLangevin::step_array(&current, &force, &params, &mut ZeroNoise).unwrap_err();
    assert!(matches!(err, LangevinError::ShapeMismatch { .. }));
}

#[test]
fn test_inputs_are_not_mutated() {
    let params = LangevinParams::new(1.0, 0.01, 1.0).expect("Valid parameters");
    let current = sample_configuration();
    let force = sample_force();
    let mut rng = rng::seed_rng_from_u64(11);

    let next = OverdampedLangevin::step_array(&current, &force, &params, &mut rng)
        .expect("Valid inputs");

    assert_eq!(current, sample_configuration());
    assert_eq!(force, sample_force());
    assert_ne!(next, current);
}

#[test]
fn test_one_draw_per_element() {
    let params = LangevinParams::default();
    let current = ArrayD::<f32>::zeros(IxDyn(&[2, 5, 3]));
    let force = ArrayD::<f32>::zeros(IxDyn(&[2, 5, 3]));
    let mut noise = ReplayNoise::new(vec![0.1, -0.2, 0.3]);

    OverdampedLangevin::step_array(&current, &force, &params, &mut noise).expect("Valid inputs");
    assert_eq!(noise.consumed(), 30);
}

#[test]
fn test_same_seed_same_step() {
    let params = LangevinParams::default();
    let current = sample_configuration();
    let force = sample_force();
    let factory = RngFactory::new(2024);

    let mut a = factory.create_counter_rng(3);
    let mut b = factory.create_counter_rng(3);
    let mut c = factory.create_counter_rng(4);

    let next_a = OverdampedLangevin::step_array(&current, &force, &params, &mut a).unwrap();
    let next_b = OverdampedLangevin::step_array(&current, &force, &params, &mut b).unwrap();
    let next_c = OverdampedLangevin::step_array(&current, &force, &params, &mut c).unwrap();

    assert_eq!(next_a, next_b);
    assert_ne!(next_a, next_c);
}

#[test]
fn test_slice_and_array_forms_agree() {
    let params = LangevinParams::new(0.8, 0.05, 1.5).expect("Valid parameters");
    let current = sample_configuration();
    let force = sample_force();
    let flat_current: Vec<f64> = current.iter().copied().collect();
    let flat_force: Vec<f64> = force.iter().copied().collect();

    let mut rng_a = rng::seed_rng_from_u64(5);
    let mut rng_b = rng::seed_rng_from_u64(5);
    let from_array = OverdampedLangevin::step_array(&current, &force, &params, &mut rng_a).unwrap();
    let from_slice =
        OverdampedLangevin::step_slice(&flat_current, &flat_force, &params, &mut rng_b).unwrap();

    let reshaped = Array::from_shape_vec((4, 3), from_slice).expect("Same length");
    assert_eq!(from_array, reshaped);
}

#[test]
fn test_single_precision_noise_matches_narrowed_draws() {
    let params = LangevinParams::new(1.0, 0.5, 1.0)
        .expect("Valid parameters")
        .with_precision(NoisePrecision::Single);
    let draws = vec![0.1, -1.3, 2.7];
    let mut noise = ReplayNoise::new(draws.clone());

    let next = OverdampedLangevin::step_slice(&[0.0_f64; 3], &[0.0; 3], &params, &mut noise)
        .expect("Valid inputs");
    let narrowed: Vec<f64> = draws.iter().map(|&g| g as f32 as f64).collect();
    assert_eq!(next, narrowed);
}
