use std::error::Error;

use crate::{
    filter::{AxisFilter, FilterBank, FilterConfig},
    motion::AxisData,
};

fn config() -> FilterConfig {
    FilterConfig {
        process_noise: 0.01,
        measurement_noise: 0.5,
        initial_uncertainty: 1.0,
    }
}

#[test]
fn test_step_follows_update_and_predict() {
    let mut filter = AxisFilter::new(config());

    let estimate = filter.step(2.0);

    // gain = 1.0 / (1.0 + 0.5)
    let gain = 1.0 / 1.5;
    assert!((filter.gain() - gain).abs() < 1e-12, "should compute gain");
    assert!(
        (estimate - gain * 2.0).abs() < 1e-12,
        "should move the estimate towards the observation"
    );
    assert_eq!(estimate, filter.estimate(), "should keep the returned estimate");
    let expected_uncertainty = (1.0 - gain) * 1.0 + 0.01;
    assert!(
        (filter.uncertainty() - expected_uncertainty).abs() < 1e-12,
        "should shrink the uncertainty then add process noise"
    );
}

#[test]
fn test_uncertainty_decreases_without_process_noise() {
    let mut filter = AxisFilter::new(FilterConfig {
        process_noise: 0.0,
        ..config()
    });

    let mut previous = filter.uncertainty();
    for observation in [0.3, -1.2, 4.0, 0.0, 9.81] {
        filter.step(observation);
        assert!(
            filter.uncertainty() < previous,
            "uncertainty should strictly decrease, {} >= {previous}",
            filter.uncertainty()
        );
        assert!(filter.uncertainty() >= 0.0, "uncertainty should stay non-negative");
        assert!(
            (0.0..=1.0).contains(&filter.gain()),
            "gain should stay within [0, 1]"
        );
        previous = filter.uncertainty();
    }
}

#[test]
fn test_constant_observation_converges() {
    let config = config();
    let mut filter = AxisFilter::new(config);

    for _ in 0..500 {
        filter.step(3.0);
    }

    assert!(
        (filter.estimate() - 3.0).abs() < 1e-6,
        "estimate should converge to the observation, got {}",
        filter.estimate()
    );

    // At the fixed point p = (1 - k) * p + q, with k = p / (p + r)
    let before = filter.uncertainty();
    filter.step(3.0);
    let after = filter.uncertainty();
    assert!(
        (after - before).abs() < 1e-12,
        "uncertainty should settle at a fixed point"
    );
    let gain = filter.gain();
    assert!(
        (after - ((1.0 - gain) * before + config.process_noise)).abs() < 1e-12,
        "fixed point should satisfy the predict equation"
    );
}

#[test]
fn test_bank_has_no_cross_axis_leakage() {
    let mut bank = FilterBank::new(config());
    let mut reference = AxisFilter::new(config());

    let inputs = [
        AxisData::new(0.0, 1.0, -2.0),
        AxisData::new(250.0, 1.0, -2.0),
        AxisData::new(-400.0, 1.0, -2.0),
        AxisData::new(0.0, 1.0, -2.0),
    ];
    for input in inputs {
        let output = bank.filter(input);
        let expected = reference.step(1.0);
        assert_eq!(
            output.y, expected,
            "axis 1 should not be affected by the spike on axis 0"
        );
    }
}

#[test]
fn test_bank_matches_independent_filters() {
    let mut bank = FilterBank::new(config());
    let mut filters = [
        AxisFilter::new(config()),
        AxisFilter::new(config()),
        AxisFilter::new(config()),
    ];

    for raw in [[1.0, 2.0, 3.0], [0.5, -0.5, 9.0], [7.0, 7.0, 7.0]] {
        let output = bank.filter(AxisData::from(raw)).to_array();
        for i in 0..3 {
            assert_eq!(output[i], filters[i].step(raw[i]), "axis {i} should match");
        }
    }
    assert!(bank.axis(3).is_none(), "bank should only have three axes");
}

#[test]
fn test_validate_rejects_degenerate_noise() -> Result<(), Box<dyn Error>> {
    config().validate()?;
    FilterConfig::default().validate()?;

    let degenerate = FilterConfig {
        process_noise: 0.0,
        measurement_noise: 0.0,
        initial_uncertainty: 1.0,
    };
    assert!(degenerate.validate().is_err(), "should reject zero noise");

    let negative = FilterConfig {
        measurement_noise: -1.0,
        ..config()
    };
    assert!(negative.validate().is_err(), "should reject negative noise");

    let nan = FilterConfig {
        process_noise: f64::NAN,
        ..config()
    };
    assert!(nan.validate().is_err(), "should reject NaN");

    Ok(())
}
