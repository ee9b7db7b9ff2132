//! Geometric and hydraulic properties that hold for any boom configuration
use approx::{assert_abs_diff_eq, assert_relative_eq};
use sprayer_core::{
    ApplicationRate, Boom, BoomConfig, Distance, FlowModel, FlowRate, Nozzle, Pressure,
    SprayError, Speed, UnitSystem, YawRate,
};

fn imperial_tip() -> FlowModel {
    FlowModel::new(FlowRate::new(0.6), 1.0, UnitSystem::IMPERIAL).unwrap()
}

#[test]
fn test_centred_nozzle_ignores_yaw() {
    let nozzle = Nozzle::new(Distance::new(20.0 / 12.0), Distance::ZERO, imperial_tip()).unwrap();
    for yaw in [-360.0, -45.0, 0.0, 90.0, 720.0] {
        assert_eq!(nozzle.change_ratio(Speed::new(6.0), YawRate::new(yaw)), 1.0);
    }
}

#[test]
fn test_change_ratio_linear_in_yaw_and_position() {
    let speed = Speed::new(8.0);
    let deviation = |position: f64, yaw: f64| {
        Nozzle::new(Distance::new(1.0), Distance::new(position), imperial_tip())
            .unwrap()
            .change_ratio(speed, YawRate::new(yaw))
            - 1.0
    };

    // Doubling either input doubles the deviation from straight-line speed
    assert_relative_eq!(deviation(10.0, 60.0) * 2.0, deviation(10.0, 120.0), epsilon = 1e-12);
    assert_relative_eq!(deviation(10.0, 60.0) * 2.0, deviation(20.0, 60.0), epsilon = 1e-12);

    // Right-side nozzle slows for positive yaw, left-side speeds up
    assert!(deviation(10.0, 60.0) < 0.0);
    assert!(deviation(-10.0, 60.0) > 0.0);
}

#[test]
fn test_capacity_monotonic() {
    let water = imperial_tip();
    let fertiliser = FlowModel::new(FlowRate::new(0.6), 1.28, UnitSystem::IMPERIAL).unwrap();

    let mut last = FlowRate::ZERO;
    for psi in [0.0, 15.0, 30.0, 40.0, 60.0, 90.0] {
        let capacity = water.capacity(Pressure::new(psi));
        assert!(capacity >= last);
        assert!(fertiliser.capacity(Pressure::new(psi)) <= capacity);
        last = capacity;
    }

    // Base pressure gives the rated flow corrected for density
    let base = UnitSystem::IMPERIAL.base_pressure;
    assert_relative_eq!(water.capacity(base).value(), 0.6, epsilon = 1e-12);
    assert_relative_eq!(
        fertiliser.capacity(base).value(),
        0.6 / 1.28_f64.sqrt(),
        epsilon = 1e-12
    );
}

#[test]
fn test_single_nozzle_capped_and_reversed() {
    let outer = Nozzle::new(Distance::new(20.0 / 12.0), Distance::new(-59.0), imperial_tip()).unwrap();
    let inner = Nozzle::new(Distance::new(20.0 / 12.0), Distance::new(59.0), imperial_tip()).unwrap();
    let command = (
        ApplicationRate::new(10.0),
        Speed::new(8.0),
        Pressure::new(50.0),
        YawRate::new(240.0),
    );

    let (correction, flow) = outer
        .pwm_and_rate(command.0, command.1, command.2, command.3)
        .unwrap();
    assert!(correction > 4.0);
    assert_eq!(flow, outer.flow_model().capacity(command.2));

    let (correction, flow) = inner
        .pwm_and_rate(command.0, command.1, command.2, command.3)
        .unwrap();
    assert!(correction < 0.0);
    assert_eq!(flow, FlowRate::ZERO);
}

#[test]
fn test_out_of_range_toggle_is_atomic() {
    let mut boom = Boom::from_config(&BoomConfig::imperial_120ft()).unwrap();
    let before = boom.nozzles().to_vec();

    let result = boom.set_enabled([3, 4, 72, 5], false);
    assert_eq!(
        result,
        Err(SprayError::IndexOutOfRange {
            index: 72,
            nozzle_count: 72
        })
    );
    assert_eq!(boom.nozzles(), before.as_slice());
    assert_eq!(boom.enabled_count(), 72);
}

#[test]
fn test_metric_boom_matches_imperial_shape() {
    // 36 m boom at 94 l/ha, 8 km/h: 0.5 m × 8000/3600 m/s × 94/10000 l/m² × 60
    let boom = Boom::from_config(&BoomConfig::metric_36m()).unwrap();
    let per_nozzle = boom.per_nozzle_flow(ApplicationRate::new(94.0), Speed::new(8.0));
    assert_relative_eq!(per_nozzle.value(), 0.626667, epsilon = 1e-5);

    let baseline = boom.baseline_duty_cycle(
        ApplicationRate::new(94.0),
        Speed::new(8.0),
        Pressure::new(3.45),
    );
    assert_abs_diff_eq!(baseline.value(), 0.2469, epsilon = 1e-3);

    // Centred pair straddles the pivot symmetrically
    let positions: Vec<f64> = boom.nozzles().iter().map(|n| n.position().value()).collect();
    assert_relative_eq!(positions[35], -0.25, epsilon = 1e-12);
    assert_relative_eq!(positions[36], 0.25, epsilon = 1e-12);
    assert_relative_eq!(positions[0], -17.75, epsilon = 1e-12);
}

#[test]
fn test_invalid_commands_rejected() {
    let boom = Boom::from_config(&BoomConfig::imperial_120ft()).unwrap();
    let rate = ApplicationRate::new(10.0);
    let pressure = Pressure::new(40.0);

    assert!(matches!(
        boom.compensated_values(rate, Speed::new(0.0), pressure, YawRate::STRAIGHT),
        Err(SprayError::InvalidCommand {
            parameter: "speed",
            ..
        })
    ));
    assert!(matches!(
        boom.command(rate, Speed::new(5.0), pressure, YawRate::new(f64::NAN)),
        Err(SprayError::InvalidCommand {
            parameter: "yaw_rate",
            ..
        })
    ));
}
