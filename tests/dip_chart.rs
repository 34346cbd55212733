use approx::assert_relative_eq;
use tank_dip_toolbox::tank::{
    full_volume_liters, generate_dip_chart, volume_from_dip, DipChartRow, Tank, TankError,
    MAX_CHART_ROWS,
};
use tank_dip_toolbox::units::{LengthUnit, VolumeUnit};

#[test]
fn chart_spans_zero_to_full_diameter() {
    let tank = Tank::new(2.0, 5.0);
    let chart = generate_dip_chart(&tank, 1.0).expect("chart");
    let rows: Vec<DipChartRow> = chart.rows().collect();

    assert_eq!(rows.len(), 201);
    assert_eq!(chart.len(), 201);
    assert_eq!(rows[0], DipChartRow { dip_cm: 0.0, volume_liters: 0.0 });
    let last = rows.last().unwrap();
    assert_eq!(last.dip_cm, 200.0);
    assert_relative_eq!(
        last.volume_liters,
        full_volume_liters(&tank).unwrap(),
        max_relative = 1e-12
    );
}

#[test]
fn last_row_is_forced_to_diameter_when_step_does_not_divide_it() {
    // 내경 187 cm, 간격 10 cm → 0..180 + 187
    let tank = Tank::new(1.87, 4.0);
    let dips: Vec<f64> = generate_dip_chart(&tank, 10.0)
        .unwrap()
        .rows()
        .map(|r| r.dip_cm)
        .collect();
    assert_eq!(dips.len(), 20);
    assert_eq!(dips[18], 180.0);
    assert_relative_eq!(dips[19], 187.0, max_relative = 1e-12);
}

#[test]
fn fractional_step_does_not_drift_or_duplicate_the_end() {
    let tank = Tank::new(2.0, 5.0);
    let chart = generate_dip_chart(&tank, 0.1).unwrap();
    let rows: Vec<DipChartRow> = chart.rows().collect();
    assert_eq!(rows.len(), 2001);
    assert_relative_eq!(rows[1234].dip_cm, 123.4, max_relative = 1e-12);
    assert_eq!(rows[2000].dip_cm, 200.0);
    assert!(rows[1999].dip_cm < rows[2000].dip_cm);
}

#[test]
fn rows_match_single_dip_conversion_and_are_monotonic() {
    let tank = Tank::new(2.55, 6.8);
    let chart = generate_dip_chart(&tank, 2.5).unwrap();
    let mut prev = -1.0;
    for row in &chart {
        assert_eq!(row.volume_liters, volume_from_dip(&tank, row.dip_cm).unwrap());
        assert!(row.volume_liters >= prev);
        prev = row.volume_liters;
    }
}

#[test]
fn chart_is_restartable() {
    let chart = generate_dip_chart(&Tank::new(1.5, 3.0), 0.5).unwrap();
    let first: Vec<_> = chart.rows().collect();
    let second: Vec<_> = chart.rows().collect();
    assert_eq!(first, second);
    assert_eq!(chart.rows().len(), first.len());
}

#[test]
fn step_equal_to_diameter_gives_two_rows() {
    let chart = generate_dip_chart(&Tank::new(2.0, 5.0), 200.0).unwrap();
    let dips: Vec<f64> = chart.rows().map(|r| r.dip_cm).collect();
    assert_eq!(dips, vec![0.0, 200.0]);
}

#[test]
fn invalid_steps_are_rejected() {
    let tank = Tank::new(2.0, 5.0);
    for step in [0.0, -1.0, 200.5, f64::INFINITY] {
        assert!(
            matches!(
                generate_dip_chart(&tank, step),
                Err(TankError::InvalidStep { .. })
            ),
            "step {step}"
        );
    }
}

#[test]
fn vanishing_step_is_rejected_instead_of_overflowing_row_count() {
    let tank = Tank::new(2.0, 5.0);
    for step in [1e-17, f64::MIN_POSITIVE, 200.0 / MAX_CHART_ROWS as f64] {
        assert!(
            matches!(
                generate_dip_chart(&tank, step),
                Err(TankError::InvalidStep { .. })
            ),
            "step {step}"
        );
    }
}

#[test]
fn row_cap_still_admits_fine_charts() {
    // 0.0001 cm 간격 → 2,000,001 행
    let chart = generate_dip_chart(&Tank::new(2.0, 5.0), 1e-4).unwrap();
    assert_eq!(chart.len(), 2_000_001);
    assert!(chart.len() <= MAX_CHART_ROWS);
    assert_eq!(chart.rows().last().unwrap().dip_cm, 200.0);
}

#[test]
fn invalid_tank_is_reported_before_step() {
    assert!(matches!(
        generate_dip_chart(&Tank::new(2.0, 0.0), 1.0),
        Err(TankError::InvalidTankDimensions { .. })
    ));
}

#[test]
fn rows_in_converts_to_display_units() {
    let chart = generate_dip_chart(&Tank::new(2.0, 5.0), 100.0).unwrap();
    let rows: Vec<(f64, f64)> = chart
        .rows_in(LengthUnit::Millimeter, VolumeUnit::CubicMeter)
        .collect();
    assert_eq!(rows.len(), 3);
    assert_relative_eq!(rows[1].0, 1000.0, max_relative = 1e-12);
    assert_relative_eq!(rows[2].1, 15.707_963_267_948_966, max_relative = 1e-12);
}
