use land_cost_estimator::core::format::{format_duration, format_grouped, Summary};
use land_cost_estimator::{recompute, CostEstimator, EstimateInput, InputField, Mode};

fn scenario_input() -> EstimateInput {
    EstimateInput {
        width: 10.0,
        height: 20.0,
        land_cost_per_meter_squared: 1_000_000.0,
        building_portion: 0.6,
        building_cost_per_meter_squared: 5_000_000.0,
        num_floors: 2.0,
        target_month_duration: 12.0,
        target_monthly_instalment: 0.0,
    }
}

fn approx_eq(a: f64, b: f64) -> bool {
    (a - b).abs() <= 1e-9 * a.abs().max(b.abs()).max(1.0)
}

/// 範例情境：12 個月攤還
#[test]
fn test_duration_mode_scenario() {
    let estimator = CostEstimator::with_input(scenario_input(), Mode::ByTargetDuration);
    let out = estimator.output();

    assert!(approx_eq(out.land_area, 200.0));
    assert!(approx_eq(out.land_cost, 200_000_000.0));
    assert!(approx_eq(out.building_area, 240.0));
    assert!(approx_eq(out.building_cost, 1_200_000_000.0));
    assert!(approx_eq(out.total_cost, 1_400_000_000.0));
    assert!((out.monthly_instalment - 116_666_666.67).abs() < 0.01);

    let summary = Summary::new(estimator.mode(), &out).to_string();
    assert!(summary.contains("Land Area: 200 m²"));
    assert!(summary.contains("Building Area: 240 m²"));
    assert!(summary.contains("Total Cost: 200,000,000 + 1,200,000,000 = 1,400,000,000"));
    assert!(summary.contains("Installment Per Month: 116,666,666.667"));
}

#[test]
fn test_zero_instalment_renders_without_panicking() {
    let estimator = CostEstimator::with_input(scenario_input(), Mode::ByTargetMonthlyInstalment);
    let out = estimator.output();

    assert!(!out.duration.is_finite());

    let summary = Summary::new(estimator.mode(), &out).to_string();
    assert!(summary.contains("Duration: Infinity Month (Infinity Years)"));
    assert_eq!(format_grouped(out.duration), "∞");
}

#[test]
fn test_mode_round_trip_keeps_total_cost() {
    let mut estimator = CostEstimator::with_input(scenario_input(), Mode::ByTargetDuration);
    let total_before = estimator.output().total_cost;

    estimator.set_mode(Mode::ByTargetMonthlyInstalment);
    assert!(approx_eq(estimator.output().total_cost, total_before));

    estimator.set_mode(Mode::ByTargetDuration);
    assert!(approx_eq(estimator.output().total_cost, total_before));
    assert_eq!(estimator.input().target_month_duration, 12.0);
}

#[test]
fn test_duration_times_instalment_matches_total() {
    let mut estimator = CostEstimator::with_input(scenario_input(), Mode::ByTargetDuration);
    estimator.set_mode(Mode::ByTargetMonthlyInstalment);

    let out = estimator.output();
    assert!(approx_eq(out.duration * out.monthly_instalment, out.total_cost));
}

#[test]
fn test_duration_display_rounds_to_two_decimals() {
    let mut estimator = CostEstimator::with_input(scenario_input(), Mode::ByTargetMonthlyInstalment);
    estimator
        .set_field(InputField::TargetMonthlyInstalment, 150_000_000.0)
        .unwrap();

    let out = estimator.output();
    // 1,400,000,000 / 150,000,000 = 9.333… 個月
    assert_eq!(format_duration(out.duration), "9.33 Month (0.78 Years)");
}

#[test]
fn test_total_cost_is_sum_for_varied_inputs() {
    let cases = [
        (5.0, 8.0, 300.0, 0.5, 1200.0, 3.0),
        (0.0, 0.0, 0.0, 0.6, 5_000_000.0, 1.0),
        (15.5, 7.25, 2_500_000.0, 1.0, 4_000_000.0, 4.0),
    ];

    for (width, height, land, portion, building, floors) in cases {
        let input = EstimateInput {
            width,
            height,
            land_cost_per_meter_squared: land,
            building_portion: portion,
            building_cost_per_meter_squared: building,
            num_floors: floors,
            ..EstimateInput::default()
        };
        let out = recompute(&input);

        assert_eq!(out.land_area, width * height);
        assert_eq!(out.land_cost, out.land_area * land);
        assert_eq!(out.total_cost, out.land_cost + out.building_cost);
    }
}
