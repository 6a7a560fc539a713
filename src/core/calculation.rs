use crate::domain::model::{DerivedOutput, EstimateInput};

/// Applies the cost formulas to `input`.
///
/// Zero and negative inputs are not rejected. A zero target duration or
/// instalment makes the matching output infinite or NaN.
pub fn recompute(input: &EstimateInput) -> DerivedOutput {
    let land_area = input.width * input.height;
    let land_cost = land_area * input.land_cost_per_meter_squared;

    let building_area = input.building_portion * land_area * input.num_floors;
    let building_cost = building_area * input.building_cost_per_meter_squared;

    let total_cost = land_cost + building_cost;
    let monthly_instalment = total_cost / input.target_month_duration;
    let duration = total_cost / input.target_monthly_instalment;

    DerivedOutput {
        land_area,
        land_cost,
        building_area,
        building_cost,
        total_cost,
        monthly_instalment,
        duration,
    }
}

/// Rounds half-way values toward positive infinity. Non-finite values pass through.
pub fn round_half_up(value: f64) -> f64 {
    if !value.is_finite() {
        return value;
    }
    let floor = value.floor();
    if value - floor >= 0.5 {
        floor + 1.0
    } else {
        floor
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_input() -> EstimateInput {
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

    #[test]
    fn test_recompute_sample() {
        let out = recompute(&sample_input());

        assert_eq!(out.land_area, 200.0);
        assert_eq!(out.land_cost, 200_000_000.0);
        assert!((out.building_area - 240.0).abs() < 1e-9);
        assert!((out.building_cost - 1_200_000_000.0).abs() < 1e-3);
        assert!((out.total_cost - 1_400_000_000.0).abs() < 1e-3);
        assert!((out.monthly_instalment - 116_666_666.666_666_7).abs() < 1e-3);
    }

    #[test]
    fn test_zero_instalment_gives_infinite_duration() {
        let out = recompute(&sample_input());
        assert!(out.duration.is_infinite());
        assert!(out.duration.is_sign_positive());
    }

    #[test]
    fn test_all_zero_inputs_give_nan_targets() {
        let input = EstimateInput {
            building_portion: 0.0,
            building_cost_per_meter_squared: 0.0,
            num_floors: 0.0,
            ..EstimateInput::default()
        };
        let out = recompute(&input);
        assert_eq!(out.total_cost, 0.0);
        assert!(out.monthly_instalment.is_nan());
        assert!(out.duration.is_nan());
    }

    #[test]
    fn test_negative_inputs_are_not_rejected() {
        let input = EstimateInput {
            width: -10.0,
            height: 20.0,
            land_cost_per_meter_squared: 100.0,
            target_month_duration: 10.0,
            ..EstimateInput::default()
        };
        let out = recompute(&input);
        assert_eq!(out.land_area, -200.0);
        assert_eq!(out.land_cost, -20_000.0);
        assert_eq!(out.total_cost, out.land_cost + out.building_cost);
    }

    #[test]
    fn test_total_is_sum_of_parts() {
        for (w, h, lc, bc) in [(1.0, 1.0, 3.0, 7.0), (12.5, 8.0, 250.0, 900.0), (0.0, 5.0, 1.0, 1.0)] {
            let input = EstimateInput {
                width: w,
                height: h,
                land_cost_per_meter_squared: lc,
                building_cost_per_meter_squared: bc,
                ..EstimateInput::default()
            };
            let out = recompute(&input);
            assert_eq!(out.land_area, w * h);
            assert_eq!(out.land_cost, w * h * lc);
            assert_eq!(out.total_cost, out.land_cost + out.building_cost);
        }
    }

    #[test]
    fn test_round_half_up() {
        assert_eq!(round_half_up(2.5), 3.0);
        assert_eq!(round_half_up(-2.5), -2.0);
        assert_eq!(round_half_up(2.4999), 2.0);
        assert_eq!(round_half_up(-0.4), 0.0);
        // 略小於 0.5 與 2^52 附近的邊界值
        assert_eq!(round_half_up(0.499_999_999_999_999_94), 0.0);
        assert_eq!(round_half_up(4_503_599_627_370_497.0), 4_503_599_627_370_497.0);
        assert!(round_half_up(f64::INFINITY).is_infinite());
        assert!(round_half_up(f64::NAN).is_nan());
    }
}
