//! Property tests for the forecasting engine.

use std::collections::HashMap;

use chrono::{Duration, NaiveDate};
use proptest::prelude::*;

use orbit_forecast::models::{
    Discipline, GymCode, OrbitTarget, ProductionRecord, ProfileMap, RotationStatus, StaffProfile,
    VarianceBuffer,
};
use orbit_forecast::services::{
    aggregate_velocity, classify, forecast_rotation, project_yearly_outlook, ForecastInput,
    VelocityWindow,
};

fn base_date() -> NaiveDate {
    NaiveDate::from_ymd_opt(2024, 1, 1).unwrap()
}

fn staff_strategy() -> impl Strategy<Value = ProfileMap> {
    prop::collection::vec((0.0f64..20.0, any::<bool>()), 0..6).prop_map(|specs| {
        specs
            .into_iter()
            .enumerate()
            .map(|(i, (output, active))| {
                let mut profile = StaffProfile::new(format!("S{}", i)).with_output(output);
                profile.active = active;
                (profile.name.clone(), profile)
            })
            .collect()
    })
}

fn orbit_strategy() -> impl Strategy<Value = Vec<OrbitTarget>> {
    prop::collection::vec((0.0f64..500.0, 0.5f64..12.0, any::<bool>()), 0..5).prop_map(|specs| {
        specs
            .into_iter()
            .enumerate()
            .map(|(i, (climbs, target, boulders))| {
                let discipline = if boulders {
                    Discipline::Boulders
                } else {
                    Discipline::Routes
                };
                OrbitTarget::new(format!("O{}", i), discipline, climbs, target)
            })
            .collect()
    })
}

proptest! {
    #[test]
    fn prop_status_is_monotone_in_projection(
        target in 0.1f64..20.0,
        a in 0.0f64..40.0,
        b in 0.0f64..40.0,
    ) {
        let (low, high) = if a <= b { (a, b) } else { (b, a) };
        let rank = |s: RotationStatus| match s {
            RotationStatus::OnTrack => 0,
            RotationStatus::Lagging => 1,
            RotationStatus::Critical => 2,
        };
        prop_assert!(rank(classify(low, target)) <= rank(classify(high, target)));
    }

    #[test]
    fn prop_records_before_cutoff_never_count(
        offsets in prop::collection::vec(0i64..400, 1..40),
        lookback in 1u32..200,
    ) {
        let as_of = base_date() + Duration::days(400);
        let records: Vec<ProductionRecord> = offsets
            .iter()
            .map(|off| ProductionRecord::new(
                base_date() + Duration::days(*off),
                format!("S{}", off % 3),
                "G1",
                Discipline::Boulders,
            ))
            .collect();
        let window = VelocityWindow::new(as_of).with_lookback_days(lookback);

        let mut by_gym = HashMap::new();
        by_gym.insert(GymCode::from("G1"), records.clone());
        let profiles = aggregate_velocity(&by_gym, None, window);

        for (name, profile) in &profiles {
            prop_assert!(records
                .iter()
                .any(|r| r.setter.as_deref() == Some(name.as_str()) && r.date_set >= window.cutoff()));
            prop_assert!(profile.avg_weekly_output >= 1.0);
        }
    }

    #[test]
    fn prop_more_buffer_never_increases_horsepower(
        staff in staff_strategy(),
        orbits in orbit_strategy(),
        lo in 0.0f64..100.0,
        hi in 0.0f64..100.0,
    ) {
        let gym = GymCode::from("G1");
        let (lo, hi) = if lo <= hi { (lo, hi) } else { (hi, lo) };
        let base = ForecastInput::new(&gym, &staff, &orbits, base_date());

        let loose = forecast_rotation(&base.clone().with_variance_buffer(VarianceBuffer::new(lo)));
        let tight = forecast_rotation(&base.with_variance_buffer(VarianceBuffer::new(hi)));
        prop_assert!(tight.weekly_horsepower <= loose.weekly_horsepower);
    }

    #[test]
    fn prop_forecast_shape(staff in staff_strategy(), orbits in orbit_strategy()) {
        let gym = GymCode::from("G1");
        let forecast = forecast_rotation(&ForecastInput::new(&gym, &staff, &orbits, base_date()));

        prop_assert_eq!(forecast.orbits.len(), orbits.len());
        prop_assert_eq!(forecast.disciplines.len(), 2);
        prop_assert!(forecast.weekly_horsepower >= 0.0);
        let counted: usize = forecast.disciplines.iter().map(|d| d.orbit_count).sum();
        prop_assert_eq!(counted, orbits.len());
    }

    #[test]
    fn prop_outlook_is_always_52_finite_points(staff in staff_strategy(), orbits in orbit_strategy()) {
        let gym = GymCode::from("G1");
        let input = ForecastInput::new(&gym, &staff, &orbits, base_date());
        let points: Vec<_> = project_yearly_outlook(&input).collect();

        prop_assert_eq!(points.len(), 52);
        for point in &points {
            prop_assert!(point.projected_rotation.is_finite());
            prop_assert!(point.capacity >= 0.0);
        }
    }
}
