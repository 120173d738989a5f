//! Shared fixtures for the integration tests.

#![allow(dead_code)]

use std::collections::HashSet;
use std::sync::Mutex;

use chrono::NaiveDate;
use orbit_forecast::db::repositories::LocalRepository;
use orbit_forecast::db::repository::{PlanningRepository, RecordRepository};
use orbit_forecast::models::{Discipline, GymCode, OrbitTarget, ProductionRecord};

pub fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

/// A Friday; every 7-day window from here holds exactly five weekdays.
pub fn as_of() -> NaiveDate {
    date(2024, 3, 1)
}

pub fn record(day: NaiveDate, setter: &str, gym: &str) -> ProductionRecord {
    ProductionRecord::new(day, setter, gym, Discipline::Boulders)
}

/// History for gym `G1` that aggregates to Alice = 2.0 and Bob = 1.0 climbs per shift.
///
/// - 2024-02-05: Alice sets 3 climbs alone
/// - 2024-02-06: "Alice & Bob" set 2 climbs together
/// - 2023-06-01: one record outside the default 90-day window
pub fn g1_history() -> Vec<ProductionRecord> {
    let mut records = vec![record(date(2024, 2, 5), "Alice", "G1"); 3];
    records.extend(vec![record(date(2024, 2, 6), "Alice & Bob", "G1"); 2]);
    records.push(record(date(2023, 6, 1), "Zed", "G1"));
    records
}

pub fn g1_orbits() -> Vec<OrbitTarget> {
    vec![OrbitTarget::new("Cave", Discipline::Boulders, 100.0, 6.0)]
}

/// Repository holding [`g1_history`] and [`g1_orbits`].
pub async fn seeded_repo() -> LocalRepository {
    let repo = LocalRepository::new();
    let gym = GymCode::from("G1");
    repo.store_records(&gym, &g1_history()).await.unwrap();
    repo.put_orbit_targets(&gym, g1_orbits()).await.unwrap();
    repo
}

static ENV_LOCK: Mutex<()> = Mutex::new(());

/// Runs `f` with environment variables temporarily modified.
///
/// Restores the previous values on drop, including on panic, and holds a
/// global lock so tests touching the environment never interleave.
/// `None` removes a variable.
pub fn with_scoped_env<F, R>(changes: &[(&str, Option<&str>)], f: F) -> R
where
    F: FnOnce() -> R,
{
    let _lock = ENV_LOCK.lock().unwrap_or_else(|poisoned| poisoned.into_inner());
    let _guard = ScopedEnv::new(changes);
    f()
}

struct ScopedEnv {
    snapshot: Vec<(String, Option<String>)>,
}

impl ScopedEnv {
    fn new(changes: &[(&str, Option<&str>)]) -> Self {
        let keys: HashSet<&str> = changes.iter().map(|(k, _)| *k).collect();
        let snapshot = keys
            .into_iter()
            .map(|k| (k.to_string(), std::env::var(k).ok()))
            .collect();

        for (k, v) in changes {
            match v {
                Some(val) => std::env::set_var(k, val),
                None => std::env::remove_var(k),
            }
        }
        Self { snapshot }
    }
}

impl Drop for ScopedEnv {
    fn drop(&mut self) {
        for (k, v) in self.snapshot.drain(..) {
            match v {
                Some(val) => std::env::set_var(&k, val),
                None => std::env::remove_var(&k),
            }
        }
    }
}
