//! Forecasting services.
//!
//! Every function here is pure and synchronous: it takes plain data plus an
//! explicit reference date and returns a freshly built value. Repository
//! access and request handling live in `db` and `http`.
//!
//! | Module | Purpose |
//! |--------|---------|
//! | [`status`] | Tri-state rotation status from projected vs. target weeks |
//! | [`velocity`] | Per-setter output rates from historical production records |
//! | [`profiles`] | Overlay of user overrides onto baseline profiles |
//! | [`forecast`] | Weeks-to-rotation per gym, orbit and discipline |
//! | [`outlook`] | 52-week rotation and capacity curve with planned absences |

pub mod forecast;
pub mod outlook;
pub mod profiles;
pub mod status;
pub mod velocity;

pub use forecast::{forecast_rotation, ForecastInput};
pub use outlook::{project_yearly_outlook, YearlyOutlook};
pub use profiles::merge_profiles;
pub use status::classify;
pub use velocity::{aggregate_velocity, VelocityWindow};
