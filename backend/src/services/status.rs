use crate::models::RotationStatus;

/// Weeks past target after which a rotation is critical rather than lagging.
pub const CRITICAL_MARGIN_WEEKS: f64 = 1.5;

/// Classify a projection against its target.
///
/// No division happens here; callers are responsible for only passing
/// positive targets.
pub fn classify(projected_weeks: f64, target_weeks: f64) -> RotationStatus {
    if projected_weeks > target_weeks + CRITICAL_MARGIN_WEEKS {
        RotationStatus::Critical
    } else if projected_weeks > target_weeks {
        RotationStatus::Lagging
    } else {
        RotationStatus::OnTrack
    }
}
