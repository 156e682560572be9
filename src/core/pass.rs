use chrono::{DateTime, Utc};

/// One predicted visible overflight of the station.
#[derive(Debug, Clone, PartialEq)]
pub struct Pass {
    pub start: DateTime<Utc>,
    pub duration_secs: u32,
    /// Apparent magnitude; lower is brighter.
    pub magnitude: f64,
    pub start_compass: String,
    pub end_compass: String,
}
