use serde::Serialize;

/// A single timed unit of transcript text. Offsets are seconds from the
/// start of the media.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TimedSegment {
    pub start_time: f64,
    pub end_time: f64,
    pub text: String,
}

impl TimedSegment {
    pub fn duration(&self) -> f64 {
        self.end_time - self.start_time
    }
}
