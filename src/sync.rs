use crate::segment::TimedSegment;

/// Anything that plays media and can be moved to a new position.
pub trait PlaybackSurface {
    fn set_position(&mut self, seconds: f64);
}

/// A segment is active over the half-open interval `[start, end)`, so a
/// boundary instant belongs to the later of two adjacent segments.
pub fn is_active(segment: &TimedSegment, current_time: f64) -> bool {
    segment.start_time <= current_time && current_time < segment.end_time
}

/// Index of the segment to highlight at `current_time`. The first match in
/// sequence order wins.
pub fn active_index(segments: &[TimedSegment], current_time: f64) -> Option<usize> {
    segments.iter().position(|s| is_active(s, current_time))
}

pub fn active_segment(segments: &[TimedSegment], current_time: f64) -> Option<&TimedSegment> {
    active_index(segments, current_time).map(|i| &segments[i])
}

/// Moves the surface to the start of `segment`. Clamping out-of-range
/// positions is up to the surface.
pub fn seek<P: PlaybackSurface + ?Sized>(surface: &mut P, segment: &TimedSegment) {
    log::trace!("Seeking to {:.3}s", segment.start_time);
    surface.set_position(segment.start_time);
}
