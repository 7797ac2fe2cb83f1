/// Current reading of a time-ordered series: its last element.
///
/// Returns `None` for an empty series. Never substitutes a default; callers
/// that need a baseline value pick their own.
pub fn latest<T: Copy>(series: &[T]) -> Option<T> {
    series.last().copied()
}
