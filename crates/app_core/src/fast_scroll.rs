//! Fast-scroll handle mapping
//!
//! Maps a drag position on the scroll track to an index in the filtered
//! sequence. Pure and monotonic in `drag_y` for a fixed item count.

/// Map a drag offset on a track of `track_height` to an item index.
///
/// `drag_y` is clamped into `[0, track_height]`; the result is clamped into
/// `[0, item_count - 1]`. Returns 0 for an empty list or degenerate track.
pub fn index_for_drag(drag_y: f32, track_height: f32, item_count: usize) -> usize {
    if item_count == 0 || track_height <= 0.0 {
        return 0;
    }

    let ratio = drag_y.clamp(0.0, track_height) / track_height;
    let max_index = item_count - 1;

    ((ratio * max_index as f32).floor() as usize).min(max_index)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_midpoint() {
        // ratio 0.5 over 10 items: floor(0.5 * 9) = 4
        assert_eq!(index_for_drag(75.0, 150.0, 10), 4);
    }

    #[test]
    fn test_boundaries() {
        assert_eq!(index_for_drag(0.0, 150.0, 10), 0);
        assert_eq!(index_for_drag(150.0, 150.0, 10), 9);
    }

    #[test]
    fn test_out_of_track_drags_clamp() {
        assert_eq!(index_for_drag(-40.0, 150.0, 10), 0);
        assert_eq!(index_for_drag(900.0, 150.0, 10), 9);
    }

    #[test]
    fn test_degenerate_inputs() {
        assert_eq!(index_for_drag(10.0, 150.0, 0), 0);
        assert_eq!(index_for_drag(10.0, 0.0, 10), 0);
        assert_eq!(index_for_drag(10.0, 150.0, 1), 0);
    }

    #[test]
    fn test_monotonic_in_drag_y() {
        let track = 320.0;
        for count in [1usize, 2, 7, 100] {
            let mut prev = 0;
            for step in 0..=64 {
                let y = track * step as f32 / 64.0;
                let idx = index_for_drag(y, track, count);
                assert!(idx >= prev, "count={count} y={y}");
                assert!(idx < count);
                prev = idx;
            }
        }
    }
}
