//! Photo filtering: keyword search, liked flag, and month segments
//!
//! Pure functions over photo records. The reference date is passed in
//! explicitly so segment filtering is deterministic under test.

use app_db::PhotoRecord;
use chrono::{DateTime, Datelike, NaiveDate};
use serde::{Deserialize, Serialize};

/// Coarse date-range choice for the gallery
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Segment {
    /// Photos taken in the calendar month before the reference date
    #[serde(rename = "prior_month")]
    PriorMonth,
    /// Photos taken in the calendar month after the reference date
    #[serde(rename = "next_month")]
    NextMonth,
    /// No date restriction
    #[serde(rename = "all")]
    #[default]
    All,
}

/// Current filter choices for the gallery grid
#[derive(Debug, Clone, PartialEq, Default)]
pub struct FilterCriteria {
    /// Empty means no keyword filter
    pub keyword: String,
    pub liked_only: bool,
    pub segment: Segment,
}

impl FilterCriteria {
    /// Returns `true` if any filter narrows the collection
    pub fn is_active(&self) -> bool {
        !self.keyword.is_empty() || self.liked_only || self.segment != Segment::All
    }
}

/// Apply `criteria` to `photos`, returning the ordered filtered sequence.
///
/// Ordering: ascending capture time, undated photos order as the reference
/// date, ties broken by photo id. Undated photos never match a date-bounded
/// segment but pass `Segment::All`.
pub fn filter_photos(
    photos: &[PhotoRecord],
    criteria: &FilterCriteria,
    today: NaiveDate,
) -> Vec<PhotoRecord> {
    let keyword = criteria.keyword.to_lowercase();
    let target = segment_month(criteria.segment, today);

    let mut filtered: Vec<PhotoRecord> = photos
        .iter()
        .filter(|photo| {
            if !keyword.is_empty() {
                match &photo.note {
                    Some(note) if note.to_lowercase().contains(&keyword) => {}
                    _ => return false,
                }
            }

            if criteria.liked_only && !photo.liked {
                return false;
            }

            if let Some(target) = target {
                match photo.taken_at.and_then(year_month) {
                    Some(ym) if ym == target => {}
                    _ => return false,
                }
            }

            true
        })
        .cloned()
        .collect();

    let fallback = today.and_time(chrono::NaiveTime::MIN).and_utc().timestamp();
    filtered.sort_by_key(|photo| (photo.taken_at.unwrap_or(fallback), photo.photo_id));

    filtered
}

/// Calendar month a segment restricts to, if any
fn segment_month(segment: Segment, today: NaiveDate) -> Option<(i32, u32)> {
    match segment {
        Segment::All => None,
        Segment::PriorMonth => Some(shift_month(today.year(), today.month(), -1)),
        Segment::NextMonth => Some(shift_month(today.year(), today.month(), 1)),
    }
}

/// `(year, month)` of a unix timestamp, interpreted as UTC
pub(crate) fn year_month(secs: i64) -> Option<(i32, u32)> {
    DateTime::from_timestamp(secs, 0).map(|dt| (dt.year(), dt.month()))
}

/// Shift a calendar month by `delta`, wrapping across year boundaries
fn shift_month(year: i32, month: u32, delta: i32) -> (i32, u32) {
    let zero_based = year * 12 + month as i32 - 1 + delta;
    (zero_based.div_euclid(12), (zero_based.rem_euclid(12) + 1) as u32)
}
