//! Month grouping of the filtered photo sequence

use crate::filter::year_month;
use app_db::PhotoRecord;
use std::cmp::Ordering;
use std::collections::HashMap;

/// Bucket key for photos without a capture date
pub const UNKNOWN_MONTH_KEY: &str = "unknown";

/// One month's worth of photos, in capture order
#[derive(Debug, Clone, PartialEq)]
pub struct MonthGroup {
    /// `"YYYY/MM"`, or [`UNKNOWN_MONTH_KEY`] for undated photos
    pub key: String,
    pub photos: Vec<PhotoRecord>,
}

/// Month key for a capture timestamp
pub fn month_key(taken_at: Option<i64>) -> String {
    taken_at
        .and_then(year_month)
        .map(|(year, month)| format!("{:04}/{:02}", year, month))
        .unwrap_or_else(|| UNKNOWN_MONTH_KEY.to_string())
}

/// Bucket an ordered filtered sequence by calendar month.
///
/// Returns the groups in display order (newest month first, unknown bucket
/// last) and a map from month key to the index of that month's first photo
/// within the flat input sequence. The indices always point into the input
/// order, independent of display order.
pub fn group_by_month(
    photos: &[PhotoRecord],
) -> (Vec<MonthGroup>, HashMap<String, usize>) {
    let mut start_index: HashMap<String, usize> = HashMap::new();
    let mut by_key: HashMap<String, Vec<PhotoRecord>> = HashMap::new();

    for (i, photo) in photos.iter().enumerate() {
        let key = month_key(photo.taken_at);
        start_index.entry(key.clone()).or_insert(i);
        by_key.entry(key).or_default().push(photo.clone());
    }

    let mut keys: Vec<String> = by_key.keys().cloned().collect();
    keys.sort_by(|a, b| {
        match (a == UNKNOWN_MONTH_KEY, b == UNKNOWN_MONTH_KEY) {
            (true, true) => Ordering::Equal,
            (true, false) => Ordering::Greater,
            (false, true) => Ordering::Less,
            // "YYYY/MM" sorts lexicographically in date order
            (false, false) => b.cmp(a),
        }
    });

    let groups = keys
        .into_iter()
        .map(|key| {
            let photos = by_key.remove(&key).expect("key came from this map");
            MonthGroup { key, photos }
        })
        .collect();

    (groups, start_index)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn ts(year: i32, month: u32, day: u32) -> i64 {
        NaiveDate::from_ymd_opt(year, month, day)
            .unwrap()
            .and_hms_opt(12, 0, 0)
            .unwrap()
            .and_utc()
            .timestamp()
    }

    fn photo(id: i64, taken_at: Option<i64>) -> PhotoRecord {
        PhotoRecord {
            photo_id: id,
            image_ref: format!("img/{id}.jpg"),
            taken_at,
            note: None,
            liked: false,
            added_at: 0,
        }
    }

    #[test]
    fn test_month_key_format() {
        assert_eq!(month_key(Some(ts(2024, 1, 5))), "2024/01");
        assert_eq!(month_key(Some(ts(2024, 12, 31))), "2024/12");
        assert_eq!(month_key(None), UNKNOWN_MONTH_KEY);
    }

    #[test]
    fn test_two_photos_two_months() {
        let photos = vec![photo(1, Some(ts(2024, 1, 5))), photo(2, Some(ts(2024, 2, 10)))];

        let (groups, start_index) = group_by_month(&photos);

        // Display order: newest month first
        assert_eq!(groups.len(), 2);
        assert_eq!(groups[0].key, "2024/02");
        assert_eq!(groups[0].photos[0].photo_id, 2);
        assert_eq!(groups[1].key, "2024/01");
        assert_eq!(groups[1].photos[0].photo_id, 1);

        // Start indices are plain positions in the flat sequence
        assert_eq!(start_index["2024/01"], 0);
        assert_eq!(start_index["2024/02"], 1);
    }

    #[test]
    fn test_every_photo_lands_in_exactly_one_group() {
        let photos = vec![
            photo(1, Some(ts(2024, 1, 1))),
            photo(2, Some(ts(2024, 1, 20))),
            photo(3, Some(ts(2024, 3, 3))),
            photo(4, None),
        ];

        let (groups, _) = group_by_month(&photos);

        let total: usize = groups.iter().map(|g| g.photos.len()).sum();
        assert_eq!(total, photos.len());

        for p in &photos {
            let holding: Vec<&MonthGroup> = groups
                .iter()
                .filter(|g| g.photos.iter().any(|q| q.photo_id == p.photo_id))
                .collect();
            assert_eq!(holding.len(), 1, "photo {} in one group", p.photo_id);
        }
    }

    #[test]
    fn test_unknown_bucket_sorts_last() {
        let photos = vec![
            photo(1, None),
            photo(2, Some(ts(2024, 5, 1))),
            photo(3, Some(ts(2023, 11, 1))),
        ];

        let (groups, _) = group_by_month(&photos);

        let keys: Vec<&str> = groups.iter().map(|g| g.key.as_str()).collect();
        assert_eq!(keys, vec!["2024/05", "2023/11", UNKNOWN_MONTH_KEY]);
    }

    #[test]
    fn test_start_index_points_at_earliest_of_month() {
        let photos = vec![
            photo(1, Some(ts(2024, 1, 2))),
            photo(2, Some(ts(2024, 1, 9))),
            photo(3, Some(ts(2024, 2, 1))),
            photo(4, Some(ts(2024, 2, 14))),
        ];

        let (_, start_index) = group_by_month(&photos);

        for (key, &idx) in &start_index {
            assert_eq!(&month_key(photos[idx].taken_at), key);
            // No earlier photo in the flat sequence shares this key
            assert!(photos[..idx].iter().all(|p| &month_key(p.taken_at) != key));
        }
        assert_eq!(start_index["2024/01"], 0);
        assert_eq!(start_index["2024/02"], 2);
    }

    #[test]
    fn test_empty_input() {
        let (groups, start_index) = group_by_month(&[]);
        assert!(groups.is_empty());
        assert!(start_index.is_empty());
    }
}
