use chrono::{DateTime, Utc};

/// Half-open time interval: `from` is inclusive, `to` is exclusive. A missing
/// bound leaves that side open.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TimeRange {
    pub from: Option<DateTime<Utc>>,
    pub to: Option<DateTime<Utc>>,
}

impl TimeRange {
    pub fn new(from: Option<DateTime<Utc>>, to: Option<DateTime<Utc>>) -> Self {
        Self { from, to }
    }

    /// Everything at or after `from`.
    pub fn since(from: DateTime<Utc>) -> Self {
        Self {
            from: Some(from),
            to: None,
        }
    }

    /// Everything strictly before `to`.
    pub fn until(to: DateTime<Utc>) -> Self {
        Self {
            from: None,
            to: Some(to),
        }
    }

    pub fn between(from: DateTime<Utc>, to: DateTime<Utc>) -> Self {
        Self {
            from: Some(from),
            to: Some(to),
        }
    }

    pub fn contains(&self, time: DateTime<Utc>) -> bool {
        self.from.map_or(true, |from| time >= from) && self.to.map_or(true, |to| time < to)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn bounds_are_inclusive_from_exclusive_to() {
        let from = Utc.with_ymd_and_hms(2024, 6, 1, 12, 0, 0).unwrap();
        let to = Utc.with_ymd_and_hms(2024, 6, 1, 13, 0, 0).unwrap();
        let range = TimeRange::between(from, to);

        assert!(range.contains(from));
        assert!(range.contains(to - chrono::Duration::nanoseconds(1)));
        assert!(!range.contains(to));
        assert!(!range.contains(from - chrono::Duration::nanoseconds(1)));
    }

    #[test]
    fn open_bounds_match_everything_on_that_side() {
        let pivot = Utc.with_ymd_and_hms(2024, 6, 1, 12, 0, 0).unwrap();

        assert!(TimeRange::since(pivot).contains(pivot + chrono::Duration::days(365)));
        assert!(TimeRange::until(pivot).contains(pivot - chrono::Duration::days(365)));
        assert!(TimeRange::default().contains(pivot));
    }
}
