//! Listing window: offset, page size and sort direction

use chrono::{DateTime, Months, Utc};

/// Sort direction for list queries
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortDirection {
    Asc,
    #[default]
    Desc,
}

impl SortDirection {
    /// Interpret a query value, falling back to `default` for anything
    /// other than `asc`/`desc`.
    pub fn parse_or(value: Option<&str>, default: Self) -> Self {
        match value.map(str::trim) {
            Some(v) if v.eq_ignore_ascii_case("asc") => Self::Asc,
            Some(v) if v.eq_ignore_ascii_case("desc") => Self::Desc,
            _ => default,
        }
    }

    /// SQL keyword for ORDER BY clauses
    pub const fn as_sql(self) -> &'static str {
        match self {
            Self::Asc => "ASC",
            Self::Desc => "DESC",
        }
    }
}

/// Offset/limit window over a listing
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ListWindow {
    pub start_index: i64,
    pub limit: i64,
    pub direction: SortDirection,
}

impl ListWindow {
    pub const DEFAULT_LIMIT: i64 = 9;
    pub const MAX_LIMIT: i64 = 100;

    /// Build a window from raw values.
    ///
    /// A negative start index becomes 0; a non-positive limit falls back to
    /// the default and oversized limits are capped.
    pub fn new(start_index: i64, limit: i64, direction: SortDirection) -> Self {
        let limit = if limit <= 0 {
            Self::DEFAULT_LIMIT
        } else {
            limit.min(Self::MAX_LIMIT)
        };

        Self {
            start_index: start_index.max(0),
            limit,
            direction,
        }
    }

    /// Default window with the given direction
    pub fn with_direction(direction: SortDirection) -> Self {
        Self::new(0, Self::DEFAULT_LIMIT, direction)
    }
}

impl Default for ListWindow {
    fn default() -> Self {
        Self::with_direction(SortDirection::default())
    }
}

/// One page of a listing with the dashboard counters
#[derive(Debug, Clone, PartialEq)]
pub struct ListPage<T> {
    pub items: Vec<T>,
    /// Rows in the whole table, ignoring window and filters
    pub total: i64,
    /// Rows created since [`last_month_cutoff`]
    pub last_month: i64,
}

/// Start of the trailing calendar month relative to `now`
pub fn last_month_cutoff(now: DateTime<Utc>) -> DateTime<Utc> {
    now.checked_sub_months(Months::new(1)).unwrap_or(now)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_direction_parsing() {
        assert_eq!(
            SortDirection::parse_or(Some("asc"), SortDirection::Desc),
            SortDirection::Asc
        );
        assert_eq!(
            SortDirection::parse_or(Some("DESC"), SortDirection::Asc),
            SortDirection::Desc
        );
        assert_eq!(
            SortDirection::parse_or(Some("sideways"), SortDirection::Asc),
            SortDirection::Asc
        );
        assert_eq!(SortDirection::parse_or(None, SortDirection::Desc), SortDirection::Desc);
    }

    #[test]
    fn test_window_defaults_and_clamping() {
        let window = ListWindow::new(-5, 0, SortDirection::Asc);
        assert_eq!(window.start_index, 0);
        assert_eq!(window.limit, ListWindow::DEFAULT_LIMIT);

        let window = ListWindow::new(10, 5000, SortDirection::Desc);
        assert_eq!(window.start_index, 10);
        assert_eq!(window.limit, ListWindow::MAX_LIMIT);
    }

    #[test]
    fn test_last_month_cutoff() {
        let now = Utc.with_ymd_and_hms(2024, 3, 31, 12, 0, 0).unwrap();
        // Clamped to the last day of February
        assert_eq!(
            last_month_cutoff(now),
            Utc.with_ymd_and_hms(2024, 2, 29, 12, 0, 0).unwrap()
        );
    }
}
