use chrono::NaiveDate;

/// Iterator over every calendar day from the start date through the end
/// date (inclusive). Yields nothing when the end precedes the start.
#[derive(Clone, Eq, PartialEq, Copy, Debug)]
pub struct DateRange(pub NaiveDate, pub NaiveDate);

impl Iterator for DateRange {
    type Item = NaiveDate;
    fn next(&mut self) -> Option<Self::Item> {
        if self.0 > self.1 {
            return None;
        }
        let current = self.0;
        match current.succ_opt() {
            Some(next) => self.0 = next,
            // NaiveDate::MAX: end the range after this day
            None => self.1 = NaiveDate::MIN,
        }
        Some(current)
    }
}

#[cfg(test)]
mod tests {
    use super::DateRange;
    use chrono::NaiveDate;

    #[test]
    fn test_date_range_iteration() {
        let start = NaiveDate::from_ymd_opt(2019, 2, 26).unwrap();
        let end = NaiveDate::from_ymd_opt(2019, 3, 2).unwrap();
        let dates: Vec<NaiveDate> = DateRange(start, end).collect();
        assert_eq!(dates.len(), 5);
        assert_eq!(dates[0], start);
        assert_eq!(dates[3], NaiveDate::from_ymd_opt(2019, 3, 1).unwrap());
        assert_eq!(dates[4], end);
    }

    #[test]
    fn test_date_range_single_day() {
        let start = NaiveDate::from_ymd_opt(2019, 3, 15).unwrap();
        let dates: Vec<NaiveDate> = DateRange(start, start).collect();
        assert_eq!(dates, vec![start]);
    }

    #[test]
    fn test_date_range_empty() {
        let start = NaiveDate::from_ymd_opt(2019, 3, 15).unwrap();
        let end = NaiveDate::from_ymd_opt(2019, 3, 14).unwrap();
        assert_eq!(DateRange(start, end).count(), 0);
    }
}
