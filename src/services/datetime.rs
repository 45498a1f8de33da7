use chrono::{DateTime, Utc};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DateFormat {
    /// `Sat 05/21/2019 9:30PM`
    Medium,
    /// `Saturday May 21, 2019 at 9:30PM`
    Full,
}

pub fn format_datetime(value: &DateTime<Utc>, format: DateFormat) -> String {
    match format {
        DateFormat::Medium => value.format("%a %m/%d/%Y %-I:%M%p").to_string(),
        DateFormat::Full => value.format("%A %B %-d, %Y at %-I:%M%p").to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_format_datetime() {
        let value = Utc.with_ymd_and_hms(2019, 5, 21, 21, 30, 0).unwrap();

        assert_eq!(format_datetime(&value, DateFormat::Medium), "Tue 05/21/2019 9:30PM");
        assert_eq!(
            format_datetime(&value, DateFormat::Full),
            "Tuesday May 21, 2019 at 9:30PM"
        );
    }
}
