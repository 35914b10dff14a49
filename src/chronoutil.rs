use {
    crate::constants::HTTP_DATE_FORMAT,
    chrono::{offset::FixedOffset, DateTime, Utc},
};

/// Format a timestamp the way the `Date` header expects it: RFC 1123, always in GMT, e.g.
/// `Mon, 19 Oct 2026 12:00:00 GMT`.
pub trait FormatHttpDate {
    /// Render this timestamp as an HTTP date.
    fn to_http_date(&self) -> String;
}

impl FormatHttpDate for DateTime<Utc> {
    fn to_http_date(&self) -> String {
        self.format(HTTP_DATE_FORMAT).to_string()
    }
}

impl FormatHttpDate for DateTime<FixedOffset> {
    fn to_http_date(&self) -> String {
        self.with_timezone(&Utc).to_http_date()
    }
}

#[cfg(test)]
mod tests {
    use {
        super::FormatHttpDate,
        chrono::{DateTime, NaiveDate, TimeZone, Utc},
    };

    #[test_log::test]
    fn test_http_date_format() {
        let ts = Utc.with_ymd_and_hms(2026, 10, 19, 12, 0, 0).unwrap();
        assert_eq!(ts.to_http_date(), "Mon, 19 Oct 2026 12:00:00 GMT");

        // Single-digit days are zero padded.
        let ts = NaiveDate::from_ymd_opt(2018, 3, 4).unwrap().and_hms_opt(1, 2, 3).unwrap().and_utc();
        assert_eq!(ts.to_http_date(), "Sun, 04 Mar 2018 01:02:03 GMT");
    }

    #[test_log::test]
    fn test_offsets_are_converted_to_gmt() {
        let ts = DateTime::parse_from_rfc3339("2026-10-19T14:30:00+02:30").unwrap();
        assert_eq!(ts.to_http_date(), "Mon, 19 Oct 2026 12:00:00 GMT");
    }
}
