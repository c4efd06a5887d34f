/*
[INPUT]:  Task timestamps, stored image keys, byte counts
[OUTPUT]: Display strings for dates, public image URLs and file sizes
[POS]:    Formatting helpers shared by the board and the TUI
[UPDATE]: When changing how task rows or limits are shown
*/

use chrono::{DateTime, TimeZone, Utc};

/// Creation date as `D/M/YYYY` in the given time zone
pub fn format_created_date<Tz: TimeZone>(created_at: &DateTime<Utc>, tz: &Tz) -> String
where
    Tz::Offset: std::fmt::Display,
{
    created_at.with_timezone(tz).format("%-d/%-m/%Y").to_string()
}

/// Public URL of a stored image under `image_base_url`
pub fn public_image_url(image_base_url: &str, key: &str) -> String {
    format!("{}/{}", image_base_url.trim_end_matches('/'), key)
}

/// Byte count as `2MB`, `512KB` or `100 bytes`
pub fn format_file_size(bytes: u64) -> String {
    const KIB: u64 = 1024;
    const MIB: u64 = 1024 * KIB;
    if bytes >= MIB && bytes % MIB == 0 {
        format!("{}MB", bytes / MIB)
    } else if bytes >= KIB {
        format!("{}KB", bytes / KIB)
    } else {
        format!("{bytes} bytes")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::FixedOffset;

    #[test]
    fn test_format_created_date() {
        let ts: DateTime<Utc> = "2023-03-01T09:00:00Z".parse().expect("timestamp");
        assert_eq!(format_created_date(&ts, &Utc), "1/3/2023");

        let ts: DateTime<Utc> = "2023-12-31T23:30:00Z".parse().expect("timestamp");
        let plus_two = FixedOffset::east_opt(2 * 3600).expect("offset");
        assert_eq!(format_created_date(&ts, &plus_two), "1/1/2024");
    }

    #[test]
    fn test_format_file_size() {
        assert_eq!(format_file_size(2 * 1024 * 1024), "2MB");
        assert_eq!(format_file_size(1536), "1KB");
        assert_eq!(format_file_size(100), "100 bytes");
    }

    #[test]
    fn test_public_image_url() {
        assert_eq!(
            public_image_url("https://x.supabase.co/storage/v1/object/public/images", "k"),
            "https://x.supabase.co/storage/v1/object/public/images/k"
        );
        assert_eq!(
            public_image_url("https://x.supabase.co/storage/v1/object/public/images/", "k"),
            "https://x.supabase.co/storage/v1/object/public/images/k"
        );
    }
}
