//! Reply formatting: byte humanization, expiry dates, the usage card.

use chrono::DateTime;

use usagebot_models::ClientInfo;

const UNITS: [&str; 9] = ["B", "KB", "MB", "GB", "TB", "PB", "EB", "ZB", "YB"];

/// Renders a byte count as a human-readable size, 1024-based with up to two
/// decimals ("1.5 GB", "512 B"). Zero and negative counts render as "0B".
pub fn format_bytes(bytes: i64) -> String {
    if bytes <= 0 {
        return "0B".to_string();
    }

    let exp = ((bytes as f64).log2() / 10.0).floor() as usize;
    let exp = exp.min(UNITS.len() - 1);
    let value = bytes as f64 / 1024f64.powi(exp as i32);

    let rendered = format!("{:.2}", value);
    let rendered = rendered.trim_end_matches('0').trim_end_matches('.');
    format!("{} {}", rendered, UNITS[exp])
}

/// Renders an expiry timestamp (milliseconds since the epoch) as a date;
/// 0 or absent means the account never expires.
pub fn format_expiry(expiry_ms: i64) -> String {
    if expiry_ms <= 0 {
        return "never".to_string();
    }
    match DateTime::from_timestamp_millis(expiry_ms) {
        Some(when) => when.format("%Y/%m/%d").to_string(),
        None => "never".to_string(),
    }
}

/// Builds the `/usage` reply for one client record.
pub fn usage_card(info: &ClientInfo) -> String {
    let total = if info.total == 0 {
        "unlimited".to_string()
    } else {
        format_bytes(info.total)
    };

    format!(
        "💡 Status: {}\n\
         📧 Email: {}\n\
         🔼 Upload: {}\n\
         🔽 Download: {}\n\
         🔄 Quota: {}\n\
         📅 Expires: {}",
        if info.enable { "active" } else { "disabled" },
        info.email,
        format_bytes(info.up),
        format_bytes(info.down),
        total,
        format_expiry(info.expiry_time),
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_bytes_zero() {
        assert_eq!(format_bytes(0), "0B");
        assert_eq!(format_bytes(-5), "0B");
    }

    #[test]
    fn test_format_bytes_units() {
        assert_eq!(format_bytes(512), "512 B");
        assert_eq!(format_bytes(1024), "1 KB");
        assert_eq!(format_bytes(1536), "1.5 KB");
        assert_eq!(format_bytes(3 * 1024 * 1024), "3 MB");
        assert_eq!(format_bytes(5_368_709_120), "5 GB");
    }

    #[test]
    fn test_format_bytes_rounds_to_two_decimals() {
        assert_eq!(format_bytes(1_234_567), "1.18 MB");
    }

    #[test]
    fn test_format_expiry_never() {
        assert_eq!(format_expiry(0), "never");
        assert_eq!(format_expiry(-1), "never");
    }

    #[test]
    fn test_format_expiry_date() {
        // 2023-03-15T00:00:00Z
        assert_eq!(format_expiry(1_678_838_400_000), "2023/03/15");
    }

    #[test]
    fn test_usage_card() {
        let info = ClientInfo {
            enable: true,
            uuid: Some("abc".to_string()),
            email: "u1@x".to_string(),
            password: None,
            up: 1024,
            down: 2048,
            total: 0,
            expiry_time: 0,
        };

        let card = usage_card(&info);
        assert!(card.contains("Status: active"));
        assert!(card.contains("Email: u1@x"));
        assert!(card.contains("Upload: 1 KB"));
        assert!(card.contains("Download: 2 KB"));
        assert!(card.contains("Quota: unlimited"));
        assert!(card.contains("Expires: never"));
    }

    #[test]
    fn test_usage_card_disabled_with_quota() {
        let info = ClientInfo {
            enable: false,
            uuid: None,
            email: "u2@x".to_string(),
            password: Some("secret".to_string()),
            up: 0,
            down: 0,
            total: 10 * 1024 * 1024 * 1024,
            expiry_time: 1_678_838_400_000,
        };

        let card = usage_card(&info);
        assert!(card.contains("Status: disabled"));
        assert!(card.contains("Quota: 10 GB"));
        assert!(card.contains("Expires: 2023/03/15"));
    }
}
