/// 获取当前 UTC 时间戳（毫秒）
pub fn now_millis() -> i64 {
    chrono::Utc::now().timestamp_millis()
}

/// Returns true when the string has no visible characters
pub fn is_blank(value: &str) -> bool {
    value.trim().is_empty()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_is_blank() {
        assert!(is_blank(""));
        assert!(is_blank("   \t\n"));
        assert!(!is_blank(" a "));
    }

    #[test]
    fn test_now_millis_is_recent() {
        // 2024-01-01 UTC
        assert!(now_millis() > 1_704_067_200_000);
    }
}
