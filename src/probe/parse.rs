//! Pure latency extraction from probe output text.

/// Extract the latency text from ping output.
///
/// Matches the decimal number between the literal `time=` and ` ms`
/// (e.g. `time=23.4 ms` yields `"23.4"`). The first match wins; output with
/// no match yields `None`.
pub fn extract_latency(output: &str) -> Option<&str> {
    static LATENCY_REGEX: std::sync::OnceLock<regex::Regex> = std::sync::OnceLock::new();

    let regex = LATENCY_REGEX.get_or_init(|| {
        regex::Regex::new(r"time=(\d+\.?\d*) ms").expect("failed to compile latency regex")
    });

    regex
        .captures(output)
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str())
}

/// Extract the latency from ping output as milliseconds.
pub fn parse_latency_ms(output: &str) -> Option<f64> {
    extract_latency(output)?.parse().ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_extract_from_full_ping_output() {
        let output = "PING 8.8.8.8 (8.8.8.8): 56 data bytes\n\
                      64 bytes from 8.8.8.8: icmp_seq=1 ttl=117 time=23.4 ms\n\
                      \n\
                      --- 8.8.8.8 ping statistics ---\n\
                      1 packets transmitted, 1 received, 0% packet loss\n";
        assert_eq!(extract_latency(output), Some("23.4"));
        assert_eq!(parse_latency_ms(output), Some(23.4));
    }

    #[test]
    fn test_extract_failure_text() {
        assert_eq!(extract_latency("Ping failed: unknown host"), None);
        assert_eq!(parse_latency_ms("Ping failed: unknown host"), None);
    }

    #[test]
    fn test_extract_empty_output() {
        assert_eq!(extract_latency(""), None);
    }

    #[test]
    fn test_extract_first_match_wins() {
        let output = "time=10.5 ms then later time=99.9 ms";
        assert_eq!(extract_latency(output), Some("10.5"));
    }

    #[test]
    fn test_extract_integer_latency() {
        assert_eq!(extract_latency("64 bytes: time=10 ms"), Some("10"));
        assert_eq!(parse_latency_ms("64 bytes: time=10 ms"), Some(10.0));
    }

    #[test]
    fn test_extract_trailing_decimal_point() {
        // The pattern allows a bare trailing dot, as some ping builds emit.
        assert_eq!(extract_latency("time=12. ms"), Some("12."));
        assert_eq!(parse_latency_ms("time=12. ms"), Some(12.0));
    }

    #[test]
    fn test_extract_independent_of_surrounding_content() {
        for (wrapped, expected) in [
            ("time=5.1 ms", "5.1"),
            ("prefix time=5.1 ms suffix", "5.1"),
            ("line1\nline2 time=5.1 ms\nline3", "5.1"),
        ] {
            assert_eq!(extract_latency(wrapped), Some(expected));
        }
    }

    #[test]
    fn test_extract_requires_exact_delimiters() {
        // No space before "ms", or a different key, must not match.
        assert_eq!(extract_latency("time=5.1ms"), None);
        assert_eq!(extract_latency("rtt=5.1 ms"), None);
    }
}
