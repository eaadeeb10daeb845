//! Input hints shown under the address fields.

use std::sync::OnceLock;

use regex::Regex;

pub const REQUIRED_HINT: &str = "This field is required";
pub const INVALID_IPV4_HINT: &str = "Invalid IPv4 address format";

fn ipv4_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| {
        let octet = r"(25[0-5]|2[0-4]\d|1\d\d|[1-9]?\d)";
        Regex::new(&format!(r"^{octet}(\.{octet}){{3}}$")).expect("IPv4 pattern compiles")
    })
}

/// Dotted-quad IPv4, surrounding whitespace ignored.
pub fn is_valid_ipv4(ip: &str) -> bool {
    ipv4_pattern().is_match(ip.trim())
}

/// Hint for a required IP field, `None` when the value is acceptable.
pub fn ip_hint(value: &str) -> Option<&'static str> {
    if value.trim().is_empty() {
        Some(REQUIRED_HINT)
    } else if !is_valid_ipv4(value) {
        Some(INVALID_IPV4_HINT)
    } else {
        None
    }
}

/// Same as [`ip_hint`] but an empty value is fine.
pub fn optional_ip_hint(value: &str) -> Option<&'static str> {
    if value.trim().is_empty() {
        None
    } else {
        ip_hint(value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepts_dotted_quads() {
        for ip in ["10.0.0.1", "255.255.255.255", "0.0.0.0", " 192.168.1.20 "] {
            assert!(is_valid_ipv4(ip), "{ip}");
        }
    }

    #[test]
    fn rejects_everything_else() {
        for ip in ["", "10.0.0", "10.0.0.256", "10.0.0.1.5", "a.b.c.d", "10..0.1", "::1"] {
            assert!(!is_valid_ipv4(ip), "{ip}");
        }
    }

    #[test]
    fn hints() {
        assert_eq!(ip_hint(""), Some(REQUIRED_HINT));
        assert_eq!(ip_hint("10.0.0"), Some(INVALID_IPV4_HINT));
        assert_eq!(ip_hint("10.0.0.1"), None);
        assert_eq!(optional_ip_hint(" "), None);
        assert_eq!(optional_ip_hint("x"), Some(INVALID_IPV4_HINT));
    }
}
