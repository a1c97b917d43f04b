//! Log helpers

/// Maximum number of bytes of a body written to the log.
const TRUNCATE_LIMIT: usize = 256;

/// Shorten a response body for logging.
///
/// Bodies within the limit are returned as-is; longer ones are cut at the
/// last char boundary before the limit and suffixed with the full length.
pub fn truncate_for_log(s: &str) -> String {
    if s.len() <= TRUNCATE_LIMIT {
        return s.to_string();
    }
    let cut = s
        .char_indices()
        .map(|(i, _)| i)
        .take_while(|&i| i <= TRUNCATE_LIMIT)
        .last()
        .unwrap_or(0);
    format!("{}... [truncated, total {} bytes]", &s[..cut], s.len())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn short_body_unchanged() {
        assert_eq!(truncate_for_log("[]"), "[]");
    }

    #[test]
    fn long_body_truncated_with_length() {
        let s = "x".repeat(TRUNCATE_LIMIT + 44);
        let out = truncate_for_log(&s);
        assert!(out.starts_with(&"x".repeat(TRUNCATE_LIMIT)));
        assert!(out.ends_with(&format!("total {} bytes]", TRUNCATE_LIMIT + 44)));
    }

    #[test]
    fn multibyte_boundary_is_respected() {
        // "é" is two bytes; an odd limit would land mid-char
        let s = "é".repeat(TRUNCATE_LIMIT);
        let out = truncate_for_log(&s);
        assert!(out.contains("... [truncated"));
    }
}
