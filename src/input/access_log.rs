//! Access-log line parser
//!
//! Understands the common layout shared by Apache and Nginx:
//! `IP ... [timestamp] "METHOD /path HTTP/x.x" status size`.
//! Anything after the size field (referer, user agent) is ignored.

use std::sync::LazyLock;

use regex::Regex;

use crate::models::LogRecord;

static ACCESS_LINE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r#"^([0-9]+\.[0-9]+\.[0-9]+\.[0-9]+).*\[(.*?)\]\s+"(\w+)\s+(.*?)\s+HTTP.*?"\s+([0-9]+)\s+([0-9]+)"#,
    )
    .expect("access log pattern is valid")
});

/// Parse a single, already trimmed, access-log line
///
/// Returns `None` unless all six fields were extracted. Never logs.
pub fn parse_line(line: &str) -> Option<LogRecord> {
    let caps = ACCESS_LINE.captures(line)?;

    Some(LogRecord {
        ip: caps[1].to_string(),
        timestamp: caps[2].to_string(),
        method: caps[3].to_string(),
        path: caps[4].to_string(),
        status: caps[5].parse().ok()?,
        size: caps[6].parse().ok()?,
    })
}

/// Split raw log text on `\n`, `\r\n` and lone `\r`
///
/// `\r\n` yields an empty piece between the two breaks; callers skip blanks.
pub fn split_lines(text: &str) -> impl Iterator<Item = &str> {
    text.split(['\r', '\n'])
}

/// Parse a sequence of raw lines, dropping blank and malformed ones
///
/// Order of the surviving records follows the input.
pub fn parse_source<I, S>(lines: I) -> Vec<LogRecord>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let records: Vec<LogRecord> = lines
        .into_iter()
        .filter_map(|line| {
            let line = line.as_ref().trim();
            if line.is_empty() {
                None
            } else {
                parse_line(line)
            }
        })
        .collect();

    log::debug!("Parsed {} access log record(s)", records.len());
    records
}

#[cfg(test)]
mod tests {
    use super::*;

    fn build_line(ip: &str, ts: &str, method: &str, path: &str, status: u16, size: u64) -> String {
        format!(
            r#"{} - - [{}] "{} {} HTTP/1.1" {} {}"#,
            ip, ts, method, path, status, size
        )
    }

    #[test]
    fn test_parse_common_log_line() {
        let line = r#"192.168.1.100 - - [03/Feb/2026:10:15:30 +0000] "GET /index.html HTTP/1.1" 200 1234"#;
        let record = parse_line(line).unwrap();

        assert_eq!(record.ip, "192.168.1.100");
        assert_eq!(record.timestamp, "03/Feb/2026:10:15:30 +0000");
        assert_eq!(record.method, "GET");
        assert_eq!(record.path, "/index.html");
        assert_eq!(record.status, 200);
        assert_eq!(record.size, 1234);
    }

    #[test]
    fn test_synthetic_lines_recover_fields() {
        let cases = [
            ("10.0.0.1", "01/Jan/2026:00:00:00 +0000", "POST", "/login", 401u16, 100u64),
            ("172.16.5.4", "x", "DELETE", "/api/items/7?force=true", 204, 0),
            ("999.999.999.999", "31/Dec/2025:23:59:59 -0500", "HEAD", "/", 304, 18446744073709551615),
            ("8.8.8.8", "ts", "GET", "/search?q=' OR '1'='1'", 500, 42),
        ];

        for (ip, ts, method, path, status, size) in cases {
            let line = build_line(ip, ts, method, path, status, size);
            let record = parse_line(&line).unwrap_or_else(|| panic!("failed to parse {}", line));
            assert_eq!(
                record,
                LogRecord {
                    ip: ip.to_string(),
                    timestamp: ts.to_string(),
                    method: method.to_string(),
                    path: path.to_string(),
                    status,
                    size,
                }
            );
        }
    }

    #[test]
    fn test_tolerates_identity_fields_and_http_versions() {
        let line = r#"10.1.2.3 ident alice [03/Feb/2026:10:15:30 +0000] "GET /home HTTP/1.0" 200 10"#;
        let record = parse_line(line).unwrap();
        assert_eq!(record.ip, "10.1.2.3");
        assert_eq!(record.path, "/home");
    }

    #[test]
    fn test_tolerates_combined_format_suffix() {
        let line = r#"10.1.2.3 - - [03/Feb/2026:10:15:30 +0000] "GET / HTTP/2.0" 200 10 "-" "curl/8.0""#;
        let record = parse_line(line).unwrap();
        assert_eq!(record.status, 200);
        assert_eq!(record.size, 10);
    }

    #[test]
    fn test_rejects_missing_request_section() {
        let line = "192.168.1.1 - - [03/Feb/2026:10:15:30 +0000] 200 1234";
        assert!(parse_line(line).is_none());
    }

    #[test]
    fn test_rejects_missing_brackets() {
        let line = r#"192.168.1.1 - - 03/Feb/2026:10:15:30 +0000 "GET / HTTP/1.1" 200 1234"#;
        assert!(parse_line(line).is_none());
    }

    #[test]
    fn test_rejects_missing_status_and_size() {
        let no_size = r#"192.168.1.1 - - [ts] "GET / HTTP/1.1" 200"#;
        let neither = r#"192.168.1.1 - - [ts] "GET / HTTP/1.1""#;
        assert!(parse_line(no_size).is_none());
        assert!(parse_line(neither).is_none());
    }

    #[test]
    fn test_rejects_bad_ip_and_missing_http_token() {
        assert!(parse_line(r#"localhost - - [ts] "GET / HTTP/1.1" 200 1"#).is_none());
        assert!(parse_line(r#"1.2.3 - - [ts] "GET / HTTP/1.1" 200 1"#).is_none());
        assert!(parse_line(r#"1.2.3.4 - - [ts] "GET /" 200 1"#).is_none());
    }

    #[test]
    fn test_rejects_status_out_of_range() {
        let line = r#"1.2.3.4 - - [ts] "GET / HTTP/1.1" 99999 1"#;
        assert!(parse_line(line).is_none());
    }

    #[test]
    fn test_parse_source_skips_blank_and_malformed() {
        let input = "\n\
            1.1.1.1 - - [a] \"GET /one HTTP/1.1\" 200 1\n\
            garbage line\n\
            \n\
            \t2.2.2.2 - - [b] \"GET /two HTTP/1.1\" 404 2   \n";

        let records = parse_source(input.lines());
        assert_eq!(records.len(), 2);
        assert_eq!(records[0].path, "/one");
        assert_eq!(records[1].ip, "2.2.2.2");
        assert_eq!(records[1].status, 404);
    }

    #[test]
    fn test_split_lines_handles_all_line_endings() {
        let text = "a\nb\r\nc\rd";
        let pieces: Vec<&str> = split_lines(text).filter(|l| !l.is_empty()).collect();
        assert_eq!(pieces, vec!["a", "b", "c", "d"]);
    }

    #[test]
    fn test_parse_source_lone_cr_line_endings() {
        let text = "1.1.1.1 - - [a] \"GET /one HTTP/1.1\" 200 1\r\
            2.2.2.2 - - [b] \"GET /two HTTP/1.1\" 404 2\r";

        let records = parse_source(split_lines(text));
        assert_eq!(records.len(), 2);
        assert_eq!(records[0].path, "/one");
        assert_eq!(records[1].ip, "2.2.2.2");
    }

    #[test]
    fn test_parse_source_empty_input() {
        assert!(parse_source(Vec::<String>::new()).is_empty());
        assert!(parse_source("".lines()).is_empty());
    }
}
