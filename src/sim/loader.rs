//! Request File Loader.
//!
//! Reads the newline-delimited request stream. Each non-blank line is one
//! request:
//!
//! ```text
//! W,<hex address>,<decimal data>
//! R,<hex address>
//! ```
//!
//! Addresses may carry a `0x` prefix. Surrounding whitespace is ignored.

use crate::common::{Request, SimError};
use std::fs;
use std::path::Path;

/// Reads and parses a request file.
pub fn load_requests(path: &Path) -> Result<Vec<Request>, SimError> {
    let text = fs::read_to_string(path).map_err(|source| SimError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    parse_requests(&text)
}

/// Parses request text into the issue-ordered request sequence.
///
/// # Errors
///
/// `SimError::Parse` naming the first offending line.
pub fn parse_requests(text: &str) -> Result<Vec<Request>, SimError> {
    let mut requests = Vec::new();
    for (i, raw) in text.lines().enumerate() {
        let line = raw.trim();
        if line.is_empty() {
            continue;
        }
        requests.push(parse_line(line).map_err(|message| SimError::Parse {
            line: i + 1,
            message,
        })?);
    }
    Ok(requests)
}

fn parse_line(line: &str) -> Result<Request, String> {
    let fields: Vec<&str> = line.split(',').map(str::trim).collect();
    match fields.as_slice() {
        ["W", addr, data] => Ok(Request::write(parse_address(addr)?, parse_data(data)?)),
        ["R", addr] => Ok(Request::read(parse_address(addr)?)),
        ["W", ..] => Err(format!("write needs an address and data: {}", line)),
        ["R", ..] => Err(format!("read takes only an address: {}", line)),
        [op, ..] => Err(format!("invalid operation: {}", op)),
        [] => Err("empty request".to_string()),
    }
}

fn parse_address(s: &str) -> Result<u32, String> {
    let digits = s
        .strip_prefix("0x")
        .or_else(|| s.strip_prefix("0X"))
        .unwrap_or(s);
    u32::from_str_radix(digits, 16).map_err(|_| format!("invalid address: {}", s))
}

fn parse_data(s: &str) -> Result<u32, String> {
    s.parse::<u32>()
        .map_err(|_| format!("invalid data: {}", s))
}
