//! Delimiter scanning
//!
//! Reports the 7-bit ASCII characters that never occur in a set of inputs.
//! Any of them can serve as a column delimiter that no value will contain.

use std::io::{self, Read};

const ASCII_RANGE: usize = 128;

/// Tracks which ASCII characters have been seen across any number of inputs
#[derive(Debug, Clone)]
pub struct CharsetScanner {
    seen: [bool; ASCII_RANGE],
}

impl Default for CharsetScanner {
    fn default() -> Self {
        Self {
            seen: [false; ASCII_RANGE],
        }
    }
}

impl CharsetScanner {
    pub fn new() -> Self {
        Self::default()
    }

    /// Mark every byte of `input` as seen; bytes above 127 are ignored
    pub fn scan<R: Read>(&mut self, mut input: R) -> io::Result<u64> {
        let mut buf = [0u8; 64 * 1024];
        let mut total = 0u64;
        loop {
            let n = match input.read(&mut buf) {
                Ok(0) => break,
                Ok(n) => n,
                Err(e) if e.kind() == io::ErrorKind::Interrupted => continue,
                Err(e) => return Err(e),
            };
            for &byte in &buf[..n] {
                if let Some(slot) = self.seen.get_mut(byte as usize) {
                    *slot = true;
                }
            }
            total += n as u64;
        }
        Ok(total)
    }

    /// Unseen characters in code point order
    pub fn unused(&self) -> Vec<u8> {
        (0..ASCII_RANGE as u8)
            .filter(|&code| !self.seen[code as usize])
            .collect()
    }
}

/// Every ASCII character that never occurs in `input`
pub fn unused_ascii<R: Read>(input: R) -> io::Result<Vec<u8>> {
    let mut scanner = CharsetScanner::new();
    scanner.scan(input)?;
    Ok(scanner.unused())
}

/// Printable form of an ASCII character: control characters are escaped
pub fn escape(code: u8) -> String {
    match code {
        b'\t' => "\\t".to_string(),
        b'\n' => "\\n".to_string(),
        b'\r' => "\\r".to_string(),
        b'\\' => "\\\\".to_string(),
        0x20..=0x7e => char::from(code).to_string(),
        _ => format!("\\x{:02x}", code),
    }
}

/// One report line: escaped character, tab, code point
pub fn report_line(code: u8) -> String {
    format!("{}\t{}", escape(code), code)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unused_excludes_seen_characters() {
        let unused = unused_ascii("abc\tdef\n".as_bytes()).unwrap();
        assert_eq!(unused.len(), 128 - 8);
        assert!(!unused.contains(&b'a'));
        assert!(!unused.contains(&b'\t'));
        assert!(unused.contains(&b'|'));
        assert!(unused.contains(&0));
        assert!(unused.windows(2).all(|pair| pair[0] < pair[1]));
    }

    #[test]
    fn test_non_ascii_bytes_are_ignored() {
        let unused = unused_ascii("é".as_bytes()).unwrap();
        assert_eq!(unused.len(), 128);
    }

    #[test]
    fn test_scanner_accumulates_inputs() {
        let mut scanner = CharsetScanner::new();
        assert_eq!(scanner.scan("ab".as_bytes()).unwrap(), 2);
        scanner.scan("cd".as_bytes()).unwrap();
        let unused = scanner.unused();
        assert!(!unused.contains(&b'a'));
        assert!(!unused.contains(&b'd'));
        assert_eq!(unused.len(), 124);
    }

    #[test]
    fn test_escape_forms() {
        assert_eq!(escape(b'|'), "|");
        assert_eq!(escape(b'\t'), "\\t");
        assert_eq!(escape(0), "\\x00");
        assert_eq!(escape(0x7f), "\\x7f");
        assert_eq!(escape(b'\\'), "\\\\");
        assert_eq!(report_line(b'|'), "|\t124");
    }
}
