//! Redaction of personal data and credentials in log output.
//!
//! Profile and chat text can carry emails and phone numbers, and the
//! generation client may hold an access token. Call sites log lengths rather
//! than values; [`RedactingMakeWriter`] masks whatever slips through anyway.
//!
//! Input is capped (`GLYCODASH_REDACT_MAX_BYTES`, default 16 KiB) so a huge
//! log line cannot stall the writer.

use regex::{Regex, RegexSet};
use std::sync::OnceLock;
use tracing_subscriber::fmt::MakeWriter;

const DEFAULT_MAX_BYTES: usize = 16 * 1024;

/// Rules in application order; earlier, more specific rules win.
const RULES: [(&str, &str); 6] = [
    // JWTs
    (
        r"\beyJ[a-zA-Z0-9_-]{10,}\.[a-zA-Z0-9_-]{10,}\.[a-zA-Z0-9_-]{10,}\b",
        "[REDACTED-JWT]",
    ),
    // Hugging Face style access tokens
    (r"\bhf_[A-Za-z0-9]{20,}\b", "[REDACTED-TOKEN]"),
    // Bearer headers
    (r"(?i)\bbearer\s+[A-Za-z0-9._~+/-]{16,}=*", "Bearer [REDACTED-TOKEN]"),
    (
        r"(?i)\b[a-z0-9](?:[a-z0-9._%+-]{0,62}[a-z0-9])?@(?:[a-z0-9](?:[a-z0-9-]{0,61}[a-z0-9])?\.)+[a-z]{2,}\b",
        "[REDACTED-EMAIL]",
    ),
    (
        r"\b(?:\+?\d{1,3}[-.\s]?)?\(?\d{3}\)?[-.\s]?\d{3}[-.\s]?\d{4}\b",
        "[REDACTED-PHONE]",
    ),
    // Long hex strings (raw key material)
    (r"\b[0-9a-fA-F]{40,}\b", "[REDACTED-HEX]"),
];

struct Redactor {
    set: RegexSet,
    rules: Vec<(Regex, &'static str)>,
}

fn redactor() -> &'static Redactor {
    static REDACTOR: OnceLock<Redactor> = OnceLock::new();
    REDACTOR.get_or_init(|| Redactor {
        set: RegexSet::new(RULES.iter().map(|(p, _)| *p)).expect("valid redaction rules"),
        rules: RULES
            .iter()
            .map(|(p, r)| (Regex::new(p).expect("valid redaction rule"), *r))
            .collect(),
    })
}

fn max_bytes() -> usize {
    std::env::var("GLYCODASH_REDACT_MAX_BYTES")
        .ok()
        .and_then(|v| v.parse::<usize>().ok())
        .filter(|&v| v > 0)
        .unwrap_or(DEFAULT_MAX_BYTES)
}

fn truncate_to_char_boundary(input: &str, max: usize) -> (&str, bool) {
    if input.len() <= max {
        return (input, false);
    }
    let mut end = max;
    while end > 0 && !input.is_char_boundary(end) {
        end -= 1;
    }
    (&input[..end], true)
}

/// Mask personal data and credentials in `input`.
#[must_use]
pub fn redact(input: &str) -> String {
    redact_with_limit(input, max_bytes())
}

fn redact_with_limit(input: &str, max: usize) -> String {
    let (prefix, truncated) = truncate_to_char_boundary(input, max);
    let r = redactor();

    let mut out = prefix.to_string();
    for idx in r.set.matches(prefix).iter() {
        let (regex, replacement) = &r.rules[idx];
        out = regex.replace_all(&out, *replacement).into_owned();
    }

    if truncated {
        out.push_str(" [TRUNCATED]");
        // The cut may have dropped the line terminator.
        if input.ends_with('\n') {
            out.push('\n');
        }
    }
    out
}

/// `MakeWriter` wrapper that redacts each formatted log line.
#[derive(Debug, Clone)]
pub struct RedactingMakeWriter<M> {
    inner: M,
}

impl<M> RedactingMakeWriter<M> {
    #[must_use]
    pub fn new(inner: M) -> Self {
        Self { inner }
    }
}

pub struct RedactingWriter<W: std::io::Write> {
    inner: W,
    buffer: Vec<u8>,
    max: usize,
}

impl<W: std::io::Write> RedactingWriter<W> {
    fn write_complete_lines(&mut self) -> std::io::Result<()> {
        while let Some(pos) = self.buffer.iter().position(|&b| b == b'\n') {
            let line: Vec<u8> = self.buffer.drain(..=pos).collect();
            let redacted = redact_with_limit(&String::from_utf8_lossy(&line), self.max);
            self.inner.write_all(redacted.as_bytes())?;
        }
        Ok(())
    }
}

impl<W: std::io::Write> std::io::Write for RedactingWriter<W> {
    fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
        self.buffer.extend_from_slice(buf);
        self.write_complete_lines()?;

        // A line with no newline in sight: flush what we have, capped.
        if self.buffer.len() > self.max.saturating_mul(2) {
            let redacted = redact_with_limit(&String::from_utf8_lossy(&self.buffer), self.max);
            self.inner.write_all(redacted.as_bytes())?;
            self.inner.write_all(b"\n")?;
            self.buffer.clear();
        }
        Ok(buf.len())
    }

    fn flush(&mut self) -> std::io::Result<()> {
        self.write_complete_lines()?;
        if !self.buffer.is_empty() {
            let redacted = redact_with_limit(&String::from_utf8_lossy(&self.buffer), self.max);
            self.inner.write_all(redacted.as_bytes())?;
            self.buffer.clear();
        }
        self.inner.flush()
    }
}

impl<W: std::io::Write> Drop for RedactingWriter<W> {
    fn drop(&mut self) {
        let _ = std::io::Write::flush(self);
    }
}

impl<'a, M> MakeWriter<'a> for RedactingMakeWriter<M>
where
    M: MakeWriter<'a>,
{
    type Writer = RedactingWriter<M::Writer>;

    fn make_writer(&'a self) -> Self::Writer {
        RedactingWriter {
            inner: self.inner.make_writer(),
            buffer: Vec::new(),
            max: max_bytes(),
        }
    }
}
