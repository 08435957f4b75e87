//! Line-oriented protocol spoken by the search worker.
//!
//! Single mode reports a hit with a `Function found: <name>(` line. Batch
//! mode frames its results between two exact marker lines; everything
//! outside the frame is informational worker chatter.

/// Exact marker opening the batch results section.
pub const RESULTS_START: &str = "=== RESULTS ===";
/// Exact marker closing the batch results section.
pub const RESULTS_END: &str = "=== END RESULTS ===";

/// Two-state parser for the worker's framed batch output. State transitions
/// happen only on exact marker lines, so a stray `|` in worker chatter can
/// never be misread as a result.
#[derive(Debug, Default)]
pub struct ResultsFrame {
    inside: bool,
}

/// What one fed line means to the frame parser.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FrameEvent<'a> {
    /// A marker line; state toggled, nothing to emit.
    Marker,
    /// A framed `selector|signature|nonce` line.
    Result(&'a str),
    /// Unframed non-empty line, forwarded to the log.
    Info(&'a str),
    /// Blank line.
    Empty,
}

impl ResultsFrame {
    pub fn feed<'a>(&mut self, line: &'a str) -> FrameEvent<'a> {
        let trimmed = line.trim();
        if trimmed.is_empty() {
            return FrameEvent::Empty;
        }
        if trimmed == RESULTS_START {
            self.inside = true;
            return FrameEvent::Marker;
        }
        if trimmed == RESULTS_END {
            self.inside = false;
            return FrameEvent::Marker;
        }
        if self.inside {
            FrameEvent::Result(trimmed)
        } else {
            FrameEvent::Info(trimmed)
        }
    }

    pub fn is_inside(&self) -> bool {
        self.inside
    }
}

/// A parsed `selector|signature|nonce` batch result line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BatchResultLine {
    /// Lowercase selector hex with any `0x` prefix stripped.
    pub selector_hex: String,
    pub signature: String,
    pub nonce: String,
}

/// Parse one framed result line; `None` if it does not split into exactly
/// three fields.
pub fn parse_result_line(line: &str) -> Option<BatchResultLine> {
    let mut parts = line.split('|');
    match (parts.next(), parts.next(), parts.next(), parts.next()) {
        (Some(selector), Some(signature), Some(nonce), None) => Some(BatchResultLine {
            selector_hex: selector
                .trim()
                .strip_prefix("0x")
                .unwrap_or(selector.trim())
                .to_ascii_lowercase(),
            signature: signature.trim().to_string(),
            nonce: nonce.trim().to_string(),
        }),
        _ => None,
    }
}

/// Extract the candidate name from single-mode output: the first line
/// containing `Function found: <name>(`.
pub fn parse_found_line(output: &str) -> Option<String> {
    for line in output.lines() {
        let Some(rest) = line.trim().strip_prefix("Function found:") else {
            continue;
        };
        let rest = rest.trim_start();
        let name: String = rest
            .chars()
            .take_while(|c| c.is_ascii_alphanumeric() || *c == '_')
            .collect();
        if !name.is_empty() && rest[name.len()..].starts_with('(') {
            return Some(name);
        }
    }
    None
}
