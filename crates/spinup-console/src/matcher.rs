//! Line-oriented pattern matching over a live byte stream.

use regex::Regex;
use std::io::{self, Write};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use tracing::debug;

const LINE_BUFFER_CAPACITY: usize = 8192;

/// Shared, read-only view of a matcher's latched flag.
///
/// This is the only surface the polling side touches; the line buffer
/// itself belongs exclusively to the writing side.
#[derive(Debug, Clone)]
pub struct MatchFlag(Arc<AtomicBool>);

impl MatchFlag {
    pub fn is_matched(&self) -> bool {
        self.0.load(Ordering::SeqCst)
    }
}

/// Write sink that buffers bytes up to each newline and tests the
/// completed line against a pattern.
///
/// The first matching line latches the flag; from then on all input is
/// accepted and discarded without buffering or re-testing, so the cost
/// of a matched stream is independent of how much output follows. The
/// flag never resets, which makes a matcher single-use: create a fresh
/// one per launch attempt.
pub struct PatternMatchWriter {
    pattern: Regex,
    buffer: Vec<u8>,
    matched: Arc<AtomicBool>,
}

impl PatternMatchWriter {
    pub fn new(pattern: Regex) -> Self {
        Self {
            pattern,
            buffer: Vec::with_capacity(LINE_BUFFER_CAPACITY),
            matched: Arc::new(AtomicBool::new(false)),
        }
    }

    pub fn is_matched(&self) -> bool {
        self.matched.load(Ordering::SeqCst)
    }

    /// Flag handle for the polling side.
    pub fn match_flag(&self) -> MatchFlag {
        MatchFlag(Arc::clone(&self.matched))
    }
}

impl Write for PatternMatchWriter {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        if self.matched.load(Ordering::SeqCst) {
            return Ok(buf.len());
        }

        for &byte in buf {
            self.buffer.push(byte);
            if byte == b'\n' {
                let line = String::from_utf8_lossy(&self.buffer);
                if self.pattern.is_match(&line) {
                    debug!(pattern = %self.pattern, "readiness pattern matched");
                    self.matched.store(true, Ordering::SeqCst);
                    self.buffer = Vec::new();
                    return Ok(buf.len());
                }
                self.buffer.clear();
            }
        }

        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}
