//! Byte-stream tee with a detachable secondary destination.

use parking_lot::Mutex;
use spinup_process::OutputSink;
use std::io::{self, Write};
use std::sync::Arc;

/// Duplicates every written byte to a primary and a secondary sink.
///
/// The primary is always written. The secondary lives in a shared slot
/// that a [`TeeDetach`] handle can empty at any time; after detachment
/// writes keep flowing to the primary and the missing secondary never
/// causes an error. Detachment is irreversible.
pub struct TeeWriter {
    primary: OutputSink,
    secondary: Arc<Mutex<Option<OutputSink>>>,
}

impl TeeWriter {
    pub fn new(primary: OutputSink, secondary: OutputSink) -> Self {
        Self {
            primary,
            secondary: Arc::new(Mutex::new(Some(secondary))),
        }
    }

    /// Handle for detaching the secondary sink later, typically after
    /// the tee itself has been handed to an output pump.
    pub fn detach_handle(&self) -> TeeDetach {
        TeeDetach(Arc::clone(&self.secondary))
    }
}

impl Write for TeeWriter {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.primary.write_all(buf)?;
        if let Some(secondary) = self.secondary.lock().as_mut() {
            secondary.write_all(buf)?;
        }
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        self.primary.flush()?;
        if let Some(secondary) = self.secondary.lock().as_mut() {
            secondary.flush()?;
        }
        Ok(())
    }
}

/// Detaches a [`TeeWriter`]'s secondary sink, dropping it.
#[derive(Clone)]
pub struct TeeDetach(Arc<Mutex<Option<OutputSink>>>);

impl TeeDetach {
    pub fn detach(&self) {
        self.0.lock().take();
    }
}
