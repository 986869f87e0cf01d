//! Output pumping from child streams to caller-supplied sinks.

use std::io::Write;
use tokio::io::{AsyncRead, AsyncReadExt};
use tracing::{debug, warn};

/// Destination for a child's output bytes.
pub type OutputSink = Box<dyn Write + Send>;

/// Forwards every byte read from `stream` to `sink` until EOF.
///
/// Bytes are passed through unchanged and in order. A sink write
/// failure stops the pump; the child keeps running and its stream is
/// drained by the OS pipe buffer until it exits.
pub(crate) async fn pump_stream(
    mut stream: impl AsyncRead + Unpin + Send,
    mut sink: OutputSink,
    stream_name: &'static str,
) {
    let mut buf = [0u8; 8192];

    loop {
        match stream.read(&mut buf).await {
            Ok(0) => break,
            Ok(n) => {
                if let Err(e) = sink.write_all(&buf[..n]).and_then(|()| sink.flush()) {
                    warn!(stream = stream_name, error = %e, "output sink rejected write, stopping pump");
                    return;
                }
            }
            Err(e) => {
                debug!(stream = stream_name, error = %e, "child stream read failed");
                break;
            }
        }
    }

    if let Err(e) = sink.flush() {
        debug!(stream = stream_name, error = %e, "final flush failed");
    }
    debug!(stream = stream_name, "output pump finished");
}
