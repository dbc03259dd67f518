//! Newline-delimited framing over a byte stream.
//!
//! Each request occupies one line. Stdout carries only response frames, so
//! the stream handed to [`serve`] must not be shared with log output.

mod frame;

use std::io::{BufRead, Write};

use serde_json::Value;
use thiserror::Error;
use tracing::{debug, info, warn};

use crate::rpc::{RpcError, RpcHandler, RpcResponse};

pub use frame::{Frame, MAX_REQUEST_BYTES, read_frame};

/// Tracing target for transport events.
pub(crate) const TRANSPORT_TARGET: &str = concat!(env!("CARGO_PKG_NAME"), "::transport");

/// Failures that end the serve loop.
#[derive(Debug, Error)]
pub enum TransportError {
    /// Reading a request or writing a response failed.
    #[error("transport IO error: {0}")]
    Io(#[from] std::io::Error),
    /// A response could not be serialised.
    #[error("failed to serialise response: {0}")]
    Serialize(#[from] serde_json::Error),
}

/// Totals reported when the input stream closes.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct ServeSummary {
    /// Non-blank lines read.
    pub requests: u64,
    /// Response frames written.
    pub responses: u64,
}

/// Serves requests from `reader` until it reaches end of input.
///
/// Blank lines are skipped. Oversized lines are discarded and answered with
/// an invalid-request error so the loop keeps serving.
///
/// # Errors
///
/// Returns [`TransportError`] when the underlying streams fail; protocol and
/// routing errors are answered in-band instead.
pub fn serve<R, W>(
    handler: &RpcHandler,
    mut reader: R,
    mut writer: W,
) -> Result<ServeSummary, TransportError>
where
    R: BufRead,
    W: Write,
{
    let mut summary = ServeSummary::default();
    while let Some(frame) = read_frame(&mut reader, MAX_REQUEST_BYTES)? {
        let response = match frame {
            Frame::Line(line) if is_blank(&line) => continue,
            Frame::Line(line) => {
                summary.requests += 1;
                handler.handle_line(&line)
            }
            Frame::Oversized(size) => {
                summary.requests += 1;
                let error = RpcError::request_too_large(size, MAX_REQUEST_BYTES);
                warn!(target: TRANSPORT_TARGET, %error, "discarded oversized request");
                Some(RpcResponse::failure(Value::Null, &error))
            }
        };
        if let Some(frame_out) = response {
            write_response(&mut writer, &frame_out)?;
            summary.responses += 1;
        }
    }
    info!(
        target: TRANSPORT_TARGET,
        requests = summary.requests,
        responses = summary.responses,
        "input closed"
    );
    Ok(summary)
}

/// Writes one response frame and flushes it.
///
/// # Errors
///
/// Returns [`TransportError`] when serialisation or the write fails.
pub fn write_response<W: Write>(
    writer: &mut W,
    response: &RpcResponse,
) -> Result<(), TransportError> {
    serde_json::to_writer(&mut *writer, response)?;
    writer.write_all(b"\n")?;
    writer.flush()?;
    debug!(target: TRANSPORT_TARGET, id = %response.id(), "response written");
    Ok(())
}

fn is_blank(line: &[u8]) -> bool {
    line.iter().all(u8::is_ascii_whitespace)
}
