//! Bounded line reading.

use std::io::{self, BufRead};

/// Maximum size of a single request line in bytes, excluding the newline.
pub const MAX_REQUEST_BYTES: usize = 1024 * 1024;

/// One unit read from the input stream.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Frame {
    /// A complete line without its terminating newline.
    Line(Vec<u8>),
    /// A line longer than the limit; its bytes were discarded.
    Oversized(usize),
}

/// Reads the next line, never buffering more than `limit` bytes of it.
///
/// Returns `Ok(None)` at end of input. A final line without a newline is
/// still returned. Interrupted reads are retried.
///
/// # Errors
///
/// Returns the underlying IO error when reading fails.
pub fn read_frame<R: BufRead>(reader: &mut R, limit: usize) -> io::Result<Option<Frame>> {
    let mut line = Vec::new();
    let mut size = 0_usize;
    let mut saw_data = false;

    loop {
        let available = match reader.fill_buf() {
            Ok(buffer) => buffer,
            Err(error) if error.kind() == io::ErrorKind::Interrupted => continue,
            Err(error) => return Err(error),
        };
        if available.is_empty() {
            return Ok(saw_data.then(|| finish(line, size, limit)));
        }
        saw_data = true;

        let newline = available.iter().position(|byte| *byte == b'\n');
        let (chunk, consumed) = match newline {
            Some(position) => (available.get(..position).unwrap_or_default(), position + 1),
            None => (available, available.len()),
        };
        size = size.saturating_add(chunk.len());
        if size <= limit {
            line.extend_from_slice(chunk);
        }
        reader.consume(consumed);

        if newline.is_some() {
            return Ok(Some(finish(line, size, limit)));
        }
    }
}

fn finish(line: Vec<u8>, size: usize, limit: usize) -> Frame {
    if size > limit {
        Frame::Oversized(size)
    } else {
        Frame::Line(line)
    }
}

#[cfg(test)]
mod tests {
    use std::io::Cursor;

    use rstest::rstest;

    use super::*;

    fn frames(input: &[u8], limit: usize) -> Vec<Frame> {
        let mut reader = Cursor::new(input.to_vec());
        let mut collected = Vec::new();
        while let Some(frame) = read_frame(&mut reader, limit).expect("read succeeds") {
            collected.push(frame);
        }
        collected
    }

    #[test]
    fn splits_lines_and_keeps_unterminated_tail() {
        assert_eq!(
            frames(b"one\ntwo\nthree", 16),
            vec![
                Frame::Line(b"one".to_vec()),
                Frame::Line(b"two".to_vec()),
                Frame::Line(b"three".to_vec()),
            ]
        );
    }

    #[test]
    fn empty_input_has_no_frames() {
        assert!(frames(b"", 16).is_empty());
    }

    #[rstest]
    #[case::terminated(b"0123456789\nok\n".as_slice())]
    #[case::unterminated(b"0123456789\nok".as_slice())]
    fn oversized_lines_are_discarded_and_reading_continues(#[case] input: &[u8]) {
        assert_eq!(
            frames(input, 4),
            vec![Frame::Oversized(10), Frame::Line(b"ok".to_vec())]
        );
    }

    #[test]
    fn line_at_limit_is_accepted() {
        assert_eq!(frames(b"abcd\n", 4), vec![Frame::Line(b"abcd".to_vec())]);
    }
}
