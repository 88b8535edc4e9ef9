use crate::providers::{InputProvider, OutputProvider};
use std::io::{self, BufRead, BufReader, Stdin, Stdout, Write};

/// Input over any buffered reader.
pub struct StreamInput<R> {
    reader: R,
}

impl<R: BufRead> StreamInput<R> {
    pub fn new(reader: R) -> Self {
        Self { reader }
    }

    pub fn into_inner(self) -> R {
        self.reader
    }
}

impl StreamInput<BufReader<Stdin>> {
    pub fn stdin() -> Self {
        Self::new(BufReader::new(io::stdin()))
    }
}

impl<R: BufRead> InputProvider for StreamInput<R> {
    fn read_line(&mut self) -> io::Result<Option<String>> {
        let mut buf = Vec::new();
        if self.reader.read_until(b'\n', &mut buf)? == 0 {
            return Ok(None);
        }
        if buf.last() == Some(&b'\n') {
            buf.pop();
            if buf.last() == Some(&b'\r') {
                buf.pop();
            }
        }
        // Bad UTF-8 is malformed input for the command, not a stream failure.
        Ok(Some(String::from_utf8_lossy(&buf).into_owned()))
    }
}

/// Output over any writer.
pub struct StreamOutput<W> {
    writer: W,
}

impl<W: Write> StreamOutput<W> {
    pub fn new(writer: W) -> Self {
        Self { writer }
    }

    pub fn into_inner(self) -> W {
        self.writer
    }
}

impl StreamOutput<Stdout> {
    pub fn stdout() -> Self {
        Self::new(io::stdout())
    }
}

impl<W: Write> OutputProvider for StreamOutput<W> {
    fn write_str(&mut self, s: &str) -> io::Result<()> {
        self.writer.write_all(s.as_bytes())
    }

    fn flush(&mut self) -> io::Result<()> {
        self.writer.flush()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn splits_lines_and_strips_terminators() {
        let mut input = StreamInput::new(&b"12\r\nab\n\nlast"[..]);
        assert_eq!(input.read_line().unwrap().as_deref(), Some("12"));
        assert_eq!(input.read_line().unwrap().as_deref(), Some("ab"));
        assert_eq!(input.read_line().unwrap().as_deref(), Some(""));
        assert_eq!(input.read_line().unwrap().as_deref(), Some("last"));
        assert_eq!(input.read_line().unwrap(), None);
    }

    #[test]
    fn invalid_utf8_is_replaced() {
        let mut input = StreamInput::new(&b"\xff\n"[..]);
        assert_eq!(input.read_line().unwrap().as_deref(), Some("\u{FFFD}"));
    }

    #[test]
    fn writes_through() {
        let mut out = StreamOutput::new(Vec::new());
        out.write_str("4").unwrap();
        out.write_str("2").unwrap();
        out.flush().unwrap();
        assert_eq!(out.into_inner(), b"42");
    }
}
