use std::io;

/// Line-oriented input consumed by `in_int` and `in_char`.
pub trait InputProvider {
    /// Next line without its terminator (`\n` or `\r\n`). `None` once the
    /// stream is exhausted and nothing was read.
    fn read_line(&mut self) -> io::Result<Option<String>>;
}

/// Text sink written by `out_int` and `out_char`.
pub trait OutputProvider {
    fn write_str(&mut self, s: &str) -> io::Result<()>;
    /// Pushes buffered text out before the interpreter blocks on input.
    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

impl<T: InputProvider + ?Sized> InputProvider for &mut T {
    fn read_line(&mut self) -> io::Result<Option<String>> {
        (**self).read_line()
    }
}

impl<T: OutputProvider + ?Sized> OutputProvider for &mut T {
    fn write_str(&mut self, s: &str) -> io::Result<()> {
        (**self).write_str(s)
    }
    fn flush(&mut self) -> io::Result<()> {
        (**self).flush()
    }
}

pub mod scripted;
pub mod stream;

pub use scripted::{CapturedOutput, ScriptedInput};
pub use stream::{StreamInput, StreamOutput};
