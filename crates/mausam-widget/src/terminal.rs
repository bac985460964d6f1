//! Plain-text renderer for terminals.

use std::io::Write;

use tokio::io::{AsyncBufRead, AsyncBufReadExt};

use crate::display::{Render, WidgetView};

/// Read one line without its terminator. Invalid UTF-8 becomes U+FFFD
/// instead of an error. `None` at end of input.
///
/// Bytes accumulate in `buf` until a full line arrives, so a call dropped
/// inside `tokio::select!` loses nothing; pass the same `buf` each time.
///
/// # Errors
///
/// Propagates I/O errors from `reader`.
pub async fn read_input_line<R: AsyncBufRead + Unpin>(
    reader: &mut R,
    buf: &mut Vec<u8>,
) -> std::io::Result<Option<String>> {
    if reader.read_until(b'\n', buf).await? == 0 && buf.is_empty() {
        return Ok(None);
    }
    let mut line = std::mem::take(buf);
    if line.last() == Some(&b'\n') {
        line.pop();
        if line.last() == Some(&b'\r') {
            line.pop();
        }
    }
    Ok(Some(String::from_utf8_lossy(&line).into_owned()))
}

pub struct TerminalRenderer<W: Write> {
    out: W,
}

impl<W: Write> TerminalRenderer<W> {
    pub fn new(out: W) -> Self {
        Self { out }
    }

    pub fn into_inner(self) -> W {
        self.out
    }
}

impl<W: Write> Render for TerminalRenderer<W> {
    fn render(&mut self, view: &WidgetView<'_>) -> std::io::Result<()> {
        if view.loading {
            writeln!(self.out, "Loading...")?;
        }
        if let Some(error) = view.error {
            writeln!(self.out, "Error: {}", error)?;
        }
        if let Some(fields) = view.display {
            writeln!(self.out, "{}", fields.location)?;
            writeln!(self.out, "  Temperature:   {}", fields.temperature)?;
            writeln!(self.out, "  Humidity:      {}", fields.humidity)?;
            writeln!(self.out, "  Rain chance:   {}", fields.precipitation)?;
            writeln!(self.out, "  Weather:       {}", fields.condition)?;
            writeln!(self.out, "  {}", fields.advisory)?;
        }
        self.out.flush()
    }
}
