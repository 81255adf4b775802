//! Terminal display

use crossterm::{
    cursor::{self, MoveTo},
    execute, queue,
    terminal::{Clear, ClearType},
};
use std::io::{self, stdout, BufWriter, Stdout, Write};
use std::time::Duration;

/// Where finished frames go.
///
/// Keeps screen clearing and frame pacing out of the renderer so frames can
/// be produced and checked without a terminal.
pub trait DisplaySink {
    /// Wipe whatever is currently shown
    fn clear(&mut self) -> io::Result<()>;

    /// Show one complete frame
    fn present(&mut self, frame: &str) -> io::Result<()>;

    /// Wait before the next frame
    fn pause(&mut self, duration: Duration) -> io::Result<()> {
        std::thread::sleep(duration);
        Ok(())
    }
}

/// Terminal display handler with buffered output
pub struct TerminalDisplay {
    buffer: BufWriter<Stdout>,
}

impl TerminalDisplay {
    pub fn new() -> io::Result<Self> {
        let mut stdout = stdout();
        execute!(stdout, cursor::Hide)?;

        Ok(Self {
            buffer: BufWriter::new(stdout),
        })
    }
}

impl DisplaySink for TerminalDisplay {
    fn clear(&mut self) -> io::Result<()> {
        queue!(self.buffer, Clear(ClearType::All), MoveTo(0, 0))?;
        self.buffer.flush()
    }

    fn present(&mut self, frame: &str) -> io::Result<()> {
        self.buffer.write_all(frame.as_bytes())?;
        self.buffer.flush()
    }
}

impl Drop for TerminalDisplay {
    fn drop(&mut self) {
        let _ = self.buffer.flush();
        let _ = execute!(stdout(), cursor::Show);
    }
}

/// Write one frame straight to `out`, no clearing or pacing.
///
/// A reader that has gone away (`| head`) is not an error.
pub fn print_frame<W: Write>(out: &mut W, frame: &str) -> io::Result<()> {
    match out.write_all(frame.as_bytes()).and_then(|_| out.flush()) {
        Err(e) if e.kind() == io::ErrorKind::BrokenPipe => {
            tracing::debug!("Output closed before frame was written");
            Ok(())
        }
        result => result,
    }
}

/// In-memory display that records frames instead of drawing them
#[derive(Debug, Default)]
pub struct MemoryDisplay {
    frames: Vec<String>,
    clears: usize,
    paused: Duration,
}

impl MemoryDisplay {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn frames(&self) -> &[String] {
        &self.frames
    }

    pub fn clears(&self) -> usize {
        self.clears
    }

    /// Total time the animation asked to wait
    pub fn paused(&self) -> Duration {
        self.paused
    }
}

impl DisplaySink for MemoryDisplay {
    fn clear(&mut self) -> io::Result<()> {
        self.clears += 1;
        Ok(())
    }

    fn present(&mut self, frame: &str) -> io::Result<()> {
        self.frames.push(frame.to_string());
        Ok(())
    }

    fn pause(&mut self, duration: Duration) -> io::Result<()> {
        self.paused += duration;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_memory_display_records() {
        let mut display = MemoryDisplay::new();
        display.clear().unwrap();
        display.present("ab\ncd\n").unwrap();
        display.pause(Duration::from_millis(17)).unwrap();
        display.pause(Duration::from_millis(17)).unwrap();

        assert_eq!(display.clears(), 1);
        assert_eq!(display.frames(), ["ab\ncd\n".to_string()]);
        assert_eq!(display.paused(), Duration::from_millis(34));
    }

    struct ClosedPipe;

    impl Write for ClosedPipe {
        fn write(&mut self, _buf: &[u8]) -> io::Result<usize> {
            Err(io::Error::from(io::ErrorKind::BrokenPipe))
        }

        fn flush(&mut self) -> io::Result<()> {
            Err(io::Error::from(io::ErrorKind::BrokenPipe))
        }
    }

    struct Unwritable;

    impl Write for Unwritable {
        fn write(&mut self, _buf: &[u8]) -> io::Result<usize> {
            Err(io::Error::other("disk full"))
        }

        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }

    #[test]
    fn test_print_frame_writes_frame() {
        let mut out = Vec::new();
        print_frame(&mut out, "ab\ncd\n").unwrap();
        assert_eq!(out, b"ab\ncd\n");
    }

    #[test]
    fn test_print_frame_closed_pipe_is_ok() {
        assert!(print_frame(&mut ClosedPipe, "ab\n").is_ok());
    }

    #[test]
    fn test_print_frame_other_errors_propagate() {
        let err = print_frame(&mut Unwritable, "ab\n").unwrap_err();
        assert_eq!(err.kind(), io::ErrorKind::Other);
    }

    struct Counting(usize);

    impl DisplaySink for Counting {
        fn clear(&mut self) -> io::Result<()> {
            Ok(())
        }

        fn present(&mut self, _frame: &str) -> io::Result<()> {
            self.0 += 1;
            Ok(())
        }
    }

    #[test]
    fn test_default_pause_sleeps() {
        let mut sink = Counting(0);
        let start = std::time::Instant::now();
        sink.pause(Duration::from_millis(5)).unwrap();
        assert!(start.elapsed() >= Duration::from_millis(5));
        sink.present("x").unwrap();
        assert_eq!(sink.0, 1);
    }
}
