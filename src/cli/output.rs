//! Output sinks for the reporting stream.
//!
//! The runner writes to any `termcolor::WriteColor`. Terminals get a
//! `StandardStream`; tests and embedders that want the text back use
//! [`OutputBuffer`].

use std::cell::RefCell;
use std::io;
use std::rc::Rc;

use termcolor::{ColorSpec, WriteColor};

/// OutputBuffer: collects output into a shared buffer for tests or
/// programmatic capture. Clones share the same buffer, so one clone can be
/// handed to a runner while another reads the result. Never coloured.
#[derive(Debug, Clone, Default)]
pub struct OutputBuffer {
    buffer: Rc<RefCell<Vec<u8>>>,
}

impl OutputBuffer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Everything written so far, lossily decoded as UTF-8.
    pub fn contents(&self) -> String {
        String::from_utf8_lossy(&self.buffer.borrow()).into_owned()
    }

    pub fn clear(&self) {
        self.buffer.borrow_mut().clear();
    }
}

impl io::Write for OutputBuffer {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.buffer.borrow_mut().extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

impl WriteColor for OutputBuffer {
    fn supports_color(&self) -> bool {
        false
    }

    fn set_color(&mut self, _spec: &ColorSpec) -> io::Result<()> {
        Ok(())
    }

    fn reset(&mut self) -> io::Result<()> {
        Ok(())
    }
}
