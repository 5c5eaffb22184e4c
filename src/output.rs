use std::cell::RefCell;
use std::io::{self, Write};
use std::rc::Rc;

/// Cloneable handle to the diagnostics sink.
///
/// All clones write to the same underlying stream, which lets the builtin
/// commands and the dispatcher share one destination without threading a
/// mutable reference through the command tree.
#[derive(Clone)]
pub struct Output {
    inner: Rc<RefCell<dyn Write>>,
}

impl Output {
    pub fn new<W: Write + 'static>(writer: W) -> Self {
        Output {
            inner: Rc::new(RefCell::new(writer)),
        }
    }

    /// The default sink.
    pub fn stderr() -> Self {
        Output::new(io::stderr())
    }
}

impl Write for Output {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.inner.borrow_mut().write(buf)
    }

    fn flush(&mut self) -> io::Result<()> {
        self.inner.borrow_mut().flush()
    }
}

/// Memory-backed writer for capturing diagnostic output.
///
/// Public so consumers can assert on what a runner printed, the same way the
/// crate's own tests do.
pub struct MemWriter {
    buf: Rc<RefCell<Vec<u8>>>,
}

impl MemWriter {
    pub fn new() -> Self {
        Self {
            buf: Rc::new(RefCell::new(Vec::new())),
        }
    }

    /// Return inner Rc so the caller can read collected bytes after the
    /// writer itself was handed away.
    pub fn into_inner(self) -> Rc<RefCell<Vec<u8>>> {
        self.buf
    }

    /// Convenience: create writer and return (writer, rc_handle).
    pub fn with_handle() -> (Self, Rc<RefCell<Vec<u8>>>) {
        let mw = MemWriter::new();
        let rc = mw.buf.clone();
        (mw, rc)
    }
}

impl Default for MemWriter {
    fn default() -> Self {
        Self::new()
    }
}

impl Write for MemWriter {
    fn write(&mut self, data: &[u8]) -> io::Result<usize> {
        self.buf.borrow_mut().extend_from_slice(data);
        Ok(data.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}
