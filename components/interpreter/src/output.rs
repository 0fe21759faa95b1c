//! Output sinks for the `print` instruction.

use std::cell::RefCell;
use std::rc::Rc;

/// Destination for `print` output, one line per print.
pub trait PrintWriter {
    /// Write one printed line.
    fn write_line(&mut self, line: &str);
}

/// Writer that prints to standard output. This is the only user-visible
/// output a Rill program produces.
#[derive(Debug, Default)]
pub struct StdoutWriter;

impl PrintWriter for StdoutWriter {
    fn write_line(&mut self, line: &str) {
        println!("{}", line);
    }
}

/// Writer that captures printed lines into a shared buffer, for tests
/// and embedding.
#[derive(Debug)]
pub struct CaptureWriter {
    output: Rc<RefCell<Vec<String>>>,
}

impl CaptureWriter {
    /// Create a capture writer appending to the given buffer.
    pub fn new(output: Rc<RefCell<Vec<String>>>) -> Self {
        Self { output }
    }
}

impl PrintWriter for CaptureWriter {
    fn write_line(&mut self, line: &str) {
        self.output.borrow_mut().push(line.to_string());
    }
}
