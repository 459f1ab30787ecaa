//! Space-delimited result writer
//!
//! One line per classified sample, in the column order the plotting scripts
//! expect:
//!
//! ```text
//! ts  r0 r1 r2 r3  s0 s1 s2 s3  c0 c1 c2 c3  m0 m1 m2 m3
//! ```
//!
//! `r` raw readings and `s` smoothed values use six decimals; `c` channel
//! states and `m` manual annotations are written as -1, 0 or 1.

use std::io::{self, Write};

use crate::sample::Sample;

/// Writes classified samples as plot-ready rows
pub struct OutputWriter<W: Write> {
    writer: W,
    rows: usize,
}

impl<W: Write> OutputWriter<W> {
    /// Wrap a writer; callers wanting buffering pass a `BufWriter`
    pub fn new(writer: W) -> Self {
        Self { writer, rows: 0 }
    }

    /// Write one row
    pub fn write_sample(&mut self, sample: &Sample) -> io::Result<()> {
        write!(self.writer, "{}", sample.timestamp)?;
        for reading in &sample.readings {
            write!(self.writer, " {:.6}", reading)?;
        }
        for smoothed in &sample.smoothed {
            write!(self.writer, " {:.6}", smoothed)?;
        }
        for state in &sample.channel_state {
            write!(self.writer, " {}", state.as_i8())?;
        }
        for state in &sample.manual_override {
            write!(self.writer, " {}", state.as_i8())?;
        }
        writeln!(self.writer)?;

        self.rows += 1;
        Ok(())
    }

    /// Rows written so far
    pub fn rows(&self) -> usize {
        self.rows
    }

    /// Flush the underlying writer
    pub fn flush(&mut self) -> io::Result<()> {
        self.writer.flush()
    }

    /// Flush and return the underlying writer
    pub fn into_inner(mut self) -> io::Result<W> {
        self.writer.flush()?;
        Ok(self.writer)
    }
}
