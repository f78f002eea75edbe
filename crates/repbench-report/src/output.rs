// Repbench - Repeated-Run Micro-Benchmark Harness
//
// Copyright (c) 2025 Dweve IP B.V. and individual contributors.
//
// SPDX-License-Identifier: Apache-2.0
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License in the LICENSE file at the
// root of this repository or at: http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

//! Tee writer for report text.
//!
//! Every line goes to the console (with colors) and, unless marked
//! console-only, to an optional extra sink as plain text.

use crate::format::{format_duration, split_duration};
use crate::highlight::Highlight;
use colored::{ColoredString, Colorize};
use parking_lot::Mutex;
use repbench_core::TimedResult;
use std::io::{self, Write};
use std::sync::Arc;

/// Line separating a batch header from its results.
pub const SEPARATOR: &str = "------------------------------------";

/// Visual style of a text fragment on the console.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Style {
    /// Default terminal color.
    Plain,
    /// De-emphasized (leading zeros).
    Dim,
    /// Faint, but more visible than [`Style::Dim`].
    Muted,
    /// Batch headers.
    Header,
    /// Fastest pool for a step.
    Fastest,
    /// Slowest pool for a step.
    Slowest,
}

impl Style {
    fn paint(self, text: &str) -> ColoredString {
        match self {
            Style::Plain => text.normal(),
            Style::Dim => text.dimmed(),
            Style::Muted => text.bright_black(),
            Style::Header => text.cyan(),
            Style::Fastest => text.green(),
            Style::Slowest => text.red(),
        }
    }
}

impl From<Highlight> for Style {
    fn from(highlight: Highlight) -> Self {
        match highlight {
            Highlight::Fastest => Style::Fastest,
            Highlight::Slowest => Style::Slowest,
            Highlight::Neutral => Style::Plain,
        }
    }
}

/// In-memory sink whose contents can be read while the report holds it.
#[derive(Debug, Clone, Default)]
pub struct StringSink {
    buffer: Arc<Mutex<Vec<u8>>>,
}

impl StringSink {
    /// Creates an empty sink.
    pub fn new() -> Self {
        Self::default()
    }

    /// Everything written so far.
    pub fn contents(&self) -> String {
        String::from_utf8_lossy(&self.buffer.lock()).into_owned()
    }
}

impl Write for StringSink {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.buffer.lock().extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

/// Writes report text to the console and an optional plain-text sink.
pub struct ReportWriter {
    console: bool,
    sink: Option<Box<dyn Write + Send>>,
}

impl ReportWriter {
    /// Console-only writer.
    pub fn console() -> Self {
        Self {
            console: true,
            sink: None,
        }
    }

    /// Adds a plain-text sink receiving every non-console-only fragment.
    pub fn with_sink(mut self, sink: impl Write + Send + 'static) -> Self {
        self.sink = Some(Box::new(sink));
        self
    }

    /// Enables or disables console output.
    pub fn with_console(mut self, console: bool) -> Self {
        self.console = console;
        self
    }

    /// Writes a styled fragment.
    pub fn write_styled(&mut self, text: &str, style: Style, console_only: bool) -> io::Result<()> {
        if !console_only {
            if let Some(sink) = self.sink.as_mut() {
                sink.write_all(text.as_bytes())?;
            }
        }
        if self.console {
            let mut stdout = io::stdout().lock();
            write!(stdout, "{}", style.paint(text))?;
        }
        Ok(())
    }

    /// Writes an unstyled fragment.
    pub fn write(&mut self, text: &str, console_only: bool) -> io::Result<()> {
        self.write_styled(text, Style::Plain, console_only)
    }

    /// Writes a styled fragment followed by a newline.
    pub fn line_styled(&mut self, text: &str, style: Style, console_only: bool) -> io::Result<()> {
        self.write_styled(text, style, console_only)?;
        self.new_line(console_only)
    }

    /// Writes an unstyled line.
    pub fn line(&mut self, text: &str, console_only: bool) -> io::Result<()> {
        self.line_styled(text, Style::Plain, console_only)
    }

    /// Writes an empty line.
    pub fn new_line(&mut self, console_only: bool) -> io::Result<()> {
        self.write("\n", console_only)
    }

    /// Writes the separator line.
    pub fn separator(&mut self, console_only: bool) -> io::Result<()> {
        self.line(SEPARATOR, console_only)
    }

    /// Writes a duration with its leading zeros de-emphasized.
    pub fn duration(&mut self, duration: std::time::Duration, console_only: bool) -> io::Result<()> {
        let text = format_duration(duration);
        let (zero_groups, zero_digits, significant) = split_duration(&text);
        self.write_styled(zero_groups, Style::Dim, console_only)?;
        self.write_styled(zero_digits, Style::Muted, console_only)?;
        self.write(significant, console_only)
    }

    /// Writes one `duration label` result line.
    pub fn result(&mut self, result: &TimedResult, label_style: Style, console_only: bool) -> io::Result<()> {
        self.duration(result.duration, console_only)?;
        self.write(" ", console_only)?;
        self.line_styled(&result.label, label_style, console_only)
    }

    /// Flushes the console and the sink.
    pub fn flush(&mut self) -> io::Result<()> {
        if let Some(sink) = self.sink.as_mut() {
            sink.flush()?;
        }
        if self.console {
            io::stdout().flush()?;
        }
        Ok(())
    }
}

impl Default for ReportWriter {
    fn default() -> Self {
        Self::console()
    }
}
