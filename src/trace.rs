//! The ordered, human-readable log of a single evaluation.

use std::fmt;
use std::slice;

/// Ordered, append-only record of every random draw and summary line produced while resolving one
/// expression.
///
/// A `Trace` is created fresh for each evaluation and is only appended to while the evaluation is
/// running; once it is handed back to the caller it can no longer change. Lines appear in exactly
/// the order the draws happened, which for a left-associative expression is left to right.
///
/// Its [`Display`] implementation joins the lines with newlines - the exact message body a chat
/// front end would post.
///
/// [`Display`]: fmt::Display
///
/// # Examples
/// ```
/// use fortuna::{roller::Max, Registry, RollMode};
///
/// let registry = Registry::new(RollMode::Normal);
/// let result = fortuna::evaluate("1d4+2", &registry, &mut Max)?;
/// assert_eq!(result.trace.lines(), ["Rolling: 1d4+2", "1d4: 4", "I rolled 6"]);
/// assert_eq!(result.trace.to_string(), "Rolling: 1d4+2\n1d4: 4\nI rolled 6");
/// # Ok::<(), fortuna::eval::Error>(())
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Trace {
	/// Lines recorded so far, oldest first
	lines: Vec<String>,
}

impl Trace {
	/// Creates an empty trace.
	#[must_use]
	pub(crate) const fn new() -> Self {
		Self { lines: Vec::new() }
	}

	/// Appends a line to the trace.
	pub(crate) fn line(&mut self, line: String) {
		self.lines.push(line);
	}

	/// All recorded lines, in the order they were produced.
	#[must_use]
	#[inline]
	pub fn lines(&self) -> &[String] {
		&self.lines
	}

	/// Consumes the trace, yielding its lines.
	#[must_use]
	#[inline]
	pub fn into_lines(self) -> Vec<String> {
		self.lines
	}

	/// Number of recorded lines.
	#[must_use]
	#[inline]
	pub fn len(&self) -> usize {
		self.lines.len()
	}

	/// Whether nothing has been recorded.
	#[must_use]
	#[inline]
	pub fn is_empty(&self) -> bool {
		self.lines.is_empty()
	}
}

impl fmt::Display for Trace {
	/// Formats the trace as its lines joined with `\n`.
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		write!(f, "{}", self.lines.join("\n"))
	}
}

impl<'a> IntoIterator for &'a Trace {
	type Item = &'a String;
	type IntoIter = slice::Iter<'a, String>;

	fn into_iter(self) -> Self::IntoIter {
		self.lines.iter()
	}
}
