use std::borrow::Cow;
use std::fmt;

use super::{regex_text, string_text};
use crate::store::{RegexId, Set, StringId, Tables};

/// Display adapter listing the four maps of a cache, sorted by text.
///
/// Handles that no longer resolve render as `#` followed by their debug form instead of
/// panicking, so a corrupted cache can still be dumped.
///
/// ```text
/// regex-to-match[1]:
///   "ca.*":
///     "car"
///     "cat"
/// match-to-regex[2]:
/// ...
/// ```
pub struct InspectView<'a> {
	tables: &'a Tables,
}

impl<'a> InspectView<'a> {
	pub(super) fn new(tables: &'a Tables) -> Self {
		Self { tables }
	}
}

fn patterns<'t>(t: &'t Tables, ids: &Set<RegexId>) -> Vec<Cow<'t, str>> {
	ids.iter().map(|&id| regex_text(t, id)).collect()
}

fn texts<'t>(t: &'t Tables, ids: &Set<StringId>) -> Vec<Cow<'t, str>> {
	ids.iter().map(|&id| string_text(t, id)).collect()
}

fn section(
	f: &mut fmt::Formatter<'_>,
	title: &str,
	mut rows: Vec<(Cow<'_, str>, Vec<Cow<'_, str>>)>,
) -> fmt::Result {
	rows.sort_unstable();
	writeln!(f, "{title}[{}]:", rows.len())?;
	for (key, mut values) in rows {
		values.sort_unstable();
		writeln!(f, "  {key:?}:")?;
		for value in values {
			writeln!(f, "    {value:?}")?;
		}
	}
	Ok(())
}

impl fmt::Display for InspectView<'_> {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		let t = self.tables;

		section(
			f,
			"regex-to-match",
			t.regexes
				.iter()
				.map(|(_, e)| (Cow::Borrowed(&*e.pattern), texts(t, &e.matches)))
				.collect(),
		)?;
		section(
			f,
			"match-to-regex",
			t.strings
				.iter()
				.map(|(_, e)| (Cow::Borrowed(&*e.text), patterns(t, &e.regexes)))
				.collect(),
		)?;
		section(
			f,
			"queue-forward",
			t.queue_forward
				.iter()
				.map(|(&id, regexes)| (string_text(t, id), patterns(t, regexes)))
				.collect(),
		)?;
		section(
			f,
			"queue-reverse",
			t.queue_reverse
				.iter()
				.map(|(&id, strings)| (regex_text(t, id), texts(t, strings)))
				.collect(),
		)
	}
}
