use std::ops::{Deref, DerefMut};

use crate::store::Tables;

/// RAII guard around a mutation that touches more than one map.
///
/// Dropping the guard without calling [`RepairGuard::commit`] (an early `?` return or a panic
/// unwinding through the mutation) runs [`Tables::repair`], so a half-applied edit never
/// outlives the call that made it.
pub(crate) struct RepairGuard<'a> {
	tables: &'a mut Tables,
	op: &'static str,
	armed: bool,
}

impl<'a> RepairGuard<'a> {
	pub(crate) fn new(tables: &'a mut Tables, op: &'static str) -> Self {
		Self {
			tables,
			op,
			armed: true,
		}
	}

	pub(crate) fn commit(mut self) {
		self.armed = false;
	}
}

impl Deref for RepairGuard<'_> {
	type Target = Tables;

	fn deref(&self) -> &Tables {
		self.tables
	}
}

impl DerefMut for RepairGuard<'_> {
	fn deref_mut(&mut self) -> &mut Tables {
		self.tables
	}
}

impl Drop for RepairGuard<'_> {
	fn drop(&mut self) {
		if !self.armed {
			return;
		}
		tracing::warn!(
			op = self.op,
			regexes = self.tables.regexes.len(),
			strings = self.tables.strings.len(),
			"Match cache mutation aborted; discarding regex-side knowledge"
		);
		self.tables.repair();
	}
}
