use std::ops::{AddAssign, Sub};

use crate::value::Value;

/// How an allocation recorded in the [`Ledger`] is released.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AllocKind {
    /// A leaf: string, number or boolean storage.
    Scalar,
    /// The backing sequence of an array. Elements have their own entries.
    ArrayContainer,
    /// The backing map of an object. Keys and values have their own entries.
    MapContainer,
}

/// Opaque handle to one ledger entry, issued in recording order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct AllocId(usize);

impl AllocId {
    pub fn index(self) -> usize {
        self.0
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LedgerEntry {
    pub handle: AllocId,
    pub kind: AllocKind,
}

/// Record of every allocation made while building one tree.
///
/// A ledger belongs to exactly one parse and is passed down the parser by
/// `&mut`, so independent parses never share one.
#[derive(Debug, Default)]
pub struct Ledger {
    entries: Vec<LedgerEntry>,
    retired: ReleaseReport,
}

impl Ledger {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record(&mut self, kind: AllocKind) -> AllocId {
        let handle = AllocId(self.entries.len());
        self.entries.push(LedgerEntry { handle, kind });
        handle
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn entries(&self) -> &[LedgerEntry] {
        &self.entries
    }

    /// Note allocations that were freed before the bundle is released, such as
    /// the previous value of an overwritten object key.
    pub fn retire(&mut self, released: ReleaseReport) {
        self.retired += released;
    }

    pub fn retired(&self) -> ReleaseReport {
        self.retired
    }

    /// Count recorded entries per kind without releasing anything.
    pub fn tally(&self) -> ReleaseReport {
        let mut report = ReleaseReport::default();
        for entry in &self.entries {
            report.count(entry.kind);
        }
        report
    }

    /// Release every entry in recording order, then the ledger's own storage.
    /// The report leaves out allocations already retired.
    pub(crate) fn release(self) -> ReleaseReport {
        let mut report = ReleaseReport::default();
        for entry in self.entries {
            log::trace!("release {:?} #{}", entry.kind, entry.handle.index());
            report.count(entry.kind);
        }
        report - self.retired
    }
}

/// Number of allocations released, per kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ReleaseReport {
    pub scalars: usize,
    pub arrays: usize,
    pub maps: usize,
}

impl ReleaseReport {
    pub(crate) fn scalar() -> Self {
        Self {
            scalars: 1,
            ..Self::default()
        }
    }

    pub fn total(&self) -> usize {
        self.scalars + self.arrays + self.maps
    }

    fn count(&mut self, kind: AllocKind) {
        match kind {
            AllocKind::Scalar => self.scalars += 1,
            AllocKind::ArrayContainer => self.arrays += 1,
            AllocKind::MapContainer => self.maps += 1,
        }
    }

    /// What a ledger for `root` should hold: one scalar per leaf value and per
    /// object key, one container per array or object. `null` allocates nothing.
    pub fn of_tree(root: &Value) -> Self {
        let mut report = ReleaseReport::default();
        let mut stack = vec![root];
        while let Some(value) = stack.pop() {
            match value {
                Value::Null => {}
                Value::Bool(_) | Value::Integer(_) | Value::Float(_) | Value::String(_) => {
                    report.count(AllocKind::Scalar)
                }
                Value::Array(items) => {
                    report.count(AllocKind::ArrayContainer);
                    stack.extend(items.iter());
                }
                Value::Object(entries) => {
                    report.count(AllocKind::MapContainer);
                    for item in entries.values() {
                        report.count(AllocKind::Scalar);
                        stack.push(item);
                    }
                }
            }
        }
        report
    }
}

impl AddAssign for ReleaseReport {
    fn add_assign(&mut self, other: Self) {
        self.scalars += other.scalars;
        self.arrays += other.arrays;
        self.maps += other.maps;
    }
}

impl Sub for ReleaseReport {
    type Output = Self;

    fn sub(self, other: Self) -> Self {
        Self {
            scalars: self.scalars.saturating_sub(other.scalars),
            arrays: self.arrays.saturating_sub(other.arrays),
            maps: self.maps.saturating_sub(other.maps),
        }
    }
}
