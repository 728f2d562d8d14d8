use crate::ledger::{Ledger, ReleaseReport};
use crate::value::Value;

/// A parsed document together with the ledger of everything allocated to
/// build it. Only a successful parse produces one.
///
/// [`Bundle::release`] consumes the bundle, so it runs at most once and no
/// reference into the tree can outlive it.
#[derive(Debug)]
pub struct Bundle {
    root: Value,
    ledger: Ledger,
}

impl Bundle {
    pub(crate) fn new(root: Value, ledger: Ledger) -> Self {
        Self { root, ledger }
    }

    pub fn root(&self) -> &Value {
        &self.root
    }

    pub fn ledger(&self) -> &Ledger {
        &self.ledger
    }

    pub fn get(&self, key: &str) -> Option<&Value> {
        self.root.get(key)
    }

    pub fn index(&self, index: usize) -> Option<&Value> {
        self.root.get_index(index)
    }

    pub fn pointer(&self, path: &str) -> Option<&Value> {
        self.root.pointer(path)
    }

    /// Release the tree and its ledger, returning what was freed.
    ///
    /// # Examples
    /// ```
    /// let bundle = json_ledger::parse_str(r#"{"a":[1,true]}"#).unwrap();
    /// let report = bundle.release();
    /// assert_eq!(report.maps, 1);
    /// assert_eq!(report.arrays, 1);
    /// assert_eq!(report.scalars, 3);
    /// ```
    pub fn release(self) -> ReleaseReport {
        let Bundle { root, ledger } = self;
        let report = ledger.release();
        debug_assert_eq!(report, ReleaseReport::of_tree(&root));
        drop(root);
        log::debug!("released {} allocations", report.total());
        report
    }

    /// Take the tree out of the bundle, dropping the ledger.
    pub fn into_value(self) -> Value {
        self.root
    }
}
