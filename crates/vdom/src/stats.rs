//! Planned-mutation counts for a patch, for logging and tests.

use crate::patch::Patch;
use std::fmt;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct PatchStats {
    pub kept: usize,
    pub removed: usize,
    pub replaced: usize,
    pub updated: usize,
    pub attribute_ops: usize,
    pub appended: usize,
    pub truncated: usize,
    pub detached_parents: usize,
}

impl PatchStats {
    pub(crate) fn record(&mut self, patch: &Patch) {
        match patch {
            Patch::Keep => self.kept += 1,
            Patch::Remove => self.removed += 1,
            Patch::Replace(_) => self.replaced += 1,
            Patch::Update { attrs, children } => {
                self.updated += 1;
                self.attribute_ops += attrs.len();
                if children.detaches_parent() {
                    self.detached_parents += 1;
                }
                self.truncated += children.truncated();
                self.appended += children.appends().len();
                for child in children.positional() {
                    self.record(child);
                }
            }
            Patch::Sequence(patches) => {
                for patch in patches {
                    self.record(patch);
                }
            }
        }
    }

    /// Number of live-tree mutations the patch will request, not counting
    /// the nodes created while rendering replacements and appends.
    pub fn mutations(&self) -> usize {
        self.removed
            + self.replaced
            + self.attribute_ops
            + self.appended
            + self.truncated
            + self.detached_parents
    }
}

impl fmt::Display for PatchStats {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "kept={} removed={} replaced={} updated={} attrs={} appended={} truncated={} detached={}",
            self.kept,
            self.removed,
            self.replaced,
            self.updated,
            self.attribute_ops,
            self.appended,
            self.truncated,
            self.detached_parents
        )
    }
}
