//! Per-call import options.

use std::ops::{BitOr, BitOrAssign};

/// Bit set of import options passed to the decode entry points.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct ImportFlags(u32);

impl ImportFlags {
    pub const DEFAULT: ImportFlags = ImportFlags(0);

    /// The buffer is not trusted: skip the cheap weak-simplicity pass on
    /// decoded polygons. Without this flag the pass runs.
    pub const NON_TRUSTED: ImportFlags = ImportFlags(0x0000_0002);

    pub const fn bits(self) -> u32 {
        self.0
    }

    pub const fn from_bits(bits: u32) -> Self {
        ImportFlags(bits)
    }

    pub const fn contains(self, other: ImportFlags) -> bool {
        self.0 & other.0 == other.0
    }

    /// Whether decoded polygons get a weak simplicity classification.
    pub const fn runs_weak_simplicity(self) -> bool {
        !self.contains(ImportFlags::NON_TRUSTED)
    }
}

impl BitOr for ImportFlags {
    type Output = ImportFlags;

    fn bitor(self, rhs: ImportFlags) -> ImportFlags {
        ImportFlags(self.0 | rhs.0)
    }
}

impl BitOrAssign for ImportFlags {
    fn bitor_assign(&mut self, rhs: ImportFlags) {
        self.0 |= rhs.0;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_runs_weak_simplicity() {
        assert!(ImportFlags::default().runs_weak_simplicity());
        assert!(ImportFlags::DEFAULT.runs_weak_simplicity());
    }

    #[test]
    fn non_trusted_skips_weak_simplicity() {
        let mut flags = ImportFlags::from_bits(0x10);
        assert!(flags.runs_weak_simplicity());
        flags |= ImportFlags::NON_TRUSTED;
        assert!(flags.contains(ImportFlags::NON_TRUSTED));
        assert!(!flags.runs_weak_simplicity());
        assert_eq!(flags.bits(), 0x12);
    }
}
