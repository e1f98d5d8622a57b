//! crates/logging/src/levels.rs
//! Flag enum and level structure for debug verbosity.

/// Debug flags for diagnostic categories.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum DebugFlag {
    /// Directory scans and their outcomes.
    Scan,
    /// Symlink resolution and ancestor checks.
    Link,
    /// Visit ledger decisions.
    Visit,
}

impl DebugFlag {
    /// Every flag, in the order they are documented in `--help`.
    pub const ALL: [Self; 3] = [Self::Scan, Self::Link, Self::Visit];

    /// Returns the lowercase token used on the command line.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Scan => "scan",
            Self::Link => "link",
            Self::Visit => "visit",
        }
    }

    /// Looks up a flag by its command-line token.
    #[must_use]
    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|flag| flag.name() == name)
    }
}

/// Debug verbosity levels for each flag.
#[derive(Clone, Default, Debug, PartialEq, Eq)]
pub struct DebugLevels {
    /// Directory scan level.
    pub scan: u8,
    /// Symlink resolution level.
    pub link: u8,
    /// Visit ledger level.
    pub visit: u8,
}

impl DebugLevels {
    /// Get the level for a specific flag.
    pub fn get(&self, flag: DebugFlag) -> u8 {
        match flag {
            DebugFlag::Scan => self.scan,
            DebugFlag::Link => self.link,
            DebugFlag::Visit => self.visit,
        }
    }

    /// Set the level for a specific flag.
    pub fn set(&mut self, flag: DebugFlag, level: u8) {
        match flag {
            DebugFlag::Scan => self.scan = level,
            DebugFlag::Link => self.link = level,
            DebugFlag::Visit => self.visit = level,
        }
    }

    /// Set all flags to the specified level.
    pub fn set_all(&mut self, level: u8) {
        self.scan = level;
        self.link = level;
        self.visit = level;
    }

    /// Reports whether any flag is enabled.
    pub fn any(&self) -> bool {
        DebugFlag::ALL.into_iter().any(|flag| self.get(flag) > 0)
    }
}
