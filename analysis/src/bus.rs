//! History-changed signal between the structured analyzer and the history list.
//!
//! A monotonically increasing version owned by the composing shell. The
//! structured analyzer is the single writer and bumps it once per successful
//! submission; readers compare against the version they last saw and refetch
//! on any difference. Readers learn only *that* something changed.

#[cfg(test)]
#[path = "bus_test.rs"]
mod bus_test;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct SyncBus {
    version: u64,
}

impl SyncBus {
    #[must_use]
    pub fn version(self) -> u64 {
        self.version
    }

    /// Advance by exactly one and return the new version.
    pub fn bump(&mut self) -> u64 {
        self.version += 1;
        self.version
    }
}
