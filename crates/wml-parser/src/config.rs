//! Parse options.

use crate::partition::BoundaryPolicy;
use crate::ConfigError;

/// How the stack machine treats markup it cannot place.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum RecoveryMode {
    /// Drop what does not fit and keep going.
    #[default]
    Tolerant,
    /// Stop at the first line that would lose content.
    Strict,
}

/// Options for [`crate::parse_with`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseOptions {
    /// Number of partitions processed independently. Must be at least 1.
    pub partitions: usize,
    pub mode: RecoveryMode,
    pub boundaries: BoundaryPolicy,
}

impl Default for ParseOptions {
    fn default() -> Self {
        Self {
            partitions: 1,
            mode: RecoveryMode::Tolerant,
            boundaries: BoundaryPolicy::Positional,
        }
    }
}

impl ParseOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_partitions(mut self, partitions: usize) -> Self {
        self.partitions = partitions;
        self
    }

    pub fn with_mode(mut self, mode: RecoveryMode) -> Self {
        self.mode = mode;
        self
    }

    pub fn with_boundaries(mut self, boundaries: BoundaryPolicy) -> Self {
        self.boundaries = boundaries;
        self
    }

    pub fn strict(self) -> Self {
        self.with_mode(RecoveryMode::Strict)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.partitions == 0 {
            return Err(ConfigError::InvalidPartitions {
                partitions: self.partitions,
            });
        }
        Ok(())
    }
}
