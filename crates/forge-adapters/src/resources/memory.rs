use std::collections::BTreeMap;

use forge_core::{
    application::{ApplicationError, ports::ByteSource},
    error::ForgeResult,
};

/// Byte source backed by a map. Useful in tests and when no resource
/// directory is configured, in which case every lookup fails cleanly.
#[derive(Debug, Clone, Default)]
pub struct MemoryByteSource {
    entries: BTreeMap<String, Vec<u8>>,
}

impl MemoryByteSource {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, reference: impl Into<String>, bytes: impl Into<Vec<u8>>) -> Self {
        self.entries.insert(reference.into(), bytes.into());
        self
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl ByteSource for MemoryByteSource {
    fn read(&self, reference: &str) -> ForgeResult<Vec<u8>> {
        self.entries.get(reference).cloned().ok_or_else(|| {
            ApplicationError::ResourceUnavailable {
                reference: reference.to_string(),
                reason: "no such resource registered".into(),
            }
            .into()
        })
    }
}
