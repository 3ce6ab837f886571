//! In-memory slot

use crate::storage::{CartSlot, StorageError};

/// Slot kept in memory, counting writes.
#[derive(Debug, Clone, Default)]
pub struct MemorySlot {
    payload: Option<String>,
    writes: usize,
    fail_writes: bool,
}

impl MemorySlot {
    /// Creates an empty slot.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a slot that already holds a payload.
    pub fn with_payload(payload: impl Into<String>) -> Self {
        Self {
            payload: Some(payload.into()),
            ..Self::default()
        }
    }

    /// Creates a slot whose writes always fail, as when storage is full.
    pub fn failing() -> Self {
        Self {
            fail_writes: true,
            ..Self::default()
        }
    }

    /// The stored payload, if any.
    pub fn payload(&self) -> Option<&str> {
        self.payload.as_deref()
    }

    /// Number of write attempts made against the slot.
    pub fn writes(&self) -> usize {
        self.writes
    }
}

impl CartSlot for MemorySlot {
    fn read(&self) -> Result<Option<String>, StorageError> {
        Ok(self.payload.clone())
    }

    fn write(&mut self, payload: &str) -> Result<(), StorageError> {
        self.writes += 1;

        if self.fail_writes {
            return Err(StorageError::Unavailable("quota exceeded".to_string()));
        }

        self.payload = Some(payload.to_string());

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use testresult::TestResult;

    use super::*;

    #[test]
    fn write_replaces_payload_and_counts() -> TestResult {
        let mut slot = MemorySlot::with_payload("[]");

        slot.write("[1]")?;
        slot.write("[2]")?;

        assert_eq!(slot.read()?.as_deref(), Some("[2]"));
        assert_eq!(slot.writes(), 2);

        Ok(())
    }

    #[test]
    fn failing_slot_keeps_previous_payload() {
        let mut slot = MemorySlot::failing();

        assert!(matches!(
            slot.write("[]"),
            Err(StorageError::Unavailable(_))
        ));
        assert_eq!(slot.payload(), None);
        assert_eq!(slot.writes(), 1);
    }
}
