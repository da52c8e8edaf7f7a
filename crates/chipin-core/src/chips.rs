use std::sync::Arc;

use crate::models::Contact;

/// Ordered list of selected contacts, in selection order.
///
/// The store does not deduplicate. `ChipInput` checks `contains_key` before
/// every `append`, so a key never appears twice through the widget.
#[derive(Debug, Clone, Default)]
pub struct ChipList {
    chips: Vec<Arc<Contact>>,
}

impl ChipList {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn append(&mut self, contact: Arc<Contact>) {
        self.chips.push(contact);
    }

    /// Remove the chip at `index`. Out-of-range indices are ignored.
    pub fn remove_at(&mut self, index: usize) -> Option<Arc<Contact>> {
        if index < self.chips.len() {
            Some(self.chips.remove(index))
        } else {
            None
        }
    }

    /// Remove the first chip whose key equals `key`.
    pub fn remove_by_key(&mut self, key: &str) -> Option<Arc<Contact>> {
        let index = self.position(key)?;
        Some(self.chips.remove(index))
    }

    pub fn position(&self, key: &str) -> Option<usize> {
        self.chips.iter().position(|c| c.key() == key)
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.position(key).is_some()
    }

    pub fn get(&self, index: usize) -> Option<&Arc<Contact>> {
        self.chips.get(index)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Arc<Contact>> {
        self.chips.iter()
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.chips.iter().map(|c| c.key())
    }

    pub fn as_slice(&self) -> &[Arc<Contact>] {
        &self.chips
    }

    pub fn len(&self) -> usize {
        self.chips.len()
    }

    pub fn is_empty(&self) -> bool {
        self.chips.is_empty()
    }

    pub fn last_index(&self) -> Option<usize> {
        self.chips.len().checked_sub(1)
    }
}
