use std::sync::Arc;

use crate::chips::ChipList;
use crate::models::Contact;

/// Compute the pool: every contact whose key is not chipped and whose name
/// or email contains `query` (case-insensitive). Candidate order is kept.
pub fn filter(all: &[Arc<Contact>], chips: &ChipList, query: &str) -> Vec<Arc<Contact>> {
    let query_lower = query.to_lowercase();
    let pool: Vec<Arc<Contact>> = all
        .iter()
        .filter(|c| !chips.contains_key(c.key()) && c.matches(&query_lower))
        .cloned()
        .collect();
    tracing::trace!(query, matched = pool.len(), total = all.len(), "filter");
    pool
}

/// Contact in `pool` whose key equals `text` exactly (case-sensitive).
pub fn exact_match(pool: &[Arc<Contact>], text: &str) -> Option<Arc<Contact>> {
    if text.is_empty() {
        return None;
    }
    pool.iter().find(|c| c.key() == text).cloned()
}
