use std::collections::HashSet;
use std::fs;
use std::path::Path;

use serde::Deserialize;

use crate::error::{ChipinError, Result};
use crate::models::Contact;

/// JSON accepts either a bare array or `{ "contacts": [...] }`.
#[derive(Deserialize)]
#[serde(untagged)]
enum JsonContacts {
    List(Vec<Contact>),
    Wrapped { contacts: Vec<Contact> },
}

/// TOML uses `[[contact]]` tables.
#[derive(Deserialize)]
struct TomlContacts {
    #[serde(default)]
    contact: Vec<Contact>,
}

/// Load the candidate list from a `.json` or `.toml` file, in file order.
pub fn load_contacts(path: &Path) -> Result<Vec<Contact>> {
    if !path.exists() {
        return Err(ChipinError::ContactsNotFound(path.display().to_string()));
    }

    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .map(str::to_ascii_lowercase)
        .unwrap_or_default();

    let contents = fs::read_to_string(path)?;
    let contacts = match ext.as_str() {
        "json" => parse_json(&contents)?,
        "toml" => parse_toml(&contents)?,
        _ => return Err(ChipinError::UnsupportedFormat(path.display().to_string())),
    };

    validate_contacts(&contacts)?;
    tracing::debug!(count = contacts.len(), path = %path.display(), "loaded contacts");
    Ok(contacts)
}

pub fn parse_json(contents: &str) -> Result<Vec<Contact>> {
    let parsed: JsonContacts = serde_json::from_str(contents)?;
    Ok(match parsed {
        JsonContacts::List(list) => list,
        JsonContacts::Wrapped { contacts } => contacts,
    })
}

pub fn parse_toml(contents: &str) -> Result<Vec<Contact>> {
    let parsed: TomlContacts = toml::from_str(contents)?;
    Ok(parsed.contact)
}

/// Reject empty keys and duplicate keys. Keys compare exactly.
pub fn validate_contacts(contacts: &[Contact]) -> Result<()> {
    let mut seen = HashSet::with_capacity(contacts.len());
    for contact in contacts {
        if contact.email.trim().is_empty() {
            return Err(ChipinError::ValidationError(format!(
                "contact '{}' has an empty email",
                contact.name
            )));
        }
        if !seen.insert(contact.key()) {
            return Err(ChipinError::DuplicateContact(contact.email.clone()));
        }
    }
    Ok(())
}
