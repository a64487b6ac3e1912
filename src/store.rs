use std::collections::{HashMap, HashSet};
use std::sync::{Mutex, MutexGuard};

use crate::models::{EntityHit, OutputRow};

/// Attribution for an accepted fact: (source title, source link).
type Source = (String, String);

#[derive(Debug, Default)]
struct Maps {
    emails: HashMap<String, Source>,
    phones: HashMap<String, Source>,
    entities: HashMap<String, (String, String, String)>,
    visited: HashSet<String>,
}

/// Owns the deduplication maps and the visited-URL set for one run.
///
/// Every insert is first-write-wins: a key seen again keeps its original
/// source attribution. All engine tasks share one store; the mutex keeps
/// critical sections to a single map operation.
#[derive(Debug, Default)]
pub struct RecordStore {
    inner: Mutex<Maps>,
}

impl RecordStore {
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> MutexGuard<'_, Maps> {
        match self.inner.lock() {
            Ok(guard) => guard,
            Err(poisoned) => poisoned.into_inner(),
        }
    }

    /// Returns true if the email was newly recorded.
    pub fn accept_email(&self, email: &str, title: &str, link: &str) -> bool {
        let mut maps = self.lock();
        if maps.emails.contains_key(email) {
            return false;
        }
        maps.emails
            .insert(email.to_string(), (title.to_string(), link.to_string()));
        true
    }

    pub fn contains_email(&self, email: &str) -> bool {
        self.lock().emails.contains_key(email)
    }

    /// Keyed by the raw matched string, not normalized digits, so formatting
    /// variants of one number are distinct records.
    pub fn accept_phone(&self, phone: &str, title: &str, link: &str) -> bool {
        let mut maps = self.lock();
        if maps.phones.contains_key(phone) {
            return false;
        }
        maps.phones
            .insert(phone.to_string(), (title.to_string(), link.to_string()));
        true
    }

    pub fn accept_entity(&self, text: &str, label: &str, title: &str, link: &str) -> bool {
        let mut maps = self.lock();
        if maps.entities.contains_key(text) {
            return false;
        }
        maps.entities.insert(
            text.to_string(),
            (label.to_string(), title.to_string(), link.to_string()),
        );
        true
    }

    /// Marks a URL as visited by the spider. Returns false if it was already
    /// there; the set only grows.
    pub fn mark_visited(&self, url: &str) -> bool {
        self.lock().visited.insert(url.to_string())
    }

    pub fn counts(&self) -> (usize, usize, usize) {
        let maps = self.lock();
        (maps.emails.len(), maps.phones.len(), maps.entities.len())
    }

    /// Groups everything accepted so far by source link: one row per
    /// distinct link with at least one record. Rows and the lists inside
    /// them are sorted so repeated snapshots are stable.
    pub fn by_link(&self) -> Vec<OutputRow> {
        let maps = self.lock();
        let mut rows: HashMap<String, OutputRow> = HashMap::new();

        for (email, (title, link)) in &maps.emails {
            row_for(&mut rows, link, title).emails.push(email.clone());
        }
        for (phone, (title, link)) in &maps.phones {
            row_for(&mut rows, link, title).phones.push(phone.clone());
        }
        for (text, (label, title, link)) in &maps.entities {
            row_for(&mut rows, link, title).entities.push(EntityHit {
                text: text.clone(),
                label: label.clone(),
            });
        }
        drop(maps);

        let mut rows: Vec<OutputRow> = rows.into_values().collect();
        for row in &mut rows {
            row.emails.sort();
            row.phones.sort();
            row.entities.sort_by(|a, b| a.text.cmp(&b.text));
        }
        rows.sort_by(|a, b| a.link.cmp(&b.link));
        rows
    }
}

fn row_for<'a>(
    rows: &'a mut HashMap<String, OutputRow>,
    link: &str,
    title: &str,
) -> &'a mut OutputRow {
    rows.entry(link.to_string()).or_insert_with(|| OutputRow {
        title: title.to_string(),
        link: link.to_string(),
        emails: Vec::new(),
        phones: Vec::new(),
        entities: Vec::new(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn first_write_wins() {
        let store = RecordStore::new();
        assert!(store.accept_email("a@b.com", "First", "http://one.test"));
        assert!(!store.accept_email("a@b.com", "Second", "http://two.test"));

        let rows = store.by_link();
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].title, "First");
        assert_eq!(rows[0].link, "http://one.test");
    }

    #[test]
    fn phone_keys_are_raw_strings() {
        let store = RecordStore::new();
        assert!(store.accept_phone("(202) 555-0199", "T", "http://l.test"));
        assert!(store.accept_phone("202-555-0199", "T", "http://l.test"));
        assert_eq!(store.counts().1, 2);
    }

    #[test]
    fn visited_set_only_grows() {
        let store = RecordStore::new();
        assert!(store.mark_visited("http://a.test/x"));
        assert!(!store.mark_visited("http://a.test/x"));
        assert!(store.mark_visited("http://a.test/y"));
    }

    #[test]
    fn by_link_groups_all_three_kinds() {
        let store = RecordStore::new();
        store.accept_email("a@b.com", "Page", "http://l.test");
        store.accept_email("c@d.com", "Page", "http://l.test");
        store.accept_phone("202-555-0100", "Page", "http://l.test");
        store.accept_entity("Bob Smith", "PERSON", "Page", "http://l.test");
        store.accept_email("z@y.com", "Other", "http://m.test");

        let rows = store.by_link();
        assert_eq!(rows.len(), 2);

        let first = &rows[0];
        assert_eq!(first.link, "http://l.test");
        assert_eq!(first.emails, vec!["a@b.com", "c@d.com"]);
        assert_eq!(first.phones, vec!["202-555-0100"]);
        assert_eq!(first.entities.len(), 1);
        assert_eq!(first.entities[0].label, "PERSON");

        assert_eq!(rows[1].link, "http://m.test");
        assert!(rows[1].phones.is_empty());
    }
}
