use std::collections::HashMap;

use super::Extractor;
use crate::models::EntityHit;

/// Labels that never produce a lead.
const EXCLUDED_LABELS: [&str; 9] = [
    "DATE", "CARDINAL", "PRODUCT", "GPE", "ORG", "LANGUAGE", "MONEY", "NORP", "TIME",
];

impl Extractor {
    /// Filters the classifier's raw `text -> label` map down to entities
    /// worth reporting. The classifier itself is a collaborator; this only
    /// applies the label exclusions and the PERSON plausibility heuristic.
    pub fn filter_entities(&self, raw: &HashMap<String, String>) -> Vec<EntityHit> {
        if !self.options().entities {
            return Vec::new();
        }

        let mut hits: Vec<EntityHit> = raw
            .iter()
            .filter(|(text, label)| self.keep_entity(text.as_str(), label.as_str()))
            .map(|(text, label)| EntityHit {
                text: text.clone(),
                label: label.clone(),
            })
            .collect();
        // The classifier hands back an unordered map.
        hits.sort_by(|a, b| a.text.cmp(&b.text));
        hits
    }

    fn keep_entity(&self, text: &str, label: &str) -> bool {
        if EXCLUDED_LABELS.contains(&label) {
            return false;
        }
        if label == "PERSON" {
            return self.is_plausible_person(text);
        }
        true
    }

    /// A plausible person is "First Last" or "First M. Last" where the first
    /// token is a recognized first name.
    fn is_plausible_person(&self, text: &str) -> bool {
        let parts: Vec<&str> = text.split_whitespace().collect();
        match parts.as_slice() {
            [first, _last] => self.lookups().is_first_name(&first.to_lowercase()),
            [first, middle, _last] => {
                self.lookups().is_first_name(&first.to_lowercase()) && is_middle_initial(middle)
            }
            _ => false,
        }
    }
}

fn is_middle_initial(token: &str) -> bool {
    let mut chars = token.chars();
    matches!(
        (chars.next(), chars.next(), chars.next()),
        (Some(letter), Some('.'), None) if letter.is_ascii_uppercase()
    )
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use crate::extract::testing::extractor;
    use crate::models::ExtractOptions;

    fn run(entries: &[(&str, &str)]) -> Vec<(String, String)> {
        let raw: HashMap<String, String> = entries
            .iter()
            .map(|(text, label)| (text.to_string(), label.to_string()))
            .collect();
        extractor(ExtractOptions::default())
            .filter_entities(&raw)
            .into_iter()
            .map(|hit| (hit.text, hit.label))
            .collect()
    }

    #[test]
    fn excluded_labels_are_dropped() {
        assert!(run(&[
            ("last Tuesday", "DATE"),
            ("three", "CARDINAL"),
            ("Acme Corp", "ORG"),
            ("$40", "MONEY"),
        ])
        .is_empty());
    }

    #[test]
    fn non_excluded_labels_pass_through() {
        let found = run(&[("Golden Gate Bridge", "FAC")]);
        assert_eq!(found, vec![("Golden Gate Bridge".to_string(), "FAC".to_string())]);
    }

    #[test]
    fn two_token_person_needs_a_known_first_name() {
        assert_eq!(run(&[("Bob Smith", "PERSON")]).len(), 1);
        assert!(run(&[("Zorblax Smith", "PERSON")]).is_empty());
    }

    #[test]
    fn three_token_person_needs_a_middle_initial() {
        assert_eq!(run(&[("Bob X. Smith", "PERSON")]).len(), 1);
        assert!(run(&[("Bob Smith Jr", "PERSON")]).is_empty());
        assert!(run(&[("Bob x. Smith", "PERSON")]).is_empty());
    }

    #[test]
    fn one_and_four_token_persons_are_rejected() {
        assert!(run(&[("Bob", "PERSON")]).is_empty());
        assert!(run(&[("Bob X. Smith Sr.", "PERSON")]).is_empty());
    }
}
