use super::Extractor;

impl Extractor {
    /// Matches North-American 10-digit numbers and keeps the ones whose
    /// area code is in the NANP table. Candidates are returned as the raw
    /// matched strings: formatting variants of one number are deliberately
    /// distinct records.
    pub fn extract_phones(&self, text: &str) -> Vec<String> {
        if !self.options().phones {
            return Vec::new();
        }

        self.phone_regex
            .find_iter(text)
            .filter_map(|m| {
                let raw = m.as_str();
                let digits: String = raw.chars().filter(|c| c.is_ascii_digit()).collect();
                let area_code: u16 = digits.get(..3)?.parse().ok()?;
                self.lookups()
                    .is_known_area_code(area_code)
                    .then(|| raw.to_string())
            })
            .collect()
    }
}
