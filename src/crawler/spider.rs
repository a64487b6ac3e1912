use std::collections::HashSet;

use url::Url;

use super::page::anchor_hrefs;

/// Same-domain link discovery for the spider.
///
/// Each anchor target is resolved against the page's own URL; a target
/// survives only when the resolved URL is http(s) and its host equals the
/// origin domain, which admits relative links and same-host absolute links
/// and drops everything else (cross-domain, mailto:, javascript:).
pub fn spider_targets(html: &str, page_url: &str, origin_domain: &str) -> Vec<String> {
    let base = match Url::parse(page_url) {
        Ok(base) => base,
        Err(_) => return Vec::new(),
    };

    let mut seen = HashSet::new();
    anchor_hrefs(html)
        .into_iter()
        .filter_map(|href| base.join(&href).ok())
        .filter(|url| {
            matches!(url.scheme(), "http" | "https") && url.host_str() == Some(origin_domain)
        })
        .map(|url| url.to_string())
        .filter(|url| seen.insert(url.clone()))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    const PAGE_URL: &str = "http://widgets.test/about";
    const ORIGIN: &str = "widgets.test";

    fn targets(html: &str) -> Vec<String> {
        spider_targets(html, PAGE_URL, ORIGIN)
    }

    #[test]
    fn follows_relative_links() {
        let found = targets(r#"<a href="/contact">c</a><a href="team.html">t</a>"#);
        assert_eq!(
            found,
            vec!["http://widgets.test/contact", "http://widgets.test/team.html"]
        );
    }

    #[test]
    fn follows_same_domain_absolute_links() {
        let found = targets(r#"<a href="http://widgets.test/staff">s</a>"#);
        assert_eq!(found, vec!["http://widgets.test/staff"]);
    }

    #[test]
    fn skips_cross_domain_absolute_links() {
        assert!(targets(r#"<a href="http://elsewhere.test/page">x</a>"#).is_empty());
    }

    #[test]
    fn skips_non_http_schemes() {
        let html = r#"<a href="mailto:a@widgets.test">m</a><a href="javascript:void(0)">j</a>"#;
        assert!(targets(html).is_empty());
    }

    #[test]
    fn deduplicates_within_a_page() {
        let found = targets(r#"<a href="/contact">a</a><a href="/contact">b</a>"#);
        assert_eq!(found, vec!["http://widgets.test/contact"]);
    }
}
