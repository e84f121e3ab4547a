use reqwest::Url;

use crate::error::{Error, Result};

const PROTOCOLS: [&str; 3] = ["http", "https", "ftp"];

/// Pieces appended to a domain by [`build_url`].
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct UrlParts {
    /// Scheme used when the domain has none (default `https`).
    pub protocol: Option<String>,
    pub path: Option<String>,
    pub query: Option<String>,
    /// Query parameters; a key with several values is repeated.
    pub filters: Vec<(String, Vec<String>)>,
}

impl UrlParts {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn protocol(mut self, protocol: impl Into<String>) -> Self {
        self.protocol = Some(protocol.into());
        self
    }

    pub fn path(mut self, path: impl Into<String>) -> Self {
        self.path = Some(path.into());
        self
    }

    pub fn query(mut self, query: impl Into<String>) -> Self {
        self.query = Some(query.into());
        self
    }

    pub fn filter(mut self, key: impl Into<String>, value: impl ToString) -> Self {
        self.filters.push((key.into(), vec![value.to_string()]));
        self
    }

    pub fn filter_many<I, V>(mut self, key: impl Into<String>, values: I) -> Self
    where
        I: IntoIterator<Item = V>,
        V: ToString,
    {
        self.filters.push((key.into(), values.into_iter().map(|v| v.to_string()).collect()));
        self
    }
}

fn encode_filters(filters: &[(String, Vec<String>)]) -> Result<String> {
    let mut scratch = Url::parse("http://localhost/")
        .map_err(|e| Error::invalid(format!("URL encoder unavailable: {e}")))?;
    {
        let mut pairs = scratch.query_pairs_mut();
        for (key, values) in filters {
            for value in values {
                pairs.append_pair(key, value);
            }
        }
    }
    Ok(scratch.query().unwrap_or_default().to_string())
}

/// Compose `protocol://domain/path/query?filters`.
///
/// Filters are form-urlencoded. No `?` is inserted when the URL built so far
/// already ends with `?` or `/`.
pub fn build_url(domain: &str, parts: &UrlParts) -> Result<String> {
    let protocol = parts.protocol.as_deref().unwrap_or("https").to_ascii_lowercase();
    if !PROTOCOLS.contains(&protocol.as_str()) {
        return Err(Error::invalid(format!("Web protocol not recognised: '{protocol}'")));
    }

    let domain = domain.trim().trim_matches('/');
    let mut url = match domain.split_once("://") {
        Some((scheme, _)) if PROTOCOLS.contains(&scheme.to_ascii_lowercase().as_str()) => domain.to_string(),
        Some((scheme, _)) => return Err(Error::invalid(format!("Web protocol not recognised: '{scheme}'"))),
        None => format!("{protocol}://{domain}"),
    };

    for segment in [&parts.path, &parts.query].into_iter().flatten() {
        if !segment.is_empty() {
            url.push('/');
            url.push_str(segment.trim_start_matches('/'));
        }
    }

    if !parts.filters.is_empty() {
        if !(url.ends_with('?') || url.ends_with('/')) {
            url.push('?');
        }
        url.push_str(&encode_filters(&parts.filters)?);
    }

    Url::parse(&url).map_err(|e| Error::invalid(format!("Invalid URL '{url}': {e}")))?;
    Ok(url)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn eurostat_query() {
        let parts = UrlParts::new()
            .protocol("http")
            .path("wdds/rest/data/v2.1/json/en")
            .query("ilc_li03")
            .filter("precision", 1)
            .filter("indic_il", "LI_R_MD60")
            .filter("time", 2015);
        assert_eq!(
            build_url("ec.europa.eu/eurostat/", &parts).unwrap(),
            "http://ec.europa.eu/eurostat/wdds/rest/data/v2.1/json/en/ilc_li03?precision=1&indic_il=LI_R_MD60&time=2015"
        );
    }

    #[test]
    fn filters_are_encoded_and_replicated() {
        let parts = UrlParts::new().query("api").filter("q", "Berlin Germany").filter_many("geo", ["DE", "FR"]);
        assert_eq!(
            build_url("https://europa.eu/webtools/rest/gisco", &parts).unwrap(),
            "https://europa.eu/webtools/rest/gisco/api?q=Berlin+Germany&geo=DE&geo=FR"
        );
    }

    #[test]
    fn trailing_separator_suppresses_question_mark() {
        let parts = UrlParts::new().query("search?").filter("limit", 2);
        assert_eq!(build_url("example.org", &parts).unwrap(), "https://example.org/search?limit=2");
        let parts = UrlParts::new().path("items/").filter("limit", 2);
        assert_eq!(build_url("example.org", &parts).unwrap(), "https://example.org/items/limit=2");
    }

    #[test]
    fn unknown_protocols_are_rejected() {
        assert!(build_url("example.org", &UrlParts::new().protocol("gopher")).is_err());
        assert!(build_url("file:///etc", &UrlParts::new()).is_err());
        assert_eq!(build_url("ftp://mirror.example", &UrlParts::new()).unwrap(), "ftp://mirror.example");
    }
}
