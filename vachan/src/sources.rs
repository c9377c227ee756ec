//! Attribution links for the references cited in a fact-check.

use once_cell::sync::Lazy;
use regex::Regex;
use serde::Serialize;

use crate::article::FactCheck;

static ORGANIZATION_SUFFIX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(
        r"(?i)^(.*?)\s+(?:official\s+)?(?:statement|press\s+release|clarification|report|analysis|validation\s+study)",
    )
    .expect("organization suffix pattern is valid")
});

static MINISTRY_SEPARATORS: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\s+of\s+|\s+and\s+|\s+").expect("ministry separator pattern is valid"));

static WHITESPACE: Lazy<Regex> = Lazy::new(|| Regex::new(r"\s+").expect("whitespace pattern is valid"));

/// Well-known organizations, checked in order against the lower-cased name.
const KNOWN_ORGANIZATIONS: &[(&[&str], &str)] = &[
    (&["supreme court"], "https://main.sci.gov.in/"),
    (&["isro"], "https://www.isro.gov.in/"),
    (&["pib", "press information bureau"], "https://pib.gov.in/"),
    (&["who"], "https://www.who.int/india"),
    (&["digital forensics"], "https://dflab.in/"),
    (&["election commission"], "https://eci.gov.in/"),
    (&["aiims"], "https://www.aiims.edu/"),
    (&["icmr"], "https://main.icmr.nic.in/"),
    (&["sebi"], "https://www.sebi.gov.in/"),
    (&["cyber"], "https://www.cybercrime.gov.in/"),
    (&["bar council"], "https://www.barcouncilofindia.org/"),
    (&["world bank"], "https://www.worldbank.org/en/country/india"),
    (&["rbi", "reserve bank"], "https://www.rbi.org.in/"),
    (&["nasa"], "https://www.nasa.gov/"),
];

/// A cited reference and the link it is attributed to
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SourceLink {
    pub name: String,
    pub url: String,
}

/// Organization behind a citation such as "ISRO official statement" or "WHO (Geneva)".
pub fn organization_name(source: &str) -> String {
    match ORGANIZATION_SUFFIX.captures(source).and_then(|c| c.get(1)) {
        Some(m) => m.as_str().trim().to_string(),
        None => source.split('(').next().unwrap_or_default().trim().to_string(),
    }
}

/// Best-effort homepage for the organization behind a citation.
pub fn source_url(source: &str) -> String {
    let organization = organization_name(source).to_lowercase();

    if organization.contains("ministry") {
        let slug = MINISTRY_SEPARATORS.replace_all(&organization, "-");
        return format!("https://www.{}.gov.in/", slug);
    }

    for (needles, url) in KNOWN_ORGANIZATIONS {
        if needles.iter().any(|n| organization.contains(n)) {
            return (*url).to_string();
        }
    }

    format!("https://www.{}.org/", WHITESPACE.replace_all(&organization, ""))
}

pub fn source_links(fact_check: &FactCheck) -> Vec<SourceLink> {
    fact_check
        .sources
        .iter()
        .map(|s| SourceLink {
            name: s.clone(),
            url: source_url(s),
        })
        .collect()
}
