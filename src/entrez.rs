//! Minimal blocking client for the NCBI Entrez E-utilities.
//!
//! Three calls are supported: a taxonomy lookup (`efetch` on `db=taxonomy`),
//! a history-server search (`esearch` on `db=nucleotide`) and the paginated
//! record fetch (`efetch rettype=gb retmode=text`). The XML response parsers
//! are plain functions so they stay testable on fixture strings.

use crate::record::{SequenceRecord, parse_genbank_records};
use anyhow::{Result, anyhow};
use log::debug;
use serde::Deserialize;
use std::{thread, time::Duration};

pub const EUTILS_BASE_URL: &str = "https://eutils.ncbi.nlm.nih.gov/entrez/eutils";

const FETCH_PAGE_SIZE: u64 = 100;
const FETCH_PAGE_DELAY: Duration = Duration::from_millis(400);

/// Caller identification sent with every E-utilities request.
#[derive(Clone, Debug)]
pub struct EntrezConfig {
    pub email: String,
    pub api_key: String,
    pub tool: String,
}

impl EntrezConfig {
    pub fn new(email: String, api_key: String) -> Self {
        EntrezConfig {
            email,
            api_key,
            tool: "bioscript".to_string(),
        }
    }
}

/// History-server handle returned by a search; immutable, passed explicitly
/// into the fetch call.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SearchSession {
    pub count: u64,
    pub web_env: String,
    pub query_key: String,
}

/// A search that completed without a transport or parse error. Zero matches
/// and request failure are distinct outcomes; the latter is an `Err`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum SearchOutcome {
    Matches(SearchSession),
    NoMatches,
}

pub struct EntrezClient {
    http: reqwest::blocking::Client,
    config: EntrezConfig,
    base_url: String,
}

impl EntrezClient {
    pub fn new(config: EntrezConfig) -> Self {
        EntrezClient {
            http: reqwest::blocking::Client::new(),
            config,
            base_url: EUTILS_BASE_URL.to_string(),
        }
    }

    /// Resolves a taxonomic id to the organism's scientific name.
    pub fn taxonomy_name(&self, taxid: &str) -> Result<String> {
        let text = self.get_text(
            "efetch.fcgi",
            &[
                ("db", "taxonomy".to_string()),
                ("id", taxid.to_string()),
                ("retmode", "xml".to_string()),
            ],
        )?;
        parse_taxonomy_scientific_name(&text)
    }

    /// Issues a filtered nucleotide search against the history server.
    pub fn search_nucleotide(
        &self,
        taxid: &str,
        min_len: u64,
        max_len: u64,
    ) -> Result<SearchOutcome> {
        if min_len > max_len {
            return Err(anyhow!(
                "Minimum length {min_len} exceeds maximum length {max_len}"
            ));
        }
        let text = self.get_text(
            "esearch.fcgi",
            &[
                ("db", "nucleotide".to_string()),
                ("term", search_term(taxid, min_len, max_len)),
                ("usehistory", "y".to_string()),
            ],
        )?;
        parse_search_outcome(&text)
    }

    /// Pages through the search result in fixed-size batches until the total
    /// count is exhausted or `max_records` accumulated records is reached.
    /// The batch that crosses the cap is appended whole before the loop
    /// breaks. A fixed 400 ms pause separates page requests; this is a rate
    /// limit courtesy, not adaptive backoff.
    pub fn fetch_records(
        &self,
        session: &SearchSession,
        max_records: usize,
    ) -> Result<Vec<SequenceRecord>> {
        let mut records = Vec::new();
        let mut start = 0u64;
        while start < session.count {
            if start > 0 {
                thread::sleep(FETCH_PAGE_DELAY);
            }
            let text = self.get_text(
                "efetch.fcgi",
                &[
                    ("db", "nucleotide".to_string()),
                    ("rettype", "gb".to_string()),
                    ("retmode", "text".to_string()),
                    ("retstart", start.to_string()),
                    ("retmax", FETCH_PAGE_SIZE.to_string()),
                    ("WebEnv", session.web_env.clone()),
                    ("query_key", session.query_key.clone()),
                ],
            )?;
            let batch = parse_genbank_records(&text)?;
            records.extend(batch);
            println!("Fetched {} / {}", records.len(), session.count);
            if records.len() >= max_records {
                break;
            }
            start += FETCH_PAGE_SIZE;
        }
        Ok(records)
    }

    fn get_text(&self, endpoint: &str, params: &[(&str, String)]) -> Result<String> {
        let url = format!("{}/{endpoint}", self.base_url);
        debug!("GET {url} ({} params)", params.len());
        let response = self
            .http
            .get(&url)
            .query(&[
                ("tool", self.config.tool.as_str()),
                ("email", self.config.email.as_str()),
                ("api_key", self.config.api_key.as_str()),
            ])
            .query(params)
            .send()
            .map_err(|e| anyhow!("Could not reach Entrez endpoint '{endpoint}': {e}"))?
            .error_for_status()
            .map_err(|e| anyhow!("Entrez request '{endpoint}' failed: {e}"))?;
        response
            .text()
            .map_err(|e| anyhow!("Could not read Entrez response from '{endpoint}': {e}"))
    }
}

/// Filter expression combining taxonomic scope and an inclusive length range.
pub fn search_term(taxid: &str, min_len: u64, max_len: u64) -> String {
    format!("txid{taxid}[Organism] AND {min_len}:{max_len}[Sequence Length]")
}

#[derive(Debug, Deserialize)]
#[serde(rename = "TaxaSet")]
struct TaxaSetXml {
    #[serde(rename = "Taxon", default)]
    taxa: Vec<TaxonXml>,
}

#[derive(Debug, Deserialize)]
struct TaxonXml {
    #[serde(rename = "ScientificName")]
    scientific_name: Option<String>,
}

pub fn parse_taxonomy_scientific_name(xml: &str) -> Result<String> {
    let parsed: TaxaSetXml =
        quick_xml::de::from_str(xml).map_err(|e| anyhow!("Malformed taxonomy XML: {e}"))?;
    parsed
        .taxa
        .first()
        .and_then(|taxon| taxon.scientific_name.clone())
        .map(|name| name.trim().to_string())
        .filter(|name| !name.is_empty())
        .ok_or_else(|| anyhow!("Taxonomy XML contains no scientific name"))
}

#[derive(Debug, Deserialize)]
#[serde(rename = "eSearchResult")]
struct ESearchResultXml {
    #[serde(rename = "Count")]
    count: u64,
    #[serde(rename = "WebEnv")]
    web_env: Option<String>,
    #[serde(rename = "QueryKey")]
    query_key: Option<String>,
}

pub fn parse_search_outcome(xml: &str) -> Result<SearchOutcome> {
    let parsed: ESearchResultXml =
        quick_xml::de::from_str(xml).map_err(|e| anyhow!("Malformed esearch XML: {e}"))?;
    if parsed.count == 0 {
        return Ok(SearchOutcome::NoMatches);
    }
    let web_env = parsed
        .web_env
        .filter(|value| !value.trim().is_empty())
        .ok_or_else(|| anyhow!("Search result is missing the WebEnv token"))?;
    let query_key = parsed
        .query_key
        .filter(|value| !value.trim().is_empty())
        .ok_or_else(|| anyhow!("Search result is missing the QueryKey token"))?;
    Ok(SearchOutcome::Matches(SearchSession {
        count: parsed.count,
        web_env,
        query_key,
    }))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_search_term_format() {
        assert_eq!(
            search_term("9606", 1000, 2000),
            "txid9606[Organism] AND 1000:2000[Sequence Length]"
        );
    }

    #[test]
    fn test_parse_taxonomy_scientific_name() {
        let xml = r#"<?xml version="1.0"?>
<TaxaSet>
  <Taxon>
    <TaxId>9606</TaxId>
    <ScientificName>Homo sapiens</ScientificName>
    <Rank>species</Rank>
  </Taxon>
</TaxaSet>"#;
        assert_eq!(
            parse_taxonomy_scientific_name(xml).expect("parse taxonomy"),
            "Homo sapiens"
        );
    }

    #[test]
    fn test_parse_taxonomy_without_name() {
        let xml = "<TaxaSet></TaxaSet>";
        let err = parse_taxonomy_scientific_name(xml).expect_err("empty TaxaSet");
        assert!(err.to_string().contains("no scientific name"));
    }

    #[test]
    fn test_parse_search_outcome_matches() {
        let xml = r#"<?xml version="1.0"?>
<eSearchResult>
  <Count>342</Count>
  <RetMax>20</RetMax>
  <RetStart>0</RetStart>
  <QueryKey>1</QueryKey>
  <WebEnv>MCID_abc123</WebEnv>
</eSearchResult>"#;
        let outcome = parse_search_outcome(xml).expect("parse esearch");
        assert_eq!(
            outcome,
            SearchOutcome::Matches(SearchSession {
                count: 342,
                web_env: "MCID_abc123".to_string(),
                query_key: "1".to_string(),
            })
        );
    }

    #[test]
    fn test_parse_search_outcome_no_matches() {
        let xml = "<eSearchResult><Count>0</Count></eSearchResult>";
        assert_eq!(
            parse_search_outcome(xml).expect("parse esearch"),
            SearchOutcome::NoMatches
        );
    }

    #[test]
    fn test_parse_search_outcome_missing_tokens() {
        let xml = "<eSearchResult><Count>5</Count></eSearchResult>";
        let err = parse_search_outcome(xml).expect_err("missing WebEnv");
        assert!(err.to_string().contains("WebEnv"));
    }
}
