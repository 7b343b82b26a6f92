use crate::*;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use url::Url;


#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
/// Site entry, as defined in configuration
pub struct SiteEntry {
    /// Human readable site name
    pub name: String,

    /// Literal site URL
    #[serde(skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,

    /// Environment variable overriding the literal URL
    #[serde(skip_serializing_if = "Option::is_none")]
    pub env: Option<String>,
}


impl SiteEntry {
    /// Resolve URL: environment first, then literal. Empty values count as unset.
    pub fn resolve_url<F>(&self, lookup: &F) -> Option<String>
    where
        F: Fn(&str) -> Option<String>,
    {
        self.env
            .as_deref()
            .and_then(lookup)
            .or_else(|| self.url.clone())
            .map(|url| url.trim().to_string())
            .filter(|url| !url.is_empty())
    }
}


/// Built-in entries used when configuration lists no sites
pub fn default_site_entries() -> Vec<SiteEntry> {
    DEFAULT_SITES
        .iter()
        .map(|(name, variable)| {
            SiteEntry {
                name: name.to_string(),
                url: None,
                env: Some(variable.to_string()),
            }
        })
        .collect()
}


#[derive(Debug, Clone, PartialEq, Eq)]
/// Monitored site
pub struct Site {
    /// Human readable site name
    pub name: String,

    /// Absolute http(s) URL
    pub url: Url,
}


impl Site {
    /// New site
    pub fn new(name: &str, url: Url) -> Site {
        Site {
            name: name.to_string(),
            url,
        }
    }
}


/// Parses absolute http(s) URL with a host
pub fn parse_http_url(value: &str) -> Result<Url, String> {
    let url = Url::parse(value).map_err(|err| err.to_string())?;
    match url.scheme() {
        "http" | "https" if url.host_str().is_some() => Ok(url),
        "http" | "https" => Err(String::from("URL has no host")),
        scheme => Err(format!("unsupported scheme: {}", scheme)),
    }
}


#[derive(Debug, Clone, Default, PartialEq, Eq)]
/// Ordered, immutable list of monitored sites
pub struct Registry(Vec<Site>);


impl Registry {
    /// Build registry from configured entries, collecting every problem found
    pub fn from_entries<F>(entries: &[SiteEntry], lookup: &F) -> Result<Registry, Vec<ConfigIssue>>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut issues = vec![];
        let mut names = HashSet::new();
        let mut sites = vec![];
        for entry in entries {
            let name = entry.name.trim();
            if name.is_empty() {
                issues.push(ConfigIssue::UnnamedSite);
                continue;
            }
            if !names.insert(name.to_string()) {
                issues.push(ConfigIssue::DuplicateSite(name.to_string()));
                continue;
            }
            match entry.resolve_url(lookup) {
                Some(value) => {
                    match parse_http_url(&value) {
                        Ok(url) => sites.push(Site::new(name, url)),
                        Err(reason) => {
                            issues.push(ConfigIssue::InvalidUrl(name.to_string(), value, reason))
                        }
                    }
                }
                None => issues.push(ConfigIssue::MissingUrl(name.to_string(), entry.env.clone())),
            }
        }
        if issues.is_empty() {
            Ok(Registry(sites))
        } else {
            Err(issues)
        }
    }


    /// Registered sites, in configuration order
    pub fn sites(&self) -> &[Site] {
        &self.0
    }


    /// Registry length
    pub fn len(&self) -> usize {
        self.0.len()
    }


    /// No sites registered
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}


impl From<Vec<Site>> for Registry {
    fn from(sites: Vec<Site>) -> Registry {
        Registry(sites)
    }
}
