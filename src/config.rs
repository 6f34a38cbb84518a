//! Command-line configuration

use std::path::PathBuf;

pub const DEFAULT_BASE_URL: &str = "https://pokeapi.co/api/v2/pokemon/";
pub const DEFAULT_LIMIT: u32 = 150;
pub const DEFAULT_LOG_FILE: &str = "dexview.log";

/// Catalog and logging flags, flattened into the binary's argument parser
#[derive(clap::Args, Clone, Debug)]
pub struct CatalogArgs {
    /// List endpoint queried for the catalog
    #[arg(long, default_value = DEFAULT_BASE_URL)]
    pub base_url: String,

    /// Number of creatures requested from the list endpoint (minimum 1)
    #[arg(long, default_value_t = DEFAULT_LIMIT, value_parser = clap::value_parser!(u32).range(1..))]
    pub limit: u32,

    /// File receiving log output (the terminal is owned by the UI)
    #[arg(long, default_value = DEFAULT_LOG_FILE)]
    pub log_file: PathBuf,

    /// Log filter directive, e.g. `info` or `dexview=debug`
    #[arg(long, default_value = "info")]
    pub log_level: String,
}

/// Where the catalog lives and how much of it to request
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CatalogConfig {
    pub base_url: String,
    pub limit: u32,
}

impl CatalogConfig {
    pub fn new(base_url: impl Into<String>, limit: u32) -> Self {
        Self {
            base_url: base_url.into(),
            limit: limit.max(1),
        }
    }

    /// Full list request URL: `{base_url}?limit={limit}`
    pub fn list_url(&self) -> String {
        let separator = if self.base_url.contains('?') { '&' } else { '?' };
        format!("{}{separator}limit={}", self.base_url, self.limit)
    }
}

impl Default for CatalogConfig {
    fn default() -> Self {
        Self::new(DEFAULT_BASE_URL, DEFAULT_LIMIT)
    }
}

impl From<&CatalogArgs> for CatalogConfig {
    fn from(args: &CatalogArgs) -> Self {
        Self::new(args.base_url.clone(), args.limit)
    }
}
