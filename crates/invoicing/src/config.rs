//! Invoice hooks configuration.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

/// Environment variable overriding [`InvoiceHooksConfig::hooks_dir`].
pub const HOOKS_DIR_ENV: &str = "INVOICER_HOOKS_DIR";

/// Where the invoice hooks find templates and write their cache.
///
/// Paths are relative to the host application's working directory unless
/// `hooks_dir` is absolute.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct InvoiceHooksConfig {
    pub hooks_dir: PathBuf,
    /// Directory under `hooks_dir` holding one file per invoice template.
    pub template_subdir: String,
    pub template_extension: String,
    /// Cache file under `hooks_dir` read by the host's template drop-down.
    pub cache_file: String,
    pub delimiter: String,
    /// Filters page handed to the host on page init.
    pub filter_page: String,
}

impl Default for InvoiceHooksConfig {
    fn default() -> Self {
        Self {
            hooks_dir: PathBuf::from("hooks"),
            template_subdir: "invoice-templates".to_string(),
            template_extension: "php".to_string(),
            cache_file: "invoices.invoice_template.csv".to_string(),
            delimiter: ";;".to_string(),
            filter_page: "hooks/invoices_filter.php".to_string(),
        }
    }
}

impl InvoiceHooksConfig {
    /// Defaults rooted at `hooks_dir`.
    pub fn rooted_at(hooks_dir: impl Into<PathBuf>) -> Self {
        Self {
            hooks_dir: hooks_dir.into(),
            ..Self::default()
        }
    }

    /// Defaults, with the hooks root taken from `INVOICER_HOOKS_DIR` when set.
    pub fn from_env() -> Self {
        match std::env::var(HOOKS_DIR_ENV) {
            Ok(dir) if !dir.trim().is_empty() => Self::rooted_at(dir),
            _ => {
                tracing::debug!("{HOOKS_DIR_ENV} not set; using default hooks dir");
                Self::default()
            }
        }
    }

    /// Parse a JSON object; absent fields take their defaults.
    pub fn from_json_str(json: &str) -> serde_json::Result<Self> {
        serde_json::from_str(json)
    }

    pub fn hooks_dir(&self) -> &Path {
        &self.hooks_dir
    }

    pub fn template_dir(&self) -> PathBuf {
        self.hooks_dir.join(&self.template_subdir)
    }

    pub fn cache_path(&self) -> PathBuf {
        self.hooks_dir.join(&self.cache_file)
    }
}
