//! Rebuild the invoice template option cache outside a page request.
//!
//! Reads the hooks root from `INVOICER_HOOKS_DIR` (default `hooks`).

use anyhow::Context;

use invoicer_invoicing::{InvoiceHooksConfig, TemplateCache};

fn main() -> anyhow::Result<()> {
    invoicer_observability::init();

    let config = InvoiceHooksConfig::from_env();
    let cache = TemplateCache::new(&config);
    let labels = cache
        .refresh()
        .with_context(|| format!("refreshing templates under {}", config.hooks_dir().display()))?;

    tracing::info!(
        path = %cache.cache_path().display(),
        count = labels.len(),
        "invoice template cache refreshed"
    );
    Ok(())
}
