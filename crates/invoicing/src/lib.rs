//! Invoice table hooks.
//!
//! Implements the host lifecycle contract for the `invoices` table: the
//! client-visibility guard on insert/update, the invoice template option
//! cache refreshed on page init, the detail-view translation script and the
//! "mark as paid/cancelled" batch actions.

pub mod config;
pub mod hooks;
pub mod invoice;
pub mod templates;

mod host_format;

pub use config::InvoiceHooksConfig;
pub use hooks::{CLIENTS_TABLE, INVOICES_TABLE, InvoiceHooks, MARK_AS_CANCELLED, MARK_AS_PAID};
pub use invoice::{InvoiceRecord, InvoiceStatus};
pub use templates::{TemplateCache, TemplateCacheError, template_label};
