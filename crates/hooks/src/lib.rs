//! `invoicer-hooks` — the contract between a host CRUD engine and per-table
//! lifecycle hooks.
//!
//! The host calls these at fixed points: page init, header/footer rendering,
//! before/after insert, update and delete, detail-view rendering, CSV export
//! and batch-action listing. Host in/out parameters are modeled as owned
//! inputs and returned values.

pub mod batch;
pub mod context;
pub mod html;
pub mod render;
pub mod table;
pub mod translation;

pub use batch::{BatchAction, BatchSlots};
pub use context::HookContext;
pub use render::{ContentType, RenderOptions};
pub use table::{DeletePlan, HookResult, TableHooks, effective_csv_query};
pub use translation::{Translation, TranslationError};
