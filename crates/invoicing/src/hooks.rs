use invoicer_auth::{Operation, RecordAccess};
use invoicer_core::{DomainError, RecordId};
use invoicer_hooks::html::translation_script;
use invoicer_hooks::{
    BatchAction, BatchSlots, ContentType, HookContext, HookResult, RenderOptions, TableHooks,
    Translation,
};

use crate::templates::{TemplateCache, TemplateCacheError};
use crate::{InvoiceHooksConfig, InvoiceRecord};

pub const INVOICES_TABLE: &str = "invoices";
pub const CLIENTS_TABLE: &str = "clients";

/// Host command key of the "Mark as paid" mass update.
pub const MARK_AS_PAID: &str = "1nvkk0q0ckqc7b8migay";
/// Host command key of the "Mark as cancelled" mass update.
pub const MARK_AS_CANCELLED: &str = "xe0xlisfn56ps9sp3p76";

fn mass_update_action(title: &str, command: &str, icon: &str) -> BatchAction {
    BatchAction::new(title, format!("massUpdateCommand_{command}")).with_icon(icon)
}

/// Hooks for the `invoices` table.
///
/// `A` answers whether the acting member can see a given client.
#[derive(Debug, Clone)]
pub struct InvoiceHooks<A> {
    access: A,
    config: InvoiceHooksConfig,
    templates: TemplateCache,
    translation: Translation,
}

impl<A: RecordAccess> InvoiceHooks<A> {
    pub fn new(access: A, config: InvoiceHooksConfig) -> Self {
        Self {
            access,
            templates: TemplateCache::new(&config),
            config,
            translation: Translation::english(),
        }
    }

    pub fn with_translation(mut self, translation: Translation) -> Self {
        self.translation = translation;
        self
    }

    pub fn config(&self) -> &InvoiceHooksConfig {
        &self.config
    }

    pub fn templates(&self) -> &TemplateCache {
        &self.templates
    }

    /// Rescan invoice templates and rewrite the option cache.
    pub fn refresh_templates(&self) -> Result<Vec<String>, TemplateCacheError> {
        self.templates.refresh()
    }

    /// Invariant: an invoice may only point at a client the member can view.
    fn check_client(&self, ctx: &HookContext<'_>, record: &InvoiceRecord) -> HookResult<()> {
        let member = ctx.member();
        let Some(client) = record.client else {
            tracing::info!(table = INVOICES_TABLE, username = %member.username, "invoice without client rejected");
            return Err(DomainError::forbidden("invoice has no client"));
        };

        self.access
            .check(member, CLIENTS_TABLE, client, Operation::View)
            .map_err(|e| {
                tracing::info!(
                    table = INVOICES_TABLE,
                    client = %client,
                    username = %member.username,
                    error = %e,
                    "invoice client not visible to member"
                );
                DomainError::from(e)
            })
    }
}

impl<A: RecordAccess> TableHooks for InvoiceHooks<A> {
    type Record = InvoiceRecord;

    fn table_name(&self) -> &'static str {
        INVOICES_TABLE
    }

    fn init(&self, _ctx: &HookContext<'_>, mut options: RenderOptions) -> HookResult<RenderOptions> {
        options.filter_page = Some(self.config.filter_page.clone());

        // The form still renders with a stale or empty list.
        if let Err(e) = self.templates.refresh() {
            tracing::warn!(error = %e, "invoice template cache not refreshed");
        }

        Ok(options)
    }

    fn header(&self, _ctx: &HookContext<'_>, content: ContentType) -> Option<String> {
        match content {
            ContentType::TableView
            | ContentType::DetailView
            | ContentType::TableAndDetailView
            | ContentType::PrintTableView
            | ContentType::PrintDetailView
            | ContentType::Filters => None,
        }
    }

    fn footer(&self, _ctx: &HookContext<'_>, content: ContentType) -> Option<String> {
        match content {
            ContentType::TableView
            | ContentType::DetailView
            | ContentType::TableAndDetailView
            | ContentType::PrintTableView
            | ContentType::PrintDetailView
            | ContentType::Filters => None,
        }
    }

    fn before_insert(&self, ctx: &HookContext<'_>, record: InvoiceRecord) -> HookResult<InvoiceRecord> {
        self.check_client(ctx, &record)?;
        Ok(record)
    }

    fn before_update(&self, ctx: &HookContext<'_>, record: InvoiceRecord) -> HookResult<InvoiceRecord> {
        self.check_client(ctx, &record)?;
        Ok(record)
    }

    fn detail_view(&self, _ctx: &HookContext<'_>, id: Option<RecordId>, mut html: String) -> String {
        match translation_script([("back", self.translation.get("Back"))]) {
            Ok(script) => html.push_str(&script),
            Err(e) => tracing::warn!(id = ?id, error = %e, "detail view translations not added"),
        }
        html
    }

    fn batch_actions(&self, ctx: &HookContext<'_>, slots: BatchSlots) -> Vec<BatchAction> {
        if !ctx.member().is_authenticated() {
            return slots.splice([]);
        }

        slots.splice([
            mass_update_action("Mark as paid", MARK_AS_PAID, "ok"),
            mass_update_action("Mark as cancelled", MARK_AS_CANCELLED, "remove"),
        ])
    }
}
