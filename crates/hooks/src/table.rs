//! Per-table lifecycle hook contract.

use serde::{Deserialize, Serialize};

use invoicer_core::{DomainError, RecordId};

use crate::{BatchAction, BatchSlots, ContentType, HookContext, RenderOptions};

/// Result of a hook that may veto the host operation.
///
/// `Err` means "do not proceed"; the host surfaces its own message.
pub type HookResult<T> = Result<T, DomainError>;

/// What the host should do when deleting a record.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeletePlan {
    /// Skip the host's check for child records referencing this one.
    pub skip_child_checks: bool,
}

/// Lifecycle hooks for one host table.
///
/// Every method defaults to "proceed, change nothing", so a table only
/// overrides the events it cares about. Hooks are stateless per call and may
/// be invoked more than once for a single logical action.
pub trait TableHooks: Send + Sync {
    /// Field set of one row of this table.
    type Record;

    fn table_name(&self) -> &'static str;

    /// Before any page of the table renders. `Err` aborts the render.
    fn init(&self, _ctx: &HookContext<'_>, options: RenderOptions) -> HookResult<RenderOptions> {
        Ok(options)
    }

    /// `None` keeps the host's default header.
    fn header(&self, _ctx: &HookContext<'_>, _content: ContentType) -> Option<String> {
        None
    }

    /// `None` keeps the host's default footer.
    fn footer(&self, _ctx: &HookContext<'_>, _content: ContentType) -> Option<String> {
        None
    }

    /// Returns the record to insert. `Err` cancels the insert.
    fn before_insert(&self, _ctx: &HookContext<'_>, record: Self::Record) -> HookResult<Self::Record> {
        Ok(record)
    }

    /// `record` carries the id the host assigned. `Err` skips the ownership write.
    fn after_insert(&self, _ctx: &HookContext<'_>, _record: &Self::Record) -> HookResult<()> {
        Ok(())
    }

    /// Returns the record to store. `Err` cancels the update.
    fn before_update(&self, _ctx: &HookContext<'_>, record: Self::Record) -> HookResult<Self::Record> {
        Ok(record)
    }

    /// `Err` skips the ownership write.
    fn after_update(&self, _ctx: &HookContext<'_>, _record: &Self::Record) -> HookResult<()> {
        Ok(())
    }

    /// `Err` cancels the delete.
    fn before_delete(&self, _ctx: &HookContext<'_>, _id: RecordId) -> HookResult<DeletePlan> {
        Ok(DeletePlan::default())
    }

    fn after_delete(&self, _ctx: &HookContext<'_>, _id: RecordId) {}

    /// Returns the detail-view HTML; `id` is `None` for a new record form.
    fn detail_view(&self, _ctx: &HookContext<'_>, _id: Option<RecordId>, html: String) -> String {
        html
    }

    /// Returns the query used for CSV export. Empty keeps the host default.
    fn csv_query(&self, _ctx: &HookContext<'_>, query: String) -> String {
        query
    }

    fn batch_actions(&self, _ctx: &HookContext<'_>, slots: BatchSlots) -> Vec<BatchAction> {
        slots.splice([])
    }
}

/// The query the host should run after a CSV hook returned `returned`.
pub fn effective_csv_query(default: String, returned: String) -> String {
    if returned.trim().is_empty() { default } else { returned }
}

#[cfg(test)]
mod tests {
    use invoicer_auth::MemberInfo;

    use super::*;

    struct Plain;

    impl TableHooks for Plain {
        type Record = String;

        fn table_name(&self) -> &'static str {
            "plain"
        }
    }

    #[test]
    fn defaults_proceed_without_changes() {
        let member = MemberInfo::guest();
        let ctx = HookContext::new(&member);

        assert_eq!(Plain.before_insert(&ctx, "row".into()).unwrap(), "row");
        assert_eq!(Plain.before_update(&ctx, "row".into()).unwrap(), "row");
        assert!(Plain.after_insert(&ctx, &"row".into()).is_ok());
        assert!(Plain.after_update(&ctx, &"row".into()).is_ok());
        assert_eq!(
            Plain.before_delete(&ctx, RecordId::new(1)).unwrap(),
            DeletePlan { skip_child_checks: false }
        );
        assert_eq!(Plain.header(&ctx, ContentType::TableView), None);
        assert_eq!(Plain.detail_view(&ctx, None, "<p>".into()), "<p>");
        assert!(Plain.batch_actions(&ctx, BatchSlots::new()).is_empty());
    }

    #[test]
    fn empty_csv_override_keeps_default() {
        assert_eq!(effective_csv_query("SELECT 1".into(), "  ".into()), "SELECT 1");
        assert_eq!(effective_csv_query("SELECT 1".into(), "SELECT 2".into()), "SELECT 2");
    }
}
