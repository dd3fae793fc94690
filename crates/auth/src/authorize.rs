use std::collections::HashMap;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use invoicer_core::{DomainError, RecordId};

use crate::{Group, MemberInfo, Operation, PermissionScope, TablePermissions};

/// Who owns a record, as written by the host after each insert.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RecordOwner {
    pub username: String,
    pub group: Group,
}

impl RecordOwner {
    pub fn new(username: impl Into<String>, group: Group) -> Self {
        Self {
            username: username.into(),
            group,
        }
    }

    pub fn of(member: &MemberInfo) -> Self {
        Self::new(member.username.clone(), member.group.clone())
    }
}

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum AuthzError {
    #[error("forbidden: no '{op}' permission on table '{table}'")]
    NoTablePermission { table: String, op: Operation },

    #[error("forbidden: record {id} of table '{table}' has no owner on file")]
    UnknownOwner { table: String, id: RecordId },

    #[error("forbidden: '{username}' may not {op} record {id} of table '{table}'")]
    NotPermitted {
        table: String,
        id: RecordId,
        username: String,
        op: Operation,
    },
}

impl From<AuthzError> for DomainError {
    fn from(value: AuthzError) -> Self {
        DomainError::forbidden(value.to_string())
    }
}

/// Decide whether `member` may touch a record owned by `owner` under `scope`.
///
/// - No IO
/// - No panics
/// - `owner` is only consulted for the owner/group scopes
pub fn authorize(
    scope: PermissionScope,
    member: &MemberInfo,
    owner: Option<&RecordOwner>,
) -> bool {
    match scope {
        PermissionScope::None => false,
        PermissionScope::All => true,
        PermissionScope::Owner => owner.is_some_and(|o| o.username == member.username),
        PermissionScope::Group => owner.is_some_and(|o| o.group == member.group),
    }
}

/// Record-level permission check used by hooks.
///
/// The host provides the real implementation (backed by its membership
/// tables); [`AccessPolicy`] is the in-process one.
pub trait RecordAccess: Send + Sync {
    fn check(
        &self,
        member: &MemberInfo,
        table: &str,
        id: RecordId,
        op: Operation,
    ) -> Result<(), AuthzError>;

    fn can_view(&self, member: &MemberInfo, table: &str, id: RecordId) -> bool {
        self.check(member, table, id, Operation::View).is_ok()
    }
}

impl<T: RecordAccess + ?Sized> RecordAccess for std::sync::Arc<T> {
    fn check(
        &self,
        member: &MemberInfo,
        table: &str,
        id: RecordId,
        op: Operation,
    ) -> Result<(), AuthzError> {
        (**self).check(member, table, id, op)
    }
}

/// In-memory group permissions plus record ownership.
///
/// Members of [`Group::ADMINS`] see everything regardless of grants.
#[derive(Debug, Clone, Default)]
pub struct AccessPolicy {
    grants: HashMap<(Group, String), TablePermissions>,
    owners: HashMap<(String, RecordId), RecordOwner>,
}

impl AccessPolicy {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn grant(mut self, group: Group, table: impl Into<String>, perms: TablePermissions) -> Self {
        self.grants.insert((group, table.into()), perms);
        self
    }

    /// Record an ownership write for `table`/`id`, replacing any previous owner.
    pub fn set_owner(&mut self, table: impl Into<String>, id: RecordId, owner: RecordOwner) {
        self.owners.insert((table.into(), id), owner);
    }

    pub fn with_owner(mut self, table: impl Into<String>, id: RecordId, owner: RecordOwner) -> Self {
        self.set_owner(table, id, owner);
        self
    }

    pub fn owner(&self, table: &str, id: RecordId) -> Option<&RecordOwner> {
        self.owners.get(&(table.to_string(), id))
    }

    pub fn table_permissions(&self, member: &MemberInfo, table: &str) -> TablePermissions {
        if member.is_admin() {
            return TablePermissions::all();
        }

        self.grants
            .get(&(member.group.clone(), table.to_string()))
            .copied()
            .unwrap_or_default()
    }
}

impl RecordAccess for AccessPolicy {
    fn check(
        &self,
        member: &MemberInfo,
        table: &str,
        id: RecordId,
        op: Operation,
    ) -> Result<(), AuthzError> {
        let scope = self.table_permissions(member, table).scope(op);
        if scope == PermissionScope::None {
            return Err(AuthzError::NoTablePermission {
                table: table.to_string(),
                op,
            });
        }

        let owner = self.owner(table, id);
        if scope != PermissionScope::All && owner.is_none() {
            return Err(AuthzError::UnknownOwner {
                table: table.to_string(),
                id,
            });
        }

        if authorize(scope, member, owner) {
            Ok(())
        } else {
            tracing::debug!(table, %id, username = %member.username, %op, ?scope, "record access denied");
            Err(AuthzError::NotPermitted {
                table: table.to_string(),
                id,
                username: member.username.clone(),
                op,
            })
        }
    }
}
