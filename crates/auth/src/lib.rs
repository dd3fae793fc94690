//! `invoicer-auth` — member identity and record-level permission checks.
//!
//! This crate is intentionally decoupled from the host's session handling and
//! storage: the host hands in a [`MemberInfo`] and an ownership source.

pub mod authorize;
pub mod group;
pub mod member;
pub mod permissions;

pub use authorize::{AccessPolicy, AuthzError, RecordAccess, RecordOwner, authorize};
pub use group::Group;
pub use member::MemberInfo;
pub use permissions::{Operation, PermissionScope, TablePermissions};
