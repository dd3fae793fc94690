use serde::{Deserialize, Serialize};

use crate::Group;

/// Metadata about the member on whose behalf a hook runs.
///
/// Supplied by the host for every call and never mutated by hooks.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MemberInfo {
    pub username: String,
    pub group: Group,
}

impl MemberInfo {
    pub const GUEST_USERNAME: &'static str = "guest";

    pub fn new(username: impl Into<String>, group: Group) -> Self {
        Self {
            username: username.into(),
            group,
        }
    }

    /// The member the host uses for visitors who have not signed in.
    pub fn guest() -> Self {
        Self::new(Self::GUEST_USERNAME, Group::anonymous())
    }

    /// True for a signed-in member: non-empty username that is not `guest`.
    pub fn is_authenticated(&self) -> bool {
        !self.username.is_empty() && self.username != Self::GUEST_USERNAME
    }

    pub fn is_admin(&self) -> bool {
        self.group.is_admins()
    }
}
