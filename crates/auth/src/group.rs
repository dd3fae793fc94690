use std::borrow::Cow;

use serde::{Deserialize, Serialize};

/// Membership group of a member (the host's unit of permission assignment).
///
/// Groups are opaque names at this layer; two names are reserved by the host.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Group(Cow<'static, str>);

impl Group {
    pub const ADMINS: &'static str = "Admins";
    pub const ANONYMOUS: &'static str = "anonymous";

    pub fn new(name: impl Into<Cow<'static, str>>) -> Self {
        Self(name.into())
    }

    pub fn admins() -> Self {
        Self(Cow::Borrowed(Self::ADMINS))
    }

    pub fn anonymous() -> Self {
        Self(Cow::Borrowed(Self::ANONYMOUS))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn is_admins(&self) -> bool {
        self.as_str() == Self::ADMINS
    }
}

impl core::fmt::Display for Group {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(&self.0)
    }
}
