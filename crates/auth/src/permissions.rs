use serde::{Deserialize, Serialize};

use invoicer_core::DomainError;

/// Record operation a permission applies to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Operation {
    View,
    Edit,
    Delete,
}

impl Operation {
    pub fn as_str(self) -> &'static str {
        match self {
            Operation::View => "view",
            Operation::Edit => "edit",
            Operation::Delete => "delete",
        }
    }
}

impl core::fmt::Display for Operation {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Which records of a table an operation is allowed on.
///
/// The host stores these as `0..=3`; the numeric form round-trips through
/// [`PermissionScope::level`] and `TryFrom<u8>`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PermissionScope {
    #[default]
    None,
    /// Records owned by the member.
    Owner,
    /// Records owned by anyone in the member's group.
    Group,
    All,
}

impl PermissionScope {
    pub fn level(self) -> u8 {
        match self {
            PermissionScope::None => 0,
            PermissionScope::Owner => 1,
            PermissionScope::Group => 2,
            PermissionScope::All => 3,
        }
    }
}

impl TryFrom<u8> for PermissionScope {
    type Error = DomainError;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        match value {
            0 => Ok(PermissionScope::None),
            1 => Ok(PermissionScope::Owner),
            2 => Ok(PermissionScope::Group),
            3 => Ok(PermissionScope::All),
            other => Err(DomainError::validation(format!(
                "permission level must be 0..=3, got {other}"
            ))),
        }
    }
}

/// A group's permissions on one table.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TablePermissions {
    #[serde(default)]
    pub insert: bool,
    #[serde(default)]
    pub view: PermissionScope,
    #[serde(default)]
    pub edit: PermissionScope,
    #[serde(default)]
    pub delete: PermissionScope,
}

impl TablePermissions {
    pub fn all() -> Self {
        Self {
            insert: true,
            view: PermissionScope::All,
            edit: PermissionScope::All,
            delete: PermissionScope::All,
        }
    }

    pub fn view_only(scope: PermissionScope) -> Self {
        Self {
            view: scope,
            ..Self::default()
        }
    }

    pub fn scope(&self, op: Operation) -> PermissionScope {
        match op {
            Operation::View => self.view,
            Operation::Edit => self.edit,
            Operation::Delete => self.delete,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn scope_levels_round_trip() {
        for level in 0..=3u8 {
            let scope = PermissionScope::try_from(level).unwrap();
            assert_eq!(scope.level(), level);
        }
    }

    #[test]
    fn out_of_range_level_is_rejected() {
        let err = PermissionScope::try_from(4).unwrap_err();
        assert!(matches!(err, DomainError::Validation(_)));
    }

    #[test]
    fn missing_fields_default_to_no_access() {
        let perms: TablePermissions = serde_json::from_str(r#"{"view":"group"}"#).unwrap();
        assert_eq!(perms.scope(Operation::View), PermissionScope::Group);
        assert_eq!(perms.scope(Operation::Edit), PermissionScope::None);
        assert!(!perms.insert);
    }
}
