use invoicer_auth::MemberInfo;

/// Per-call context: who is acting.
///
/// The host's reserved argument bag carries nothing for the shipped tables,
/// so it is not modeled.
#[derive(Debug, Clone, Copy)]
pub struct HookContext<'a> {
    member: &'a MemberInfo,
}

impl<'a> HookContext<'a> {
    pub fn new(member: &'a MemberInfo) -> Self {
        Self { member }
    }

    pub fn member(&self) -> &'a MemberInfo {
        self.member
    }
}
