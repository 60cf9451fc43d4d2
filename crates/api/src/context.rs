use hearth_core::UserId;

/// Authenticated identity for a request.
///
/// Set by the auth middleware. The family is resolved from it inside the
/// handler, not carried in the token.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct PrincipalContext {
    user_id: UserId,
}

impl PrincipalContext {
    pub fn new(user_id: UserId) -> Self {
        Self { user_id }
    }

    pub fn user_id(&self) -> UserId {
        self.user_id
    }
}
