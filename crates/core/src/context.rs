use crate::id::{FamilyId, UserId};

/// Family context for a request.
///
/// Immutable once resolved, and passed explicitly to every family-scoped read
/// and to the projection engine. Nothing recovers it from ambient state.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct FamilyContext {
    family_id: FamilyId,
    user_id: UserId,
}

impl FamilyContext {
    pub fn new(family_id: FamilyId, user_id: UserId) -> Self {
        Self { family_id, user_id }
    }

    pub fn family_id(&self) -> FamilyId {
        self.family_id
    }

    /// The authenticated user that resolved this family.
    pub fn user_id(&self) -> UserId {
        self.user_id
    }
}
