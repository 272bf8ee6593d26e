use testimonials_auth::PrincipalId;

/// Principal context for a request (authenticated identity).
///
/// Inserted by the auth middleware; only present on guarded routes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PrincipalContext {
    principal_id: PrincipalId,
}

impl PrincipalContext {
    pub fn new(principal_id: PrincipalId) -> Self {
        Self { principal_id }
    }

    pub fn principal_id(&self) -> &PrincipalId {
        &self.principal_id
    }
}
