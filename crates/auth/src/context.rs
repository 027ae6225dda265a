use std::collections::HashMap;
use std::sync::{Arc, PoisonError, RwLock};

use propfinder_core::Identity;

/// Shared handle on "who is logged in".
///
/// Cloning is cheap; all clones observe the same session. Readers get an
/// immutable [`Arc<Identity>`] snapshot, writers swap the whole snapshot, so a
/// reader never sees a half-updated identity.
#[derive(Debug, Clone, Default)]
pub struct SessionContext {
    current: Arc<RwLock<Option<Arc<Identity>>>>,
}

impl SessionContext {
    pub fn new() -> Self {
        Self::default()
    }

    /// Context pre-populated with an identity (tests, tooling).
    pub fn with_identity(identity: Identity) -> Self {
        let ctx = Self::new();
        ctx.set(Arc::new(identity));
        ctx
    }

    /// Current identity snapshot.
    pub fn snapshot(&self) -> Option<Arc<Identity>> {
        self.current
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    /// Publish a new identity, replacing the previous snapshot.
    pub(crate) fn set(&self, identity: Arc<Identity>) {
        *self.current.write().unwrap_or_else(PoisonError::into_inner) = Some(identity);
    }

    pub(crate) fn clear(&self) {
        *self.current.write().unwrap_or_else(PoisonError::into_inner) = None;
    }

    pub fn is_authenticated(&self) -> bool {
        self.snapshot()
            .is_some_and(|identity| !identity.token().is_empty())
    }

    /// `Authorization: Bearer <token>` for the current session, or an empty map.
    pub fn authorization_header(&self) -> HashMap<String, String> {
        authorization_header(self)
    }
}

/// Derive the bearer header from the session.
///
/// Computed from the live snapshot on every call; never cache the result
/// across requests since login/logout may happen in between.
pub fn authorization_header(ctx: &SessionContext) -> HashMap<String, String> {
    let mut headers = HashMap::new();
    if let Some(identity) = ctx.snapshot().filter(|i| !i.token().is_empty()) {
        headers.insert(
            "Authorization".to_string(),
            format!("Bearer {}", identity.token()),
        );
    }
    headers
}

#[cfg(test)]
mod tests {
    use super::*;
    use propfinder_core::UserId;

    fn identity(token: &str) -> Identity {
        Identity::new(UserId::new(7), "a@example.com", token).unwrap()
    }

    #[test]
    fn empty_context_has_no_header() {
        let ctx = SessionContext::new();
        assert!(!ctx.is_authenticated());
        assert!(ctx.authorization_header().is_empty());
    }

    #[test]
    fn header_follows_replacements() {
        let ctx = SessionContext::with_identity(identity("tok"));
        assert_eq!(
            ctx.authorization_header().get("Authorization").map(String::as_str),
            Some("Bearer tok")
        );

        ctx.set(Arc::new(identity("other")));
        assert_eq!(
            authorization_header(&ctx).get("Authorization").map(String::as_str),
            Some("Bearer other")
        );

        ctx.clear();
        assert!(authorization_header(&ctx).is_empty());
    }

    #[test]
    fn clones_share_state_and_snapshots_are_stable() {
        let ctx = SessionContext::with_identity(identity("tok"));
        let clone = ctx.clone();
        let before = clone.snapshot().unwrap();

        ctx.set(Arc::new(identity("fresh")));

        assert_eq!(before.token(), "tok");
        assert_eq!(clone.snapshot().unwrap().token(), "fresh");
    }
}
