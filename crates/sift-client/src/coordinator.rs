//! Edit-sequence coordination for in-flight validity checks.
//!
//! Interactive editing can start a new check before the previous one
//! resolves. Correctness requires "last normalized-and-confirmed tree wins":
//! a response that arrives for a superseded tree must be discarded, not
//! applied. Trees are immutable values, so no locking is involved; an atomic
//! edit counter is the whole mechanism.

use std::sync::atomic::{AtomicU64, Ordering};

use tracing::debug;

use sift_expr::FilterNode;

use crate::client::CanonicalAuthority;
use crate::error::Error;

/// Serializes validity checks against a monotonically increasing edit
/// sequence.
pub struct CheckCoordinator<A> {
    authority: A,
    edit_seq: AtomicU64,
}

impl<A: CanonicalAuthority> CheckCoordinator<A> {
    /// Create a coordinator over an authority.
    pub fn new(authority: A) -> Self {
        Self {
            authority,
            edit_seq: AtomicU64::new(0),
        }
    }

    /// Record a new edit and return its sequence number.
    ///
    /// Call this every time the local tree changes identity; any check begun
    /// under an earlier number is thereby superseded.
    pub fn begin_edit(&self) -> u64 {
        self.edit_seq.fetch_add(1, Ordering::SeqCst) + 1
    }

    /// The sequence number of the most recent edit.
    pub fn current_edit(&self) -> u64 {
        self.edit_seq.load(Ordering::SeqCst)
    }

    /// Run a validity check on behalf of the given edit.
    ///
    /// If a newer edit began while the check was in flight, the authority's
    /// result — canonical tree or rejection alike — is discarded and
    /// [`Error::Superseded`] is returned instead.
    pub async fn check_validity(
        &self,
        edit: u64,
        filter: &FilterNode,
    ) -> Result<FilterNode, Error> {
        let result = self.authority.check(filter).await;

        let current = self.current_edit();
        if current != edit {
            debug!(edit, current, "discarding superseded validity check");
            return Err(Error::Superseded);
        }
        result
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::protocol::RemoteIssue;
    use std::future::Future;

    /// Echoes the tree back, like an authority with a fully live schema.
    struct EchoAuthority;

    impl CanonicalAuthority for EchoAuthority {
        fn check(
            &self,
            filter: &FilterNode,
        ) -> impl Future<Output = Result<FilterNode, Error>> + Send {
            let canonical = filter.clone();
            async move { Ok(canonical) }
        }
    }

    /// Rejects everything, like an authority whose schema dropped a column.
    struct RejectingAuthority;

    impl CanonicalAuthority for RejectingAuthority {
        fn check(
            &self,
            _filter: &FilterNode,
        ) -> impl Future<Output = Result<FilterNode, Error>> + Send {
            async move {
                Err(Error::Rejected(vec![RemoteIssue {
                    path: vec![],
                    field: Some("retired_column".into()),
                    message: "unknown column".into(),
                }]))
            }
        }
    }

    fn filter() -> FilterNode {
        FilterNode::is_one_of("topic", vec!["economy".into()])
    }

    #[tokio::test]
    async fn current_edit_check_applies() {
        let coordinator = CheckCoordinator::new(EchoAuthority);
        let edit = coordinator.begin_edit();

        let canonical = coordinator.check_validity(edit, &filter()).await.unwrap();
        assert_eq!(canonical, filter());
    }

    #[tokio::test]
    async fn superseded_check_is_discarded() {
        let coordinator = CheckCoordinator::new(EchoAuthority);
        let stale = coordinator.begin_edit();
        let newer = coordinator.begin_edit();
        assert!(newer > stale);

        let err = coordinator.check_validity(stale, &filter()).await.unwrap_err();
        assert!(matches!(err, Error::Superseded));

        // The newer edit's check still applies.
        let canonical = coordinator.check_validity(newer, &filter()).await.unwrap();
        assert_eq!(canonical, filter());
    }

    #[tokio::test]
    async fn rejection_surfaces_for_current_edit_only() {
        let coordinator = CheckCoordinator::new(RejectingAuthority);
        let stale = coordinator.begin_edit();

        let err = coordinator.check_validity(stale, &filter()).await.unwrap_err();
        assert!(matches!(err, Error::Rejected(ref issues) if issues.len() == 1));

        // Once superseded, even a rejection is discarded rather than shown.
        coordinator.begin_edit();
        let err = coordinator.check_validity(stale, &filter()).await.unwrap_err();
        assert!(matches!(err, Error::Superseded));
    }

    #[test]
    fn edit_sequence_is_monotonic() {
        let coordinator = CheckCoordinator::new(EchoAuthority);
        assert_eq!(coordinator.current_edit(), 0);
        assert_eq!(coordinator.begin_edit(), 1);
        assert_eq!(coordinator.begin_edit(), 2);
        assert_eq!(coordinator.current_edit(), 2);
    }
}
