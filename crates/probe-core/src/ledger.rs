use async_trait::async_trait;

use crate::error::Result;
use crate::types::{ActivityRecord, Commitment, ProgramId, Signature};

/// Read-only view of a ledger's transaction history.
///
/// Implementations must bound every call with their own timeout; the poller
/// never wraps individual queries.
#[async_trait]
pub trait LedgerQuery: Send + Sync {
    /// Up to `limit` recent transaction handles touching `program`,
    /// most recent first.
    async fn list_recent(
        &self,
        program: &ProgramId,
        limit: usize,
        commitment: Commitment,
    ) -> Result<Vec<Signature>>;

    /// The full transaction for `signature`, or `None` while it is not yet
    /// visible at `commitment`.
    async fn get_record(
        &self,
        signature: &Signature,
        commitment: Commitment,
    ) -> Result<Option<ActivityRecord>>;
}

#[async_trait]
impl<L: LedgerQuery + ?Sized> LedgerQuery for &L {
    async fn list_recent(
        &self,
        program: &ProgramId,
        limit: usize,
        commitment: Commitment,
    ) -> Result<Vec<Signature>> {
        (**self).list_recent(program, limit, commitment).await
    }

    async fn get_record(
        &self,
        signature: &Signature,
        commitment: Commitment,
    ) -> Result<Option<ActivityRecord>> {
        (**self).get_record(signature, commitment).await
    }
}
