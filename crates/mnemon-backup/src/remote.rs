use async_trait::async_trait;
use mnemon_core::Result;

/// A remote content-addressed store with revision-conditioned writes.
///
/// Writes against an existing blob must carry the blob's current revision
/// token; the remote rejects stale tokens as a conflict
/// ([`mnemon_core::MnemonError::RemoteConflict`]). A write without a token
/// is a file creation. Two concurrent get-then-put sequences race by
/// construction; last writer wins, which is acceptable since each push
/// carries the full current content.
#[async_trait]
pub trait RemoteStore: Send + Sync {
    /// Current revision token for `path`. Absence of the blob is `None`,
    /// not an error.
    async fn fetch_revision(&self, path: &str) -> Result<Option<String>>;

    /// Create or update the blob at `path`, conditioned on `revision` when
    /// supplied. Returns the new revision token.
    async fn push(
        &self,
        path: &str,
        content: &[u8],
        message: &str,
        revision: Option<&str>,
    ) -> Result<String>;
}
