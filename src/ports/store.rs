//! Store port for policy persistence.

use std::path::Path;

use crate::{Result, persistence::SavedPolicy};

/// Port for persisting and loading finished policies.
///
/// The encoding is up to the implementation; the only requirement is that
/// `load` after `save` returns an equal [`SavedPolicy`].
///
/// # Examples
///
/// ```no_run
/// use noughts::{persistence::SavedPolicy, ports::PolicyStore};
/// use std::path::Path;
///
/// fn archive<S: PolicyStore>(store: &S, saved: &SavedPolicy) -> noughts::Result<()> {
///     store.save(saved, Path::new("policies/value_iteration.msgpack"))
/// }
/// ```
pub trait PolicyStore {
    /// Save a policy envelope.
    ///
    /// # Errors
    ///
    /// Returns an error if the location cannot be written or serialization fails.
    fn save(&self, saved: &SavedPolicy, path: &Path) -> Result<()>;

    /// Load a policy envelope.
    ///
    /// # Errors
    ///
    /// Returns an error if nothing is stored at `path`, the data is corrupted,
    /// or it was written by an unsupported format version.
    fn load(&self, path: &Path) -> Result<SavedPolicy>;

    /// Whether a policy is stored at `path`
    fn exists(&self, path: &Path) -> bool;
}
