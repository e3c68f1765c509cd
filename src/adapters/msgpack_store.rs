//! MessagePack implementation of the policy store.
//!
//! This adapter implements the PolicyStore port using rmp_serde for compact
//! binary serialization.

use std::{
    fs::{self, File},
    io::{BufReader, BufWriter, Write},
    path::Path,
};

use log::info;

use crate::{Result, error::Error, persistence::SavedPolicy, ports::PolicyStore};

/// MessagePack-based policy store.
///
/// # Examples
///
/// ```no_run
/// use noughts::adapters::MsgPackPolicyStore;
/// use noughts::persistence::{Method, SavedPolicy};
/// use noughts::ports::PolicyStore;
/// use noughts::tables::Policy;
/// use std::path::Path;
///
/// let store = MsgPackPolicyStore;
/// let saved = SavedPolicy::new(Method::ValueIteration, Policy::new());
///
/// store.save(&saved, Path::new("policies/dp.msgpack"))?;
/// let loaded = store.load(Path::new("policies/dp.msgpack"))?;
/// assert_eq!(loaded, saved);
/// # Ok::<(), noughts::Error>(())
/// ```
#[derive(Debug, Clone, Copy, Default)]
pub struct MsgPackPolicyStore;

impl MsgPackPolicyStore {
    /// Create a new MessagePack store.
    pub fn new() -> Self {
        Self
    }
}

impl PolicyStore for MsgPackPolicyStore {
    fn save(&self, saved: &SavedPolicy, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent).map_err(|source| Error::Io {
                operation: format!("create directory {parent:?}"),
                source,
            })?;
        }

        let file = File::create(path).map_err(|source| Error::Io {
            operation: format!("create file {path:?}"),
            source,
        })?;
        let mut writer = BufWriter::new(file);

        rmp_serde::encode::write(&mut writer, saved).map_err(|e| {
            Error::SerializationContext {
                operation: "serialize policy to MessagePack".to_string(),
                message: e.to_string(),
            }
        })?;
        writer.flush().map_err(|source| Error::Io {
            operation: format!("flush file {path:?}"),
            source,
        })?;

        info!(
            "saved {} policy ({} states) to {}",
            saved.method,
            saved.policy.len(),
            path.display()
        );
        Ok(())
    }

    fn load(&self, path: &Path) -> Result<SavedPolicy> {
        let file = File::open(path).map_err(|source| Error::Io {
            operation: format!("open file {path:?}"),
            source,
        })?;

        let saved: SavedPolicy = rmp_serde::decode::from_read(BufReader::new(file)).map_err(|e| {
            Error::SerializationContext {
                operation: "deserialize policy from MessagePack".to_string(),
                message: e.to_string(),
            }
        })?;
        saved.check_version()?;

        info!(
            "loaded {} policy ({} states) from {}",
            saved.method,
            saved.policy.len(),
            path.display()
        );
        Ok(saved)
    }

    fn exists(&self, path: &Path) -> bool {
        path.is_file()
    }
}
