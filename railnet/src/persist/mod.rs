//! Snapshot persistence.
//!
//! The whole network is loaded once at startup and saved once at shutdown.
//! A missing or malformed snapshot is not an error: the process starts
//! from an empty network and says so in the log.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use tracing::{info, warn};

use crate::network::Network;

/// Error returned when saving a snapshot fails.
#[derive(Debug, thiserror::Error)]
pub enum PersistError {
    #[error("failed to encode network snapshot: {0}")]
    Encode(#[from] serde_json::Error),

    #[error("failed to write snapshot to {}: {source}", .path.display())]
    Write {
        path: PathBuf,
        source: io::Error,
    },
}

/// Restore the network from `path`, or start empty.
pub fn load_or_default(path: &Path) -> Network {
    let bytes = match fs::read(path) {
        Ok(bytes) => bytes,
        Err(err) if err.kind() == io::ErrorKind::NotFound => {
            info!(path = %path.display(), "no snapshot found, starting empty");
            return Network::new();
        }
        Err(err) => {
            warn!(path = %path.display(), error = %err, "snapshot unreadable, starting empty");
            return Network::new();
        }
    };

    match serde_json::from_slice::<Network>(&bytes) {
        Ok(network) => {
            info!(
                path = %path.display(),
                lines = network.line_count(),
                stations = network.station_count(),
                "network restored"
            );
            network
        }
        Err(err) => {
            warn!(path = %path.display(), error = %err, "snapshot malformed, starting empty");
            Network::new()
        }
    }
}

/// Persist the network to `path`.
pub fn save(path: &Path, network: &Network) -> Result<(), PersistError> {
    let json = serde_json::to_vec_pretty(network)?;
    fs::write(path, json).map_err(|source| PersistError::Write {
        path: path.to_path_buf(),
        source,
    })?;
    info!(
        path = %path.display(),
        lines = network.line_count(),
        stations = network.station_count(),
        "network persisted"
    );
    Ok(())
}
