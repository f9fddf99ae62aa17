use std::path::PathBuf;

use crossbeam_channel::{Receiver, Sender};

use crate::catalog::{Fabric, FabricMaps};
use crate::data::textures::FabricLoader;
use crate::error::FabricLoadError;
use crate::part::Part;

/// Asks the loader thread for a fabric's texture maps on behalf of a part.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct FabricRequest {
    pub part: Part,
    pub fabric: Fabric,
}

/// Reply for one [`FabricRequest`]. On success `outcome` holds the
/// asset-relative paths of the four maps, all verified to exist.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FabricLoadResult {
    pub part: Part,
    pub fabric: Fabric,
    pub outcome: Result<FabricMaps<PathBuf>, FabricLoadError>,
}

/// Bevy resource holding both ends of the fabric loader channels.
/// Requests go out from event handlers; `apply_loaded_fabrics` drains replies.
#[derive(bevy::prelude::Resource)]
pub struct FabricChannel {
    requests: Sender<FabricRequest>,
    results: Receiver<FabricLoadResult>,
}

impl FabricChannel {
    pub(crate) fn new(requests: Sender<FabricRequest>, results: Receiver<FabricLoadResult>) -> Self {
        Self { requests, results }
    }

    pub fn request(&self, part: Part, fabric: Fabric) -> Result<(), FabricLoadError> {
        self.requests
            .send(FabricRequest { part, fabric })
            .map_err(|_| FabricLoadError::WorkerGone)
    }

    /// Next finished load, if any. Never blocks.
    pub fn try_next(&self) -> Option<FabricLoadResult> {
        self.results.try_recv().ok()
    }

    /// Blocking receive, for tests and headless callers.
    pub fn recv_timeout(&self, timeout: std::time::Duration) -> Option<FabricLoadResult> {
        self.results.recv_timeout(timeout).ok()
    }
}

/// Spawn the fabric loader thread rooted at the asset directory.
pub fn init_fabric_channel(asset_root: impl Into<PathBuf>) -> FabricChannel {
    FabricLoader::spawn(asset_root.into())
}
