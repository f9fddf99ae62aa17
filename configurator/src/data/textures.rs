//! Fabric texture loader: dedicated thread + tokio runtime probing texture maps.

use std::path::{Path, PathBuf};
use std::thread;

use bevy::log::{error, warn};
use crossbeam_channel::Sender;

use crate::catalog::FabricMaps;
use crate::data::channel::{FabricChannel, FabricLoadResult, FabricRequest};
use crate::error::FabricLoadError;

const RESULT_BUFFER: usize = 64;

/// Resolves fabric texture maps off the main thread.
pub struct FabricLoader;

impl FabricLoader {
    pub fn spawn(asset_root: PathBuf) -> FabricChannel {
        let (request_tx, request_rx) = crossbeam_channel::unbounded::<FabricRequest>();
        let (result_tx, result_rx) = crossbeam_channel::bounded(RESULT_BUFFER);

        thread::spawn(move || {
            let rt = match tokio::runtime::Builder::new_current_thread()
                .enable_all()
                .build()
            {
                Ok(rt) => rt,
                Err(err) => {
                    error!("configurator: failed to build tokio runtime: {err}");
                    return;
                }
            };
            while let Ok(request) = request_rx.recv() {
                let result = rt.block_on(load_fabric(&asset_root, request));
                if send_result(&result_tx, result).is_err() {
                    return;
                }
            }
        });

        FabricChannel::new(request_tx, result_rx)
    }
}

/// Returns `Err(())` once the receiving side is gone.
fn send_result(tx: &Sender<FabricLoadResult>, result: FabricLoadResult) -> Result<(), ()> {
    if let Err(err) = &result.outcome {
        warn!(
            "configurator: fabric {} for {} failed to load: {err}",
            result.fabric, result.part
        );
    }
    tx.send(result).map_err(|_| ())
}

async fn load_fabric(asset_root: &Path, request: FabricRequest) -> FabricLoadResult {
    let maps = request.fabric.maps();
    let checked = tokio::try_join!(
        check_map(asset_root, &maps.color),
        check_map(asset_root, &maps.normal),
        check_map(asset_root, &maps.roughness),
        check_map(asset_root, &maps.env),
    );
    FabricLoadResult {
        part: request.part,
        fabric: request.fabric,
        outcome: checked.map(|_| maps),
    }
}

async fn check_map(asset_root: &Path, relative: &Path) -> Result<(), FabricLoadError> {
    let path = asset_root.join(relative);
    match tokio::fs::metadata(&path).await {
        Ok(meta) if meta.is_file() && meta.len() > 0 => Ok(()),
        Ok(_) => Err(FabricLoadError::MissingMap {
            path,
            reason: "not a non-empty file".to_string(),
        }),
        Err(err) => Err(FabricLoadError::MissingMap {
            path,
            reason: err.to_string(),
        }),
    }
}

/// Every map path of a fabric, for callers that want to pre-check assets.
pub fn map_paths(maps: &FabricMaps<PathBuf>) -> [&Path; 4] {
    [&maps.color, &maps.normal, &maps.roughness, &maps.env]
}
