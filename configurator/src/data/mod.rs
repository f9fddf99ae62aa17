mod channel;
mod model;
mod store;
mod textures;

pub use channel::{init_fabric_channel, FabricChannel, FabricLoadResult, FabricRequest};
pub use model::SavedConfiguration;
pub use store::{ConfigStore, JsonFileStore, MemoryStore, StoreResource};
pub use textures::{map_paths, FabricLoader};
