//! Sneaker configurator. Runs the configurator app.

use bevy::prelude::AppExit;
use configurator::prelude::*;

fn main() -> AppExit {
    let _ = dotenvy::dotenv();
    ConfiguratorBuilder::new().from_env().build().run()
}
