use std::path::PathBuf;

use anyhow::Result;
use framepace::engine::core::DemoConfig;
use framepace::engine::platform::PlatformLayer;
use framepace::engine::DemoApp;

fn main() -> Result<()> {
    framepace::telemetry::init_tracing();

    let config = match std::env::args_os().nth(1).map(PathBuf::from) {
        Some(path) => DemoConfig::load(&path)?,
        None => DemoConfig::default(),
    };
    let platform = PlatformLayer::new(config.display);
    let mut app = DemoApp::new(config, platform)?;
    app.run()
}
