use crate::events::AppEvent;
use async_channel::Sender;
use std::path::PathBuf;
use tokio::runtime::{Builder, Runtime};

/// Starts the background runtime. Activation timers and the settings
/// watcher run here and report back to the UI thread over `tx`.
pub fn start_background_services(
    tx: Sender<AppEvent>,
    settings_path: PathBuf,
) -> std::io::Result<Runtime> {
    let rt = Builder::new_multi_thread()
        .worker_threads(1)
        .thread_name("wordwheel-bg")
        .enable_all()
        .build()?;

    rt.spawn(crate::sys::watcher::run_async_watcher(tx, settings_path));

    Ok(rt)
}
