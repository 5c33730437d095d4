use crate::events::AppEvent;
use async_channel::Sender;
use notify::{Event, EventKind, RecommendedWatcher, RecursiveMode, Watcher};
use std::path::{Path, PathBuf};
use std::time::Duration;

/// Editors tend to write a file as several events; they collapse into one reload.
const SETTLE: Duration = Duration::from_millis(120);

fn touches_settings(event: &Event, settings_path: &Path) -> bool {
    let relevant = matches!(
        event.kind,
        EventKind::Modify(_) | EventKind::Create(_) | EventKind::Remove(_)
    );
    relevant && event.paths.iter().any(|p| p == settings_path)
}

/// Posts `SettingsReload` whenever the settings file changes on disk.
pub async fn run_async_watcher(tx: Sender<AppEvent>, settings_path: PathBuf) {
    let Some(dir) = settings_path.parent().map(Path::to_path_buf) else {
        log::warn!("Settings path {} has no parent, not watching", settings_path.display());
        return;
    };

    if let Err(e) = fs_err::create_dir_all(&dir) {
        log::error!("Cannot watch settings: {}", e);
        return;
    }

    let (raw_tx, raw_rx) = async_channel::unbounded::<notify::Result<Event>>();
    let watcher = RecommendedWatcher::new(
        move |res| {
            let _ = raw_tx.send_blocking(res);
        },
        notify::Config::default(),
    )
    .and_then(|mut w| w.watch(&dir, RecursiveMode::NonRecursive).map(|()| w));

    // dropping the watcher stops delivery, so it lives for the whole loop
    let _watcher = match watcher {
        Ok(w) => w,
        Err(e) => {
            log::error!("Failed to watch {}: {}", dir.display(), e);
            return;
        }
    };
    log::debug!("Watching {}", settings_path.display());

    loop {
        match raw_rx.recv().await {
            Ok(Ok(event)) if touches_settings(&event, &settings_path) => {}
            Ok(Ok(_)) => continue,
            Ok(Err(e)) => {
                log::warn!("Settings watch error: {}", e);
                continue;
            }
            Err(_) => break,
        }

        tokio::time::sleep(SETTLE).await;
        while raw_rx.try_recv().is_ok() {}

        if tx.send(AppEvent::SettingsReload).await.is_err() {
            break;
        }
    }
}
