mod events;
mod gui;
mod sys;

use clap::Parser;
use gui::app::{AppInit, AppModel};
use relm4::prelude::*;
use std::path::PathBuf;
use wordwheel::Candidate;
use wordwheel::settings;

#[derive(Parser, Debug)]
#[command(version, about = "Press-and-hold radial word picker")]
struct Cli {
    /// Settings file to load and watch instead of the default location
    #[arg(short = 's', long)]
    settings: Option<PathBuf>,

    /// Word to offer, in rank order. Overrides the words from settings
    #[arg(short = 'w', long = "word")]
    words: Vec<String>,

    /// Write the bundled settings file if none exists, then exit
    #[arg(long)]
    write_default_settings: bool,
}

fn main() -> anyhow::Result<()> {
    env_logger::init();
    let cli = Cli::parse();

    let settings_path = match &cli.settings {
        Some(p) => std::path::absolute(p)?,
        None => settings::get_settings_path()?,
    };

    settings::write_default_settings_to(&settings_path)?;
    if cli.write_default_settings {
        println!("{}", settings_path.display());
        return Ok(());
    }

    let settings = settings::load_or_default(Some(&settings_path));
    let words = (!cli.words.is_empty())
        .then(|| cli.words.iter().map(Candidate::word).collect::<Vec<_>>());

    let (tx, rx) = async_channel::bounded(64);

    // Start Background Services
    let runtime = sys::runtime::start_background_services(tx.clone(), settings_path.clone())?;
    let adapter = gui::app::build_adapter(
        &settings,
        words.as_deref(),
        runtime.handle().clone(),
        &tx,
    )?;

    let app = RelmApp::new("org.wordwheel.demo").with_args(Vec::new());
    app.run::<AppModel>(AppInit {
        adapter,
        layout: settings.layout,
        settings_path,
        words,
        tx,
        rx,
    });

    drop(runtime);
    Ok(())
}
