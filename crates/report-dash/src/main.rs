mod bootstrap;

use anyhow::{bail, Context, Result};
use dash_core::settings::Settings;
use dash_data::ingest::ingest;
use dash_ui::app::App;

fn main() -> Result<()> {
    let settings = Settings::load_with_last_used();

    bootstrap::ensure_directories()?;
    bootstrap::setup_logging(&settings.log_level, settings.log_file.as_ref())?;

    tracing::info!("Report Dash v{} starting", env!("CARGO_PKG_VERSION"));
    tracing::info!(
        "Theme: {}, Log level: {}",
        settings.theme,
        settings.log_level
    );

    if settings.clear {
        println!("Saved configuration cleared.");
        if settings.file.is_none() {
            return Ok(());
        }
    }

    let Some(path) = settings.file.as_ref() else {
        bail!("no input file given; pass the path to Reports_Metric_Table_Demo.csv");
    };

    // Validation runs against the file name alone; the directory it sits in
    // does not matter.
    let filename = path
        .file_name()
        .map(|n| n.to_string_lossy().to_string())
        .unwrap_or_default();

    let bytes =
        std::fs::read(path).with_context(|| format!("reading {}", path.display()))?;

    let table = match ingest(&bytes, &filename) {
        Ok(table) => table,
        Err(err) => {
            // Upload rejection is an expected user-facing outcome, not an
            // internal failure, so print the message and stop.
            eprintln!("{err}");
            std::process::exit(1);
        }
    };

    tracing::info!("{} rows ready for exploration", table.len());

    let app = App::new(&settings.theme, table);
    app.run()?;

    Ok(())
}
