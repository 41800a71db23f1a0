mod bootstrap;
mod report;

use std::sync::Arc;

use anyhow::Result;
use sales_core::settings::Settings;
use sales_data::reader::load_dataset;
use sales_runtime::session::SelectionSession;
use sales_ui::app::App;

#[tokio::main]
async fn main() -> Result<()> {
    let settings = Settings::load();

    bootstrap::setup_logging(&settings.log_level, settings.log_file.as_deref())?;

    tracing::info!("Region Sales v{} starting", env!("CARGO_PKG_VERSION"));
    tracing::info!(
        "Data: {}, View: {}, Theme: {}",
        settings.data_path.display(),
        settings.view,
        settings.theme
    );

    let (records, regions) = load_dataset(&settings.data_path)?;
    tracing::info!(
        records = records.len(),
        regions = regions.len(),
        "dataset prepared"
    );

    let initial = settings.initial_region(&regions)?;

    match settings.view.as_str() {
        "interactive" => {
            let session = SelectionSession::new(Arc::new(records), initial.clone());
            let (rx, handle) = session.start();

            let app = App::new(&settings.theme, regions, initial.as_deref());

            // Ctrl+C is also caught at the OS level for signals that arrive
            // while the terminal is in raw mode.
            tokio::select! {
                result = app.run(rx, &handle) => {
                    handle.abort();
                    result?;
                }
                _ = tokio::signal::ctrl_c() => {
                    tracing::info!("Ctrl+C received; shutting down selection session");
                    handle.abort();
                }
            }
        }

        "report" => {
            let views = sales_data::update(&records, initial.as_deref());
            report::write_stdout(&report::render_report(initial.as_deref(), &views))?;
        }

        "json" => {
            let views = sales_data::update(&records, initial.as_deref());
            report::write_stdout(&format!("{}\n", report::render_json(&views)?))?;
        }

        unknown => {
            eprintln!("Unknown view mode: {}", unknown);
        }
    }

    Ok(())
}
