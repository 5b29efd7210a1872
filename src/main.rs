use std::fs::OpenOptions;
use std::sync::Arc;

use tracing::{error, info};

use quests::app::App;
use quests::guard::InstanceGuard;
use quests::paths::AppPaths;
use quests::storage::Storage;

#[tokio::main]
async fn main() -> color_eyre::Result<()> {
    color_eyre::install()?;
    let paths = AppPaths::resolve()?;
    init_logging(&paths)?;

    // A second instance backs off before touching any shared state.
    let Some(_guard) = InstanceGuard::acquire(&paths.lock_file)? else {
        return Ok(());
    };

    info!("Iniciando o app");
    let storage = Storage::new(paths.data_file.clone(), paths.legacy_file.clone());
    let app = match App::new(storage) {
        Ok(app) => app,
        Err(e) => {
            error!("Erro fatal ao iniciar o app: {e}");
            return Err(e.into());
        }
    };
    info!("Interface construída");

    let terminal = ratatui::init();
    let result = app.run(terminal).await;
    ratatui::restore();
    info!("Loop principal encerrado");

    if let Err(e) = &result {
        error!("Erro fatal: {e}");
    }
    result
}

/// Append timestamped, level-tagged lines to the diagnostic log under the
/// data directory. The log is write-only; nothing reads it back.
fn init_logging(paths: &AppPaths) -> color_eyre::Result<()> {
    let log_file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(&paths.log_file)?;
    tracing_subscriber::fmt()
        .with_writer(Arc::new(log_file))
        .with_ansi(false)
        .init();
    Ok(())
}
