mod bootstrap;

use anyhow::Result;
use explorer_core::settings::Settings;
use explorer_data::sources::CitySources;
use explorer_session::prompts::FilterSeed;
use explorer_session::session::SessionLoop;

fn main() -> Result<()> {
    let settings = Settings::load_with_last_used();

    bootstrap::ensure_directories()?;
    bootstrap::setup_logging(&settings.log_level)?;

    tracing::info!("Bikeshare Explorer v{} starting", env!("CARGO_PKG_VERSION"));

    let data_dir = bootstrap::discover_data_dir(settings.data_dir.as_deref());
    tracing::info!("Data directory: {}", data_dir.display());

    let sources = CitySources::new(data_dir);

    // clap's allow-lists already validated these strings; parsing maps them
    // into the typed filter enums.
    let seed = FilterSeed {
        city: settings.city.as_deref().map(str::parse).transpose()?,
        month: settings.month.as_deref().map(str::parse).transpose()?,
        day: settings.day.as_deref().map(str::parse).transpose()?,
    };

    let stdin = std::io::stdin().lock();
    let stdout = std::io::stdout().lock();

    SessionLoop::new(sources, seed, stdin, stdout).run()?;

    Ok(())
}
