use dotenvy::dotenv;
use service::item::{open_repository, seed::seed};
use tracing::{error, info};

/// Clear the item store and load the sample items.
async fn run() -> anyhow::Result<()> {
    let cfg = configs::AppConfig::load()?;
    let repo = open_repository(&cfg.database).await?;
    info!(service = "seed", event = "connected", "connected to item store");

    let items = seed(repo.as_ref()).await?;
    info!(service = "seed", event = "seeded", count = items.len(), "seeded items");
    for item in &items {
        info!(service = "seed", id = %item.id, name = %item.name, "seeded item");
    }

    repo.close().await?;
    Ok(())
}

fn main() -> std::process::ExitCode {
    dotenv().ok();
    common::utils::logging::init_logging_json();

    let rt = match tokio::runtime::Builder::new_current_thread().enable_all().build() {
        Ok(rt) => rt,
        Err(e) => {
            error!(service = "seed", event = "runtime_build_failed", error = %e, "failed to build tokio runtime");
            return std::process::ExitCode::FAILURE;
        }
    };

    match rt.block_on(run()) {
        Ok(()) => {
            info!(service = "seed", event = "done", "database seeded successfully");
            std::process::ExitCode::SUCCESS
        }
        Err(e) => {
            error!(service = "seed", event = "failed", error = %e, "error seeding database");
            std::process::ExitCode::FAILURE
        }
    }
}
