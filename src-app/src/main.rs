use inspection_app_lib::{open_session, AppConfig, StoreResult};
use inspection_checklist::{inspection_progress, progress};

const APP_NAME: &str = "inspection";

#[tokio::main]
async fn main() {
    if let Err(e) = run().await {
        log::error!("{}", e);
        eprintln!("{}: {}", APP_NAME, e);
        std::process::exit(1);
    }
}

async fn run() -> StoreResult<()> {
    let config = AppConfig::from_env()?;
    if let Err(e) = rolling_logger::init_logger(config.log_dir.clone(), APP_NAME) {
        eprintln!("{}: file logging disabled: {}", APP_NAME, e);
    }
    log::info!("opening inspection {} for {}", config.inspection_id, config.property);

    let session = open_session(&config).await?;
    let inspection = session.inspection();
    println!("{} ({}, {})", inspection.title, inspection.property, inspection.date);
    for section in &inspection.sections {
        println!("{:>4}%  {}", progress(section), section.title);
    }
    println!("{:>4}%  overall", inspection_progress(inspection));

    session.close().await;
    Ok(())
}
