use std::process;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    env_logger::init();
    if let Err(e) = hardness_cli::run().await {
        eprintln!("Error: {:#}", e);
        process::exit(1);
    }
    Ok(())
}
