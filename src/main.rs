#[tokio::main]
async fn main() {
    if let Err(e) = space_rocks::run_with_config().await {
        tracing::error!(error = %e, "session failed");
        std::process::exit(1);
    }
}
