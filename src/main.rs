#[tokio::main]
async fn main() {
    if let Err(e) = snafles_reviews::start_server().await {
        eprintln!("Failed to start reviews service: {e}");
        std::process::exit(1);
    }
}
