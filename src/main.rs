#[tokio::main]
async fn main() -> std::io::Result<()> {
    skyduel::run_with_config().await
}
