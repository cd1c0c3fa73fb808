#[tokio::main]
async fn main() -> anyhow::Result<()> {
    svp_backend::run().await
}
