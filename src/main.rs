#[tokio::main]
async fn main() -> anyhow::Result<()> {
    ninja_agent_rs::cli::run().await
}
