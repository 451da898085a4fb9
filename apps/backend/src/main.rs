#[tokio::main]
async fn main() -> anyhow::Result<()> {
    outline_cards_backend::run().await
}
