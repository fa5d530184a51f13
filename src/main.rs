#[tokio::main]
async fn main() -> game_shelf::Result {
    game_shelf::init::init_tracing();

    return game_shelf::run().await;
}
