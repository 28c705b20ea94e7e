use postline_core::Config;

#[tokio::main]
async fn main() -> Result<(), anyhow::Error> {
    dotenvy::dotenv().ok();

    postline_api::setup::init_tracing();

    let config = Config::from_env()?;

    let (_state, router) = postline_api::setup::initialize_app(config.clone()).await?;

    postline_api::setup::server::start_server(&config, router).await?;

    Ok(())
}
