use clap::Parser;
use color_eyre::Result;

use spotify_gist::app::{App, Outcome};
use spotify_gist::config::{Args, Config};
use spotify_gist::logging;

#[tokio::main]
async fn main() -> Result<()> {
    color_eyre::install()?;
    dotenvy::dotenv().ok();
    logging::init();

    let config = Config::from_env(Args::parse())?;
    match App::new(config).run().await? {
        Outcome::Preview(content) => println!("{content}"),
        Outcome::Published(gist) => {
            log::info!("Published to {}", gist.html_url.unwrap_or(gist.id));
        }
    }

    Ok(())
}
