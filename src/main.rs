use std::path::Path;
use std::sync::Arc;

use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use news_view::config::Config;
use news_view::fetcher::{Fetcher, Item};
use news_view::view::ViewController;

const CONFIG_PATH: &str = "news.toml";

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize logging
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "news_view=info".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    // Load configuration
    let config = if Path::new(CONFIG_PATH).exists() {
        Config::load(CONFIG_PATH)?
    } else {
        Config::default()
    };
    info!("Listing stories from {}", config.endpoint);

    let fetcher = Arc::new(Fetcher::new(config.endpoint));
    let view = ViewController::new(fetcher);

    view.initialize().await?;

    if let Some(items) = view.items() {
        render(&items);
    }

    Ok(())
}

fn render(items: &[Item]) {
    for (i, item) in items.iter().enumerate() {
        println!("{:>3}. {}", i + 1, item.title);
        if let Some(url) = &item.url {
            println!("     {}", url);
        }
        if let Some(author) = &item.author {
            println!("     by {}", author);
        }
    }
}
