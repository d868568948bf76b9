// src/main.rs
// =============================================================================
// Entry point.
//
// What happens here:
// 1. Set up logging (RUST_LOG, defaults to "info")
// 2. Parse command-line arguments
// 3. Validate the root and run the crawl
// 4. Print the tree to stdout, as text or JSON
// 5. Exit 0 on success, 2 on a fatal error
// =============================================================================

use anyhow::Result;
use clap::Parser;

use site_sprinter::cli::Cli;
use site_sprinter::Sprinter;

#[tokio::main]
async fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let exit_code = match run().await {
        Ok(()) => 0,
        Err(e) => {
            eprintln!("Error: {:#}", e);
            2
        }
    };

    std::process::exit(exit_code);
}

async fn run() -> Result<()> {
    let cli = Cli::parse();

    let mut sprinter = Sprinter::new(cli.crawl_config())?;
    log::info!("starting site-sprinter with root {}", sprinter.root());

    let tree = sprinter.crawl().await?;
    log::info!("tree holds {} page(s)", tree.len());

    if cli.json {
        println!("{}", serde_json::to_string_pretty(&tree)?);
    } else {
        print!("{}", tree);
    }

    Ok(())
}
