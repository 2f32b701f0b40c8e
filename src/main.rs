use anyhow::{anyhow, Result};
use chrono::Utc;
use clap::{crate_version, App, Arg};
use rockday::build::build_site;
use rockday::config::Config;
use rockday::logging;
use rockday::url::{BaseUrl, DEFAULT_BASE_URL};

fn main() {
    logging::init();
    if let Err(e) = run() {
        eprintln!("Error: {:#}", e);
        std::process::exit(1);
    }
}

fn run() -> Result<()> {
    let base_url_help = format!(
        "The URL the site is published at [default: {}]",
        DEFAULT_BASE_URL
    );
    let matches = App::new("rockday")
        .version(crate_version!())
        .about("Generates the Rock & Mineral of the Day pages and RSS feed")
        .arg(
            Arg::with_name("base_url")
                .value_name("BASE_URL")
                .help(&base_url_help)
                .index(1),
        )
        .get_matches();

    let base_url = match matches.value_of("base_url") {
        Some(s) => Some(
            BaseUrl::parse(s).map_err(|e| anyhow!("Invalid base URL `{}`: {}", s, e))?,
        ),
        None => None,
    };

    let config = Config::from_directory(&std::env::current_dir()?, base_url)?;
    let report = build_site(&config, Utc::now())?;

    println!("Generated {} file(s) for {}", report.written.len(), config.site.base_url);
    println!("Today's specimens: {} & {}", report.rock, report.mineral);
    Ok(())
}
