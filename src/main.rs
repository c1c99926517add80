use std::path::PathBuf;

use clap::Parser;

use cardscout::config::{AppConfig, SourceConfig};
use cardscout::core::aggregator::{
    AggregateEvent, Aggregator, FixtureSource, JsonFeedSource, QueryProgress, Storefront,
};
use cardscout::core::logging;
use cardscout::{CardRecord, Catalog, Count};

/// Search storefronts for a card and print fixed listings as TSV.
#[derive(Parser, Debug)]
#[command(name = "cardscout", version, about)]
struct Cli {
    /// Card name to search for
    query: String,

    /// Config file (default: <config dir>/cardscout/config.toml)
    #[arg(long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Directory with dictionaries and reference data
    #[arg(long, value_name = "DIR")]
    resources: Option<PathBuf>,

    /// Extra storefront read from a JSON listings file (repeatable)
    #[arg(long = "fixture", value_name = "FILE")]
    fixtures: Vec<PathBuf>,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    let config = match &cli.config {
        Some(path) => AppConfig::load_from(path)?,
        None => AppConfig::load(),
    };

    let _log_guard = logging::init(config.logging.log_dir.as_deref())?;
    log::info!("{} v{} starting", cardscout::NAME, cardscout::VERSION);

    let catalog = match cli.resources.as_ref().or(config.resources.dir.as_ref()) {
        Some(dir) => Catalog::from_dir(dir)?,
        None => Catalog::bundled()?,
    };

    let mut sources = Vec::new();
    for source in &config.sources {
        sources.push(build_source(source, &config)?);
    }
    for path in &cli.fixtures {
        let source = FixtureSource::from_file(path.display().to_string(), path)?
            .with_page_size(config.aggregator.page_size);
        sources.push(Storefront::from(source));
    }
    if sources.is_empty() {
        return Err("no storefronts configured; pass --fixture FILE or add [[sources]] to the config".into());
    }

    let names: Vec<String> = sources.iter().map(|s| s.name().to_string()).collect();
    let (aggregator, mut results) =
        Aggregator::new(sources, catalog.fixer(), config.aggregator.channel_capacity);
    let generation = aggregator.start(&cli.query);
    let mut progress = QueryProgress::new(generation, names);

    while !progress.is_complete() {
        let Some(tagged) = results.next_current().await else {
            break;
        };
        progress.apply(&tagged);

        match tagged.event {
            AggregateEvent::Record { record, .. } => println!("{}", tsv_row(&record)),
            AggregateEvent::Failed { source, error, records_yielded } => {
                eprintln!("{source}: failed after {records_yielded} listings: {error}");
            }
            AggregateEvent::Progress { .. } | AggregateEvent::Finished { .. } => {}
        }
    }

    log::info!("Query {} done", generation);
    Ok(())
}

fn build_source(source: &SourceConfig, config: &AppConfig) -> Result<Storefront, Box<dyn std::error::Error>> {
    Ok(match source {
        SourceConfig::Fixture { name, path } => FixtureSource::from_file(name.clone(), path)?
            .with_page_size(config.aggregator.page_size)
            .into(),
        SourceConfig::JsonFeed { name, url, max_pages } => {
            let mut feed = JsonFeedSource::new(name.clone(), url.clone());
            if let Some(max_pages) = max_pages {
                feed = feed.with_max_pages(*max_pages);
            }
            feed.into()
        }
    })
}

fn tsv_row(record: &CardRecord) -> String {
    let count = match record.count {
        Count::Exact(n) => n.to_string(),
        Count::InStock(true) => "yes".to_string(),
        Count::InStock(false) => "no".to_string(),
    };
    let price = match (&record.price, &record.currency) {
        (Some(price), Some(currency)) => format!("{price} {currency}"),
        (Some(price), None) => price.to_string(),
        _ => String::new(),
    };
    let id = record.id.map(|id| id.to_string()).unwrap_or_default();
    let foil = match record.foilness {
        Some(true) => "foil",
        Some(false) => "nonfoil",
        None => "",
    };

    [
        record.name.caption.as_str(),
        record.set.as_deref().unwrap_or_default(),
        id.as_str(),
        record.language.as_deref().unwrap_or_default(),
        record.condition.as_deref().unwrap_or_default(),
        foil,
        count.as_str(),
        price.as_str(),
        record.source.caption.as_str(),
    ]
    .join("\t")
}
