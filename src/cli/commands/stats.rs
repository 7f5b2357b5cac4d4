//! `dca stats` command - order statistics for one record

use console::style;
use miette::Result;
use tabled::{builder::Builder, settings::Style};

use crate::cli::commands::{mount, parse_kind};
use crate::cli::GlobalOpts;
use crate::core::stats::{RandomStatistics, StatisticsProvider};
use crate::core::{Config, EntityKind, Record};

#[derive(clap::Args, Debug)]
pub struct StatsArgs {
    /// Catalog the record belongs to
    #[arg(value_parser = parse_kind)]
    pub kind: EntityKind,

    /// Record id
    pub id: u64,

    /// Seed for reproducible numbers
    #[arg(long)]
    pub seed: Option<u64>,

    /// Print the statistics as JSON
    #[arg(long)]
    pub json: bool,
}

pub fn run(args: StatsArgs, global: &GlobalOpts) -> Result<()> {
    with_record_type!(args.kind, R => stats_for::<R>(&args, global))
}

fn stats_for<R: Record>(args: &StatsArgs, global: &GlobalOpts) -> Result<()> {
    let config = Config::load();
    let mounted = mount::<R>(&config)?;
    let record = mounted
        .controller
        .get(args.id)
        .ok_or_else(|| miette::miette!("{} #{} not found", R::KIND.label(), args.id))?;

    let provider = match args.seed {
        Some(seed) => RandomStatistics::with_seed(seed),
        None => RandomStatistics::new(),
    };
    let stats = provider.stats_for(record.id());

    if args.json {
        let json = serde_json::to_string_pretty(&stats).map_err(|e| miette::miette!("{}", e))?;
        println!("{}", json);
        return Ok(());
    }

    if !global.quiet {
        println!(
            "{} #{} {}",
            R::KIND.label(),
            record.id(),
            style(record.name()).bold()
        );
        println!();
    }

    let mut builder = Builder::default();
    builder.push_record(["Metric", "Value"]);
    builder.push_record(["Orders today".to_string(), stats.orders_today.to_string()]);
    builder.push_record([
        "Orders this month".to_string(),
        stats.orders_this_month.to_string(),
    ]);
    builder.push_record([
        "Revenue this month".to_string(),
        format!("{} ₸", stats.revenue_this_month),
    ]);
    builder.push_record(["Average check".to_string(), format!("{} ₸", stats.average_check())]);
    println!("{}", builder.build().with(Style::markdown()));

    Ok(())
}
