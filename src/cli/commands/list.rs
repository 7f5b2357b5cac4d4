//! `dca list` command - print a catalog table

use console::style;
use miette::Result;

use crate::cli::commands::{mount, parse_kind, FilterArgs};
use crate::cli::table::{render, TableConfig};
use crate::cli::{GlobalOpts, OutputFormat};
use crate::core::{Config, EntityKind, Record};

#[derive(clap::Args, Debug)]
pub struct ListArgs {
    /// Catalog to show (brand, size, color, payment-type, expense-category,
    /// measurement-unit, warehouse, point)
    #[arg(value_parser = parse_kind)]
    pub kind: EntityKind,

    #[command(flatten)]
    pub filter: FilterArgs,

    /// Output format
    #[arg(long, short = 'f', value_enum, default_value_t)]
    pub format: OutputFormat,

    /// Leave out the timestamp columns
    #[arg(long)]
    pub compact: bool,
}

pub fn run(args: ListArgs, global: &GlobalOpts) -> Result<()> {
    with_record_type!(args.kind, R => list::<R>(&args, global))
}

fn list<R: Record>(args: &ListArgs, global: &GlobalOpts) -> Result<()> {
    let config = Config::load();
    let mounted = mount::<R>(&config)?;
    let records = mounted.controller.store().filtered(|r| args.filter.matches(r));

    let table_config = TableConfig {
        hidden: if args.compact {
            vec!["createdAt".to_string(), "updatedAt".to_string()]
        } else {
            Vec::new()
        },
        ..TableConfig::default()
    };
    let out = render(&records, args.format, &table_config).map_err(|e| miette::miette!("{}", e))?;

    if args.format != OutputFormat::Table {
        println!("{}", out);
        return Ok(());
    }

    if records.is_empty() {
        if !global.quiet {
            println!("No {} found.", R::KIND.plural());
        }
        return Ok(());
    }

    println!("{}", out);
    if !global.quiet {
        println!();
        println!(
            "{} {} found",
            style(records.len()).cyan(),
            R::KIND.plural()
        );
    }
    Ok(())
}
