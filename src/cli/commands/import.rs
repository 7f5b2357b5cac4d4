//! `dca import` command - add records to a catalog from a CSV file
//!
//! Only the first column is read, as the record name. The header line is
//! skipped whatever it says.

use console::style;
use miette::Result;
use std::path::PathBuf;

use crate::cli::commands::export::write_export;
use crate::cli::commands::{mount, parse_kind};
use crate::cli::table::{render, TableConfig};
use crate::cli::{GlobalOpts, OutputFormat};
use crate::core::export::{self, ExportFormat};
use crate::core::{Config, Draft, EntityKind, ImportPipeline, Record};

#[derive(clap::Args, Debug)]
pub struct ImportArgs {
    /// Catalog to import into
    #[arg(value_parser = parse_kind)]
    pub kind: EntityKind,

    /// CSV file to import
    #[arg(required_unless_present = "template")]
    pub file: Option<PathBuf>,

    /// Print a CSV header template for the catalog and exit
    #[arg(long)]
    pub template: bool,

    /// After importing, export the whole table to this file (.csv or .xls)
    #[arg(long, value_name = "PATH")]
    pub export: Option<PathBuf>,
}

pub fn run(args: ImportArgs, global: &GlobalOpts) -> Result<()> {
    with_record_type!(args.kind, R => import_kind::<R>(&args, global))
}

/// Header line for a catalog's import file
pub fn template<R: Record>() -> String {
    <R::Draft as Draft>::FIELDS.join(",")
}

fn import_kind<R: Record>(args: &ImportArgs, global: &GlobalOpts) -> Result<()> {
    if args.template {
        println!("{}", template::<R>());
        return Ok(());
    }
    let file = args
        .file
        .as_ref()
        .ok_or_else(|| miette::miette!("No file given. Usage: dca import <kind> <file>"))?;

    let config = Config::load();
    let mut mounted = mount::<R>(&config)?;

    let mut pipeline = ImportPipeline::new();
    pipeline.select(file);
    let summary = pipeline
        .run(&mut mounted.controller)
        .map_err(|e| miette::miette!("Import failed: {}", e))?;

    if !global.quiet {
        println!(
            "{} Imported {} {} from {}",
            style("✓").green(),
            style(summary.imported).cyan(),
            R::KIND.plural(),
            style(file.display()).yellow()
        );
        if summary.skipped > 0 {
            println!(
                "   {} {} row(s) without a name skipped",
                style("!").yellow(),
                summary.skipped
            );
        }
        println!();
        let table = render(mounted.controller.list(), OutputFormat::Table, &TableConfig::default())
            .map_err(|e| miette::miette!("{}", e))?;
        println!("{}", table);
    }

    if let Some(path) = &args.export {
        let format = match path.extension().and_then(|e| e.to_str()) {
            Some(ext) if ext.eq_ignore_ascii_case("xls") => ExportFormat::Xls,
            _ => ExportFormat::Csv,
        };
        let body = export::export(mounted.controller.list(), format, R::KIND.label())
            .map_err(|e| miette::miette!("{}", e))?;
        let saved = write_export(R::KIND, format, &body, Some(path), &config)?;
        if !global.quiet {
            println!(
                "{} Exported {} {} to {}",
                style("✓").green(),
                style(mounted.controller.list().len()).cyan(),
                R::KIND.plural(),
                style(saved.display()).yellow()
            );
        }
    }

    Ok(())
}
