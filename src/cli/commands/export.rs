//! `dca export` command - write a catalog table to a CSV or Excel file

use chrono::Local;
use console::style;
use miette::Result;
use std::path::{Path, PathBuf};

use crate::cli::commands::{mount, parse_kind, FilterArgs};
use crate::cli::GlobalOpts;
use crate::core::export::{self, ExportFormat};
use crate::core::{Config, EntityKind, Record};

#[derive(clap::Args, Debug)]
pub struct ExportArgs {
    /// Catalog to export
    #[arg(value_parser = parse_kind)]
    pub kind: EntityKind,

    /// File format (default: `default_format` from config, else csv)
    #[arg(long, short = 'f', value_enum)]
    pub format: Option<ExportFormat>,

    /// Output file (default: <kind>_<date>.<ext> in the export directory)
    #[arg(long, short = 'o')]
    pub output: Option<PathBuf>,

    /// Print to stdout instead of writing a file
    #[arg(long, conflicts_with = "output")]
    pub stdout: bool,

    #[command(flatten)]
    pub filter: FilterArgs,
}

pub fn run(args: ExportArgs, global: &GlobalOpts) -> Result<()> {
    with_record_type!(args.kind, R => export_kind::<R>(&args, global))
}

fn export_kind<R: Record>(args: &ExportArgs, global: &GlobalOpts) -> Result<()> {
    let config = Config::load();
    let format = args.format.unwrap_or_else(|| config.default_format());
    let mounted = mount::<R>(&config)?;

    let records = mounted.controller.store().filtered(|r| args.filter.matches(r));
    let body = export::export(&records, format, R::KIND.label()).map_err(|e| miette::miette!("{}", e))?;

    if args.stdout {
        print!("{}", body);
        return Ok(());
    }

    let path = write_export(R::KIND, format, &body, args.output.as_deref(), &config)?;
    if !global.quiet {
        println!(
            "{} Exported {} {} to {}",
            style("✓").green(),
            style(records.len()).cyan(),
            R::KIND.plural(),
            style(path.display()).yellow()
        );
    }
    Ok(())
}

/// Save an export body to `output`, or under a dated name in the export dir
pub(crate) fn write_export(
    kind: EntityKind,
    format: ExportFormat,
    body: &str,
    output: Option<&Path>,
    config: &Config,
) -> Result<PathBuf> {
    let (dir, file_name) = match output {
        Some(path) => {
            let file_name = path
                .file_name()
                .and_then(|n| n.to_str())
                .ok_or_else(|| miette::miette!("Not a file path: {}", path.display()))?
                .to_string();
            let dir = match path.parent() {
                Some(p) if !p.as_os_str().is_empty() => p.to_path_buf(),
                _ => PathBuf::from("."),
            };
            (dir, file_name)
        }
        None => (
            config.export_dir(),
            export::default_file_name(kind, format, Local::now().date_naive()),
        ),
    };

    export::save(&dir, &file_name, body).map_err(|e| miette::miette!("{}", e))
}
