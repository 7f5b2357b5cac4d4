use clap::Parser;
use miette::Result;
use dca::cli::{Cli, Commands};
use dca::core::config::init_tracing;

fn main() -> Result<()> {
    // Reset SIGPIPE to default behavior (terminate silently) for proper Unix piping.
    // Without this, piping to `head`, `grep -q`, etc. causes a panic on broken pipe.
    #[cfg(unix)]
    {
        unsafe {
            libc::signal(libc::SIGPIPE, libc::SIG_DFL);
        }
    }
    miette::set_hook(Box::new(|_| {
        Box::new(
            miette::MietteHandlerOpts::new()
                .terminal_links(true)
                .unicode(true)
                .context_lines(2)
                .tab_width(4)
                .build(),
        )
    }))?;

    let cli = Cli::parse();
    let global = cli.global;
    init_tracing(if global.verbose { "debug" } else { "warn" });

    match cli.command {
        Commands::Shell(args) => dca::cli::commands::shell::run(args, &global),
        Commands::List(args) => dca::cli::commands::list::run(args, &global),
        Commands::Export(args) => dca::cli::commands::export::run(args, &global),
        Commands::Import(args) => dca::cli::commands::import::run(args, &global),
        Commands::Geocode(args) => dca::cli::commands::geocode::run(args, &global),
        Commands::ReverseGeocode(args) => dca::cli::commands::geocode::run_reverse(args, &global),
        Commands::Stats(args) => dca::cli::commands::stats::run(args, &global),
        Commands::Config(cmd) => dca::cli::commands::config::run(cmd, &global),
        Commands::Completions(args) => dca::cli::commands::completions::run(args),
    }
}
