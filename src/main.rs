use clap::Parser;
use miette::Result;
use ckit::cli::{Cli, Commands};

/// Let a closed stdout (`ckit check kit.csv | head`) end the process quietly
#[cfg(unix)]
fn restore_default_sigpipe() {
    unsafe {
        libc::signal(libc::SIGPIPE, libc::SIG_DFL);
    }
}

#[cfg(not(unix))]
fn restore_default_sigpipe() {}

fn install_diagnostic_hook() -> Result<()> {
    miette::set_hook(Box::new(|_| {
        Box::new(
            miette::MietteHandlerOpts::new()
                .unicode(true)
                .context_lines(1)
                .build(),
        )
    }))?;
    Ok(())
}

fn main() -> Result<()> {
    restore_default_sigpipe();
    install_diagnostic_hook()?;

    let cli = Cli::parse();
    let global = cli.global;
    ckit::core::logging::init(global.verbose);

    match cli.command {
        Commands::Check(args) => ckit::cli::commands::check::run(args, &global),
        Commands::Parse(args) => ckit::cli::commands::parse::run(args, &global),
        Commands::Template(args) => ckit::cli::commands::template::run(args),
        Commands::Completions(args) => ckit::cli::commands::completions::run(args),
    }
}
