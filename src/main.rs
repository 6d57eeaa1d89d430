use anyhow::Result;
use clap::{CommandFactory, Parser};
use clap_complete::{Generator, generate};
use colored::Colorize;
use sfic::cli::{Cli, Commands};
use sfic::config::LogConfig;
use sfic::output::{self, Verbosity};
use sfic::{SficContext, commands, logging};
use std::io;
use std::process;

fn main() {
    if let Err(e) = run() {
        eprintln!("{} {:#}", "Error:".red().bold(), e);
        process::exit(1);
    }
}

fn run() -> Result<()> {
    let cli = Cli::parse();
    let verbosity = Verbosity::from_flags(cli.verbose, cli.quiet);
    output::set_verbosity(verbosity);

    match cli.command {
        Commands::Run {
            lock_file,
            no_notify,
        } => {
            let ctx = SficContext::load(cli.config)?;
            logging::init(verbosity, &ctx.config.log)?;
            commands::run::execute(&ctx, lock_file.as_deref(), no_notify)?;
        }
        Commands::Scan {
            dir,
            mode,
            ext,
            short,
        } => {
            logging::init(verbosity, &LogConfig::default())?;
            commands::scan::execute(&dir, mode, &ext, short)?;
        }
        Commands::Show { dir } => {
            logging::init(verbosity, &LogConfig::default())?;
            commands::show::execute(&dir)?;
        }
        Commands::Check => {
            let ctx = SficContext::load(cli.config)?;
            commands::check::execute(&ctx)?;
        }
        Commands::Completion { shell } => {
            print_completions(shell, &mut Cli::command());
        }
    }

    Ok(())
}

fn print_completions<G: Generator>(g: G, cmd: &mut clap::Command) {
    generate(g, cmd, cmd.get_name().to_string(), &mut io::stdout());
}
