//! xtask for sfic - build automation and tooling
//!
//! This binary provides development tasks like man page generation.

use anyhow::{Context, Result};
use clap::{CommandFactory, Parser};
use std::fs;
use std::path::Path;
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "xtask", about = "Build automation for sfic")]
enum Task {
    /// Generate man pages from clap definitions
    GenerateManPages {
        /// Output directory for man pages (default: ./man)
        #[arg(short, long, default_value = "man")]
        output: PathBuf,
    },
}

fn main() -> Result<()> {
    let task = Task::parse();

    match task {
        Task::GenerateManPages { output } => generate_man_pages(&output)?,
    }

    Ok(())
}

fn generate_man_pages(output_dir: &Path) -> Result<()> {
    println!("Generating man pages...");

    fs::create_dir_all(output_dir)
        .with_context(|| format!("Failed to create directory: {}", output_dir.display()))?;

    let cmd = sfic::cli::Cli::command();

    let man_path = output_dir.join("sfic.1");
    let man_file = fs::File::create(&man_path)
        .with_context(|| format!("Failed to create man page: {}", man_path.display()))?;
    clap_mangen::Man::new(cmd.clone()).render(&mut std::io::BufWriter::new(man_file))?;
    println!("✓ Generated: {}", man_path.display());

    for subcmd in cmd.get_subcommands() {
        let name = subcmd.get_name();
        if name == "completion" || name == "help" {
            continue;
        }

        let subcmd_man_path = output_dir.join(format!("sfic-{name}.1"));
        let subcmd_man_file = fs::File::create(&subcmd_man_path).with_context(|| {
            format!(
                "Failed to create subcommand man page: {}",
                subcmd_man_path.display()
            )
        })?;

        clap_mangen::Man::new(subcmd.clone())
            .title(format!("sfic-{name}"))
            .render(&mut std::io::BufWriter::new(subcmd_man_file))?;

        println!("✓ Generated: {}", subcmd_man_path.display());
    }

    println!(
        "\nMan pages successfully generated in: {}",
        output_dir.display()
    );
    println!("\nTo view the man pages:");
    println!("  man {}/sfic.1", output_dir.display());

    Ok(())
}
