use anyhow::Result;
use clap::Parser;
use declsplit::cli::{Cli, Commands, ReportFormat};
use declsplit::commands::{handle_split, init_config, SplitOptions};

fn main() -> Result<()> {
    env_logger::init();
    let cli = Cli::parse();

    match cli.command {
        Commands::Split {
            header,
            source,
            header_out,
            source_out,
            base,
            config,
            format,
            dry_run,
            jobs,
        } => {
            let options = SplitOptions {
                header,
                source,
                header_out,
                source_out,
                base,
                config,
                dry_run,
                jobs,
            };
            let report = handle_split(&options)?;
            match format {
                ReportFormat::Terminal => print!("{}", report.render_terminal()),
                ReportFormat::Json => println!("{}", report.to_json()?),
            }
            if !report.is_clean() {
                std::process::exit(1);
            }
            Ok(())
        }
        Commands::Init { force } => init_config(force),
    }
}
