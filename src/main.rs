use clap::Parser;
use emojikeg::cli::{Cli, Commands};
use emojikeg::output::Printer;
use miette::Result;

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    let cli = Cli::parse();
    let printer = Printer::new();

    match cli.command {
        Commands::Cart(args) => emojikeg::cli::cart::run(args, &printer)?,
        Commands::List(args) => emojikeg::cli::list::run(args, &printer)?,
        Commands::Emojify(args) => emojikeg::cli::emojify::run(args, &printer)?,
        Commands::Brands(args) => emojikeg::cli::brands::run(args, &printer)?,
        Commands::Completions(args) => emojikeg::cli::completions::run(args)?,
    }

    Ok(())
}
