mod patterns;
mod rle;
mod run;
mod soup;
mod util;

use clap::{Parser, Subcommand};
use run::RunArgs;
use soup::SoupArgs;

#[derive(Parser, Debug)]
#[command(version, about)]
struct CLIParser {
    #[command(subcommand)]
    action: Action,
}

#[derive(Subcommand, Debug)]
enum Action {
    /// Step a built-in or RLE pattern and print the resulting board
    Run(RunArgs),
    /// Fill a square with random cells and measure stepping throughput
    Soup(SoupArgs),
}

fn main() -> anyhow::Result<()> {
    let args = CLIParser::parse();

    match args.action {
        Action::Run(args) => run::run(args),
        Action::Soup(args) => soup::run(args),
    }
}
