mod cli;

use clap::Parser;

#[derive(Parser)]
#[command(
    name = "kernel-catalog",
    version,
    about = "Generate an XML file of supported targets and kernels from your workspace."
)]
struct Cli {
    #[command(flatten)]
    args: cli::generate::GenerateArgs,
}

fn main() {
    let cli = Cli::parse();
    cli::generate::cmd_generate(cli.args);
}
