use clap::{Args, Parser, Subcommand};

#[derive(Parser)]
#[command(
    name = "alms",
    about = "Alms — donation-accounting ledger",
    version,
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[arg(long, global = true, default_value = "text")]
    pub format: OutputFormat,
}

#[derive(Clone, Debug, clap::ValueEnum)]
pub enum OutputFormat {
    Text,
    Json,
}

#[derive(Subcommand)]
pub enum Command {
    /// Run a scripted two-donor session and print the donation history
    Demo(DemoArgs),
    /// Run the scripted session and verify registry and event integrity
    Verify(VerifyArgs),
}

#[derive(Args)]
pub struct DemoArgs {
    /// Leave donated funds in custody instead of withdrawing them
    #[arg(long)]
    pub keep_funds: bool,
}

#[derive(Args)]
pub struct VerifyArgs {}
