use clap::Parser;

/// Run a scripted lending-workflow demonstration
#[derive(Parser, Debug)]
#[command(name = "lending-engine")]
#[command(about = "In-memory library lending simulation", long_about = None)]
pub struct CliArgs {
    /// Seed for the popularity-sampling RNG
    #[arg(
        long = "seed",
        value_name = "SEED",
        default_value_t = 42,
        help = "Seed for the popularity report sampling"
    )]
    pub seed: u64,

    /// Render the member profile as pretty JSON instead of text
    #[arg(long = "json", help = "Emit the member profile as JSON")]
    pub json: bool,

    /// Start with the circulation gate closed
    #[arg(
        long = "offline",
        help = "Start offline to demonstrate the rejection path"
    )]
    pub offline: bool,
}
