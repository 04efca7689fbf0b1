use crate::demo::{run_demo, run_eligibility, run_login, DemoArgs, EligibilityArgs, LoginArgs};
use crate::server;
use clap::{Args, Parser, Subcommand};
use educare::error::AppError;

#[derive(Parser, Debug)]
#[command(
    name = "Educare+ Admission Service",
    about = "Run the Educare+ admission and dashboard access service, or try its rules from the command line",
    version
)]
struct Cli {
    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Start the HTTP service (default command)
    Serve(ServeArgs),
    /// Check a child's age eligibility for a date of birth
    Eligibility(EligibilityArgs),
    /// Check a role/username/password combination against the credential table
    Login(LoginArgs),
    /// Walk through admission, sign-in, and observation flows with sample data
    Demo(DemoArgs),
}

#[derive(Args, Debug, Default)]
pub(crate) struct ServeArgs {
    /// Override the configured host for the HTTP server
    #[arg(long)]
    pub(crate) host: Option<String>,
    /// Override the configured port for the HTTP server
    #[arg(long)]
    pub(crate) port: Option<u16>,
}

pub(crate) async fn run() -> Result<(), AppError> {
    let cli = Cli::parse();
    let command = cli
        .command
        .unwrap_or_else(|| Command::Serve(ServeArgs::default()));

    match command {
        Command::Serve(args) => server::run(args).await,
        Command::Eligibility(args) => run_eligibility(args),
        Command::Login(args) => run_login(args),
        Command::Demo(args) => run_demo(args).await,
    }
}
