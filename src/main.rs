use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use zonectl::{
    app::{self, Invocation},
    command::{Command, CommandOptions, DispatchOptions, OperationResult},
    config::Settings,
    dns::create_connector,
    report::{program_name, report_to_stdio},
    secrets::CredentialFields,
    Error,
};

#[derive(Parser)]
#[command(name = "zonectl")]
#[command(about = "Zone inventory administration - list/add/delete/promote zone, delete A record")]
#[command(version)]
struct Cli {
    /// Command to run
    #[arg(value_enum)]
    command: Command,

    /// Zone to use in the query
    #[arg(short = 'z', long)]
    zone: Option<String>,

    /// A record to use in the query. Relative (ex 'foo') or absolute (ex 'foo.example.com.')
    #[arg(short = 'a', long)]
    a_record: Option<String>,

    /// Primary NS to receive zone xfer from
    #[arg(short = 'p', long)]
    primary_ns: Option<String>,

    /// API credentials yaml file containing username and password (required)
    #[arg(short = 'c', long)]
    creds_file: Option<PathBuf>,

    /// Settings file (defaults to the system location)
    #[arg(long)]
    config: Option<PathBuf>,

    /// Enable debug logging on stderr
    #[arg(short, long)]
    verbose: bool,
}

fn init_logging(log_level: &str) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(log_level));

    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> ExitCode {
    let cli = Cli::parse();
    let program = program_name();

    let settings = match Settings::load(cli.config.as_deref()) {
        Ok(settings) => settings,
        Err(e) => {
            init_logging("warn");
            let result = OperationResult::Failure(Error::config(format!("{:#}", e)));
            return report_to_stdio(&program, result).into();
        }
    };

    let log_level = if cli.verbose {
        "debug"
    } else {
        settings.logging.level.as_str()
    };
    init_logging(log_level);

    let connector = match create_connector(&settings.api) {
        Ok(connector) => connector,
        Err(e) => {
            let result = OperationResult::Failure(Error::config(e.to_string()));
            return report_to_stdio(&program, result).into();
        }
    };

    let invocation = Invocation {
        command: cli.command,
        options: CommandOptions {
            zone: cli.zone,
            a_record: cli.a_record,
            primary_ns: cli.primary_ns,
        },
        creds_file: cli.creds_file,
    };

    let result = app::execute(
        &invocation,
        connector.as_ref(),
        &CredentialFields::default(),
        DispatchOptions::from(&settings.api),
    )
    .await;

    report_to_stdio(&program, result).into()
}
