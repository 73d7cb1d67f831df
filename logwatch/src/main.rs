use clap::Parser;
use logwatch_core::cli::{self, Command};
use logwatch_core::logging::{self, LogMode, init_logging};

#[derive(Parser, Debug)]
#[command(
    name = "logwatch",
    version,
    about = "logwatch: HTTP access-log aggregation and traffic alerting"
)]
struct Cli {
    /// Log at debug level unless RUST_LOG says otherwise
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Diagnostic log format on stderr; pretty on a terminal, JSON otherwise
    #[arg(long, value_enum, global = true)]
    log_format: Option<LogMode>,

    #[command(subcommand)]
    command: Command,
}

fn main() {
    let cli = Cli::parse();

    let mode = cli.log_format.unwrap_or_else(logging::default_log_mode);
    init_logging(mode, cli.verbose);

    if let Err(e) = cli::dispatch(cli.command) {
        eprintln!("logwatch error: {e:#}");
        std::process::exit(1);
    }
}
