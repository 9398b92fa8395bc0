mod encode_commands;

use std::path::PathBuf;

use {
    anyhow::Context,
    clap::{Parser, Subcommand},
    formpost_config::FormpostConfig,
    tracing::debug,
    tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt},
};

#[derive(Parser)]
#[command(name = "formpost", about = "Encode files as multipart/form-data upload bodies")]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Log level (trace, debug, info, warn, error).
    #[arg(long, global = true, default_value = "warn")]
    log_level: String,

    /// Output logs as JSON instead of human-readable.
    #[arg(long, global = true, default_value_t = false)]
    json_logs: bool,

    /// Config file (overrides discovery of ./formpost.toml and the user config dir).
    #[arg(long, global = true, env = "FORMPOST_CONFIG")]
    config: Option<PathBuf>,
}

#[derive(Subcommand)]
enum Commands {
    /// Encode a file as a multipart/form-data body.
    Encode(encode_commands::EncodeArgs),
    /// Print the content type resolved for each path.
    ContentType {
        #[arg(required = true)]
        paths: Vec<String>,
    },
    /// Print the sanitized filename used in Content-Disposition.
    Sanitize { name: String },
}

/// Logs go to stderr; stdout may carry the encoded body.
fn init_telemetry(cli: &Cli) {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&cli.log_level));

    let registry = tracing_subscriber::registry().with(filter);

    if cli.json_logs {
        registry
            .with(
                fmt::layer()
                    .json()
                    .with_target(true)
                    .with_writer(std::io::stderr),
            )
            .init();
    } else {
        registry
            .with(
                fmt::layer()
                    .with_target(false)
                    .with_thread_ids(false)
                    .with_writer(std::io::stderr),
            )
            .init();
    }
}

fn load_config(cli: &Cli) -> anyhow::Result<FormpostConfig> {
    match &cli.config {
        Some(path) => formpost_config::load_config(path)
            .with_context(|| format!("loading config {}", path.display())),
        None => Ok(formpost_config::discover_and_load()),
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    let cli = Cli::parse();
    init_telemetry(&cli);

    debug!(version = env!("CARGO_PKG_VERSION"), "formpost starting");
    let config = load_config(&cli)?;

    match cli.command {
        Commands::Encode(args) => encode_commands::handle_encode(&config, args).await,
        Commands::ContentType { paths } => encode_commands::handle_content_type(&config, &paths),
        Commands::Sanitize { name } => {
            println!("{}", encode_commands::sanitized_name(&name));
            Ok(())
        },
    }
}
