use std::path::PathBuf;

use clap::{Parser, Subcommand};

mod commands;
mod target;

use target::TargetArgs;

#[derive(Parser)]
#[command(
    name = "hostgen",
    about = "hostgen — standardized hostname allocation",
    version,
    propagate_version = true,
)]
struct Cli {
    /// Path to hostgen.toml
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Allocate a hostname that is not in use yet.
    ///
    /// Without --register the hostname is only reserved in your terminal:
    /// nothing is written, and a concurrent caller may be handed the same
    /// name until one of you saves it.
    Generate {
        /// Operating system, e.g. "Windows Server 2022" or "centos-7"
        #[arg(long)]
        os: String,
        /// Environment code, e.g. P, D, U
        #[arg(long = "env")]
        environment: String,
        /// Server-function code, e.g. APP, SQL
        #[arg(long = "function")]
        server_function: String,
        /// Trailing node digit
        #[arg(long, default_value = "0")]
        node: String,
        /// Store the hostname atomically once allocated
        #[arg(long)]
        register: bool,
        /// Fail instead of guessing when the store cannot be read
        #[arg(long)]
        no_offline_fallback: bool,
        #[command(flatten)]
        target: TargetArgs,
    },
    /// List stored hostnames, newest first
    List {
        #[arg(short, long)]
        limit: Option<usize>,
        /// Output format: text or json
        #[arg(short, long, default_value = "text")]
        format: String,
        #[command(flatten)]
        target: TargetArgs,
    },
    /// Print the number of stored hostnames
    Count {
        #[command(flatten)]
        target: TargetArgs,
    },
    /// Check whether a hostname is already stored
    Exists {
        hostname: String,
        #[command(flatten)]
        target: TargetArgs,
    },
    /// Show the prefix an OS identifier resolves to
    Prefix { os: String },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("hostgen=warn".parse()?),
        )
        .init();

    let cli = Cli::parse();
    let config = hostgen_core::HostgenConfig::load(cli.config.as_deref())?;

    match cli.command {
        Commands::Generate {
            os,
            environment,
            server_function,
            node,
            register,
            no_offline_fallback,
            target,
        } => {
            let request = hostgen_core::AllocationRequest::new(os, environment, server_function)
                .with_node(node);
            let mut alloc_config = hostgen_alloc::AllocatorConfig::from(&config);
            if no_offline_fallback {
                alloc_config.offline_fallback_enabled = false;
            }
            let portal = target.connect(&config)?;
            commands::generate::generate(portal, &request, alloc_config, register).await
        }
        Commands::List {
            limit,
            format,
            target,
        } => commands::records::list(&target.connect(&config)?, limit, &format).await,
        Commands::Count { target } => commands::records::count(&target.connect(&config)?).await,
        Commands::Exists { hostname, target } => {
            commands::records::exists(&target.connect(&config)?, &hostname).await
        }
        Commands::Prefix { os } => {
            println!("{}", hostgen_alloc::resolve_prefix(&os));
            Ok(())
        }
    }
}
