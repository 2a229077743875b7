use crate::{
    appstore::lookup::AppStoreLookup,
    document::PlistDocument,
    types::options::{BumpType, SHORT_VERSION_KEY, VERSION_NUMBER, VersionSourceKind},
    utils::{
        config::{BumpOverrides, build_options, load_config},
        logger::{LogLevel, Logger},
        output::{append_shared_value, shared_value_line},
    },
    version::increment_version_number,
};
use anyhow::{Context, Result, anyhow};
use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;
use std::process::ExitCode;

mod appstore;
mod document;
mod error;
mod types;
mod utils;
mod version;

#[derive(Parser)]
#[command(name = "plistbump")]
#[command(version)]
#[command(about = "Increments the version string of an Info.plist for build pipelines")]
struct Cli {
    /// Print debug output
    #[arg(short, long, global = true, default_value_t = false)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Bump the version stored in a property list
    Bump(BumpArgs),

    /// Print the value of a property list field
    Get {
        /// Path to the property list
        #[arg(long)]
        plist: PathBuf,
        /// Field to read
        #[arg(long, default_value = SHORT_VERSION_KEY)]
        key: String,
    },
}

#[derive(Args)]
struct BumpArgs {
    /// Path to the property list (defaults to `plist` in plistbump.toml)
    #[arg(long)]
    plist: Option<PathBuf>,

    /// Field holding the version
    #[arg(long)]
    key: Option<String>,

    /// Explicit version to write; skips the bump policy
    #[arg(long)]
    version_number: Option<String>,

    /// Component to increment
    #[arg(long, value_enum)]
    bump_type: Option<BumpType>,

    /// Where the current version is read from
    #[arg(long, value_enum)]
    version_source: Option<VersionSourceKind>,

    /// Render `x.y.0` results as `x.y`; `--omit-zero-patch-version false` overrides the config file
    #[arg(long, num_args = 0..=1, default_missing_value = "true", value_name = "BOOL")]
    omit_zero_patch_version: Option<bool>,

    /// Bundle identifier used for the App Store lookup (defaults to CFBundleIdentifier)
    #[arg(long)]
    app_identifier: Option<String>,

    /// Two-letter App Store storefront country
    #[arg(long)]
    country: Option<String>,

    /// Config file (defaults to ./plistbump.toml when present)
    #[arg(long)]
    config: Option<PathBuf>,

    /// Also append VERSION_NUMBER=<version> to this file
    #[arg(long)]
    shared_values_file: Option<PathBuf>,
}

impl From<&BumpArgs> for BumpOverrides {
    fn from(args: &BumpArgs) -> Self {
        BumpOverrides {
            plist: args.plist.clone(),
            key: args.key.clone(),
            version_number: args.version_number.clone(),
            bump_type: args.bump_type,
            version_source: args.version_source,
            omit_zero_patch_version: args.omit_zero_patch_version,
            app_identifier: args.app_identifier.clone(),
            country: args.country.clone(),
        }
    }
}

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();
    Logger::set_verbose(cli.verbose);

    match run(cli.command).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            let causes: Vec<String> = e.chain().skip(1).map(|c| c.to_string()).collect();
            Logger::new().log_message_with_trace(
                LogLevel::Error,
                &e.to_string(),
                causes.iter().map(String::as_str).collect(),
            );
            ExitCode::FAILURE
        }
    }
}

async fn run(command: Commands) -> Result<()> {
    let cwd = std::env::current_dir().context("Failed to get current dir")?;

    match command {
        Commands::Get { plist, key } => {
            let document = PlistDocument::load(&cwd.join(plist))?;
            let value = document
                .read_field(&key)
                .ok_or_else(|| anyhow!("Field '{}' not found in property list", key))?;
            println!("{}", value);
            Ok(())
        }

        Commands::Bump(args) => {
            let loaded = load_config(args.config.as_deref(), &cwd)?;
            if let Some(l) = &loaded {
                Logger::new().log_message(
                    LogLevel::Info,
                    &format!("Using config {}", l.path.display()),
                );
            }
            let options = build_options(BumpOverrides::from(&args), loaded, &cwd)?;

            let outcome = tokio::task::spawn_blocking(move || {
                let lookup = AppStoreLookup::new(options.country.clone());
                increment_version_number(&options, &lookup)
            })
            .await
            .context("Join error")??;

            let logger = Logger::new();
            match &outcome.previous {
                Some(previous) => logger.log_message(
                    LogLevel::Success,
                    &format!("{} -> {}", previous, outcome.version),
                ),
                None => logger.log_message(
                    LogLevel::Success,
                    &format!("Set version to {}", outcome.version),
                ),
            }

            println!("{}", shared_value_line(VERSION_NUMBER, &outcome.version));
            if let Some(path) = &args.shared_values_file {
                append_shared_value(&cwd.join(path), VERSION_NUMBER, &outcome.version)?;
            }

            Ok(())
        }
    }
}
