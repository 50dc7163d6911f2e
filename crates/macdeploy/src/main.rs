//! macdeploy - Checks that a macOS application bundle is ready to ship.

use clap::{Parser, Subcommand};
use macdeploy_auditor::{Allowlist, AuditConfig, Auditor, Otool, OutputFormat};
use std::io::Write;
use std::path::PathBuf;
use std::process::ExitCode;
use tracing::info;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

/// Exit status when at least one library reference will not resolve.
const EXIT_VIOLATIONS: u8 = 2;

/// Exit status for configuration and operational errors.
const EXIT_ERROR: u8 = 1;

#[derive(Parser)]
#[command(name = "macdeploy")]
#[command(
    author,
    version,
    about = "A tool to help deploy an application on a mac."
)]
struct Cli {
    /// Enable verbose mode
    #[arg(short, long)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Check binaries and .dylib files
    CheckLibs {
        /// .app bundle directory
        bundle_dir: PathBuf,

        /// Program used to list linked libraries (`otool -L` compatible)
        #[arg(long, env = "MACDEPLOY_OTOOL", default_value = macdeploy_auditor::lister::DEFAULT_OTOOL)]
        otool: PathBuf,

        /// Additional glob pattern of libraries treated as system libraries
        #[arg(long = "allow", value_name = "GLOB")]
        allow: Vec<String>,

        /// Output format (text, json)
        #[arg(long, default_value = "text")]
        format: String,
    },
}

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    let filter = if cli.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"))
    };

    tracing_subscriber::registry()
        .with(fmt::layer().with_target(false).with_writer(std::io::stderr))
        .with(filter)
        .init();

    tokio::select! {
        result = run(cli) => match result {
            Ok(code) => code,
            Err(err) => {
                report_error(&err);
                ExitCode::from(EXIT_ERROR)
            }
        },
        _ = tokio::signal::ctrl_c() => {
            info!("Interrupted");
            ExitCode::SUCCESS
        }
    }
}

async fn run(cli: Cli) -> anyhow::Result<ExitCode> {
    match cli.command {
        Commands::CheckLibs {
            bundle_dir,
            otool,
            allow,
            format,
        } => {
            let config = AuditConfig {
                bundle_dir,
                verbose: cli.verbose,
                allowlist: Allowlist::system().extend(&allow)?,
                format: format.parse()?,
            };

            let stdout = std::io::stdout();
            let mut out = stdout.lock();
            let report = Auditor::new(&config, Otool::new(otool))
                .run(&mut out)
                .await?;

            if config.format == OutputFormat::Json {
                writeln!(out, "{}", report.to_json()?)?;
            }
            out.flush()?;

            if report.passed() {
                Ok(ExitCode::SUCCESS)
            } else {
                Ok(ExitCode::from(EXIT_VIOLATIONS))
            }
        }
    }
}

fn report_error(err: &anyhow::Error) {
    let is_config = err
        .downcast_ref::<macdeploy_common::Error>()
        .is_some_and(macdeploy_common::Error::is_config);

    if is_config {
        eprintln!("{}", err);
    } else {
        eprintln!("Error: {:#}", err);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_check_libs() {
        let cli = Cli::try_parse_from([
            "macdeploy",
            "-v",
            "check-libs",
            "--allow",
            "/opt/vendor/*",
            "--format",
            "json",
            "Player.app",
        ])
        .unwrap();
        assert!(cli.verbose);

        let Commands::CheckLibs {
            bundle_dir,
            allow,
            format,
            ..
        } = cli.command;
        assert_eq!(bundle_dir, PathBuf::from("Player.app"));
        assert_eq!(allow, vec!["/opt/vendor/*"]);
        assert_eq!(format, "json");
    }

    #[test]
    fn test_verbose_must_precede_subcommand() {
        assert!(Cli::try_parse_from(["macdeploy", "check-libs", "Player.app", "-v"]).is_err());
    }

    #[test]
    fn test_subcommand_required() {
        assert!(Cli::try_parse_from(["macdeploy", "-v"]).is_err());
    }
}
