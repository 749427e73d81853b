use clap::Parser;
use rip_dist::install::{InstallOutcome, install, report_failure};
use rip_dist::runtime::RealRuntime;
use std::path::PathBuf;

/// rip-install - fetch the prebuilt RIP scanner for this machine
///
/// Downloads the binary matching this OS and architecture from the latest
/// GitHub release into `<root>/bin/`. Does nothing if it is already there.
///
/// If the GITHUB_TOKEN environment variable is set, it will be used for authentication.
#[derive(Parser, Debug)]
#[command(author, version = rip_dist::VERSION, about)]
struct Cli {
    /// Install root directory (also via RIP_ROOT)
    #[arg(long = "root", short = 'r', env = "RIP_ROOT", value_name = "PATH")]
    pub install_root: Option<PathBuf>,

    /// GitHub API URL (defaults to https://api.github.com)
    #[arg(long = "api-url", env = "RIP_API_URL", value_name = "URL")]
    pub api_url: Option<String>,
}

#[tokio::main(flavor = "current_thread")]
async fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();
    let cli = Cli::parse();

    match install(RealRuntime, cli.install_root, cli.api_url).await {
        Ok(InstallOutcome::Installed { path, bytes }) => {
            log::info!("Installed {} bytes to {:?}", bytes, path);
        }
        Ok(InstallOutcome::AlreadyInstalled(path)) => {
            log::info!("Kept existing {:?}", path);
        }
        Err(e) => {
            report_failure(&e);
            std::process::exit(1);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_defaults() {
        let cli = Cli::try_parse_from(["rip-install"]).unwrap();
        assert_eq!(cli.api_url, None);
    }

    #[test]
    fn test_cli_root_parsing() {
        let cli = Cli::try_parse_from(["rip-install", "--root", "/tmp/rip"]).unwrap();
        assert_eq!(cli.install_root, Some(PathBuf::from("/tmp/rip")));

        let cli = Cli::try_parse_from(["rip-install", "-r", "/opt/rip"]).unwrap();
        assert_eq!(cli.install_root, Some(PathBuf::from("/opt/rip")));
    }

    #[test]
    fn test_cli_api_url_parsing() {
        let cli =
            Cli::try_parse_from(["rip-install", "--api-url", "http://127.0.0.1:1234"]).unwrap();
        assert_eq!(cli.api_url.as_deref(), Some("http://127.0.0.1:1234"));
    }

    #[test]
    fn test_cli_rejects_positional_arguments() {
        assert!(Cli::try_parse_from(["rip-install", "owner/repo"]).is_err());
    }
}
