//! `rip` launcher: runs the installed scanner binary with this process's
//! arguments and stdio, and exits with its status.
//!
//! It defines no flags of its own. The install root comes from `RIP_ROOT`
//! or the per-user data directory.

use rip_dist::config::resolve_install_root;
use rip_dist::launch::launch;
use rip_dist::platform::PlatformKey;
use rip_dist::runtime::RealRuntime;

#[tokio::main(flavor = "current_thread")]
async fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    let install_root = match resolve_install_root(&RealRuntime, None) {
        Ok(root) => root,
        Err(e) => {
            eprintln!("Failed to start RIP: {:#}", e);
            std::process::exit(1);
        }
    };

    let args = std::env::args_os().skip(1);
    match launch(&install_root, &PlatformKey::detect(), args).await {
        Ok(code) => std::process::exit(code),
        Err(e) => {
            eprintln!("Failed to start RIP: {:#}", e);
            std::process::exit(1);
        }
    }
}
