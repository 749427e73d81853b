use crate::release::RIP_REPO;

/// Manual alternatives printed after a failed install.
pub fn remediation_lines() -> Vec<String> {
    let base = format!("https://github.com/{}", RIP_REPO);
    vec![
        format!(
            "1. Building from source: git clone {base} && cd {} && cargo build --release",
            RIP_REPO.repo
        ),
        format!("2. Downloading manually from: {base}/releases"),
        format!("3. Reporting this issue: {base}/issues"),
    ]
}

/// Print the failure cause and the remediation list to stderr.
pub fn report_failure(err: &anyhow::Error) {
    eprintln!("Installation failed: {:#}", err);
    eprintln!();
    eprintln!("You can try:");
    for line in remediation_lines() {
        eprintln!("   {}", line);
    }
}
