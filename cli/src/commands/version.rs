//! Version command

/// Run the version command.
pub fn run() {
    let version = env!("CARGO_PKG_VERSION");
    println!("zeta-deploy {version}");
}
