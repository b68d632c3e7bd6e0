use tracing_subscriber::EnvFilter;

/// Install the global subscriber. Logs go to stderr so stdout stays free
/// for command output and the MCP stdio transport.
pub fn init(verbose: bool) {
    let default_directive = if verbose {
        "mdoutline=debug"
    } else {
        "mdoutline=info"
    };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_directive));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}
