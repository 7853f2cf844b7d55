pub mod build_info;

use std::sync::Once;

static TRACING_INIT: Once = Once::new();

/// Installs the global tracing subscriber once; returns `true` on the call that did it.
///
/// Logs go to stderr so command output on stdout stays machine-readable.
pub fn init_tracing() -> bool {
    let mut installed = false;
    TRACING_INIT.call_once(|| {
        use tracing_subscriber::{fmt, EnvFilter};

        let mut filter = EnvFilter::from_default_env();
        if let Ok(directive) = "splitledger=info".parse() {
            filter = filter.add_directive(directive);
        }
        installed = fmt()
            .with_env_filter(filter)
            .with_writer(std::io::stderr)
            .try_init()
            .is_ok();
    });
    installed
}
