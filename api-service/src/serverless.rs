//! Process setup for the Lambda entry point.
//!
//! Environment changes happen here, on the main thread, before the runtime
//! spawns any workers.

use tokio::runtime::{Builder, Runtime};

/// Makes the Lambda adapter route on the resource path, not `/{stage}/...`.
pub const IGNORE_STAGE_ENV: &str = "AWS_LAMBDA_HTTP_IGNORE_STAGE_IN_PATH";

/// Apply the process environment and build the multi-threaded runtime.
///
/// Call from a plain `fn main`; the variable is set before any runtime
/// thread exists.
pub fn prepare_runtime() -> std::io::Result<Runtime> {
    std::env::set_var(IGNORE_STAGE_ENV, "true");

    Builder::new_multi_thread().enable_all().build()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn stage_is_ignored_before_runtime_starts() {
        let runtime = prepare_runtime().unwrap();
        assert_eq!(std::env::var(IGNORE_STAGE_ENV).as_deref(), Ok("true"));

        let seen = runtime.block_on(async { std::env::var(IGNORE_STAGE_ENV) });
        assert_eq!(seen.as_deref(), Ok("true"));
    }
}
