// Copyright 2025 the Vista Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Shared setup for the Vista demos.

use tracing_subscriber::EnvFilter;

/// Install a `fmt` subscriber for the demos.
///
/// `RUST_LOG` overrides the default, which shows Vista's own `debug` events and
/// everything else at `warn`.
pub fn init_logging() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        EnvFilter::new("warn,vista_view=debug,vista_navigation=debug,vista_storage=debug")
    });
    // A second call (or a host-installed subscriber) wins; the demos only need one.
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true)
        .try_init();
}
