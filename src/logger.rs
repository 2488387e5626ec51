// SPDX-License-Identifier: MIT
//
// Log setup for the binary.
//
// The libraries only emit through `log`; env_logger is the one sink,
// installed here. The filter comes from INKGRID_LOG using env_logger's
// directive syntax (`debug`, `ink_atlas=trace`, ...), default `warn`.
// env_logger writes to stderr, so logs never mix with the frame on stdout.

use env_logger::{Builder, Env};

/// Environment variable holding the log filter.
pub const ENV_VAR: &str = "INKGRID_LOG";

/// Filter used when the variable is unset.
pub const DEFAULT_FILTER: &str = "warn";

/// A builder reading its filter from `var`, falling back to `warn`.
fn builder(var: &str) -> Builder {
    let mut builder = Builder::from_env(Env::default().filter_or(var, DEFAULT_FILTER));
    builder.format_timestamp(None);
    builder
}

/// Install the logger. Call once, before anything logs.
pub fn init() {
    builder(ENV_VAR).init();
}
