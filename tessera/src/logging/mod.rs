// Copyright (c) 2025 tessera developers
//
// Licensed under the Apache License, Version 2.0
// <LICENSE-APACHE or https://www.apache.org/licenses/LICENSE-2.0> or the MIT
// license <LICENSE-MIT or https://opensource.org/licenses/MIT>, at your
// option. All files in the project carrying such notice may not be copied,
// modified, or distributed except according to those terms.

use std::{fs::File, io::stderr};

use anyhow::Result;
use tracing::{Level, level_filters::LevelFilter};
use tracing_subscriber::{EnvFilter, Layer, Registry, fmt::time::UtcTime};
use tracing_subscriber_init::{Iso8601, TracingConfig, compact, try_init};

use crate::config::{ConfigTessera, PathDefaults, to_path_buf};

/// Initialize tracing
///
/// Events go to stderr when `enable_std_output` is set, keeping stdout free for
/// shares and secrets, and to a file when a tracing path is supplied.
pub(crate) fn initialize<T, U>(
    tracing_config: &T,
    config: &ConfigTessera,
    defaults: &U,
    layers_opt: Option<Vec<Box<dyn Layer<Registry> + Send + Sync>>>,
) -> Result<()>
where
    T: TracingConfig,
    U: PathDefaults,
{
    let mut layers = layers_opt.unwrap_or_default();

    if config.enable_std_output() {
        let (layer, level_filter) = compact(tracing_config);
        let stderr_layer = layer
            .with_timer(UtcTime::new(Iso8601::DEFAULT))
            .with_writer(stderr)
            .with_filter(env_filter(config, level_filter));
        layers.push(stderr_layer.boxed());
    }

    if let Some(path) = defaults.tracing_absolute_path().as_ref() {
        let tracing_file = File::create(to_path_buf(path)?)?;
        let (layer, level_filter) = compact(tracing_config);
        let file_layer = layer
            .with_timer(UtcTime::new(Iso8601::DEFAULT))
            .with_writer(tracing_file)
            .with_filter(env_filter(config, level_filter));
        layers.push(file_layer.boxed());
    }

    try_init(layers)?;
    Ok(())
}

fn env_filter(config: &ConfigTessera, level_filter: LevelFilter) -> EnvFilter {
    EnvFilter::builder()
        .with_default_directive(level_filter.into())
        .parse_lossy(directives(config, level_filter))
}

fn directives(config: &ConfigTessera, level_filter: LevelFilter) -> String {
    let directives_base = match level_filter.into_level() {
        Some(level) => match level {
            Level::TRACE => "trace",
            Level::DEBUG => "debug",
            Level::INFO => "info",
            Level::WARN => "warn",
            Level::ERROR => "error",
        },
        None => "off",
    };

    if let Some(directives) = config.tracing().directives() {
        format!("{directives_base},{directives}")
    } else {
        directives_base.to_string()
    }
}
