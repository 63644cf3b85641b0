/*
 * Copyright (c) Meta Platforms, Inc. and affiliates.
 *
 * This source code is dual-licensed under either the MIT license found in the
 * LICENSE-MIT file in the root directory of this source tree or the Apache
 * License, Version 2.0 found in the LICENSE-APACHE file in the root directory
 * of this source tree. You may select, at your option, one of the
 * above-listed licenses.
 */

use anyhow::Context;
use tracing_subscriber::fmt::MakeWriter;
use tracing_subscriber::prelude::*;
use tracing_subscriber::EnvFilter;

use crate::env_helper::EnvHelper;

/// Installs the global tracing subscriber, writing to `writer`.
///
/// Embedding binaries call this once at startup. By default only
/// warnings and errors are shown; `$HOIST_LOG` overrides the filter with
/// any `EnvFilter` directive (e.g. `hoist_execute=debug`).
pub fn init_tracing_for_writer<W>(writer: W) -> anyhow::Result<()>
where
    W: for<'writer> MakeWriter<'writer> + Send + Sync + 'static,
{
    static ENV_LOG: EnvHelper<String> = EnvHelper::new("HOIST_LOG");

    let filter = match ENV_LOG.get()? {
        Some(v) => EnvFilter::try_new(v).context("Failed to parse $HOIST_LOG as a filter")?,
        None => EnvFilter::new("warn"),
    };

    let layer = tracing_subscriber::fmt::layer()
        .with_writer(writer)
        .with_filter(filter);

    tracing_subscriber::registry().with(layer).init();

    Ok(())
}
