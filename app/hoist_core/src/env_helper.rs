/*
 * Copyright (c) Meta Platforms, Inc. and affiliates.
 *
 * This source code is dual-licensed under either the MIT license found in the
 * LICENSE-MIT file in the root directory of this source tree or the Apache
 * License, Version 2.0 found in the LICENSE-APACHE file in the root directory
 * of this source tree. You may select, at your option, one of the
 * above-listed licenses.
 */

use std::env;
use std::env::VarError;
use std::str::FromStr;

use anyhow::Context;
use once_cell::sync::OnceCell;

/// A typed, cached view of one environment variable.
pub struct EnvHelper<T> {
    convert: fn(&str) -> anyhow::Result<T>,
    var: &'static str,
    cell: OnceCell<Option<T>>,
}

impl<T> EnvHelper<T> {
    pub const fn with_converter(var: &'static str, convert: fn(&str) -> anyhow::Result<T>) -> Self {
        Self {
            convert,
            var,
            cell: OnceCell::new(),
        }
    }

    pub const fn new(var: &'static str) -> Self
    where
        T: FromStr,
        anyhow::Error: From<<T as FromStr>::Err>,
    {
        fn convert_from_str<T>(v: &str) -> anyhow::Result<T>
        where
            T: FromStr,
            anyhow::Error: From<<T as FromStr>::Err>,
        {
            Ok(T::from_str(v)?)
        }

        Self::with_converter(var, convert_from_str::<T>)
    }

    // `EnvHelper` caches the computed value, so the `'static` lifetime
    // forces placing it in a static variable instead of rebuilding
    // (and re-reading the environment) on every call.
    pub fn get(&'static self) -> anyhow::Result<Option<&T>> {
        let var = self.var;
        let convert = self.convert;

        self.cell
            .get_or_try_init(move || match env::var(var) {
                Ok(v) => {
                    tracing::info!("Env override found: ${} = {}", var, v);
                    Ok(Some((convert)(&v).map_err(anyhow::Error::from)?))
                }
                Err(VarError::NotPresent) => Ok(None),
                Err(VarError::NotUnicode(..)) => Err(anyhow::anyhow!("Variable is not unicode")),
            })
            .map(Option::as_ref)
            .with_context(|| format!("Invalid value for ${}", var))
    }
}
