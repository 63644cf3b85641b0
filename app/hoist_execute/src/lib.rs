/*
 * Copyright (c) Meta Platforms, Inc. and affiliates.
 *
 * This source code is dual-licensed under either the MIT license found in the
 * LICENSE-MIT file in the root directory of this source tree or the Apache
 * License, Version 2.0 found in the LICENSE-APACHE file in the root directory
 * of this source tree. You may select, at your option, one of the
 * above-listed licenses.
 */

//! Input metadata resolution for in-flight actions.
//!
//! The scheduler precomputes an [`index::ArtifactMetadataIndex`] over
//! every artifact an action declares as an input, then constructs one
//! [`resolver::InputMetadataResolver`] per execution attempt. Sandbox
//! staging, remote-execution request building, and local execution query
//! the resolver repeatedly during the attempt; it is discarded when the
//! attempt ends.

pub mod expansion;
pub mod fileset;
pub mod index;
pub mod input;
pub mod metadata;
pub mod resolver;
pub mod runfiles;
