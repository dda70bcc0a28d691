// ABOUTME: Configuration management module for centralized server settings
// ABOUTME: Re-exports the environment-driven ServerConfig and its parts
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 MyFood contributors

//! Configuration module for the MyFood server

/// Environment and server configuration
pub mod environment;

pub use environment::{
    AppBehaviorConfig, DatabaseUrl, DraftConfig, Environment, LogLevel, ServerConfig,
};
