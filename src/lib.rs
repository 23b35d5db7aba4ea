//! dep-harvest - Maven/Gradle dependency coordinate harvester library
//!
//! This library provides the core functionality for building large, verified
//! lists of `group:name:version` coordinates:
//! - Parsing `pom.xml` and `build.gradle` dependency declarations
//! - Resolving version placeholders against the surrounding build files
//! - Deduplicating coordinates, keeping the highest version per artifact
//! - Checking artifact existence against a Maven 2 repository in resumable passes

pub mod cli;
pub mod config;
pub mod dedup;
pub mod domain;
pub mod error;
pub mod fixture;
pub mod lists;
pub mod logging;
pub mod manifest;
pub mod orchestrator;
pub mod output;
pub mod progress;
pub mod registry;
pub mod resolve;
pub mod verify;
