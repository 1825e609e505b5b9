//! iplocate - IPv4 geolocation over sorted, disjoint range datasets
//!
//! # Features
//! - **server**: HTTP lookup server (default)
//! - **cli**: convert / seed / lookup commands
//!
//! # Architecture
//! - `utils`: dotted-quad codec
//! - `ingest`: raw dataset parsing and conversion to the compact gzip TSV format
//! - `storage`: range store interface with SeaORM and in-memory backends
//! - `services`: idempotent seeding and floor-and-verify lookups
//! - `api`: HTTP services and middleware
//! - `interfaces`: command-line interface
//! - `config`: configuration management
//! - `runtime`: application lifecycle and execution modes
//! - `system`: logging

pub mod api;
pub mod cli;
pub mod config;
pub mod errors;
pub mod ingest;
pub mod interfaces;
pub mod runtime;
pub mod services;
pub mod storage;
pub mod system;
pub mod utils;
