//! # echo-agent
//!
//! CLI layer of the ECHO policy analysis agent: argument parsing,
//! configuration loading and report rendering on top of `echo-core`.

pub mod cli;
pub mod config;
