#![cfg_attr(coverage_nightly, feature(coverage_attribute))]

pub mod backend;
pub mod config;
pub mod intake;
pub mod logging;
pub mod model;
pub mod storage;
pub mod tui;
pub mod wizard;

#[cfg(test)]
mod test_support;
