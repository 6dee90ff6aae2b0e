#![allow(clippy::doc_markdown)]
#![doc = include_str!("../README.md")]

pub mod billing;
pub mod cli;
pub mod ledger;
pub mod prelude;
pub mod quantity;
pub mod tables;
