// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

pub mod analytics;
pub mod catalog;
pub mod cli;
pub mod commands;
pub mod db;
pub mod error;
pub mod guard;
pub mod ledger;
pub mod migration;
pub mod models;
pub mod settings;
pub mod store;
pub mod utils;

pub use error::{LedgerError, LedgerResult};
pub use ledger::Ledger;
