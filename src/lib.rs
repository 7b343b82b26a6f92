//! "Stróż" utility

//! Probes configured websites once, reports their health to a chat webhook.

#![forbid(unsafe_code)]
#![deny(
    missing_docs,
    unstable_features,
    missing_debug_implementations,
    missing_copy_implementations,
    trivial_casts,
    trivial_numeric_casts,
    unused_import_braces,
    unused_qualifications,
    bad_style,
    improper_ctypes,
    non_shorthand_field_patterns,
    no_mangle_generic_items,
    overflowing_literals,
    path_statements,
    patterns_in_fns_without_body,
    unconditional_recursion,
    unused_allocation,
    unused_comparisons,
    unused_parens,
    while_true,
    unused_extern_crates
)]
#![warn(dead_code, unused_imports, unused_variables)]

// For development:
// #![allow(dead_code, unused_imports, unused_variables, deprecated)]


/// Use MiMalloc as default allocator:
#[global_allocator]
static GLOBAL: mimalloc::MiMalloc = mimalloc::MiMalloc;


pub use crate::api::*;
pub use crate::checks::certificate::*;
pub use crate::checks::prober::*;
pub use crate::checks::site::*;
pub use crate::config::*;
pub use crate::configuration::*;
pub use crate::error::*;
pub use crate::notificator::*;
pub use crate::products::outcome::*;
pub use crate::products::payload::*;
pub use crate::products::report::*;
pub use crate::products::unexpected::*;
pub use crate::utilities::*;
use core::fmt::Debug;
use core::fmt::Formatter;
use curl::easy::{Handler, WriteError};
use std::fmt;
pub use tracing::{debug, error, info, instrument, trace, warn};


/// Drains response bodies from Curl, keeps only a short prefix:
#[derive(Default)]
pub struct Collector {
    prefix: Vec<u8>,
    drained: u64,
}


impl Handler for Collector {
    fn write(&mut self, data: &[u8]) -> Result<usize, WriteError> {
        let room = COLLECTOR_PREFIX_LIMIT.saturating_sub(self.prefix.len());
        self.prefix
            .extend_from_slice(&data[..room.min(data.len())]);
        self.drained += data.len() as u64;
        Ok(data.len())
    }
}


impl Collector {
    /// Amount of bytes read from the response body
    pub fn drained(&self) -> u64 {
        self.drained
    }


    /// Kept prefix of the response body
    pub fn preview(&self) -> String {
        String::from_utf8_lossy(&self.prefix).trim().to_string()
    }
}


impl Debug for Collector {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.debug_struct(&format!(
            "Collector buffer (first 50 in hex): {}…",
            self.prefix
                .iter()
                .take(50)
                .map(|c| format!("{:x}", c))
                .collect::<String>()
        ))
        .field("drained", &self.drained)
        .finish()
    }
}


//
// Public modules:
//

/// Configuration defaults:
pub mod configuration;

/// Dynamic config:
pub mod config;

/// Fatal errors:
pub mod error;

/// Utilities and helpers:
pub mod utilities;

/// Checks:
pub mod checks;

/// Check products:
pub mod products;

/// Webhook delivery:
pub mod notificator;

/// Health check API functions:
pub mod api;

//
// Private modules:
//
