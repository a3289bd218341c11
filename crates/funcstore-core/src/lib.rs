//! `funcstore` Core
//!
//! This crate provides the records stored by `funcstore` and their encoding.
//!
//! # Overview
//!
//! - **Records**: [`App`] (a named application) and [`Route`] (a named route
//!   owned by an application)
//! - **Filters**: [`AppFilter`] and [`RouteFilter`] for listing records
//! - **Encoding**: [`Encoder`] and [`Decoder`] turning records into the bytes
//!   kept in storage
//!
//! # Example
//!
//! ```
//! use funcstore_core::{App, Decoder, Encoder, Route, RouteFilter};
//!
//! let app = App::new("myapp").with_config("LOG_LEVEL", "debug");
//! let route = Route::new("myapp", "/hello").with_image("iron/hello");
//!
//! let bytes = route.encode().unwrap();
//! assert_eq!(Route::decode(&bytes).unwrap(), route);
//!
//! let filter = RouteFilter::new("myapp").with_image("iron/hello");
//! assert!(filter.matches(&route));
//! # let _ = app;
//! ```
//!
//! # Modules
//!
//! - [`types`] - Records and filters
//! - [`encoding`] - Record serialization
//! - [`error`] - Error types ([`CoreError`])

#![deny(clippy::unwrap_used)]

pub mod encoding;
pub mod error;
pub mod types;

pub use encoding::{Decoder, Encoder};
pub use error::CoreError;
pub use types::{App, AppFilter, Format, Route, RouteFilter, RouteType};
