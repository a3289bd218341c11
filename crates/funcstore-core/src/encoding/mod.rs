//! Serialization of records for storage.
//!
//! Records are stored as JSON documents. [`Encoder`] and [`Decoder`] are the
//! only way the storage layer turns records into bytes and back, so the
//! format can be changed here without touching the datastore.
//!
//! # Example
//!
//! ```
//! use funcstore_core::encoding::{Decoder, Encoder};
//! use funcstore_core::App;
//!
//! let app = App::new("myapp");
//! let bytes = app.encode().unwrap();
//! assert_eq!(App::decode(&bytes).unwrap(), app);
//! ```

mod records;
mod traits;


pub use traits::{Decoder, Encoder};
