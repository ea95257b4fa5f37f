//! modelmeta: validated provenance and annotation metadata for model components.
//!
//! Components of a model (reactions, metabolites, genes, the model itself)
//! carry metadata: who created them and when, which external database entries
//! they correspond to, and miscellaneous key/value notes. This crate models
//! that metadata with containers that validate on every write.
//!
//! # Core Principles
//!
//! - **Validate on write**: keys, value types and date formats are checked at
//!   every mutation point, never lazily
//! - **Atomic mutations**: a rejected write leaves the container unchanged
//! - **Plain data in, typed data out**: every container also accepts its plain
//!   JSON form and coerces it through the same validation
//!
//! # Example
//!
//! ```
//! use modelmeta::MetaData;
//! use serde_json::json;
//!
//! let mut meta = MetaData::new();
//! meta.set("chebi", ["CHEBI:17234"]).unwrap();
//! meta.set_history(json!({
//!     "creators": [{"first_name": "Ada", "email": "ada@example.org"}],
//!     "created": "2020-01-01T00:00:00+0000"
//! }))
//! .unwrap();
//!
//! meta.history_mut().add_modified("2020-02-01T00:00:00+0000").unwrap();
//! assert!(meta.history_mut().add_modified("yesterday").is_err());
//! assert_eq!(meta.history().modified().len(), 1);
//! ```

pub mod annotation;
pub mod error;
pub mod history;
pub mod keyvalue;
pub mod raw;

mod metadata;

pub use annotation::{
    AnnotationConfig, AnnotationStore, Annotations, CVTerm, CVTerms, ExternalResources, Qualifier,
};
pub use error::{MetadataError, Result};
pub use history::{
    Creator, CreatorField, DateStamp, History, HistoryField, ListOfCreators, ModifiedHistory,
    RestrictedList, validate_date,
};
pub use keyvalue::{KeyValueField, KeyValuePair, ListOfKeyValue};
pub use metadata::MetaData;
pub use raw::{FromRaw, IntoValidated};
