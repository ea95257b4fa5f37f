//! Resource annotations attached to model components.
//!
//! Annotations are CV terms: a BioModels [`Qualifier`] relating the component
//! to an external resource URI. [`CVTerms`] stores them grouped by qualifier
//! and keeps an index from provider name to identifiers, which is what the
//! metadata facade exposes as its mapping view.

mod cvterm;
mod qualifier;
mod store;

pub use cvterm::CVTerm;
pub use qualifier::Qualifier;
pub use store::{AnnotationConfig, AnnotationStore, Annotations, CVTerms, ExternalResources};
