//! Convert openBIS JSON exports into RDF graphs.

pub mod conversion;
pub mod emitter;
pub mod error;
pub mod model;

pub use conversion::{convert, ConversionOptions, TimestampZone};
pub use error::{ConvertError, Result};
pub use model::graph::{Graph, Literal, Node, Term, Triple};
pub use model::vocabulary::{OntologyLookup, Vocabulary};
