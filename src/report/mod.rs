//! Certificate file generation
//!
//! Derives file names from labels, renders annotated PEM and writes one file
//! per certificate object.

pub mod filename;
pub mod pem;
pub mod writer;

pub use filename::label_to_filename;
pub use pem::{PemExporter, TrustAnnotation};
pub use writer::CertificateWriter;
