//! Modelos del formulario (valores, snapshot, adjuntos).

pub mod attachment;
pub mod snapshot;
pub mod value;

pub use attachment::{AttachmentDescriptor, AttachmentKind, AttachmentMetadata, AttachmentUpload, Dimensions};
pub use snapshot::FormSnapshot;
pub use value::{FieldKind, FieldValue};
