//! Media Attachment Handler: validación por tipo/tamaño y staging con tokens.

mod handler;
mod policy;

pub use handler::{AttachmentHandler, StagingTicket};
pub use policy::{AttachmentPolicies, AttachmentPolicy};
