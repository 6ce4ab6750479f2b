//! Field Store y estado de guardado del borrador.

mod field_store;
mod status;

pub use field_store::FieldStore;
pub use status::SaveStatus;
