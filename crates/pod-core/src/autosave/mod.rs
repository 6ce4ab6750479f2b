//! Draft Persistence Timer: debounce explícito (arm/reset/fire) y ticket de
//! guardado en curso.

mod ticket;
mod timer;

pub use ticket::DraftTicket;
pub use timer::DebounceTimer;
