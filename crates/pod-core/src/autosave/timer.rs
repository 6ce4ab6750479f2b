//! Timer cancelable con semántica last-mutation-wins.
//!
//! No duerme ni lanza tareas: recibe el instante actual en cada operación, lo
//! que permite probar el contrato de forma aislada. La sesión lo combina con
//! `tokio::time::sleep_until` para esperar el vencimiento.
use std::time::Duration;

use log::debug;
use tokio::time::Instant;

#[derive(Debug, Clone)]
pub struct DebounceTimer {
    delay: Duration,
    deadline: Option<Instant>,
    /// Cantidad de veces que se (re)armó; se reporta en cada rearmado.
    arms: u64,
}

impl DebounceTimer {
    pub fn new(delay: Duration) -> Self {
        Self { delay,
               deadline: None,
               arms: 0 }
    }

    pub fn delay(&self) -> Duration {
        self.delay
    }

    /// Arma el timer o, si ya estaba armado, mueve el vencimiento. Nunca hay
    /// más de un vencimiento pendiente.
    pub fn arm(&mut self, now: Instant) {
        let rearmed = self.deadline.is_some();
        self.deadline = Some(now + self.delay);
        self.arms += 1;
        if rearmed {
            debug!("autosave debounce re-armed (arm #{}, delay {:?})", self.arms, self.delay);
        }
    }

    pub fn cancel(&mut self) {
        self.deadline = None;
    }

    pub fn is_armed(&self) -> bool {
        self.deadline.is_some()
    }

    pub fn deadline(&self) -> Option<Instant> {
        self.deadline
    }

    pub fn arms(&self) -> u64 {
        self.arms
    }

    /// `true` si el timer está armado y venció en `now`.
    pub fn is_due(&self, now: Instant) -> bool {
        self.deadline.is_some_and(|d| now >= d)
    }

    /// Dispara como mucho una vez por armado: si venció, se desarma y
    /// devuelve `true`.
    pub fn poll(&mut self, now: Instant) -> bool {
        if self.is_due(now) {
            self.deadline = None;
            true
        } else {
            false
        }
    }
}
