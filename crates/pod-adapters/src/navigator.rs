use std::sync::Mutex;

use log::info;
use pod_core::{Navigator, Route};

/// Registra las navegaciones pedidas por el workflow; el host real cambiaría
/// de pantalla.
#[derive(Debug, Default)]
pub struct RecordingNavigator {
    routes: Mutex<Vec<Route>>,
}

impl RecordingNavigator {
    pub fn routes(&self) -> Vec<Route> {
        self.routes.lock().map(|g| g.clone()).unwrap_or_default()
    }

    pub fn last(&self) -> Option<Route> {
        self.routes.lock().ok().and_then(|g| g.last().cloned())
    }
}

impl Navigator for RecordingNavigator {
    fn navigate(&self, route: &Route) {
        info!("navigate -> {route}");
        let mut guard = self.routes.lock().unwrap_or_else(|poisoned| poisoned.into_inner());
        guard.push(route.clone());
    }
}
