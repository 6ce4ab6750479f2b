use std::fmt;
use std::sync::Arc;
use std::time::Duration;

use crate::attachment::AttachmentPolicies;
use crate::constants::DEFAULT_AUTOSAVE_DELAY_MS;
use crate::ports::{DraftStore, MetadataProbe, Navigator, Publisher};

/// Parámetros de una sesión.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WorkflowSettings {
    pub autosave_delay: Duration,
    pub policies: AttachmentPolicies,
}

impl Default for WorkflowSettings {
    fn default() -> Self {
        Self { autosave_delay: Duration::from_millis(DEFAULT_AUTOSAVE_DELAY_MS),
               policies: AttachmentPolicies::default() }
    }
}

/// Colaboradores externos inyectados en la sesión.
#[derive(Clone)]
pub struct Services {
    pub drafts: Arc<dyn DraftStore>,
    pub publisher: Arc<dyn Publisher>,
    pub probe: Arc<dyn MetadataProbe>,
    pub navigator: Arc<dyn Navigator>,
}

impl fmt::Debug for Services {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Services").finish_non_exhaustive()
    }
}
