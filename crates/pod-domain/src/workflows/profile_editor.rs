use pod_core::{AttachmentKind, FieldKind, Rule, RuleSet, WorkflowDefinition, WorkflowError};

use super::routes::{route, DASHBOARD, PROFILE};
use crate::fields::*;

pub const MIN_BIO_CHARS: usize = 20;
pub const MAX_BIO_CHARS: usize = 1_000;
pub const MAX_DISPLAY_NAME_CHARS: usize = 50;

/// Editor de perfil: un único paso que es a la vez el paso final.
///
/// Los enlaces sociales son campos de texto opcionales; quitar uno es
/// `remove_field`, que lo devuelve a vacío.
pub fn profile_editor() -> Result<WorkflowDefinition, WorkflowError> {
    let s = &[STEP_PROFILE];
    let rules = RuleSet::new().rule(DISPLAY_NAME, "Display name", Rule::Required, s)
                              .rule(DISPLAY_NAME, "Display name", Rule::MaxLength(MAX_DISPLAY_NAME_CHARS), s)
                              .rule(TAGLINE, "Tagline", Rule::MaxLength(MAX_TAGLINE_CHARS), s)
                              .rule(BIO, "Bio", Rule::MinLength(MIN_BIO_CHARS), s)
                              .rule(BIO, "Bio", Rule::MaxLength(MAX_BIO_CHARS), s)
                              .rule(WEBSITE_URL, "Website", Rule::Url, s)
                              .rule(TWITTER_URL, "Twitter", Rule::Url, s)
                              .rule(INSTAGRAM_URL, "Instagram", Rule::Url, s)
                              .rule(YOUTUBE_URL, "YouTube", Rule::Url, s);

    WorkflowDefinition::builder("profile-editor").step(STEP_PROFILE, "Profile")
                                                 .field(DISPLAY_NAME, FieldKind::Text)
                                                 .field(TAGLINE, FieldKind::Text)
                                                 .field(BIO, FieldKind::Text)
                                                 .field(AVATAR, FieldKind::Attachment(AttachmentKind::Image))
                                                 .field(WEBSITE_URL, FieldKind::Text)
                                                 .field(TWITTER_URL, FieldKind::Text)
                                                 .field(INSTAGRAM_URL, FieldKind::Text)
                                                 .field(YOUTUBE_URL, FieldKind::Text)
                                                 .rules(rules)
                                                 .on_submit(route(PROFILE))
                                                 .on_discard(route(DASHBOARD))
                                                 .build()
}
