use pod_core::{AttachmentKind, FieldKind, Rule, RuleSet, WorkflowDefinition, WorkflowError};

use super::routes::{route, DASHBOARD, EPISODES};
use crate::fields::*;

pub const EPISODE_TYPES: [&str; 3] = ["full", "trailer", "bonus"];
pub const VISIBILITIES: [&str; 3] = ["public", "unlisted", "private"];

/// Wizard de subida de episodio: details -> media -> content -> preview.
///
/// `preview` es el paso final y valida la unión de todas las reglas antes
/// de publicar.
pub fn episode_upload() -> Result<WorkflowDefinition, WorkflowError> {
    let rules =
        RuleSet::new().rule(PODCAST_ID, "Podcast", Rule::Required, &[STEP_DETAILS])
                      .rule(TITLE, "Title", Rule::Required, &[STEP_DETAILS])
                      .rule(TITLE, "Title", Rule::MaxLength(MAX_TITLE_CHARS), &[STEP_DETAILS])
                      .rule(DESCRIPTION, "Description", Rule::Required, &[STEP_DETAILS])
                      .rule(EPISODE_NUMBER, "Episode number", Rule::Digits, &[STEP_DETAILS])
                      .rule(SEASON_NUMBER, "Season number", Rule::Digits, &[STEP_DETAILS])
                      .rule(EPISODE_TYPE, "Episode type", Rule::OneOf(owned(&EPISODE_TYPES)), &[STEP_DETAILS])
                      .rule(AUDIO_FILE, "Audio file", Rule::RequiredAttachment, &[STEP_MEDIA])
                      .rule(TAGS, "Tags", Rule::MaxItems(MAX_TAGS), &[STEP_CONTENT])
                      .rule(VISIBILITY, "Visibility", Rule::OneOf(owned(&VISIBILITIES)), &[STEP_CONTENT]);

    WorkflowDefinition::builder("episode-upload").step(STEP_DETAILS, "Episode details")
                                                 .step(STEP_MEDIA, "Media")
                                                 .step(STEP_CONTENT, "Show notes & tags")
                                                 .step(STEP_PREVIEW, "Preview & publish")
                                                 .field(PODCAST_ID, FieldKind::Text)
                                                 .field(TITLE, FieldKind::Text)
                                                 .field(DESCRIPTION, FieldKind::Text)
                                                 .field(EPISODE_NUMBER, FieldKind::Text)
                                                 .field(SEASON_NUMBER, FieldKind::Text)
                                                 .field(EPISODE_TYPE, FieldKind::Text)
                                                 .field(AUDIO_FILE, FieldKind::Attachment(AttachmentKind::Audio))
                                                 .field(COVER_IMAGE, FieldKind::Attachment(AttachmentKind::Image))
                                                 .field(TRANSCRIPT, FieldKind::Attachment(AttachmentKind::Transcript))
                                                 .field(SHOW_NOTES, FieldKind::Text)
                                                 .field(TAGS, FieldKind::List { max: Some(MAX_TAGS) })
                                                 .field(EXPLICIT, FieldKind::Flag)
                                                 .field(VISIBILITY, FieldKind::Text)
                                                 .rules(rules)
                                                 .on_submit(route(EPISODES))
                                                 .on_discard(route(DASHBOARD))
                                                 .build()
}

pub(crate) fn owned(values: &[&str]) -> Vec<String> {
    values.iter().map(|v| v.to_string()).collect()
}
