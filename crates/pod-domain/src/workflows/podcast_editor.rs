use pod_core::{AttachmentKind, FieldKind, Rule, RuleSet, WorkflowDefinition, WorkflowError};

use super::episode_upload::owned;
use super::routes::{route, PODCASTS};
use crate::fields::*;

pub const CATEGORIES: [&str; 8] =
    ["Arts", "Business", "Comedy", "Education", "Health & Fitness", "News", "Society & Culture", "Technology"];
pub const LANGUAGES: [&str; 5] = ["en", "es", "fr", "de", "pt"];

/// Editor de podcast: basics -> publishing. El artwork sólo se exige al
/// publicar.
pub fn podcast_editor() -> Result<WorkflowDefinition, WorkflowError> {
    let rules =
        RuleSet::new().rule(TITLE, "Title", Rule::Required, &[STEP_BASICS])
                      .rule(TITLE, "Title", Rule::MaxLength(MAX_TITLE_CHARS), &[STEP_BASICS])
                      .rule(DESCRIPTION, "Description", Rule::Required, &[STEP_BASICS])
                      .rule(AUTHOR, "Author", Rule::Required, &[STEP_BASICS])
                      .rule(CATEGORY, "Category", Rule::Required, &[STEP_BASICS])
                      .rule(CATEGORY, "Category", Rule::OneOf(owned(&CATEGORIES)), &[STEP_BASICS])
                      .rule(LANGUAGE, "Language", Rule::OneOf(owned(&LANGUAGES)), &[STEP_BASICS])
                      .rule(WEBSITE_URL, "Website", Rule::Url, &[STEP_BASICS])
                      .rule(ARTWORK, "Artwork", Rule::RequiredAttachment, &[STEP_PUBLISHING]);

    WorkflowDefinition::builder("podcast-editor").step(STEP_BASICS, "Basics")
                                                 .step(STEP_PUBLISHING, "Artwork & publishing")
                                                 .field(TITLE, FieldKind::Text)
                                                 .field(DESCRIPTION, FieldKind::Text)
                                                 .field(AUTHOR, FieldKind::Text)
                                                 .field(CATEGORY, FieldKind::Text)
                                                 .field(LANGUAGE, FieldKind::Text)
                                                 .field(WEBSITE_URL, FieldKind::Text)
                                                 .field(EXPLICIT, FieldKind::Flag)
                                                 .field(ARTWORK, FieldKind::Attachment(AttachmentKind::Image))
                                                 .rules(rules)
                                                 .on_submit(route(PODCASTS))
                                                 .on_discard(route(PODCASTS))
                                                 .build()
}
