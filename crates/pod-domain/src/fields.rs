//! Nombres de campos y pasos compartidos entre workflows, adaptadores y UI.

// Wizard de subida de episodio
pub const STEP_DETAILS: &str = "details";
pub const STEP_MEDIA: &str = "media";
pub const STEP_CONTENT: &str = "content";
pub const STEP_PREVIEW: &str = "preview";

pub const PODCAST_ID: &str = "podcastId";
pub const TITLE: &str = "title";
pub const DESCRIPTION: &str = "description";
pub const EPISODE_NUMBER: &str = "episodeNumber";
pub const SEASON_NUMBER: &str = "seasonNumber";
pub const EPISODE_TYPE: &str = "episodeType";
pub const AUDIO_FILE: &str = "audioFile";
pub const COVER_IMAGE: &str = "coverImage";
pub const TRANSCRIPT: &str = "transcript";
pub const SHOW_NOTES: &str = "showNotes";
pub const TAGS: &str = "tags";
pub const EXPLICIT: &str = "explicit";
pub const VISIBILITY: &str = "visibility";

// Editor de perfil
pub const STEP_PROFILE: &str = "profile";
pub const DISPLAY_NAME: &str = "displayName";
pub const TAGLINE: &str = "tagline";
pub const BIO: &str = "bio";
pub const AVATAR: &str = "avatar";
pub const WEBSITE_URL: &str = "websiteUrl";
pub const TWITTER_URL: &str = "twitterUrl";
pub const INSTAGRAM_URL: &str = "instagramUrl";
pub const YOUTUBE_URL: &str = "youtubeUrl";

// Editor de podcast
pub const STEP_BASICS: &str = "basics";
pub const STEP_PUBLISHING: &str = "publishing";
pub const CATEGORY: &str = "category";
pub const LANGUAGE: &str = "language";
pub const ARTWORK: &str = "artwork";
pub const AUTHOR: &str = "author";

pub const MAX_TITLE_CHARS: usize = 100;
pub const MAX_TAGLINE_CHARS: usize = 100;
pub const MAX_TAGS: usize = 5;
