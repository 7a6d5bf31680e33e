use memoria_core::models::training::{Memory, PersonalityTrait};

/// Split `KEY=VALUE` at the first `=`.
pub fn split_pair(raw: &str) -> Result<(&str, &str), String> {
    raw.split_once('=')
        .map(|(k, v)| (k.trim(), v.trim()))
        .ok_or_else(|| format!("expected KEY=VALUE, got {raw:?}"))
}

/// `TITLE=TEXT`, optionally `TITLE@YEAR=TEXT`.
pub fn parse_story(raw: &str) -> Result<Memory, String> {
    let (head, content) = split_pair(raw)?;
    let (title, year) = match head.rsplit_once('@') {
        Some((title, year)) => {
            let year = year
                .trim()
                .parse::<i32>()
                .map_err(|_| format!("invalid year in {raw:?}"))?;
            (title.trim(), Some(year))
        }
        None => (head, None),
    };
    Ok(Memory {
        title: title.to_string(),
        content: content.to_string(),
        year,
    })
}

/// `NAME=DESCRIPTION`. The description may be empty.
pub fn parse_trait(raw: &str) -> Result<PersonalityTrait, String> {
    let (name, description) = split_pair(raw)?;
    Ok(PersonalityTrait {
        name: name.to_string(),
        description: description.to_string(),
    })
}

/// Content type for a voice sample, from its file extension.
pub fn audio_content_type(path: &std::path::Path) -> &'static str {
    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .map(|e| e.to_ascii_lowercase());
    match ext.as_deref() {
        Some("wav") => "audio/wav",
        Some("mp3") => "audio/mpeg",
        Some("m4a") | Some("mp4") => "audio/mp4",
        Some("ogg") | Some("oga") => "audio/ogg",
        Some("webm") => "audio/webm",
        Some("flac") => "audio/flac",
        _ => "application/octet-stream",
    }
}

/// Viewer role by its wire name (`family`, `attendee`, ...).
pub fn parse_role(raw: &str) -> Result<memoria_core::models::viewer::ViewerRole, String> {
    serde_json::from_value(serde_json::Value::String(raw.trim().to_ascii_lowercase()))
        .map_err(|_| format!("unknown role {raw:?}; expected family, attendee, provider, admin or guest"))
}
