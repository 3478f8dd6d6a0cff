//! Shader references in Unity `.mat` material files.
//!
//! A typical material serialized as text contains a line like
//! `m_Shader: {fileID: 4800000, guid: 933532a4fcc9baf4fa0491de14d08ed7, type: 3}`.
//! Some older or hand written files only name the shader with `shader: "Custom/Toon"`.
//! Both references are optional and extracted independently.
use std::sync::LazyLock;

use regex::Regex;

static SHADER_GUID: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"m_Shader:\s*\{[^}]*guid:\s*([0-9a-fA-F]+)[^}]*\}").unwrap()
});

static SHADER_NAME: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r#"shader:\s*"?([^"\n]+)"?"#).unwrap());

/// The GUID from the first `m_Shader` block in `content`.
pub fn shader_guid(content: &str) -> Option<&str> {
    SHADER_GUID
        .captures(content)
        .and_then(|c| c.get(1))
        .map(|m| m.as_str())
}

/// The literal shader name from the first `shader:` field in `content`.
///
/// This is only a hint since the name is never checked against the project's shaders.
pub fn shader_name(content: &str) -> Option<&str> {
    SHADER_NAME
        .captures(content)
        .and_then(|c| c.get(1))
        .map(|m| m.as_str().trim())
        .filter(|name| !name.is_empty())
}
