//! Filename resolution: every downloaded file carries an extension.

use serde::Serialize;

use crate::mime_table::extension_for_mime;

/// Filename guaranteed to contain a `.` followed by at least one character.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(transparent)]
pub struct ResolvedFileName(String);

impl ResolvedFileName {
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Text after the last `.`; empty for names such as `v1.2.`.
    pub fn extension(&self) -> &str {
        self.0.rsplit_once('.').map_or("", |(_, ext)| ext)
    }

    pub fn into_string(self) -> String {
        self.0
    }
}

impl std::fmt::Display for ResolvedFileName {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for ResolvedFileName {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

/// `true` when some `.` is followed by at least one character, so `v1.2.`
/// counts while `report.` does not.
pub fn has_extension(file_name: &str) -> bool {
    file_name
        .find('.')
        .is_some_and(|dot| dot + 1 < file_name.len())
}

/// Picks the filename sent to the browser.
///
/// `base` is kept when it already has an extension. Otherwise an override
/// with an extension wins, and failing that the extension of `content_type`
/// (or `default_extension`) is appended to `base`. An empty `base` becomes
/// `fallback_base`.
///
/// ```
/// use filegate_core::resolve_file_name;
///
/// let name = resolve_file_name("report", None, "application/pdf", "bin", "document");
/// assert_eq!(name.as_str(), "report.pdf");
/// ```
pub fn resolve_file_name(
    base: &str,
    file_name_override: Option<&str>,
    content_type: &str,
    default_extension: &str,
    fallback_base: &str,
) -> ResolvedFileName {
    if has_extension(base) {
        return ResolvedFileName(base.to_string());
    }
    if let Some(name) = file_name_override.map(str::trim).filter(|n| has_extension(n)) {
        return ResolvedFileName(name.to_string());
    }

    let stem = match base.trim().trim_end_matches('.') {
        "" => fallback_base.trim(),
        stem => stem,
    };
    let ext = match extension_for_mime(content_type) {
        Some(ext) => ext,
        None => match default_extension.trim().trim_start_matches('.') {
            "" => "bin",
            ext => ext,
        },
    };
    ResolvedFileName(format!("{stem}.{ext}"))
}
