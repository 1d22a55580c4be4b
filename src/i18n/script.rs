use serde::Serialize;

/// Writing systems tracked by the mixed-language check.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Script {
    Hangul,
    Han,
    Kana,
}

impl Script {
    /// The tracked script a character belongs to, if any.
    #[must_use]
    pub const fn of(c: char) -> Option<Self> {
        match c as u32 {
            0x1100..=0x11FF | 0x3130..=0x318F | 0xA960..=0xA97F | 0xAC00..=0xD7AF
            | 0xD7B0..=0xD7FF => Some(Self::Hangul),
            0x3400..=0x4DBF | 0x4E00..=0x9FFF | 0xF900..=0xFAFF | 0x20000..=0x2A6DF => {
                Some(Self::Han)
            }
            0x3040..=0x309F | 0x30A0..=0x30FF | 0x31F0..=0x31FF | 0xFF66..=0xFF9F => {
                Some(Self::Kana)
            }
            _ => None,
        }
    }

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Hangul => "Hangul",
            Self::Han => "Han",
            Self::Kana => "Kana",
        }
    }
}

impl std::fmt::Display for Script {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Tracked scripts a locale may use; `None` when the locale has no profile.
///
/// Only the primary language subtag counts: `zh-TW` and `zh_CN` use the `zh`
/// profile.
#[must_use]
pub fn allowed_scripts(locale: &str) -> Option<&'static [Script]> {
    let primary = locale
        .split(['-', '_'])
        .next()
        .unwrap_or(locale)
        .to_ascii_lowercase();
    match primary.as_str() {
        "ko" => Some(&[Script::Hangul]),
        "zh" => Some(&[Script::Han]),
        "ja" => Some(&[Script::Han, Script::Kana]),
        "en" => Some(&[]),
        _ => None,
    }
}

/// First character of `text` whose tracked script is not in `allowed`.
#[must_use]
pub fn foreign_char(text: &str, allowed: &[Script]) -> Option<(char, Script)> {
    text.chars()
        .find_map(|c| Script::of(c).filter(|s| !allowed.contains(s)).map(|s| (c, s)))
}

#[cfg(test)]
#[path = "script_tests.rs"]
mod tests;
