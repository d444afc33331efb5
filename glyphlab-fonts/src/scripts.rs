//! Scripts and languages offered for shaping.

/// A script choice: display name and ISO 15924 tag.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScriptChoice {
    pub name: &'static str,
    pub tag: &'static str,
}

/// A language choice: display name and BCP 47 code (empty = none).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LanguageChoice {
    pub name: &'static str,
    pub code: &'static str,
}

pub const SCRIPTS: &[ScriptChoice] = &[
    ScriptChoice { name: "Common", tag: "Zyyy" },
    ScriptChoice { name: "Thai", tag: "Thai" },
    ScriptChoice { name: "Hiragana", tag: "Hira" },
    ScriptChoice { name: "Katakana", tag: "Kana" },
    ScriptChoice { name: "Han", tag: "Hani" },
    ScriptChoice { name: "Hangul", tag: "Hang" },
    ScriptChoice { name: "Arabic", tag: "Arab" },
];

pub const LANGUAGES: &[LanguageChoice] = &[
    LanguageChoice { name: "None", code: "" },
    LanguageChoice { name: "English US", code: "en-US" },
    LanguageChoice { name: "Thai Thailand", code: "th-TH" },
    LanguageChoice { name: "Japanese Japan", code: "ja-JP" },
    LanguageChoice { name: "Korean Republic of Korea", code: "ko-KR" },
    LanguageChoice { name: "Chinese China", code: "zh-CN" },
    LanguageChoice { name: "Chinese Taiwan", code: "zh-TW" },
    LanguageChoice { name: "Arabic Saudi Arabia", code: "ar-SA" },
];

impl ScriptChoice {
    /// Look up by display name or tag, case-insensitively.
    pub fn find(name_or_tag: &str) -> Option<&'static ScriptChoice> {
        let key = name_or_tag.trim();
        SCRIPTS
            .iter()
            .find(|s| s.name.eq_ignore_ascii_case(key) || s.tag.eq_ignore_ascii_case(key))
    }
}

impl LanguageChoice {
    /// Look up by display name or code, case-insensitively.
    pub fn find(name_or_code: &str) -> Option<&'static LanguageChoice> {
        let key = name_or_code.trim();
        LANGUAGES
            .iter()
            .find(|l| l.name.eq_ignore_ascii_case(key) || l.code.eq_ignore_ascii_case(key))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_find_script() {
        assert_eq!(ScriptChoice::find("arabic").unwrap().tag, "Arab");
        assert_eq!(ScriptChoice::find("hani").unwrap().name, "Han");
        assert!(ScriptChoice::find("Klingon").is_none());
    }

    #[test]
    fn test_find_language() {
        assert_eq!(LanguageChoice::find("ja-jp").unwrap().name, "Japanese Japan");
        assert_eq!(LanguageChoice::find("none").unwrap().code, "");
    }

    #[test]
    fn test_common_is_first() {
        assert_eq!(SCRIPTS[0].name, "Common");
        assert_eq!(LANGUAGES[0].code, "");
    }
}
