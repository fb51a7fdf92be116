//! Front-matter parsing

use anyhow::{anyhow, Context, Result};
use chrono::{DateTime, NaiveDate, NaiveDateTime};
use indexmap::IndexMap;
use serde::{Deserialize, Deserializer, Serialize};

/// Accepts either a single string or a list of strings
fn string_or_vec<'de, D>(deserializer: D) -> Result<Vec<String>, D::Error>
where
    D: Deserializer<'de>,
{
    use serde::de::{self, SeqAccess, Visitor};
    use std::fmt;

    struct StringOrVec;

    impl<'de> Visitor<'de> for StringOrVec {
        type Value = Vec<String>;

        fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
            formatter.write_str("a string or a list of strings")
        }

        fn visit_str<E>(self, value: &str) -> Result<Self::Value, E>
        where
            E: de::Error,
        {
            Ok(vec![value.to_string()])
        }

        fn visit_seq<S>(self, mut seq: S) -> Result<Self::Value, S::Error>
        where
            S: SeqAccess<'de>,
        {
            let mut vec = Vec::new();
            while let Some(item) = seq.next_element::<String>()? {
                vec.push(item);
            }
            Ok(vec)
        }

        fn visit_none<E>(self) -> Result<Self::Value, E>
        where
            E: de::Error,
        {
            Ok(Vec::new())
        }

        fn visit_unit<E>(self) -> Result<Self::Value, E>
        where
            E: de::Error,
        {
            Ok(Vec::new())
        }
    }

    deserializer.deserialize_any(StringOrVec)
}

/// Front-matter of a case study or blog post.
///
/// Every display field is optional; consumers decide what to omit.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FrontMatter {
    pub title: Option<String>,
    pub date: Option<String>,
    pub excerpt: Option<String>,
    /// Live demo URL
    pub demo: Option<String>,
    /// Source repository URL
    pub src: Option<String>,
    /// Preview frame URL
    pub iframe: Option<String>,
    #[serde(rename = "badgeUrl")]
    pub badge_url: Option<String>,
    /// Folder of the source document, relative to the content root (`/blog/my-post`)
    pub folder: Option<String>,
    /// Social card image
    pub ogimage: Option<String>,
    /// Explicit position within the post type
    pub order: Option<i64>,
    #[serde(deserialize_with = "string_or_vec")]
    pub icons: Vec<String>,

    /// Remaining keys, in source order
    #[serde(flatten)]
    pub extra: IndexMap<String, serde_yaml::Value>,
}

impl FrontMatter {
    /// Parse front-matter from a document.
    /// Returns (front_matter, remaining_content)
    pub fn parse(content: &str) -> Result<(Self, &str)> {
        let content = content.trim_start();

        if content.starts_with("---") {
            return Self::parse_yaml(content);
        }

        if content.starts_with(";;;") || content.starts_with('{') {
            return Self::parse_json(content);
        }

        Ok((FrontMatter::default(), content))
    }

    fn parse_yaml(content: &str) -> Result<(Self, &str)> {
        let rest = &content[3..];
        let rest = rest.trim_start_matches(['\n', '\r']);

        let Some(end_pos) = rest.find("\n---") else {
            // Unterminated fence: a horizontal rule, not front-matter
            return Ok((FrontMatter::default(), content));
        };

        let yaml_content = &rest[..end_pos];
        let remaining = rest[end_pos + 4..].trim_start_matches(['\n', '\r']);

        if yaml_content.trim().is_empty() {
            return Ok((FrontMatter::default(), remaining));
        }

        if !looks_like_yaml(yaml_content) {
            return Ok((FrontMatter::default(), content));
        }

        let fm = serde_yaml::from_str::<FrontMatter>(yaml_content)
            .context("Failed to parse YAML front-matter")?;
        Ok((fm, remaining))
    }

    fn parse_json(content: &str) -> Result<(Self, &str)> {
        if let Some(rest) = content.strip_prefix(";;;") {
            if let Some(end_pos) = rest.find(";;;") {
                let json_content = &rest[..end_pos];
                let remaining = rest[end_pos + 3..].trim_start_matches(['\n', '\r']);

                let fm: FrontMatter = serde_json::from_str(json_content)
                    .map_err(|e| anyhow!("Failed to parse JSON front-matter: {}", e))?;

                return Ok((fm, remaining));
            }
        }

        if content.starts_with('{') {
            let mut depth = 0;
            let mut end_pos = 0;
            for (i, c) in content.char_indices() {
                match c {
                    '{' => depth += 1,
                    '}' => {
                        depth -= 1;
                        if depth == 0 {
                            end_pos = i + 1;
                            break;
                        }
                    }
                    _ => {}
                }
            }

            if end_pos > 0 {
                let json_content = &content[..end_pos];
                let remaining = content[end_pos..].trim_start_matches(['\n', '\r']);

                let fm: FrontMatter = serde_json::from_str(json_content)
                    .map_err(|e| anyhow!("Failed to parse JSON front-matter: {}", e))?;

                return Ok((fm, remaining));
            }
        }

        Err(anyhow!("Invalid JSON front-matter"))
    }

    /// Parse the `date` field
    pub fn parse_date(&self) -> Option<NaiveDateTime> {
        self.date.as_deref().and_then(parse_date_string)
    }

    /// Icons named by the document, falling back to `defaults` when it names none
    pub fn icons_or<'a>(&'a self, defaults: &'a [String]) -> &'a [String] {
        if self.icons.is_empty() {
            defaults
        } else {
            &self.icons
        }
    }
}

/// At least one `key: value` line, where the key is not a URL scheme
fn looks_like_yaml(block: &str) -> bool {
    block.lines().any(|line| {
        let trimmed = line.trim();
        if trimmed.is_empty() || trimmed.starts_with('#') {
            return false;
        }
        let Some(colon_pos) = trimmed.find(':') else {
            return false;
        };
        let key = &trimmed[..colon_pos];
        let is_valid_key = !key.is_empty()
            && key
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '-')
            && !matches!(key, "http" | "https" | "ftp");
        let after_colon = &trimmed[colon_pos + 1..];
        is_valid_key && (after_colon.is_empty() || after_colon.starts_with(' '))
    })
}

/// Parse a date string in the formats front-matter commonly uses
pub fn parse_date_string(s: &str) -> Option<NaiveDateTime> {
    let s = s.trim();

    let datetime_formats = [
        "%Y-%m-%d %H:%M:%S",
        "%Y/%m/%d %H:%M:%S",
        "%Y-%m-%d %H:%M",
        "%Y/%m/%d %H:%M",
        "%Y-%m-%dT%H:%M:%S",
        "%Y-%m-%dT%H:%M:%S%.f",
    ];
    for fmt in datetime_formats {
        if let Ok(dt) = NaiveDateTime::parse_from_str(s, fmt) {
            return Some(dt);
        }
    }

    for fmt in ["%Y-%m-%d", "%Y/%m/%d"] {
        if let Ok(d) = NaiveDate::parse_from_str(s, fmt) {
            return d.and_hms_opt(0, 0, 0);
        }
    }

    DateTime::parse_from_rfc3339(s).ok().map(|dt| dt.naive_local())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_case_study_frontmatter() {
        let content = r#"---
title: Chatbot
excerpt: A conversational agent
demo: https://chatbot.example.com
src: https://github.com/example/chatbot
iframe: https://codepen.io/example/embed/abc
badgeUrl: https://ghbtns.com/github-btn.html?user=example&repo=chatbot
order: 3
icons:
  - python
  - react
---

This is the content.
"#;

        let (fm, remaining) = FrontMatter::parse(content).unwrap();
        assert_eq!(fm.title.as_deref(), Some("Chatbot"));
        assert_eq!(fm.excerpt.as_deref(), Some("A conversational agent"));
        assert_eq!(
            fm.badge_url.as_deref(),
            Some("https://ghbtns.com/github-btn.html?user=example&repo=chatbot")
        );
        assert_eq!(fm.order, Some(3));
        assert_eq!(fm.icons, vec!["python", "react"]);
        assert!(remaining.contains("This is the content."));
    }

    #[test]
    fn test_parse_json_frontmatter() {
        let content = r#"{"title": "Test Post", "folder": "/blog/test-post"}

This is content.
"#;

        let (fm, remaining) = FrontMatter::parse(content).unwrap();
        assert_eq!(fm.title.as_deref(), Some("Test Post"));
        assert_eq!(fm.folder.as_deref(), Some("/blog/test-post"));
        assert!(remaining.contains("This is content."));
    }

    #[test]
    fn test_single_string_icon() {
        let content = "---\ntitle: Scraper\nicons: python\n---\nBody\n";
        let (fm, _) = FrontMatter::parse(content).unwrap();
        assert_eq!(fm.icons, vec!["python"]);
    }

    #[test]
    fn test_icons_fall_back_to_defaults() {
        let defaults = vec!["python".to_string()];
        let fm = FrontMatter::default();
        assert_eq!(fm.icons_or(&defaults), ["python".to_string()]);

        let fm = FrontMatter {
            icons: vec!["rust".to_string()],
            ..Default::default()
        };
        assert_eq!(fm.icons_or(&defaults), ["rust".to_string()]);
    }

    #[test]
    fn test_extra_keys_preserved_in_order() {
        let content = "---\ntitle: Post\nzeta: 1\nalpha: two\n---\nBody\n";
        let (fm, _) = FrontMatter::parse(content).unwrap();
        let keys: Vec<_> = fm.extra.keys().cloned().collect();
        assert_eq!(keys, vec!["zeta", "alpha"]);
    }

    #[test]
    fn test_malformed_yaml_is_an_error() {
        let content = "---\ntitle: [unclosed\n---\nBody\n";
        assert!(FrontMatter::parse(content).is_err());
    }

    #[test]
    fn test_parse_date() {
        let fm = FrontMatter {
            date: Some("2024-01-15 10:30:00".to_string()),
            ..Default::default()
        };
        let dt = fm.parse_date().unwrap();
        assert_eq!(dt.format("%Y-%m-%d").to_string(), "2024-01-15");

        let fm = FrontMatter {
            date: Some("2020-03-07".to_string()),
            ..Default::default()
        };
        assert_eq!(
            fm.parse_date().unwrap().format("%B %d, %Y").to_string(),
            "March 07, 2020"
        );
    }

    #[test]
    fn test_markdown_separator_not_yaml() {
        let content = r#"
---

Check out https://example.com/path and http://test.com

---
More content.
"#;

        let (fm, remaining) = FrontMatter::parse(content).unwrap();
        assert_eq!(fm.title, None);
        assert!(remaining.contains("https://example.com"));
    }

    #[test]
    fn test_no_frontmatter() {
        let (fm, remaining) = FrontMatter::parse("# Heading\n\nText").unwrap();
        assert_eq!(fm, FrontMatter::default());
        assert!(remaining.starts_with("# Heading"));
    }
}
