// SPDX-FileCopyrightText: 2026 Rivet Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Comment styles and the file-extension mapping that selects them.

use std::collections::HashMap;
use std::path::Path;

use serde::{Deserialize, Serialize};
use strum::{Display, EnumString};

/// How a header is wrapped in comments for a given file type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumString, Serialize, Deserialize)]
#[strum(serialize_all = "SCREAMING_SNAKE_CASE", ascii_case_insensitive)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum CommentStyle {
    /// `/* ... */` with ` * ` line prefixes.
    SlashstarStyle,
    /// `#` line comments.
    ScriptStyle,
    /// `<!-- ... -->` blocks.
    XmlStyle,
}

impl CommentStyle {
    /// Wrap header text in this style's comment syntax, ending with a blank line.
    pub fn render(&self, text: &str) -> String {
        let lines: Vec<&str> = text.trim_end().lines().collect();
        let mut out = String::new();
        match self {
            CommentStyle::SlashstarStyle => {
                out.push_str("/*\n");
                for line in &lines {
                    push_prefixed(&mut out, " *", line);
                }
                out.push_str(" */\n");
            }
            CommentStyle::ScriptStyle => {
                for line in &lines {
                    push_prefixed(&mut out, "#", line);
                }
            }
            CommentStyle::XmlStyle => {
                out.push_str("<!--\n");
                for line in &lines {
                    push_prefixed(&mut out, "  ", line);
                }
                out.push_str("-->\n");
            }
        }
        out.push('\n');
        out
    }

    /// Byte length of the comment block that `content` starts with, if any.
    pub fn leading_block_len(&self, content: &str) -> Option<usize> {
        match self {
            CommentStyle::SlashstarStyle => block_len(content, "/*", "*/"),
            CommentStyle::XmlStyle => block_len(content, "<!--", "-->"),
            CommentStyle::ScriptStyle => {
                let mut len = 0;
                for line in content.split_inclusive('\n') {
                    if !line.starts_with('#') || line.starts_with("#!") {
                        break;
                    }
                    len += line.len();
                }
                (len > 0).then_some(len)
            }
        }
    }

    /// Length of a leading line that has to stay above the header
    /// (a shebang or an XML declaration), including its newline.
    pub fn prelude_len(&self, content: &str) -> usize {
        let marker = match self {
            CommentStyle::ScriptStyle => "#!",
            CommentStyle::XmlStyle => "<?xml",
            CommentStyle::SlashstarStyle => return 0,
        };
        if !content.starts_with(marker) {
            return 0;
        }
        content.find('\n').map(|i| i + 1).unwrap_or(content.len())
    }
}

fn push_prefixed(out: &mut String, prefix: &str, line: &str) {
    out.push_str(prefix);
    if !line.is_empty() {
        out.push(' ');
        out.push_str(line);
    }
    out.push('\n');
}

fn block_len(content: &str, open: &str, close: &str) -> Option<usize> {
    if !content.starts_with(open) {
        return None;
    }
    let end = content[open.len()..].find(close)? + open.len() + close.len();
    // Swallow the rest of the closing line.
    let end = content[end..].find('\n').map(|i| end + i + 1).unwrap_or(content.len());
    Some(end)
}

/// Maps file extensions (without the dot) to comment styles.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StyleMapping {
    by_extension: HashMap<String, CommentStyle>,
}

impl Default for StyleMapping {
    fn default() -> Self {
        let mut by_extension = HashMap::new();
        for ext in [
            "java", "kt", "kts", "ts", "js", "rs", "c", "h", "cpp", "scala", "groovy", "gradle", "css",
        ] {
            by_extension.insert(ext.to_string(), CommentStyle::SlashstarStyle);
        }
        for ext in ["properties", "yml", "yaml", "toml", "sh", "py"] {
            by_extension.insert(ext.to_string(), CommentStyle::ScriptStyle);
        }
        for ext in ["xml", "html", "xsd"] {
            by_extension.insert(ext.to_string(), CommentStyle::XmlStyle);
        }
        Self { by_extension }
    }
}

impl StyleMapping {
    /// An empty mapping; every file is skipped until extensions are added.
    pub fn empty() -> Self {
        Self {
            by_extension: HashMap::new(),
        }
    }

    /// Set (or replace) the style for an extension.
    pub fn insert(&mut self, extension: impl Into<String>, style: CommentStyle) {
        self.by_extension
            .insert(extension.into().trim_start_matches('.').to_ascii_lowercase(), style);
    }

    pub fn style_for(&self, path: &Path) -> Option<CommentStyle> {
        let ext = path.extension()?.to_str()?.to_ascii_lowercase();
        self.by_extension.get(&ext).copied()
    }
}
