use crate::error::{NotepadError, Result};
use std::fmt;

/// A formatting command applied to the selection of the active surface.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FormatCommand {
    Bold,
    Italic,
    Underline,
    /// Legacy font size scale, 1 (smallest) to 7.
    FontSize(u8),
    TextColor(String),
    Highlight(String),
}

impl FormatCommand {
    /// Parses a toolbar command name and its optional value.
    ///
    /// Accepts the rich-text command names (`bold`, `fontSize`, `foreColor`, `hiliteColor`)
    /// as well as friendlier aliases (`font-size`, `color`, `highlight`).
    pub fn parse(name: &str, value: Option<&str>) -> Result<Self> {
        let value = value.map(str::trim).filter(|v| !v.is_empty());
        match name.trim().to_ascii_lowercase().as_str() {
            "bold" | "b" => Ok(FormatCommand::Bold),
            "italic" | "i" => Ok(FormatCommand::Italic),
            "underline" | "u" => Ok(FormatCommand::Underline),
            "fontsize" | "font-size" | "size" => {
                let raw = value.ok_or_else(|| missing_value(name))?;
                let size: u8 = raw
                    .parse()
                    .map_err(|_| NotepadError::InvalidFormat(format!("font size {}", raw)))?;
                if !(1..=7).contains(&size) {
                    return Err(NotepadError::InvalidFormat(format!(
                        "font size {} is outside 1-7",
                        size
                    )));
                }
                Ok(FormatCommand::FontSize(size))
            }
            "forecolor" | "color" => {
                let color = value.ok_or_else(|| missing_value(name))?;
                Ok(FormatCommand::TextColor(validate_color(color)?))
            }
            "hilitecolor" | "highlight" | "backcolor" => {
                let color = value.ok_or_else(|| missing_value(name))?;
                Ok(FormatCommand::Highlight(validate_color(color)?))
            }
            _ => Err(NotepadError::InvalidFormat(format!(
                "unknown command {}",
                name
            ))),
        }
    }

    /// Opening and closing markup wrapped around a formatted selection.
    pub fn tags(&self) -> (String, &'static str) {
        match self {
            FormatCommand::Bold => ("<b>".to_string(), "</b>"),
            FormatCommand::Italic => ("<i>".to_string(), "</i>"),
            FormatCommand::Underline => ("<u>".to_string(), "</u>"),
            FormatCommand::FontSize(size) => (format!("<font size=\"{}\">", size), "</font>"),
            FormatCommand::TextColor(color) => {
                (format!("<span style=\"color: {};\">", color), "</span>")
            }
            FormatCommand::Highlight(color) => (
                format!("<span style=\"background-color: {};\">", color),
                "</span>",
            ),
        }
    }
}

impl fmt::Display for FormatCommand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FormatCommand::Bold => write!(f, "bold"),
            FormatCommand::Italic => write!(f, "italic"),
            FormatCommand::Underline => write!(f, "underline"),
            FormatCommand::FontSize(size) => write!(f, "font size {}", size),
            FormatCommand::TextColor(color) => write!(f, "text color {}", color),
            FormatCommand::Highlight(color) => write!(f, "highlight {}", color),
        }
    }
}

fn missing_value(name: &str) -> NotepadError {
    NotepadError::InvalidFormat(format!("{} needs a value", name))
}

// Colors end up inside a style attribute.
fn validate_color(color: &str) -> Result<String> {
    let ok = color
        .chars()
        .all(|c| c.is_ascii_alphanumeric() || matches!(c, '#' | '(' | ')' | ',' | '.' | '%' | ' '));
    if ok {
        Ok(color.to_string())
    } else {
        Err(NotepadError::InvalidFormat(format!("color {}", color)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_toolbar_names() {
        assert_eq!(FormatCommand::parse("bold", None).unwrap(), FormatCommand::Bold);
        assert_eq!(
            FormatCommand::parse("fontSize", Some("5")).unwrap(),
            FormatCommand::FontSize(5)
        );
        assert_eq!(
            FormatCommand::parse("foreColor", Some("#ff0000")).unwrap(),
            FormatCommand::TextColor("#ff0000".into())
        );
        assert_eq!(
            FormatCommand::parse("hiliteColor", Some("yellow")).unwrap(),
            FormatCommand::Highlight("yellow".into())
        );
    }

    #[test]
    fn rejects_bad_values() {
        assert!(FormatCommand::parse("fontSize", Some("9")).is_err());
        assert!(FormatCommand::parse("fontSize", None).is_err());
        assert!(FormatCommand::parse("color", Some("red\"><script>")).is_err());
        assert!(FormatCommand::parse("strike", None).is_err());
    }

    #[test]
    fn tags_match_command() {
        assert_eq!(FormatCommand::Bold.tags(), ("<b>".to_string(), "</b>"));
        assert_eq!(
            FormatCommand::Highlight("yellow".into()).tags().0,
            "<span style=\"background-color: yellow;\">"
        );
    }
}
