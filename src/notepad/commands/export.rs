//! Exports every page, in id order, as plain text, a standalone HTML document, or a
//! gzipped tar holding both. Content is taken from the live surfaces so unsaved edits are
//! included.

use crate::commands::{CmdMessage, CmdResult, Session};
use crate::editor::SurfaceHost;
use crate::error::{NotepadError, Result};
use crate::store::StorageBackend;
use crate::text;
use chrono::{DateTime, Local, Utc};
use flate2::write::GzEncoder;
use flate2::Compression;
use std::io::Write;

pub const TEXT_FILE_NAME: &str = "notepad-export.txt";
pub const HTML_FILE_NAME: &str = "notepad-export.html";
pub const ARCHIVE_FILE_NAME: &str = "notepad-export.tar.gz";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExportFormat {
    Text,
    Html,
    Archive,
}

impl ExportFormat {
    /// File name used when the caller gives only a directory.
    pub fn file_name(self) -> &'static str {
        match self {
            ExportFormat::Text => TEXT_FILE_NAME,
            ExportFormat::Html => HTML_FILE_NAME,
            ExportFormat::Archive => ARCHIVE_FILE_NAME,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            ExportFormat::Text => "text",
            ExportFormat::Html => "HTML",
            ExportFormat::Archive => "archive",
        }
    }
}

pub fn run<B, H, W>(
    session: &Session<B, H>,
    format: ExportFormat,
    writer: W,
    now: DateTime<Utc>,
) -> Result<CmdResult>
where
    B: StorageBackend,
    H: SurfaceHost,
    W: Write,
{
    match format {
        ExportFormat::Text => write_all(writer, render_text(session).as_bytes())?,
        ExportFormat::Html => write_all(writer, render_html(session, now).as_bytes())?,
        ExportFormat::Archive => {
            write_archive(writer, &render_text(session), &render_html(session, now), now)?
        }
    }

    let mut result = CmdResult::default();
    result.add_message(CmdMessage::success(format!(
        "Exported {} page(s) as {}",
        session.pages.len(),
        format.label()
    )));
    Ok(result)
}

/// `(name, markup)` for every page, preferring the surface over the stored content.
fn page_contents<B: StorageBackend, H: SurfaceHost>(
    session: &Session<B, H>,
) -> Vec<(String, String)> {
    session
        .pages
        .pages()
        .map(|page| {
            let markup = session
                .editors
                .read(page.id)
                .unwrap_or_else(|| page.content.clone());
            (page.name.clone(), markup)
        })
        .collect()
}

pub fn render_text<B: StorageBackend, H: SurfaceHost>(session: &Session<B, H>) -> String {
    let mut out = String::new();
    for (name, markup) in page_contents(session) {
        out.push_str(&format!("=== {} ===\n", name));
        out.push_str(&text::plain_text(&markup));
        out.push_str("\n\n");
    }
    out
}

pub fn render_html<B: StorageBackend, H: SurfaceHost>(
    session: &Session<B, H>,
    now: DateTime<Utc>,
) -> String {
    let mut out = String::from(
        "<!DOCTYPE html>
<html>
<head>
    <meta charset=\"utf-8\">
    <title>Notepad Export</title>
    <style>
        body { font-family: Arial, sans-serif; margin: 40px; }
        .page { margin-bottom: 40px; border-bottom: 2px solid #8a2be2; padding-bottom: 20px; }
        .page-header { color: #8a2be2; font-weight: bold; margin-bottom: 10px; }
        .page-content { line-height: 1.6; }
    </style>
</head>
<body>
    <h1>Notepad Export</h1>
",
    );
    out.push_str(&format!(
        "    <p>Exported on: {}</p>\n",
        now.with_timezone(&Local).format("%Y-%m-%d %H:%M:%S")
    ));

    // Page content is the editor's own markup and goes in unescaped.
    for (name, markup) in page_contents(session) {
        out.push_str(&format!(
            "    <div class=\"page\">\n        <div class=\"page-header\">{}</div>\n        <div class=\"page-content\">{}</div>\n    </div>\n",
            text::escape_html(&name),
            markup
        ));
    }

    out.push_str("</body>\n</html>\n");
    out
}

/// Writes a `.tar.gz` holding the text and HTML exports.
pub fn write_archive<W: Write>(
    writer: W,
    text: &str,
    html: &str,
    now: DateTime<Utc>,
) -> Result<()> {
    let enc = GzEncoder::new(writer, Compression::default());
    let mut tar = tar::Builder::new(enc);

    for (name, content) in [(TEXT_FILE_NAME, text), (HTML_FILE_NAME, html)] {
        let mut header = tar::Header::new_gnu();
        header.set_size(content.len() as u64);
        header.set_mode(0o644);
        header.set_mtime(now.timestamp().max(0) as u64);
        header.set_cksum();

        tar.append_data(&mut header, name, content.as_bytes())
            .map_err(NotepadError::Io)?;
    }

    tar.into_inner()
        .and_then(|enc| enc.finish())
        .map_err(NotepadError::Io)?;
    Ok(())
}

fn write_all<W: Write>(mut writer: W, bytes: &[u8]) -> Result<()> {
    writer.write_all(bytes).map_err(NotepadError::Io)?;
    writer.flush().map_err(NotepadError::Io)
}
