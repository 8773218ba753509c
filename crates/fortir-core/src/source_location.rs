use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::sync::{Arc, RwLock};
use thiserror::Error;

/// Spans address bytes with `u32`, so a registered text must fit that space.
pub const MAX_FILE_SIZE: usize = u32::MAX as usize;

#[derive(Error, Debug)]
pub enum SourceFileError {
    #[error("source text of {0} bytes exceeds the addressable maximum")]
    TooLarge(usize),
}

/// Byte range in a registered source file.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SourceSpan {
    pub file_id: u32,
    pub start: u32,
    pub len: u32,
}

/// Span carried by statements with no usable position.
pub const INVALID_SPAN: SourceSpan = SourceSpan {
    file_id: u32::MAX,
    start: 0,
    len: 0,
};

impl SourceSpan {
    pub fn new(file_id: u32, start: u32, len: u32) -> Self {
        Self {
            file_id,
            start,
            len,
        }
    }

    #[inline]
    pub fn is_valid(&self) -> bool {
        self.file_id != u32::MAX && self.len > 0
    }
}

impl Default for SourceSpan {
    fn default() -> Self {
        INVALID_SPAN
    }
}

/// File and line a span resolves to. Spans that do not resolve degrade to
/// file `unknown`, line 0, so callers injecting diagnostic context never
/// have to handle a failure.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceOrigin {
    pub file: String,
    pub line: u32,
}

#[derive(Debug, Clone)]
struct SourceFile {
    path: PathBuf,
    text: Arc<str>,
    line_starts: Arc<[u32]>,
}

/// Shared registry of source texts. A module and any number of lowering
/// contexts hold clones; all post-registration access is read-only.
#[derive(Debug, Clone)]
pub struct SourceFiles {
    files: Arc<RwLock<Vec<SourceFile>>>,
}

impl SourceFiles {
    pub fn new() -> Self {
        Self {
            files: Arc::new(RwLock::new(Vec::new())),
        }
    }

    /// Registers a text and returns the id spans refer to it by.
    pub fn add_file(&self, path: PathBuf, text: String) -> Result<u32, SourceFileError> {
        if text.len() > MAX_FILE_SIZE {
            return Err(SourceFileError::TooLarge(text.len()));
        }

        let line_starts: Arc<[u32]> = line_start_table(&text).into();

        let mut files = self.files.write().unwrap();
        let file_id = files.len() as u32;

        files.push(SourceFile {
            path,
            text: text.into(),
            line_starts,
        });

        Ok(file_id)
    }

    fn file(&self, file_id: u32) -> Option<SourceFile> {
        let files = self.files.read().unwrap();
        files.get(file_id as usize).cloned()
    }

    pub fn file_name(&self, file_id: u32) -> Option<String> {
        self.file(file_id).map(|f| f.path.display().to_string())
    }

    /// 1-based line and column of the span's first character. Columns count
    /// characters, not bytes; an offset inside a multi-byte character snaps
    /// back to the character's start. `None` when the span is invalid, the
    /// file unknown, or the offset past the end of the text.
    pub fn to_line_col(&self, span: SourceSpan) -> Option<(u32, u32)> {
        if !span.is_valid() {
            return None;
        }

        let file = self.file(span.file_id)?;
        let mut offset = span.start as usize;
        if offset > file.text.len() {
            return None;
        }
        while !file.text.is_char_boundary(offset) {
            offset -= 1;
        }

        let line_idx = match file.line_starts.binary_search(&(offset as u32)) {
            Ok(exact) => exact,
            Err(insert) => insert - 1,
        };
        let line_start = file.line_starts[line_idx] as usize;
        let column = file.text[line_start..offset].chars().count() as u32 + 1;

        Some((line_idx as u32 + 1, column))
    }

    /// The file and line a diagnostic or a runtime source-location argument
    /// reports for `span`.
    pub fn origin(&self, span: SourceSpan) -> SourceOrigin {
        match (self.file_name(span.file_id), self.to_line_col(span)) {
            (Some(file), Some((line, _))) => SourceOrigin { file, line },
            _ => SourceOrigin {
                file: "unknown".to_string(),
                line: 0,
            },
        }
    }

    /// One source line without its terminator, 1-based.
    pub fn line_text(&self, file_id: u32, line: u32) -> Option<String> {
        let file = self.file(file_id)?;
        let line_idx = (line as usize).checked_sub(1)?;

        let start = *file.line_starts.get(line_idx)? as usize;
        let end = file
            .line_starts
            .get(line_idx + 1)
            .map_or(file.text.len(), |&next| next as usize);

        let text = file.text.get(start..end)?;
        Some(text.trim_end_matches(|c| c == '\r' || c == '\n').to_string())
    }

    /// Gutter-formatted excerpt around the span's line, the span underlined
    /// with carets, with `context_lines` extra lines on each side.
    pub fn snippet(&self, span: SourceSpan, context_lines: usize) -> Option<String> {
        let (line, column) = self.to_line_col(span)?;

        let first = line.saturating_sub(context_lines as u32).max(1);
        let last = line.saturating_add(context_lines as u32);

        let mut out = String::with_capacity(256);
        for line_no in first..=last {
            let text = match self.line_text(span.file_id, line_no) {
                Some(text) => text,
                None => break,
            };
            out.push_str(&format!("{:>4} | {}\n", line_no, text));

            if line_no == line {
                let remaining = (text.chars().count() + 1).saturating_sub(column as usize);
                let width = (span.len as usize).min(remaining).max(1);
                out.push_str(&format!(
                    "     | {}{}\n",
                    " ".repeat(column as usize - 1),
                    "^".repeat(width)
                ));
            }
        }

        Some(out)
    }
}

impl Default for SourceFiles {
    fn default() -> Self {
        Self::new()
    }
}

/// Byte offset of every line start. CRLF counts as one break; a lone `\r`
/// also breaks.
fn line_start_table(text: &str) -> Vec<u32> {
    let mut starts = vec![0u32];
    let bytes = text.as_bytes();

    for (i, &byte) in bytes.iter().enumerate() {
        let breaks = match byte {
            b'\n' => true,
            b'\r' => bytes.get(i + 1) != Some(&b'\n'),
            _ => false,
        };
        if breaks {
            starts.push(i as u32 + 1);
        }
    }

    starts
}
