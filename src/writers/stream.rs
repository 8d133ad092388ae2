//! Stream writer

use super::base::WriterBase;
use super::{FilterSpec, FormatterSpec, Writer};
use crate::core::{Event, LoggerError, Result};
use std::fs::OpenOptions;
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

/// How a file-backed stream is opened
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum WriterMode {
    #[default]
    Append,
    Truncate,
}

#[cfg(windows)]
const DEFAULT_SEPARATOR: &str = "\r\n";
#[cfg(not(windows))]
const DEFAULT_SEPARATOR: &str = "\n";

/// Writes each accepted event as a formatted line plus a separator to a
/// byte stream.
///
/// The stream is either a file opened by path or an already-open handle
/// supplied by the caller; adopted handles must have been opened in
/// append mode. `shutdown` flushes and releases the handle; writing after
/// shutdown is a `Runtime` error.
pub struct StreamWriter {
    base: WriterBase,
    stream: Option<Box<dyn Write + Send + Sync>>,
    separator: String,
}

impl StreamWriter {
    /// Open `path` in append mode
    pub fn open(path: impl Into<PathBuf>) -> Result<Self> {
        Self::open_with_mode(path, WriterMode::Append, None)
    }

    /// Open `path` with an explicit mode, optionally creating the file
    /// with the given unix permission mask before first use
    pub fn open_with_mode(
        path: impl Into<PathBuf>,
        mode: WriterMode,
        permissions: Option<u32>,
    ) -> Result<Self> {
        let path = path.into();

        if let Some(mask) = permissions {
            Self::touch_with_permissions(&path, mask)?;
        }

        let mut options = OpenOptions::new();
        options.create(true);
        match mode {
            WriterMode::Append => options.append(true),
            WriterMode::Truncate => options.write(true).truncate(true),
        };
        let file = options.open(&path).map_err(|err| {
            LoggerError::runtime_with_source(
                format!("cannot open stream '{}'", path.display()),
                err,
            )
        })?;

        Ok(Self::from_stream(BufWriter::new(file)))
    }

    /// Adopt an already-open handle
    pub fn from_stream(stream: impl Write + Send + Sync + 'static) -> Self {
        Self {
            base: WriterBase::new(),
            stream: Some(Box::new(stream)),
            separator: DEFAULT_SEPARATOR.to_string(),
        }
    }

    #[must_use]
    pub fn with_separator(mut self, separator: impl Into<String>) -> Self {
        self.separator = separator.into();
        self
    }

    pub fn separator(&self) -> &str {
        &self.separator
    }

    #[cfg(unix)]
    fn touch_with_permissions(path: &Path, mask: u32) -> Result<()> {
        use std::os::unix::fs::PermissionsExt;

        if !path.exists() {
            std::fs::File::create(path)?;
            std::fs::set_permissions(path, std::fs::Permissions::from_mode(mask))?;
        }
        Ok(())
    }

    #[cfg(not(unix))]
    fn touch_with_permissions(path: &Path, _mask: u32) -> Result<()> {
        if !path.exists() {
            std::fs::File::create(path)?;
        }
        Ok(())
    }
}

impl Writer for StreamWriter {
    fn add_filter(&mut self, spec: FilterSpec) -> Result<()> {
        self.base.add_filter(spec)
    }

    fn set_formatter(&mut self, spec: FormatterSpec) -> Result<()> {
        self.base.set_formatter(spec)
    }

    fn write(&mut self, event: &Event) -> Result<()> {
        if !self.base.accepts(event) {
            return Ok(());
        }

        let line = self.base.render(event).into_text();
        let stream = self
            .stream
            .as_mut()
            .ok_or_else(|| LoggerError::runtime("stream is closed"))?;

        let result = stream
            .write_all(line.as_bytes())
            .and_then(|()| stream.write_all(self.separator.as_bytes()));
        self.base.guard(result)
    }

    fn shutdown(&mut self) -> Result<()> {
        if let Some(mut stream) = self.stream.take() {
            stream.flush()?;
        }
        Ok(())
    }

    fn name(&self) -> &str {
        "stream"
    }
}

impl Drop for StreamWriter {
    fn drop(&mut self) {
        if let Some(ref mut stream) = self.stream {
            let _ = stream.flush();
        }
    }
}
