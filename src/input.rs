use anyhow::Result;
use std::path::{Path, PathBuf};
use tokio::fs::File;
use tokio::io::{AsyncRead, AsyncReadExt, AsyncWriteExt, BufReader};
use tracing::{debug, info, warn};

/// Configuration for input loading
#[derive(Debug, Clone)]
pub struct ReaderConfig {
    /// Whether a read failure aborts or yields an empty document
    pub fail_fast: bool,
    /// Buffer size for async reading (default: 8KB)
    pub buffer_size: usize,
}

impl Default for ReaderConfig {
    fn default() -> Self {
        Self {
            fail_fast: true,
            buffer_size: 8192,
        }
    }
}

/// Where the document comes from
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InputSource {
    File(PathBuf),
    Stdin,
}

impl InputSource {
    pub fn describe(&self) -> String {
        match self {
            InputSource::File(path) => path.display().to_string(),
            InputSource::Stdin => "<stdin>".to_string(),
        }
    }
}

impl From<Option<PathBuf>> for InputSource {
    fn from(path: Option<PathBuf>) -> Self {
        match path {
            Some(path) => InputSource::File(path),
            None => InputSource::Stdin,
        }
    }
}

/// Statistics for one read
#[derive(Debug, Clone)]
pub struct ReadStats {
    pub source: String,
    pub bytes_read: u64,
    pub dashes_found: u64,
    pub duration_ms: u64,
    pub read_error: Option<String>,
}

/// Loads whole documents with async buffered I/O
pub struct InputReader {
    config: ReaderConfig,
}

impl InputReader {
    pub fn new(config: ReaderConfig) -> Self {
        Self { config }
    }

    /// Read the full document from `source`
    /// WHY: the whole text is kept byte-for-byte so untouched chunks round-trip exactly
    pub async fn read(&self, source: &InputSource) -> Result<(String, ReadStats)> {
        let start_time = std::time::Instant::now();
        let label = source.describe();
        debug!("Starting async read of {}", label);

        let outcome = match source {
            InputSource::File(path) => match File::open(path).await {
                Ok(file) => self.read_all(file).await,
                Err(e) => Err(anyhow::anyhow!("Failed to open file {}: {}", path.display(), e)),
            },
            InputSource::Stdin => self.read_all(tokio::io::stdin()).await,
        };

        let duration_ms = start_time.elapsed().as_millis() as u64;

        match outcome {
            Ok(text) => {
                let stats = ReadStats {
                    source: label,
                    bytes_read: text.len() as u64,
                    dashes_found: crate::transformer::count_occurrences(&text) as u64,
                    duration_ms,
                    read_error: None,
                };
                info!(
                    "Read {}: {} bytes, {} em dashes in {}ms",
                    stats.source, stats.bytes_read, stats.dashes_found, stats.duration_ms
                );
                Ok((text, stats))
            }
            Err(e) => {
                let error_msg = format!("Failed to read {}: {}", label, e);
                warn!("{}", error_msg);

                if self.config.fail_fast {
                    return Err(anyhow::anyhow!(error_msg));
                }

                let stats = ReadStats {
                    source: label,
                    bytes_read: 0,
                    dashes_found: 0,
                    duration_ms,
                    read_error: Some(error_msg),
                };
                Ok((String::new(), stats))
            }
        }
    }

    async fn read_all<R: AsyncRead + Unpin>(&self, source: R) -> Result<String> {
        // WHY: BufReader with custom buffer size reduces syscalls on large documents
        let mut reader = BufReader::with_capacity(self.config.buffer_size, source);
        let mut text = String::new();
        reader.read_to_string(&mut text).await?;
        Ok(text)
    }
}

/// Convenience function for reading a file with default configuration
pub async fn read_file_async<P: AsRef<Path>>(file_path: P) -> Result<String> {
    let reader = InputReader::new(ReaderConfig::default());
    let source = InputSource::File(file_path.as_ref().to_path_buf());
    let (text, _stats) = reader.read(&source).await?;
    Ok(text)
}

/// Write transformed text to `path`, replacing any existing file
pub async fn write_output<P: AsRef<Path>>(path: P, text: &str) -> Result<()> {
    let path = path.as_ref();
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        tokio::fs::create_dir_all(parent).await?;
    }
    let mut file = File::create(path).await?;
    file.write_all(text.as_bytes()).await?;
    file.flush().await?;
    debug!("Wrote {} bytes to {}", text.len(), path.display());
    Ok(())
}
