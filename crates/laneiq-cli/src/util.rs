use std::{
    fs::{self, File},
    io::{self, BufWriter, Write},
    path::{Path, PathBuf},
};

use anyhow::Context;
use laneiq_data::{MatchHistory, MatchHistorySource, UpstreamDataError};
use laneiq_pipeline::AnalysisConfig;
use serde::{Serialize, de::DeserializeOwned};

/// JSON sink: a file when a path is given, stdout otherwise.
pub struct Output {
    writer: Box<dyn Write>,
    name: String,
}

impl Output {
    pub fn create(path: Option<&Path>) -> anyhow::Result<Self> {
        let Some(path) = path else {
            return Ok(Self {
                writer: Box::new(io::stdout().lock()),
                name: "stdout".into(),
            });
        };
        let file = File::create(path)
            .with_context(|| format!("Failed to create output file: {}", path.display()))?;
        Ok(Self {
            writer: Box::new(BufWriter::new(file)),
            name: path.display().to_string(),
        })
    }

    /// Writes one pretty-printed document.
    pub fn write_pretty<T>(&mut self, value: &T) -> anyhow::Result<()>
    where
        T: Serialize + ?Sized,
    {
        serde_json::to_writer_pretty(&mut self.writer, value)
            .with_context(|| format!("Failed to write JSON to {}", self.name))?;
        self.end_line()
    }

    /// Writes one compact NDJSON line and flushes it.
    pub fn write_line<T>(&mut self, value: &T) -> anyhow::Result<()>
    where
        T: Serialize + ?Sized,
    {
        serde_json::to_writer(&mut self.writer, value)
            .with_context(|| format!("Failed to write JSON to {}", self.name))?;
        self.end_line()
    }

    fn end_line(&mut self) -> anyhow::Result<()> {
        self.writer
            .write_all(b"\n")
            .and_then(|()| self.writer.flush())
            .with_context(|| format!("Failed to flush output to {}", self.name))
    }
}

pub fn read_json_file<T>(what: &str, path: &Path) -> anyhow::Result<T>
where
    T: DeserializeOwned,
{
    let bytes =
        fs::read(path).with_context(|| format!("Failed to read {what} file: {}", path.display()))?;
    serde_json::from_slice(&bytes)
        .with_context(|| format!("Failed to parse {what} file: {}", path.display()))
}

/// Loads the analysis configuration, falling back to defaults without a file.
pub fn load_config(path: Option<&Path>) -> anyhow::Result<AnalysisConfig> {
    let Some(path) = path else {
        return Ok(AnalysisConfig::default());
    };
    let contents = fs::read_to_string(path)
        .with_context(|| format!("Failed to read config file: {}", path.display()))?;
    toml::from_str(&contents)
        .with_context(|| format!("Failed to parse config file: {}", path.display()))
}

/// Match history stored as a JSON file.
///
/// The file is read when the analysis asks for it, so read and parse failures surface as
/// upstream errors in the event stream.
#[derive(Debug, Clone)]
pub struct JsonFileSource {
    path: PathBuf,
}

impl JsonFileSource {
    pub fn new(path: PathBuf) -> Self {
        Self { path }
    }
}

impl MatchHistorySource for JsonFileSource {
    fn load(&self) -> Result<MatchHistory, UpstreamDataError> {
        read_json_file("match history", &self.path)
            .map_err(|err| UpstreamDataError::new(format!("{err:#}")))
    }
}
