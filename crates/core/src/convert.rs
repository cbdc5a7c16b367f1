//! Asset-to-header conversion.
//!
//! A [`Converter`] owns the override table and output directory; it turns
//! one asset into one header. [`convert_all`] drives a whole
//! [`ConvertConfig`], either in order on the calling thread or across a
//! bounded pool of scoped worker threads.

use std::collections::BTreeMap;
use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::mpsc;
use std::thread;

use log::{debug, warn};
use serde::Serialize;
use thiserror::Error;

use crate::config::{ConfigError, ConvertConfig};
use crate::ident::{derive_identifier, is_valid_c_identifier, OverrideTable};
use crate::layout::header_path;
use crate::render::render_header;

#[derive(Debug, Error)]
pub enum ConvertError {
    /// Input missing or unreadable.
    #[error("Failed to read input {path}: {source}")]
    ReadInput { path: PathBuf, source: std::io::Error },

    /// Header could not be created or written.
    #[error("Failed to write header {path}: {source}")]
    WriteOutput { path: PathBuf, source: std::io::Error },

    #[error(transparent)]
    Config(#[from] ConfigError),
}

impl ConvertError {
    /// Path of the file the failure is about.
    pub fn path(&self) -> Option<&Path> {
        match self {
            ConvertError::ReadInput { path, .. } | ConvertError::WriteOutput { path, .. } => {
                Some(path)
            }
            ConvertError::Config(_) => None,
        }
    }
}

pub type ConvertResult<T> = Result<T, ConvertError>;

/// Outcome of converting a single asset.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Conversion {
    pub input: PathBuf,
    pub output: PathBuf,
    pub identifier: String,
    pub bytes: usize,
}

impl fmt::Display for Conversion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Created {} ({} bytes)", self.output.display(), self.bytes)
    }
}

#[derive(Debug, Clone, Default)]
pub struct Converter {
    overrides: OverrideTable,
    out_dir: Option<PathBuf>,
}

impl Converter {
    pub fn new(overrides: OverrideTable) -> Self {
        Self { overrides, out_dir: None }
    }

    pub fn with_out_dir(mut self, out_dir: Option<PathBuf>) -> Self {
        self.out_dir = out_dir;
        self
    }

    pub fn from_config(config: &ConvertConfig) -> Self {
        Self::new(config.override_table()).with_out_dir(config.resolved_out_dir())
    }

    /// Array name for `input`, warning when it will not compile as C.
    pub fn identifier_for(&self, input: &Path) -> String {
        let name = derive_identifier(input, &self.overrides);
        if !is_valid_c_identifier(&name) {
            warn!("Derived name `{}` for {} is not a valid C identifier", name, input.display());
        }
        name
    }

    pub fn output_for(&self, input: &Path) -> PathBuf {
        header_path(input, self.out_dir.as_deref())
    }

    /// Render the header text for `data` as if it had been read from `input`.
    pub fn render(&self, input: &Path, data: &[u8]) -> (String, String) {
        let name = self.identifier_for(input);
        let text = render_header(&name, data);
        (name, text)
    }

    /// Read and render `input` without touching the output file.
    pub fn prepare(&self, input: &Path) -> ConvertResult<RenderedHeader> {
        let data = fs::read(input)
            .map_err(|source| ConvertError::ReadInput { path: input.to_path_buf(), source })?;
        debug!("Read {} bytes from {}", data.len(), input.display());

        let (identifier, text) = self.render(input, &data);
        Ok(RenderedHeader {
            input: input.to_path_buf(),
            output: self.output_for(input),
            identifier,
            bytes: data.len(),
            text,
        })
    }

    /// Read `input`, render it, and write the header, overwriting any
    /// existing file.
    pub fn convert_file(&self, input: &Path) -> ConvertResult<Conversion> {
        self.prepare(input)?.write()
    }
}

/// A header rendered in memory, not yet written.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderedHeader {
    pub input: PathBuf,
    pub output: PathBuf,
    pub identifier: String,
    pub bytes: usize,
    pub text: String,
}

impl RenderedHeader {
    pub fn write(self) -> ConvertResult<Conversion> {
        fs::write(&self.output, &self.text)
            .map_err(|source| ConvertError::WriteOutput { path: self.output.clone(), source })?;
        debug!("Wrote `{}` to {}", self.identifier, self.output.display());

        Ok(Conversion {
            input: self.input,
            output: self.output,
            identifier: self.identifier,
            bytes: self.bytes,
        })
    }
}

/// Convert every input in `config`, calling `on_done` for each success in
/// input-list order.
///
/// The first failure stops the run; headers written before it stay on disk
/// and nothing after it is written. With `jobs > 1` reading and rendering
/// are spread over that many scoped threads, while writing and `on_done`
/// stay on the calling thread and in order.
pub fn convert_all<F>(config: &ConvertConfig, mut on_done: F) -> ConvertResult<Vec<Conversion>>
where
    F: FnMut(&Conversion),
{
    config.validate()?;
    let converter = Converter::from_config(config);
    let inputs = config.resolved_inputs();
    let workers = config.jobs.min(inputs.len());

    if workers <= 1 {
        let mut done = Vec::with_capacity(inputs.len());
        for input in &inputs {
            let conversion = converter.convert_file(input)?;
            on_done(&conversion);
            done.push(conversion);
        }
        return Ok(done);
    }

    debug!("Converting {} inputs on {} workers", inputs.len(), workers);
    convert_pooled(&converter, &inputs, workers, &mut on_done)
}

/// [`convert_all`] without a progress callback.
pub fn convert_batch(config: &ConvertConfig) -> ConvertResult<Vec<Conversion>> {
    convert_all(config, |_| {})
}

/// Workers only read and render; the calling thread writes headers in
/// input order and stops at the first failed index, so the files on disk
/// match a sequential run.
fn convert_pooled<F>(
    converter: &Converter,
    inputs: &[PathBuf],
    workers: usize,
    on_done: &mut F,
) -> ConvertResult<Vec<Conversion>>
where
    F: FnMut(&Conversion),
{
    let next = AtomicUsize::new(0);
    let stop = AtomicBool::new(false);
    let (tx, rx) = mpsc::channel::<(usize, ConvertResult<RenderedHeader>)>();

    let mut done = Vec::with_capacity(inputs.len());
    let mut failure: Option<ConvertError> = None;

    thread::scope(|scope| {
        for _ in 0..workers {
            let tx = tx.clone();
            let (next, stop) = (&next, &stop);
            scope.spawn(move || {
                while !stop.load(Ordering::Relaxed) {
                    let idx = next.fetch_add(1, Ordering::Relaxed);
                    let Some(input) = inputs.get(idx) else {
                        break;
                    };
                    let result = converter.prepare(input);
                    if result.is_err() {
                        stop.store(true, Ordering::Relaxed);
                    }
                    if tx.send((idx, result)).is_err() {
                        break;
                    }
                }
            });
        }
        drop(tx);

        // Rendered headers wait here until every earlier index is written.
        let mut pending: BTreeMap<usize, ConvertResult<RenderedHeader>> = BTreeMap::new();
        for (idx, result) in rx {
            if failure.is_some() {
                continue;
            }
            pending.insert(idx, result);
            while let Some(result) = pending.remove(&done.len()) {
                match result.and_then(RenderedHeader::write) {
                    Ok(conversion) => {
                        on_done(&conversion);
                        done.push(conversion);
                    }
                    Err(err) => {
                        stop.store(true, Ordering::Relaxed);
                        pending.clear();
                        failure = Some(err);
                        break;
                    }
                }
            }
        }
    });

    match failure {
        Some(err) => Err(err),
        None => Ok(done),
    }
}
