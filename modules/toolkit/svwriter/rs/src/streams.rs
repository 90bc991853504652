use std::fs;
use std::sync::Arc;

use eyre::{ensure, eyre, Result, WrapErr};
use svbit_io_rs::bam::ContigTable;

use crate::config::{Config, Outputs};
use crate::model::{OutputKind, PerModel};
use crate::record::{Sink, Writer};

/// Output streams of a run, owned exclusively by the writer.
///
/// Streams are flushed on drop; write errors at that point are only logged.
#[derive(Default)]
pub struct Streams {
    candidates: Option<Sink>,
    models: PerModel<Option<Sink>>,
}

impl Streams {
    pub fn new() -> Self {
        Self::default()
    }

    /// Open a stream for every active output.
    ///
    /// Destinations are checked before any file is created, and files created before a
    /// failed open are removed.
    pub fn open(config: &Config, outputs: &Outputs, contigs: Arc<ContigTable>) -> Result<Self> {
        let active = config.active_outputs();
        for (kind, dst) in outputs.iter() {
            if !active.contains(&kind) {
                log::warn!(
                    "Output {} is ignored: the {} stream is not active in this run",
                    dst.path().display(),
                    kind
                );
            }
        }

        let mut destinations = Vec::with_capacity(active.len());
        for kind in active {
            let dst = outputs
                .get(kind)
                .ok_or_else(|| eyre!("No output destination configured for the {kind} stream"))?;
            if let Some(parent) = dst.path().parent().filter(|x| !x.as_os_str().is_empty()) {
                ensure!(
                    parent.is_dir(),
                    "Output directory of the {kind} stream does not exist: {}",
                    parent.display()
                );
            }
            destinations.push((kind, dst));
        }

        let mut streams = Self::new();
        let mut created = Vec::with_capacity(destinations.len());
        for (kind, dst) in destinations {
            match Writer::from_path(dst.path(), dst.compression(), contigs.clone()) {
                Ok(sink) => {
                    created.push(dst.path());
                    streams.insert(kind, sink);
                }
                Err(err) => {
                    drop(streams);
                    for path in created {
                        if let Err(err) = fs::remove_file(path) {
                            log::warn!("Failed to remove {}: {err}", path.display());
                        }
                    }
                    return Err(err.wrap_err(format!("Failed to open the {kind} stream")));
                }
            }
        }
        for (kind, dst) in outputs.iter().filter(|(kind, _)| streams.contains(*kind)) {
            log::info!("Opened the {} stream: {}", kind, dst.path().display());
        }
        Ok(streams)
    }

    pub fn insert(&mut self, kind: OutputKind, sink: Sink) -> &mut Self {
        *self.slot_mut(kind) = Some(sink);
        self
    }

    pub fn get_mut(&mut self, kind: OutputKind) -> Option<&mut Sink> {
        self.slot_mut(kind).as_mut()
    }

    pub fn contains(&self, kind: OutputKind) -> bool {
        match kind {
            OutputKind::Candidates => self.candidates.is_some(),
            OutputKind::Model(model) => self.models.get(model).is_some(),
        }
    }

    pub fn flush(&mut self) -> Result<()> {
        if let Some(sink) = self.candidates.as_mut() {
            sink.flush()
                .wrap_err_with(|| format!("Failed to flush the {} stream", OutputKind::Candidates))?;
        }
        for (model, sink) in self.models.iter_mut() {
            if let Some(sink) = sink {
                sink.flush()
                    .wrap_err_with(|| format!("Failed to flush the {model} stream"))?;
            }
        }
        Ok(())
    }

    fn slot_mut(&mut self, kind: OutputKind) -> &mut Option<Sink> {
        match kind {
            OutputKind::Candidates => &mut self.candidates,
            OutputKind::Model(model) => self.models.get_mut(model),
        }
    }
}

impl Drop for Streams {
    fn drop(&mut self) {
        if let Err(err) = self.flush() {
            log::warn!("Output streams were not flushed cleanly: {err:?}");
        }
    }
}
