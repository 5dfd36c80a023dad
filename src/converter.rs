//! Core conversion engine for fig2gerber
//!
//! This module orchestrates the translation: it loads the source drawing
//! once, expands the configuration into output jobs, and runs every job as
//! one or two render passes over a fresh record reader.

use crate::{
    classify::classify,
    config::Config,
    emit::Emitter,
    error::{Result, ResultExt},
    fig::RecordReader,
    jobs::{self, Job, JobKind},
    progress::ProgressTracker,
};
use anyhow::Context;
use std::fs;
use std::io::{self, BufWriter, Read, Write};
use tracing::{debug, info, warn};

/// The main conversion engine
pub struct Converter {
    config: Config,
    progress: ProgressTracker,
    outputs: Vec<String>,
}

impl Converter {
    /// Create a new converter with the given configuration
    pub fn new(config: Config) -> Self {
        let progress_enabled = !config.no_progress;

        Self {
            config,
            progress: ProgressTracker::new(progress_enabled),
            outputs: Vec::new(),
        }
    }

    /// Run every selected output job
    pub fn run(&mut self) -> Result<()> {
        let start = std::time::Instant::now();

        self.config
            .validate()
            .context("Configuration validation failed")?;

        let jobs = jobs::from_config(&self.config).context("Failed to build the job list")?;
        if jobs.is_empty() {
            warn!("No output jobs selected; nothing to do");
            return Ok(());
        }
        info!("Selected {} output jobs", jobs.len());

        let source = self
            .read_source()
            .context("Failed to read the source drawing")?;

        let bar = self
            .progress
            .job_bar(jobs.len(), "Generating fabrication files");
        for job in &jobs {
            self.run_job(job, &source).with_job_context(job.name)?;
            ProgressTracker::advance(&bar, Some(job.name));
        }
        ProgressTracker::finish(bar, "Fabrication files generated");

        info!("Conversion completed in {} ms", start.elapsed().as_millis());
        Ok(())
    }

    /// Load the whole drawing into memory; every render pass re-reads it
    /// from the start
    fn read_source(&self) -> Result<String> {
        let spinner = self.progress.spinner("Reading source drawing...");

        let source = if self.config.reads_stdin() {
            let mut text = String::new();
            io::stdin()
                .read_to_string(&mut text)
                .context("Failed to read standard input")?;
            text
        } else {
            fs::read_to_string(&self.config.source)
                .with_path_context("read", &self.config.source)?
        };

        ProgressTracker::finish(spinner, "Source drawing read");
        debug!("Source drawing is {} bytes", source.len());
        Ok(source)
    }

    /// Output name for a job: `<root><suffix>`, or `-` for stdout
    fn target_name(&self, job: &Job) -> String {
        let root = match &self.config.output_root {
            Some(root) => root.clone(),
            None => self.config.source.display().to_string(),
        };
        if root == "-" {
            root
        } else {
            format!("{}{}", root, job.suffix)
        }
    }

    fn run_job(&mut self, job: &Job, source: &str) -> Result<()> {
        let target = self.target_name(job);
        info!("Producing {} output: {}", job.name, target);

        let out: Box<dyn Write> = if target == "-" {
            Box::new(io::stdout().lock())
        } else {
            let file = fs::File::create(&target).with_path_context("create", &target)?;
            Box::new(BufWriter::new(file))
        };

        let source_name = self.config.source.display().to_string();
        let mut emitter = Emitter::new(out, job, self.config.extended, &source_name, &target);

        emitter.begin()?;
        self.run_pass(&mut emitter, job, source, false)?;
        if job.kind == JobKind::Artwork && self.config.extended {
            emitter.begin_clear_image()?;
            self.run_pass(&mut emitter, job, source, true)?;
        }
        emitter.finish()?;

        self.outputs.push(target);
        Ok(())
    }

    /// One sequential pass over the record stream
    fn run_pass(
        &self,
        emitter: &mut Emitter<Box<dyn Write>>,
        job: &Job,
        source: &str,
        clear: bool,
    ) -> Result<()> {
        let pass = if clear {
            job.clear_pass()
        } else {
            job.dark_pass()
        };
        let mut reader = RecordReader::new(source)?;
        while let Some(record) = reader.next_record()? {
            let action = classify(&record, &pass, job.kind);
            emitter.record(&record, &action)?;
        }
        Ok(())
    }

    /// Get statistics about the conversion
    pub fn stats(&self) -> ConversionStats {
        ConversionStats {
            files_produced: self.outputs.len(),
            outputs: self.outputs.clone(),
        }
    }
}

/// Statistics about the conversion
#[derive(Debug)]
pub struct ConversionStats {
    pub files_produced: usize,
    pub outputs: Vec<String>,
}
