//! Generation pipeline: validate, build, render, write.

use crate::config::LoadedConfig;
use crate::error::{EnumeratorError, Result};
use crate::license;
use crate::model::{CodeModel, Shape};
use crate::render::render;
use crate::spec::EnumSpec;
use crate::validation::validate;
use crate::writer::{self, CheckStatus};
use rayon::prelude::*;
use serde::Serialize;
use std::path::PathBuf;
use tracing::{debug, info, warn};

/// Source rendered for one spec but not yet written.
#[derive(Debug, Clone, Serialize)]
pub struct RenderedFile {
    /// Where the source belongs.
    pub path: PathBuf,
    pub type_name: String,
    pub shape: Shape,
    pub content: String,
}

/// Information about a generated file.
#[derive(Debug, Clone, Serialize)]
pub struct GeneratedFile {
    /// The path where the file was written.
    pub path: PathBuf,
    /// The number of bytes written.
    pub bytes_written: usize,
    pub type_name: String,
    /// Which declarations the file contains.
    pub shape: Shape,
    /// blake3 hex digest of the written bytes.
    pub digest: String,
}

/// Outcome of comparing one spec with its file on disk.
#[derive(Debug, Clone)]
pub struct CheckedFile {
    pub path: PathBuf,
    pub type_name: String,
    pub status: CheckStatus,
}

/// Report of the generation process.
#[derive(Debug, Clone, Default)]
pub struct GenerationReport {
    /// List of files that were generated, in configuration order.
    pub files: Vec<GeneratedFile>,
    /// Number of enums processed.
    pub enums_processed: usize,
}

impl GenerationReport {
    pub fn total_bytes(&self) -> usize {
        self.files.iter().map(|f| f.bytes_written).sum()
    }
}

/// Renders `spec` without touching the destination.
///
/// `spec` is validated before the license file is read, so an invalid
/// request never causes any I/O.
pub fn render_file(spec: &EnumSpec) -> Result<RenderedFile> {
    validate(spec).map_err(|e| EnumeratorError::spec(&spec.type_name, e))?;

    let license = license::load(spec.copyright_file.as_deref())?;
    let model = CodeModel::from_validated(spec, license);
    let content = render(&model);

    Ok(RenderedFile {
        path: spec.destination.clone(),
        type_name: model.type_name().to_string(),
        shape: model.shape(),
        content,
    })
}

/// Dry run: the source [`generate`] would write.
pub fn render_spec(spec: &EnumSpec) -> Result<String> {
    Ok(render_file(spec)?.content)
}

/// Generates the Go source for `spec` and writes it to its destination.
pub fn generate(spec: &EnumSpec) -> Result<GeneratedFile> {
    let rendered = render_file(spec)?;
    write_rendered(rendered)
}

/// Reports whether the destination already holds what [`generate`] would write.
pub fn check(spec: &EnumSpec) -> Result<CheckStatus> {
    let rendered = render_file(spec)?;
    writer::check(&rendered.path, rendered.content.as_bytes())
}

fn write_rendered(rendered: RenderedFile) -> Result<GeneratedFile> {
    let bytes_written = writer::write_atomically(&rendered.path, rendered.content.as_bytes())?;
    let digest = blake3::hash(rendered.content.as_bytes()).to_hex().to_string();

    info!(
        type_name = %rendered.type_name,
        shape = %rendered.shape,
        bytes = bytes_written,
        "Generated {:?}",
        rendered.path
    );

    Ok(GeneratedFile {
        path: rendered.path,
        bytes_written,
        type_name: rendered.type_name,
        shape: rendered.shape,
        digest,
    })
}

/// Generator for every enum in a configuration.
pub struct EnumGenerator {
    specs: Vec<EnumSpec>,
}

impl EnumGenerator {
    /// Creates a new EnumGenerator over the given specs.
    pub fn new(specs: Vec<EnumSpec>) -> Self {
        Self { specs }
    }

    /// Creates a generator for every `[[enums]]` entry of a loaded config.
    pub fn from_config(config: &LoadedConfig) -> Result<Self> {
        Ok(Self::new(config.specs()?))
    }

    /// Restricts generation to the named types, keeping configuration order.
    pub fn only(self, type_names: &[String]) -> Result<Self> {
        if type_names.is_empty() {
            return Ok(self);
        }

        if let Some(missing) = type_names
            .iter()
            .find(|name| !self.specs.iter().any(|s| &s.type_name == *name))
        {
            return Err(EnumeratorError::TypeNotFound {
                type_name: missing.clone(),
            });
        }

        let specs = self
            .specs
            .into_iter()
            .filter(|s| type_names.contains(&s.type_name))
            .collect();
        Ok(Self { specs })
    }

    pub fn specs(&self) -> &[EnumSpec] {
        &self.specs
    }

    /// Renders every spec in parallel. Fails on the first invalid spec in
    /// configuration order.
    pub fn render_all(&self) -> Result<Vec<RenderedFile>> {
        debug!("Rendering {} enums", self.specs.len());
        let rendered: Vec<Result<RenderedFile>> = self.specs.par_iter().map(render_file).collect();
        rendered.into_iter().collect()
    }

    /// Renders everything first, then writes in configuration order.
    ///
    /// Nothing is written unless every spec renders.
    pub fn generate_all(&self) -> Result<GenerationReport> {
        info!("Starting enum generation");
        let rendered = self.render_all()?;

        let mut report = GenerationReport {
            files: Vec::with_capacity(rendered.len()),
            enums_processed: rendered.len(),
        };
        for file in rendered {
            report.files.push(write_rendered(file)?);
        }

        info!(
            "Generation complete. Generated {} files ({} bytes)",
            report.files.len(),
            report.total_bytes()
        );
        Ok(report)
    }

    /// Compares every rendered spec with its destination without writing.
    pub fn check_all(&self) -> Result<Vec<CheckedFile>> {
        let rendered = self.render_all()?;
        let mut results = Vec::with_capacity(rendered.len());

        for file in rendered {
            let status = writer::check(&file.path, file.content.as_bytes())?;
            if status != CheckStatus::UpToDate {
                warn!("{} is {:?}: {:?}", file.type_name, status, file.path);
            }
            results.push(CheckedFile {
                path: file.path,
                type_name: file.type_name,
                status,
            });
        }
        Ok(results)
    }
}
