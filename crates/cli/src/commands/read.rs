//! Read command implementation.

use std::fs::{self, File};
use std::io::{self, Read, Write};
use std::path::Path;

use anyhow::{Context, Result};
use envchain_environment::{Settings, Translator, VariableMap};
use tempfile::NamedTempFile;

/// Stream `input` (stdin when `None`) through the translator into `output`
/// (stdout when `None`).
///
/// A file output is replaced only once the whole input has been translated.
pub fn run(
    map: &VariableMap,
    settings: &Settings,
    input: Option<&Path>,
    output: Option<&Path>,
) -> Result<()> {
    let (origin, reader): (String, Box<dyn Read>) = match input {
        Some(path) => {
            let file = File::open(path)
                .with_context(|| format!("Failed to open input {}", path.display()))?;
            (path.display().to_string(), Box::new(file))
        }
        None => ("<stdin>".to_string(), Box::new(io::stdin().lock())),
    };

    let translator = Translator::new(reader, map)
        .with_settings(&settings.expand)
        .with_origin(origin);

    match output {
        Some(path) => write_to_file(translator, path),
        None => {
            let mut out = io::stdout().lock();
            // Output produced before a failing line is still delivered.
            let result = translator.translate_to(&mut out);
            out.flush().context("Failed to flush stdout")?;
            let written = result?;
            tracing::debug!(bytes = written, "Translated to stdout");
            Ok(())
        }
    }
}

fn write_to_file<R: Read>(translator: Translator<'_, R>, path: &Path) -> Result<()> {
    let parent_dir = match path.parent() {
        Some(dir) if !dir.as_os_str().is_empty() => dir,
        _ => Path::new("."),
    };
    if parent_dir != Path::new(".") {
        fs::create_dir_all(parent_dir)
            .with_context(|| format!("Failed to create directory: {}", parent_dir.display()))?;
    }

    let mut temp_file = NamedTempFile::new_in(parent_dir)
        .with_context(|| format!("Failed to create temp file in: {}", parent_dir.display()))?;
    let written = translator.translate_to(&mut temp_file)?;
    temp_file
        .flush()
        .with_context(|| "Failed to flush temp file")?;
    temp_file
        .persist(path)
        .with_context(|| format!("Failed to write file: {}", path.display()))?;

    tracing::info!(bytes = written, path = %path.display(), "Translated output written");
    Ok(())
}
