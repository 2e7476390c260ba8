//! Batch directory processing.
//!
//! Walks an input tree, runs the pipeline on every matching file and
//! mirrors the directory structure in the output tree. One bad artifact
//! never aborts a batch: it is replaced by an error document and counted
//! as failed.

use std::io;
use std::path::{Path, PathBuf};

use agentograph_core::config::Config;
use agentograph_core::{Framework, GraphDocument, Pipeline};
use ignore::WalkBuilder;
use indicatif::{ProgressBar, ProgressStyle};

/// Per-batch counters.
#[derive(Debug, Default, Clone, Copy)]
pub struct BatchStats {
    pub total: usize,
    pub success: usize,
    pub failed: usize,
}

impl BatchStats {
    pub fn print_summary(&self, output_root: &Path) {
        let line = "=".repeat(60);
        println!("\n{line}");
        println!("BATCH SUMMARY");
        println!("{line}");
        println!("Total files processed: {}", self.total);
        println!("Successfully converted: {}", self.success);
        println!("Failed: {}", self.failed);
        println!("Output directory: {}", output_root.display());
        println!("{line}\n");
    }
}

/// Convert every analysis document under `input_root`.
pub fn convert_dir(
    pipeline: &Pipeline,
    config: &Config,
    input_root: &Path,
    output_root: &Path,
) -> io::Result<BatchStats> {
    let files = collect_files(input_root, |path| {
        extension_of(path) == config.extract.document_extension
    });
    let progress = progress_bar(files.len());
    let mut stats = BatchStats::default();

    for path in &files {
        stats.total += 1;
        let document = match std::fs::read_to_string(path) {
            Ok(text) => GraphDocument::ok(pipeline.convert_document(&text)),
            Err(err) => GraphDocument::failed(format!("failed to read {}: {err}", path.display())),
        };
        report(&progress, path, &document, &mut stats);
        write_document(config, input_root, output_root, path, &document)?;
        progress.inc(1);
    }

    progress.finish_and_clear();
    Ok(stats)
}

/// Extract resource graphs from framework source files under `input_root`.
///
/// When no framework is forced, each file's framework is taken from its
/// top-level subdirectory name (`autogen/`, `crewai/`, ...); files under
/// unrecognized directories are skipped.
pub fn extract_dir(
    pipeline: &Pipeline,
    config: &Config,
    input_root: &Path,
    output_root: &Path,
    forced: Option<Framework>,
) -> io::Result<BatchStats> {
    let files = collect_files(input_root, |path| {
        config
            .extract
            .source_extensions
            .iter()
            .any(|ext| *ext == extension_of(path))
    });
    let progress = progress_bar(files.len());
    let mut stats = BatchStats::default();

    for path in &files {
        let Some(framework) = forced.or_else(|| framework_for(input_root, path)) else {
            progress.println(format!("  SKIP {} (unknown framework)", path.display()));
            progress.inc(1);
            continue;
        };
        if !pipeline.walkers().accepts(framework, &extension_of(path)) {
            progress.inc(1);
            continue;
        }
        if let Ok(meta) = std::fs::metadata(path) {
            if meta.len() > config.extract.max_file_size {
                progress.println(format!("  SKIP {} (too large)", path.display()));
                progress.inc(1);
                continue;
            }
        }

        stats.total += 1;
        let document = match pipeline.extract_file(framework, path) {
            Ok(graph) => GraphDocument::ok(graph),
            Err(err) => GraphDocument::failed(err.to_string()),
        };
        report(&progress, path, &document, &mut stats);
        write_document(config, input_root, output_root, path, &document)?;
        progress.inc(1);
    }

    progress.finish_and_clear();
    Ok(stats)
}

fn collect_files(root: &Path, mut keep: impl FnMut(&Path) -> bool) -> Vec<PathBuf> {
    let mut files: Vec<PathBuf> = WalkBuilder::new(root)
        .hidden(false)
        .build()
        .filter_map(Result::ok)
        .filter(|entry| entry.file_type().is_some_and(|ft| ft.is_file()))
        .map(|entry| entry.into_path())
        .filter(|path| keep(path))
        .collect();
    files.sort();
    files
}

fn extension_of(path: &Path) -> String {
    path.extension()
        .and_then(|e| e.to_str())
        .unwrap_or_default()
        .to_lowercase()
}

/// Framework from the file's top-level subdirectory under the input root.
fn framework_for(input_root: &Path, path: &Path) -> Option<Framework> {
    let relative = path.strip_prefix(input_root).ok()?;
    let first = relative.components().next()?;
    Framework::from_name(first.as_os_str().to_str()?)
}

/// Write the document next to its mirrored input path, in the configured
/// format(s).
fn write_document(
    config: &Config,
    input_root: &Path,
    output_root: &Path,
    input_path: &Path,
    document: &GraphDocument,
) -> io::Result<()> {
    let relative = input_path.strip_prefix(input_root).unwrap_or(input_path);
    let mirrored = output_root.join(relative);
    if let Some(parent) = mirrored.parent() {
        std::fs::create_dir_all(parent)?;
    }

    if config.output.format.writes_json() {
        let json = if config.output.pretty {
            serde_json::to_string_pretty(document)
        } else {
            serde_json::to_string(document)
        }
        .map_err(io::Error::other)?;
        std::fs::write(mirrored.with_extension("json"), json)?;
    }
    if config.output.format.writes_turtle() {
        std::fs::write(mirrored.with_extension("ttl"), document.graph.to_turtle())?;
    }
    Ok(())
}

fn report(progress: &ProgressBar, path: &Path, document: &GraphDocument, stats: &mut BatchStats) {
    let name = path
        .file_name()
        .and_then(|n| n.to_str())
        .unwrap_or_default();
    if let Some(error) = &document.error {
        stats.failed += 1;
        progress.println(format!("  FAIL {name}: {error}"));
    } else {
        stats.success += 1;
        progress.println(format!(
            "  OK {name} ({} resources)",
            document.graph.resources.len()
        ));
    }
}

fn progress_bar(len: usize) -> ProgressBar {
    let bar = ProgressBar::new(len as u64);
    bar.set_style(
        ProgressStyle::with_template("[{bar:40.cyan/blue}] {pos}/{len} {msg}")
            .unwrap_or_else(|_| ProgressStyle::default_bar()),
    );
    bar
}

#[cfg(test)]
mod tests {
    use super::*;
    use agentograph_core::config::OutputFormat;

    #[test]
    fn test_mirrored_structure_and_error_document() {
        let input = tempfile::tempdir().unwrap();
        let output = tempfile::tempdir().unwrap();
        let nested = input.path().join("autogen");
        std::fs::create_dir_all(&nested).unwrap();
        std::fs::write(
            nested.join("chess.txt"),
            "Pattern Identity\nFramework\nAutoGen\n",
        )
        .unwrap();

        let pipeline = Pipeline::new();
        let config = Config::default();
        let stats = convert_dir(&pipeline, &config, input.path(), output.path()).unwrap();
        assert_eq!(stats.total, 1);
        assert_eq!(stats.success, 1);

        let written = output.path().join("autogen").join("chess.json");
        assert!(written.exists());
        let parsed: serde_json::Value =
            serde_json::from_str(&std::fs::read_to_string(written).unwrap()).unwrap();
        assert!(parsed.get("prefixes").is_some());
        assert!(parsed.get("error").is_none());
    }

    #[test]
    fn test_extract_batch_continues_past_bad_artifact() {
        let input = tempfile::tempdir().unwrap();
        let output = tempfile::tempdir().unwrap();
        let dir = input.path().join("mastraai");
        std::fs::create_dir_all(&dir).unwrap();
        std::fs::write(dir.join("bad.json"), "{not json").unwrap();
        std::fs::write(
            dir.join("good.yaml"),
            "name: Service\nagents:\n  - name: triage\n    role: Triage\n",
        )
        .unwrap();

        let pipeline = Pipeline::new();
        let mut config = Config::default();
        config.output.format = OutputFormat::Both;
        let stats = extract_dir(&pipeline, &config, input.path(), output.path(), None).unwrap();

        // The malformed JSON still converts (it yields an empty record),
        // and both outputs exist in both formats.
        assert_eq!(stats.total, 2);
        assert!(output.path().join("mastraai").join("good.json").exists());
        assert!(output.path().join("mastraai").join("good.ttl").exists());
        assert!(output.path().join("mastraai").join("bad.json").exists());
    }

    #[test]
    fn test_framework_from_directory() {
        let root = Path::new("/data");
        assert_eq!(
            framework_for(root, Path::new("/data/crewai/x.py")),
            Some(Framework::CrewAi)
        );
        assert_eq!(framework_for(root, Path::new("/data/misc/x.py")), None);
    }
}
