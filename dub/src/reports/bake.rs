//! Bake command report data structures.

use std::path::PathBuf;

use dub_codegen::PreviewFile;

use super::output::{Output, Report};

/// Report data from binding generation.
#[derive(Debug)]
pub struct BakeReport {
    /// Namespace the bindings were generated for.
    pub namespace: String,

    /// Target scripting language.
    pub language: &'static str,

    /// Number of classes loaded from the XML.
    pub class_count: usize,

    /// Members left out, as `Class::member` with the reason.
    pub ignored: Vec<(String, String)>,

    /// Generation result (files written or preview).
    pub result: GenerationResult,
}

/// Result of binding generation.
#[derive(Debug)]
pub enum GenerationResult {
    /// Files were written to disk.
    Written(WrittenResult),
    /// Dry-run preview.
    Preview(PreviewResult),
}

/// Result when files were written to disk.
#[derive(Debug)]
pub struct WrittenResult {
    pub output_dir: PathBuf,
    /// Files written, relative to the output directory.
    pub written: Vec<String>,
    /// Support files that already existed.
    pub skipped: Vec<String>,
}

/// Result of a dry-run preview.
#[derive(Debug)]
pub struct PreviewResult {
    /// Files that would be generated.
    pub files: Vec<PreviewFile>,
}

impl Report for BakeReport {
    fn render(&self, out: &mut dyn Output) {
        match &self.result {
            GenerationResult::Written(written) => self.render_written(out, written),
            GenerationResult::Preview(preview) => self.render_preview(out, preview),
        }
    }
}

impl BakeReport {
    fn render_written(&self, out: &mut dyn Output, written: &WrittenResult) {
        out.key_value(
            "Bindings",
            &format!(
                "{} ({}, {} classes)",
                self.namespace, self.language, self.class_count
            ),
        );
        out.key_value("Generated", &written.output_dir.display().to_string());
        for file in &written.written {
            out.added_item(file);
        }
        for file in &written.skipped {
            out.list_item(&format!("{} (kept)", file));
        }

        self.render_ignored(out);
    }

    fn render_ignored(&self, out: &mut dyn Output) {
        if self.ignored.is_empty() {
            return;
        }
        out.newline();
        out.section(&format!("Ignored ({})", self.ignored.len()));
        for (name, reason) in &self.ignored {
            out.excluded_item(name, reason);
        }
    }

    fn render_preview(&self, out: &mut dyn Output, preview: &PreviewResult) {
        for file in &preview.files {
            out.divider(&file.path);
            out.preformatted(&file.content);
        }

        out.divider("Summary");
        out.preformatted(&format!("{} files would be generated", preview.files.len()));
        self.render_ignored(out);
    }
}
