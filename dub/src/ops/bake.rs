//! Bake operation - binding generation from doxygen XML.

use dub_codegen::LanguageCodegen;
use dub_codegen_lua::Generator;
use dub_manifest::Language;
use eyre::{Context, Result};

use super::Settings;
use crate::reports::{BakeReport, GenerationResult, PreviewResult, WrittenResult};

/// Options for the bake operation.
pub struct BakeOptions {
    /// Whether to preview without writing files.
    pub dry_run: bool,
}

/// Execute the bake operation.
///
/// Loads the namespace, then renders one source file per class plus one for
/// free functions, either to disk or as a preview.
pub fn bake(settings: &Settings, opts: BakeOptions) -> Result<BakeReport> {
    let namespace = settings.load_namespace()?;
    let generator = match settings.language {
        Language::Lua => Generator::new(namespace.clone(), settings.class_gen()),
    };

    let result = if opts.dry_run {
        GenerationResult::Preview(PreviewResult {
            files: generator.preview()?,
        })
    } else {
        let generated = generator
            .generate(&settings.output)
            .wrap_err("Failed to generate bindings")?;
        GenerationResult::Written(WrittenResult {
            output_dir: settings.output.clone(),
            written: generated.written,
            skipped: generated.skipped,
        })
    };

    Ok(BakeReport {
        namespace: namespace.name().to_string(),
        language: generator.language(),
        class_count: namespace.classes().len(),
        ignored: generator
            .ignored()
            .into_iter()
            .map(|(name, reason)| (name, reason.to_string()))
            .collect(),
        result,
    })
}
