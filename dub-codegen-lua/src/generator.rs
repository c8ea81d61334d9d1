use std::{path::Path, rc::Rc};

use dub_codegen::{GenerateResult, LanguageCodegen, PreviewFile};
use dub_core::{GeneratedFile, WriteResult};
use dub_model::{MemberNode, Namespace};
use eyre::{Result, WrapErr};
use tracing::info;

use crate::{
    ClassGen, IgnoreReason,
    files::{BindingCpp, DUB_H_PATH, DubH},
};

/// Lua binding generator for one namespace and its classes.
pub struct Generator {
    namespace: Rc<Namespace>,
    class_gen: Rc<ClassGen>,
}

impl LanguageCodegen for Generator {
    fn language(&self) -> &'static str {
        "lua"
    }

    fn file_extension(&self) -> &'static str {
        "cpp"
    }

    fn preview(&self) -> Result<Vec<PreviewFile>> {
        let mut files: Vec<PreviewFile> = self
            .bindings()?
            .into_iter()
            .map(|binding| PreviewFile {
                path: binding.file_name(),
                content: binding.render(),
            })
            .collect();

        files.push(PreviewFile {
            path: DUB_H_PATH.to_string(),
            content: DubH.render(),
        });

        Ok(files)
    }

    fn generate(&self, output_dir: &Path) -> Result<GenerateResult> {
        let mut result = GenerateResult::default();

        for binding in self.bindings()? {
            binding.write(output_dir)?;
            info!(file = %binding.file_name(), "wrote binding");
            result.written.push(binding.file_name());
        }

        match DubH.write(output_dir)? {
            WriteResult::Written => result.written.push(DUB_H_PATH.to_string()),
            WriteResult::Skipped => result.skipped.push(DUB_H_PATH.to_string()),
        }

        result.ignored = self
            .ignored()
            .into_iter()
            .map(|(name, _)| name)
            .collect();

        Ok(result)
    }
}

impl Generator {
    /// Bind `class_gen` to the namespace. Classes and functions reach it
    /// through their parents.
    pub fn new(namespace: Rc<Namespace>, class_gen: ClassGen) -> Self {
        let class_gen = Rc::new(class_gen);
        namespace.bind(class_gen.clone());
        Self {
            namespace,
            class_gen,
        }
    }

    pub fn namespace(&self) -> &Rc<Namespace> {
        &self.namespace
    }

    pub fn class_gen(&self) -> &ClassGen {
        &self.class_gen
    }

    /// Every member left out of the bindings, as `Class::member`, with the reason.
    pub fn ignored(&self) -> Vec<(String, IgnoreReason)> {
        let free = self.namespace.functions().iter().flat_map(MemberNode::leaves);
        let members = self
            .namespace
            .classes()
            .iter()
            .flat_map(|klass| klass.functions().collect::<Vec<_>>());

        members
            .chain(free)
            .filter_map(|function| {
                self.class_gen
                    .ignore_reason(function)
                    .map(|reason| (function.qualified_name(), reason))
            })
            .collect()
    }

    /// Render one binding per class, plus one for free functions if any survive filtering.
    fn bindings(&self) -> Result<Vec<BindingCpp>> {
        let namespace = &self.namespace;
        let mut bindings = Vec::with_capacity(namespace.classes().len() + 1);

        for klass in namespace.classes() {
            let content = klass
                .render()
                .wrap_err_with(|| format!("failed to render class '{}'", klass.name()))?;
            bindings.push(BindingCpp::new(
                BindingCpp::class_stem(klass.namespace_name(), klass.name()),
                content,
            ));
        }

        if self.class_gen.members_list(namespace.functions()).is_some() {
            let content = namespace
                .render()
                .wrap_err_with(|| format!("failed to render namespace '{}'", namespace.name()))?;
            bindings.push(BindingCpp::new(namespace.name(), content));
        }

        Ok(bindings)
    }
}
