//! List operation - what gets bound and what does not.

use dub_codegen_lua::Generator;
use dub_model::{Function, MemberNode};
use eyre::Result;

use super::Settings;
use crate::reports::{ClassInfo, ListReport};

/// Load the namespace and describe its bindings without rendering them.
pub fn list(settings: &Settings) -> Result<ListReport> {
    let namespace = settings.load_namespace()?;
    let generator = Generator::new(namespace.clone(), settings.class_gen());
    let class_gen = generator.class_gen();

    let mut classes = Vec::with_capacity(namespace.classes().len());
    for klass in namespace.classes() {
        let constructor = match class_gen.constructors(klass).first() {
            Some(ctor) => Some(ctor.method_name(Some(0))?),
            None => None,
        };
        classes.push(ClassInfo {
            name: klass.name().to_string(),
            aliases: klass.alias_names().to_vec(),
            constructor,
            members: bound_names(class_gen.members_list(klass.members())),
        });
    }

    Ok(ListReport {
        namespace: namespace.name().to_string(),
        classes,
        functions: bound_names(class_gen.members_list(namespace.functions())),
        ignored: generator
            .ignored()
            .into_iter()
            .map(|(name, reason)| (name, reason.to_string()))
            .collect(),
    })
}

/// Member names in declaration order, one per overload group.
fn bound_names(list: Option<Vec<MemberNode<&Function>>>) -> Vec<String> {
    list.unwrap_or_default()
        .iter()
        .filter_map(|node| node.first().map(|function| function.name().to_string()))
        .collect()
}
