//! Lowering a validated manifest into a SystemVerilog construct tree.

use imp_core::model::{NodeId, Tree};
use imp_sv::{
    Construct, DataType, DataTypeError, ItemBuilder, SystemVerilogWriter,
    models::{Module, ParamKind},
};

use super::{ItemKind, ItemSpec, Manifest, toml_value_to_sv, validate::span_of};
use crate::{Result, error::SourceContext};

/// A design: one tree holding every module of a manifest.
#[derive(Debug)]
pub struct Design {
    pub tree: Tree<Construct>,
    /// Module roots in manifest order
    pub modules: Vec<NodeId>,
}

impl Design {
    /// Find a module root by name.
    pub fn module(&self, name: &str) -> Option<NodeId> {
        self.modules.iter().copied().find(|&root| {
            matches!(self.tree.value(root), Construct::Module(Module { name: n }) if n == name)
        })
    }

    /// Render every module, separated by a blank line.
    pub fn render(&self, writer: &mut SystemVerilogWriter) -> imp_core::Result<String> {
        self.render_modules(writer, &self.modules, |_| {})
    }

    /// Render the modules at `roots` in order, separated by a blank line.
    ///
    /// `rendered` is called with the writer after each module, while its
    /// trace still holds that module's tokens.
    pub fn render_modules<F>(
        &self,
        writer: &mut SystemVerilogWriter,
        roots: &[NodeId],
        mut rendered: F,
    ) -> imp_core::Result<String>
    where
        F: FnMut(&SystemVerilogWriter),
    {
        let mut texts = Vec::with_capacity(roots.len());
        for &root in roots {
            texts.push(writer.render(&self.tree, root)?);
            rendered(writer);
        }
        Ok(texts.join("\n\n"))
    }
}

impl Manifest {
    /// Build the construct tree described by this manifest.
    ///
    /// Model errors, such as a name declared twice in one scope, are reported
    /// against the manifest entry that caused them.
    pub fn lower(&self, source: &SourceContext) -> Result<Design> {
        let mut tree = Tree::new();
        let mut modules = Vec::with_capacity(self.modules.len());

        for spec in &self.modules {
            let root = imp_sv::module(&mut tree, spec.name.get_ref().as_str());
            let mut builder = ItemBuilder::new(&mut tree, root);
            lower_items(&mut builder, &spec.items, source)?;
            modules.push(root);
        }

        Ok(Design { tree, modules })
    }
}

fn lower_items(
    builder: &mut ItemBuilder<'_>,
    items: &[ItemSpec],
    source: &SourceContext,
) -> Result<()> {
    for item in items {
        lower_item(builder, item, source).map_err(|err| model_error(source, item, err))?;
    }
    Ok(())
}

fn lower_item(
    builder: &mut ItemBuilder<'_>,
    item: &ItemSpec,
    source: &SourceContext,
) -> std::result::Result<(), Lowering> {
    let text = || item.text.clone().unwrap_or_default();

    match item.kind() {
        ItemKind::Comment => builder.comment(text())?,
        ItemKind::Banner => builder.banner(text())?,
        ItemKind::BlockComment => builder.block_comment(text())?,
        ItemKind::LocalParam | ItemKind::Parameter => {
            let kind = match item.kind() {
                ItemKind::Parameter => ParamKind::Parameter,
                _ => ParamKind::LocalParam,
            };
            let Some(ty) = &item.ty else {
                return Err(Lowering::Manifest(source.validation_error_at(
                    format!("{} requires a 'type' field", item.kind().as_str()),
                    span_of(item.kind.span()),
                )));
            };
            let dtype: DataType = ty.get_ref().parse().map_err(|reason: DataTypeError| {
                Lowering::Manifest(source.invalid_type_error(
                    ty.get_ref(),
                    reason.to_string(),
                    span_of(ty.span()),
                ))
            })?;
            let names: Vec<&str> = item.all_names().map(|name| name.get_ref().as_str()).collect();
            if names.is_empty() {
                return Err(Lowering::Manifest(source.validation_error_at(
                    format!("{} requires a 'name' field", item.kind().as_str()),
                    span_of(item.kind.span()),
                )));
            }
            let value = item
                .value
                .as_ref()
                .and_then(|value| toml_value_to_sv(value.get_ref()));
            builder.declare(kind, &names, dtype, value)?
        }
        ItemKind::Group | ItemKind::Block => {
            let container = match item.kind() {
                ItemKind::Group => builder.group()?,
                _ => builder.block(item.name.as_ref().map(|name| name.get_ref().as_str()))?,
            };
            lower_items(&mut builder.within(container), &item.items, source)
                .map_err(Lowering::Manifest)?;
            container
        }
    };
    Ok(())
}

/// Failure while lowering one item.
enum Lowering {
    Model(imp_core::Error),
    /// Already reported against its own location.
    Manifest(Box<crate::Error>),
}

impl From<imp_core::Error> for Lowering {
    fn from(err: imp_core::Error) -> Self {
        Lowering::Model(err)
    }
}

fn model_error(source: &SourceContext, item: &ItemSpec, err: Lowering) -> Box<crate::Error> {
    let err = match err {
        Lowering::Model(err) => err,
        Lowering::Manifest(err) => return err,
    };
    let span = match &err {
        imp_core::Error::DuplicateName { name, .. } => item
            .all_names()
            .find(|spanned| spanned.get_ref() == name)
            .map(|spanned| span_of(spanned.span())),
        _ => None,
    }
    .unwrap_or_else(|| span_of(item.kind.span()));
    source.model_error(err, Some(span))
}
