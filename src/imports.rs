//! Import header construction.
//!
//! Every binding is suffixed with the mount id (`loader3`, `Component3`,
//! `renderer3`) so several mount points on one page never collide.

use crate::registry::ModuleRef;
use crate::script::{Ident, ImportDecl};
use crate::utils::normalize_module_path;
use crate::MountContext;

/// Binding for the loader function of a mount point.
pub fn loader_binding(mount_id: &str) -> Ident {
    Ident::scoped("loader", mount_id)
}

/// Binding for an eagerly imported component module.
pub fn component_binding(mount_id: &str) -> Ident {
    Ident::scoped("Component", mount_id)
}

/// Binding for an eagerly imported renderer module.
pub fn renderer_binding(mount_id: &str) -> Ident {
    Ident::scoped("renderer", mount_id)
}

/// Import of the loader's client module, aliased to [`loader_binding`].
///
/// The client specifier is used verbatim.
pub fn loader_import(client: &ModuleRef, mount_id: &str) -> ImportDecl {
    let binding = loader_binding(mount_id);
    match client {
        ModuleRef::Default(module) => ImportDecl::Default {
            binding,
            source: module.clone(),
        },
        ModuleRef::Named { export, module } => match Ident::parse(export) {
            Some(export) => ImportDecl::Named {
                export,
                binding,
                source: module.clone(),
            },
            // Registries validate export names on insert; an entry built
            // around that check still gets a well-formed import.
            None => ImportDecl::Default {
                binding,
                source: module.clone(),
            },
        },
    }
}

/// Rendered loader import statement.
pub fn build_loader_import(client: &ModuleRef, mount_id: &str) -> String {
    loader_import(client, mount_id).to_string()
}

/// Default imports of the component and renderer modules, in that order.
pub fn eager_imports(ctx: &MountContext) -> [ImportDecl; 2] {
    [
        ImportDecl::Default {
            binding: component_binding(&ctx.id),
            source: normalize_module_path(&ctx.component_path),
        },
        ImportDecl::Default {
            binding: renderer_binding(&ctx.id),
            source: normalize_module_path(&ctx.renderer_path),
        },
    ]
}
