//! Candidate discovery for stub generation
//!
//! Walks the binding graph to find what can be generated on a type:
//! methods a field can delegate to, methods a subclass can override,
//! abstract methods still waiting for an implementation, and super
//! constructors worth mirroring. Discovery de-duplicates by
//! override-equivalence so the closest declaration wins.

use crate::binding::{BindingTable, FieldId, MethodId, TypeId, TypeKind};

/// (field, method) pairs a delegating method can be generated for: for each
/// declared field, the public non-static methods its type (and supertypes)
/// declare, minus everything the enclosing type already provides
pub fn delegatable_methods(table: &BindingTable, ty: TypeId) -> Vec<(FieldId, MethodId)> {
    let mut tuples = Vec::new();
    let declared: Vec<MethodId> = table.type_binding(ty).methods.clone();
    for &field in &table.type_binding(ty).fields {
        let field_binding = table.field(field);
        if field_binding.ty.dims > 0 {
            continue;
        }
        let field_type = field_binding.ty.id;
        if table.type_binding(field_type).kind == TypeKind::Primitive {
            continue;
        }
        let mut seen = declared.clone();
        let mut chain = vec![field_type];
        chain.extend(table.superclass_chain(field_type));
        for current in chain {
            for &candidate in &table.type_binding(current).methods {
                let m = table.method(candidate);
                if m.is_constructor || m.modifiers.is_static() || !m.modifiers.is_public() {
                    continue;
                }
                if seen.iter().any(|&existing| table.overrides(existing, candidate)) {
                    continue;
                }
                tuples.push((field, candidate));
                seen.push(candidate);
            }
        }
    }
    tuples
}

/// Methods declared in the superclass chain that the type could override:
/// non-static, non-private, non-constructor, not final, and not already
/// overridden closer to the type
pub fn overridable_methods(table: &BindingTable, ty: TypeId) -> Vec<MethodId> {
    let mut all: Vec<MethodId> = Vec::new();
    for &method in &table.type_binding(ty).methods {
        let m = table.method(method);
        if !m.is_constructor && !m.modifiers.is_static() && !m.modifiers.is_private() {
            all.push(method);
        }
    }
    let own_count = all.len();
    for parent in table.superclass_chain(ty) {
        for &method in &table.type_binding(parent).methods {
            let m = table.method(method);
            if m.is_constructor || m.modifiers.is_static() || m.modifiers.is_private() {
                continue;
            }
            if all.iter().any(|&existing| table.overrides(existing, method)) {
                continue;
            }
            all.push(method);
        }
    }
    // the type's own declarations only served as an override filter
    all.drain(..own_count);
    all.retain(|&method| !table.method(method).modifiers.is_final());
    all
}

/// Abstract methods the type inherits without implementing, from the
/// superclass chain and every implemented interface
pub fn unimplemented_methods(table: &BindingTable, ty: TypeId) -> Vec<MethodId> {
    let mut all: Vec<MethodId> = Vec::new();
    let mut chain = vec![ty];
    chain.extend(table.superclass_chain(ty));
    for current in &chain {
        for &method in &table.type_binding(*current).methods {
            let m = table.method(method);
            if m.is_constructor || m.modifiers.is_static() || m.modifiers.is_private() {
                continue;
            }
            if all.iter().any(|&existing| table.overrides(existing, method)) {
                continue;
            }
            all.push(method);
        }
    }

    let mut to_implement: Vec<MethodId> = all
        .iter()
        .copied()
        .filter(|&method| {
            let m = table.method(method);
            m.modifiers.is_abstract() && m.declaring != ty
        })
        .collect();

    // interface methods count as abstract unless something in the class
    // chain already provides them
    for iface in table.all_interfaces(ty) {
        for &method in &table.type_binding(iface).methods {
            let m = table.method(method);
            if m.is_constructor || m.modifiers.is_static() {
                continue;
            }
            if all.iter().any(|&existing| table.overrides(existing, method)) {
                continue;
            }
            if to_implement.iter().any(|&existing| table.overrides(existing, method)) {
                continue;
            }
            to_implement.push(method);
        }
    }
    to_implement
}

/// Constructors of the direct superclass that are callable from the type's
/// package. With `account_existing`, constructors the type already mirrors
/// (same parameter list) are left out.
pub fn visible_super_constructors(
    table: &BindingTable,
    ty: TypeId,
    account_existing: bool,
) -> Vec<MethodId> {
    let binding = table.type_binding(ty);
    let Some(super_type) = binding.superclass else {
        return Vec::new();
    };
    let package = binding.package.clone();
    let existing: Vec<MethodId> = binding
        .methods
        .iter()
        .copied()
        .filter(|&m| table.method(m).is_constructor)
        .collect();

    let mut out = Vec::new();
    for &method in &table.type_binding(super_type).methods {
        let m = table.method(method);
        if !m.is_constructor {
            continue;
        }
        if !table.is_visible_in_hierarchy(method, &package) {
            continue;
        }
        if account_existing
            && existing.iter().any(|&e| table.same_constructor_signature(e, method))
        {
            continue;
        }
        out.push(method);
    }
    out
}
