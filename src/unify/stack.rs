use crate::entities::item::{ItemKind, ItemStack};
use crate::unify::resolver::Resolver;

/// The replacement for `kind`, but only when it differs from `kind`.
pub fn replacement_for<R>(resolver: &R, kind: &ItemKind) -> Option<ItemKind>
where
    R: Resolver + ?Sized,
{
    resolver.resolve(kind).filter(|resolved| resolved != kind)
}

/// Swaps the stack's kind for its canonical kind, keeping the count. Stacks
/// without a different replacement are handed back untouched.
pub fn unify_stack<R>(resolver: &R, stack: ItemStack) -> ItemStack
where
    R: Resolver + ?Sized,
{
    match replacement_for(resolver, &stack.kind) {
        Some(kind) => stack.with_kind(kind),
        None => stack,
    }
}
