use crate::entities::inventory::Container;
use crate::unify::error::UnifyError;
use crate::unify::resolver::Resolver;
use crate::unify::stack::replacement_for;

/// Rewrites every slot whose kind has a different replacement, in ascending
/// slot order, and returns how many slots changed. Empty slots are skipped.
///
/// Does not call [`Container::set_changed`]; that is up to the walker. A failed
/// write yields [`UnifyError::PartialWrite`] carrying the slots rewritten so far.
pub fn unify_container<R, C>(resolver: &R, container: &mut C) -> Result<usize, UnifyError>
where
    R: Resolver + ?Sized,
    C: Container + ?Sized,
{
    let mut changed = 0;
    for slot in 0..container.size() {
        let Some(stack) = container.item(slot) else {
            continue;
        };
        if stack.is_empty() {
            continue;
        }
        let Some(kind) = replacement_for(resolver, &stack.kind) else {
            continue;
        };
        let unified = stack.with_kind(kind);
        container
            .set_item(slot, Some(unified))
            .map_err(|source| UnifyError::PartialWrite {
                written: changed,
                source,
            })?;
        changed += 1;
    }
    Ok(changed)
}
