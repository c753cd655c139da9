use crate::entities::item::ItemStack;
use crate::unify::resolver::Resolver;
use crate::unify::stack::unify_stack;

/// Anything that produces a list of stacks: loot tables, block breaking.
pub trait DropProducer {
    type Context;

    fn produce(&self, ctx: &mut Self::Context) -> Vec<ItemStack>;
}

/// Maps each produced stack through the stack unifier. Same length, same
/// order, same counts.
pub fn intercept_drops<R>(resolver: &R, drops: Vec<ItemStack>) -> Vec<ItemStack>
where
    R: Resolver + ?Sized,
{
    drops
        .into_iter()
        .map(|stack| unify_stack(resolver, stack))
        .collect()
}

/// Wraps a producer so that its output is replaced by the unified list. Only
/// stacks are touched; no container is ever reached from here.
pub struct UnifiedDrops<'r, R: ?Sized, P> {
    resolver: &'r R,
    inner: P,
}

impl<'r, R: ?Sized, P> UnifiedDrops<'r, R, P> {
    pub fn new(resolver: &'r R, inner: P) -> Self {
        Self { resolver, inner }
    }
}

impl<R, P> DropProducer for UnifiedDrops<'_, R, P>
where
    R: Resolver + ?Sized,
    P: DropProducer,
{
    type Context = P::Context;

    fn produce(&self, ctx: &mut Self::Context) -> Vec<ItemStack> {
        intercept_drops(self.resolver, self.inner.produce(ctx))
    }
}

impl<P: DropProducer + ?Sized> DropProducer for &P {
    type Context = P::Context;

    fn produce(&self, ctx: &mut Self::Context) -> Vec<ItemStack> {
        (**self).produce(ctx)
    }
}
