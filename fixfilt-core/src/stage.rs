//! The `Stage` trait: one sample in, one sample out.
//!
//! Every primitive in this crate implements [`Stage`], so a per-channel
//! pipeline (raw → widen → EMA → hysteresis → narrow) can be assembled with
//! [`StageExt::then`]. The compiler checks that each stage's output type is
//! the next stage's input type; matching the *declared bit widths* is still
//! up to the caller.

/// Anything that maps one input sample to one output sample.
pub trait Stage {
    type Input: Copy;
    type Output: Copy;

    /// Process one sample.
    fn process(&mut self, input: Self::Input) -> Self::Output;
}

impl<S: Stage + ?Sized> Stage for &mut S {
    type Input = S::Input;
    type Output = S::Output;

    #[inline]
    fn process(&mut self, input: Self::Input) -> Self::Output {
        (**self).process(input)
    }
}

/// Combinators available on every [`Stage`].
pub trait StageExt: Stage + Sized {
    /// Feed this stage's output into `next`.
    #[inline]
    fn then<B>(self, next: B) -> Chain<Self, B>
    where
        B: Stage<Input = Self::Output>,
    {
        Chain { first: self, second: next }
    }

    /// Lazily process every sample of `input`.
    #[inline]
    fn run<I>(&mut self, input: I) -> Run<'_, Self, I::IntoIter>
    where
        I: IntoIterator<Item = Self::Input>,
    {
        Run { stage: self, input: input.into_iter() }
    }
}

impl<S: Stage> StageExt for S {}

/// Two stages in series. Built by [`StageExt::then`].
#[derive(Copy, Clone, Debug, Default)]
pub struct Chain<A, B> {
    first: A,
    second: B,
}

impl<A, B> Chain<A, B> {
    #[inline] pub fn first(&self) -> &A { &self.first }
    #[inline] pub fn second(&self) -> &B { &self.second }
    #[inline] pub fn first_mut(&mut self) -> &mut A { &mut self.first }
    #[inline] pub fn second_mut(&mut self) -> &mut B { &mut self.second }
    #[inline] pub fn into_parts(self) -> (A, B) { (self.first, self.second) }
}

impl<A, B> Stage for Chain<A, B>
where
    A: Stage,
    B: Stage<Input = A::Output>,
{
    type Input = A::Input;
    type Output = B::Output;

    #[inline]
    fn process(&mut self, input: A::Input) -> B::Output {
        self.second.process(self.first.process(input))
    }
}

/// Iterator returned by [`StageExt::run`].
#[derive(Debug)]
pub struct Run<'a, S, I> {
    stage: &'a mut S,
    input: I,
}

impl<S, I> Iterator for Run<'_, S, I>
where
    S: Stage,
    I: Iterator<Item = S::Input>,
{
    type Item = S::Output;

    #[inline]
    fn next(&mut self) -> Option<S::Output> {
        self.input.next().map(|x| self.stage.process(x))
    }

    #[inline]
    fn size_hint(&self) -> (usize, Option<usize>) {
        self.input.size_hint()
    }
}

// ------------------------------------ Tests --------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    struct Add(u16);
    impl Stage for Add {
        type Input = u16;
        type Output = u16;
        fn process(&mut self, x: u16) -> u16 { x + self.0 }
    }

    struct Halve;
    impl Stage for Halve {
        type Input = u16;
        type Output = u8;
        fn process(&mut self, x: u16) -> u8 { u8::try_from(x / 2).unwrap_or(u8::MAX) }
    }

    #[test]
    fn chain_applies_in_order() {
        let mut c = Add(10).then(Halve);
        assert_eq!(c.process(4), 7);
        assert_eq!(c.first().0, 10);
    }

    #[test]
    fn run_maps_lazily() {
        let mut c = Add(1).then(Add(2));
        let out: Vec<u16> = c.run([0u16, 10, 20]).collect();
        assert_eq!(out, [3, 13, 23]);
        assert_eq!(c.run(0u16..5).size_hint(), (5, Some(5)));
    }

    #[test]
    fn mutable_references_are_stages() {
        let mut inner = Add(5);
        {
            let mut by_ref = (&mut inner).then(Halve);
            assert_eq!(by_ref.process(5), 5);
        }
        inner.0 = 7;
        assert_eq!(inner.process(0), 7);
    }
}
