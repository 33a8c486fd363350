use {static_assertions::assert_eq_size, std::fmt, thiserror::Error};

/// The error produced when a [`ClosureHolder`] holding no closure is asked
/// to execute one. This is the crate's only error kind: storing, cloning and
/// dropping a well-formed holder cannot fail.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("tried to execute an empty `ClosureHolder`")]
pub struct EmptyClosureError;

/// Object-safe view of a captured closure.
///
/// One blanket impl covers every concrete closure type, so the compiler
/// binds the invoke / drop / clone entry points together per captured type
/// at the capture site. They are only ever reached through the holder's
/// vtable pointer after the concrete type is erased.
trait ErasedClosure<Args, R> {
    fn invoke(&mut self, args: Args) -> R;

    fn clone_boxed(&self) -> Box<dyn ErasedClosure<Args, R>>;
}

impl<Args, R, F> ErasedClosure<Args, R> for F
where
    F: FnMut(Args) -> R + Clone + 'static,
{
    fn invoke(&mut self, args: Args) -> R {
        self(args)
    }

    fn clone_boxed(&self) -> Box<dyn ErasedClosure<Args, R>> {
        Box::new(self.clone())
    }
}

/// Wrapper for a closure with the call signature `(Args) -> R`, erasing the
/// closure's concrete type while keeping full value semantics.
///
/// Any callable matching the signature may be stored, as long as it is
/// cloneable: plain functions, non-capturing closures, and capturing
/// closures whose captures are themselves `Clone`. Multi-argument
/// signatures are expressed as tuples (`Args = (A, B)`), and `R` defaults
/// to `()` for effect-only closures, so both value-returning and
/// effect-only signatures go through the same type.
///
/// Cloning a non-empty holder deep-copies the captured value; two clones
/// never share captured state. The erased entry points themselves are
/// stateless and shared freely between clones.
///
/// The captured value is always stored in its own heap allocation. There is
/// no inline-storage fast path and no way to empty an occupied holder short
/// of dropping it; [`store`] replaces the captured value instead.
///
/// The holder provides no synchronization. Keeping one holder mutated from
/// multiple threads is the caller's responsibility to avoid, and re-entrant
/// execution is only as safe as the captured closure makes it.
///
/// [`store`]: Self::store
pub struct ClosureHolder<Args, R = ()> {
    erased: Option<Box<dyn ErasedClosure<Args, R>>>,
}

// Nullable fat pointer; the `None` case rides the pointer niche.
assert_eq_size!(ClosureHolder<(), ()>, [usize; 2]);

impl<Args, R> ClosureHolder<Args, R> {
    /// Creates an empty [`ClosureHolder`].
    pub fn empty() -> Self {
        ClosureHolder { erased: None }
    }

    /// Creates a holder which contains the closure `f` for later execution
    /// with [`execute`] \ [`try_execute`].
    ///
    /// [`execute`]: Self::execute
    /// [`try_execute`]: Self::try_execute
    pub fn new<F>(f: F) -> Self
    where
        F: FnMut(Args) -> R + Clone + 'static,
    {
        ClosureHolder {
            erased: Some(Box::new(f)),
        }
    }

    /// Stores the closure `f` in the holder for later execution with
    /// [`execute`] \ [`try_execute`].
    ///
    /// If the holder already contains a closure, the previously captured
    /// value is dropped first and `f` takes its place.
    ///
    /// [`execute`]: Self::execute
    /// [`try_execute`]: Self::try_execute
    pub fn store<F>(&mut self, f: F)
    where
        F: FnMut(Args) -> R + Clone + 'static,
    {
        self.erased = Some(Box::new(f));
    }

    /// If the holder is not empty, returns `true`; otherwise returns `false`.
    pub fn is_some(&self) -> bool {
        self.erased.is_some()
    }

    /// Executes the stored closure, forwarding `args` and returning the
    /// closure's result.
    ///
    /// Executing an empty holder is a contract violation; use
    /// [`try_execute`] where emptiness is an expected state.
    ///
    /// # Panics
    ///
    /// Panics if the holder is empty.
    ///
    /// [`try_execute`]: Self::try_execute
    pub fn execute(&mut self, args: Args) -> R {
        match self.erased.as_mut() {
            Some(closure) => closure.invoke(args),
            None => panic!("tried to execute an empty `ClosureHolder`"),
        }
    }

    /// If the holder is not empty, executes the stored closure and returns
    /// its result; otherwise returns [`EmptyClosureError`].
    pub fn try_execute(&mut self, args: Args) -> Result<R, EmptyClosureError> {
        match self.erased.as_mut() {
            Some(closure) => Ok(closure.invoke(args)),
            None => Err(EmptyClosureError),
        }
    }
}

impl<Args, R> Clone for ClosureHolder<Args, R> {
    /// Clones the holder, deep-copying the captured value, if any.
    ///
    /// The clone owns an independent copy of the captured state; executing
    /// one holder never affects the other's subsequent results.
    fn clone(&self) -> Self {
        ClosureHolder {
            erased: self.erased.as_ref().map(|closure| closure.clone_boxed()),
        }
    }
}

impl<Args, R> Default for ClosureHolder<Args, R> {
    fn default() -> Self {
        Self::empty()
    }
}

impl<Args, R> fmt::Debug for ClosureHolder<Args, R> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ClosureHolder")
            .field("occupied", &self.is_some())
            .finish()
    }
}
