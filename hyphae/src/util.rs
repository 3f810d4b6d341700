use core::fmt;

macro_rules! test_trace {
    ($($tt:tt)*) => {
        #[cfg(any(test, feature = "tracing"))]
        tracing::trace!($($tt)*)
    }
}

/// Runs the full consistency check of a list, panicking on the first
/// violation found.
///
/// This compiles to nothing unless the `validate` feature is enabled (or we
/// are building tests), so it may be sprinkled around mutating operations
/// without cost in normal builds.
macro_rules! check_valid {
    ($list:expr) => {
        #[cfg(any(test, feature = "validate"))]
        $list.assert_valid();
    };
}

pub(crate) struct FmtOption<'a, T> {
    opt: Option<&'a T>,
    or_else: &'a str,
}

// === impl FmtOption ===

impl<'a, T> FmtOption<'a, T> {
    pub(crate) fn new(opt: &'a Option<T>) -> Self {
        Self {
            opt: opt.as_ref(),
            or_else: "None",
        }
    }
}

impl<T: fmt::Debug> fmt::Debug for FmtOption<'_, T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.opt {
            Some(val) => val.fmt(f),
            None => f.write_str(self.or_else),
        }
    }
}
