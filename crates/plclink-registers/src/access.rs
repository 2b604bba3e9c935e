use crate::address::RegisterAddress;
use crate::error::Result;
use crate::value::RegisterValue;

/// Blocking access to individual device registers.
///
/// Every call is a single synchronous round trip; implementations do not
/// batch, pipeline, or cache. The multi-register operations in
/// [`crate::text`] issue one call per address and assume they are the only
/// caller for the duration of an operation — that is a documented
/// precondition, not something this trait enforces.
///
/// Implemented by the live device session, by [`crate::MemoryBank`], and
/// by test doubles.
pub trait RegisterAccess {
    /// Read the value at `addr`.
    fn read(&mut self, addr: RegisterAddress) -> Result<RegisterValue>;

    /// Write `value` to `addr`.
    fn write(&mut self, addr: RegisterAddress, value: RegisterValue) -> Result<()>;
}

impl<T: RegisterAccess + ?Sized> RegisterAccess for &mut T {
    fn read(&mut self, addr: RegisterAddress) -> Result<RegisterValue> {
        (**self).read(addr)
    }

    fn write(&mut self, addr: RegisterAddress, value: RegisterValue) -> Result<()> {
        (**self).write(addr, value)
    }
}
