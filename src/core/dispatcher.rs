//! Dispatcher trait for log output sinks

use super::error::Result;

/// Delivers one formatted record to a concrete sink.
///
/// `fields` are ordered `NAME=VALUE` strings starting with `PRIORITY=`; the
/// message is passed separately and each sink decides how to place it.
/// Implementations must not retry on failure.
pub trait Dispatcher: Send + Sync {
    fn dispatch(&self, fields: &[String], message: &str) -> Result<()>;
    fn name(&self) -> &str;
}

impl<D: Dispatcher + ?Sized> Dispatcher for Box<D> {
    fn dispatch(&self, fields: &[String], message: &str) -> Result<()> {
        (**self).dispatch(fields, message)
    }

    fn name(&self) -> &str {
        (**self).name()
    }
}

impl<D: Dispatcher + ?Sized> Dispatcher for std::sync::Arc<D> {
    fn dispatch(&self, fields: &[String], message: &str) -> Result<()> {
        (**self).dispatch(fields, message)
    }

    fn name(&self) -> &str {
        (**self).name()
    }
}
