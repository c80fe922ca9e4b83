//! Clock port - injectable source of the current time.

use crate::domain::foundation::Timestamp;

/// Provides the current time.
pub trait Clock: Send + Sync {
    fn now(&self) -> Timestamp;
}
