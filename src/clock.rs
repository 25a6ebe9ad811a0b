//! Timezone offset sources for aurora requests
//!
//! The offset is read on every request so a long-running process follows
//! daylight-saving transitions.

use chrono::Local;

/// Supplies the local UTC offset, in seconds east of UTC
pub trait OffsetSource: Send + Sync {
    fn utc_offset_seconds(&self) -> i32;
}

/// Reads the offset from the system clock at call time
#[derive(Debug, Default, Clone, Copy)]
pub struct LocalOffset;

impl OffsetSource for LocalOffset {
    fn utc_offset_seconds(&self) -> i32 {
        Local::now().offset().local_minus_utc()
    }
}

/// A fixed offset, used for configured overrides and tests
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StaticOffset(pub i32);

impl OffsetSource for StaticOffset {
    fn utc_offset_seconds(&self) -> i32 {
        self.0
    }
}
