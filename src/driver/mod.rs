use std::time::Duration;

pub mod mikroe;

/// Blocking delay backed by [`std::thread::sleep`].
pub struct ThreadDelay;

impl embedded_hal::blocking::delay::DelayMs<u32> for ThreadDelay {
    fn delay_ms(&mut self, ms: u32) {
        std::thread::sleep(Duration::from_millis(ms as u64))
    }
}
