//! Encoder configuration

use std::time::Duration;

/// Quiet period before filter edits are encoded and refetched.
pub const DEFAULT_DEBOUNCE: Duration = Duration::from_millis(300);

/// Rows requested per listing page.
pub const DEFAULT_PAGE_SIZE: usize = 10;

/// Settings for a listing page's query session
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EncoderConfig {
    pub debounce: Duration,
    pub page_size: usize,
}

impl EncoderConfig {
    pub fn with_debounce(mut self, debounce: Duration) -> Self {
        self.debounce = debounce;
        self
    }

    /// Set the page size. Zero is ignored.
    pub fn with_page_size(mut self, page_size: usize) -> Self {
        if page_size > 0 {
            self.page_size = page_size;
        }
        self
    }
}

impl Default for EncoderConfig {
    fn default() -> Self {
        Self {
            debounce: DEFAULT_DEBOUNCE,
            page_size: DEFAULT_PAGE_SIZE,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = EncoderConfig::default();
        assert_eq!(config.debounce, Duration::from_millis(300));
        assert_eq!(config.page_size, 10);
    }

    #[test]
    fn test_zero_page_size_ignored() {
        let config = EncoderConfig::default().with_page_size(0);
        assert_eq!(config.page_size, DEFAULT_PAGE_SIZE);
    }
}
