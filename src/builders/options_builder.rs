//! src/builders/options_builder.rs
//! Decryption options builder

use crate::consts::DEFAULT_MAX_ITERATIONS;

/// What to do when the body source runs dry before the expected block count.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ShortReadPolicy {
    /// Fail with [`Psafe3Error::Format`](crate::Psafe3Error::Format).
    #[default]
    Reject,
    /// Keep the whole blocks decrypted so far and carry on (legacy behavior).
    /// The integrity check will then almost certainly fail.
    Truncate,
}

/// Settings for [`decrypt_vault`](crate::decrypt_vault).
///
/// Build with [`DecryptOptions::builder`] or take [`Default`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DecryptOptions {
    short_read: ShortReadPolicy,
    max_iterations: u32,
}

impl DecryptOptions {
    #[must_use]
    pub fn builder() -> DecryptOptionsBuilder {
        DecryptOptionsBuilder::new()
    }

    #[must_use]
    pub const fn short_read(&self) -> ShortReadPolicy {
        self.short_read
    }

    /// Largest header iteration count that will be stretched.
    #[must_use]
    pub const fn max_iterations(&self) -> u32 {
        self.max_iterations
    }
}

impl Default for DecryptOptions {
    fn default() -> Self {
        Self {
            short_read: ShortReadPolicy::Reject,
            max_iterations: DEFAULT_MAX_ITERATIONS,
        }
    }
}

/// Fluent builder for [`DecryptOptions`]
///
/// Defaults: strict short reads, iteration ceiling of [`DEFAULT_MAX_ITERATIONS`].
///
/// # Example
///
/// ```
/// use psafe3::{DecryptOptions, ShortReadPolicy};
///
/// let options = DecryptOptions::builder()
///     .with_short_read(ShortReadPolicy::Truncate)
///     .with_max_iterations(100_000)
///     .build();
/// assert_eq!(options.max_iterations(), 100_000);
/// ```
#[derive(Debug, Clone, Default)]
pub struct DecryptOptionsBuilder {
    options: DecryptOptions,
}

impl DecryptOptionsBuilder {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_short_read(mut self, policy: ShortReadPolicy) -> Self {
        self.options.short_read = policy;
        self
    }

    /// Shorthand for `with_short_read(ShortReadPolicy::Truncate)` when `allow` is set.
    #[must_use]
    pub fn allow_truncated(self, allow: bool) -> Self {
        self.with_short_read(if allow {
            ShortReadPolicy::Truncate
        } else {
            ShortReadPolicy::Reject
        })
    }

    /// Cap on the stored iteration count. A header above it is a format error.
    #[must_use]
    pub fn with_max_iterations(mut self, max_iterations: u32) -> Self {
        self.options.max_iterations = max_iterations;
        self
    }

    #[must_use]
    pub fn build(self) -> DecryptOptions {
        self.options
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_strict() {
        let options = DecryptOptions::default();
        assert_eq!(options.short_read(), ShortReadPolicy::Reject);
        assert_eq!(options.max_iterations(), DEFAULT_MAX_ITERATIONS);
        assert_eq!(DecryptOptions::builder().build(), options);
    }

    #[test]
    fn allow_truncated_toggles_policy() {
        let on = DecryptOptions::builder().allow_truncated(true).build();
        assert_eq!(on.short_read(), ShortReadPolicy::Truncate);
        let off = DecryptOptions::builder()
            .allow_truncated(true)
            .allow_truncated(false)
            .build();
        assert_eq!(off.short_read(), ShortReadPolicy::Reject);
    }
}
