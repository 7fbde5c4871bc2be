//! Device biometric prompt
//!
//! After a password sign-in the user may be asked to confirm with a
//! fingerprint or face scan. Terminals have no such device, so the CLI
//! ships [`Unavailable`] and the gate is skipped.

use std::sync::atomic::{AtomicUsize, Ordering};

/// A biometric prompt
pub trait Biometric: Send + Sync {
    /// Whether the device has enrolled biometrics
    fn is_available(&self) -> bool;

    /// Show the prompt; `true` when the user was recognised
    fn authenticate(&self, reason: &str) -> bool;
}

/// No biometric hardware
#[derive(Debug, Clone, Copy, Default)]
pub struct Unavailable;

impl Biometric for Unavailable {
    fn is_available(&self) -> bool {
        false
    }

    fn authenticate(&self, _reason: &str) -> bool {
        false
    }
}

/// A prompt with a fixed answer, counting how often it was shown
#[derive(Debug, Default)]
pub struct ScriptedBiometric {
    available: bool,
    accept: bool,
    prompts: AtomicUsize,
}

impl ScriptedBiometric {
    /// A device that recognises the user
    pub fn accepting() -> Self {
        Self {
            available: true,
            accept: true,
            prompts: AtomicUsize::new(0),
        }
    }

    /// A device that rejects the user
    pub fn rejecting() -> Self {
        Self {
            available: true,
            accept: false,
            prompts: AtomicUsize::new(0),
        }
    }

    /// Number of prompts shown so far
    pub fn prompts(&self) -> usize {
        self.prompts.load(Ordering::SeqCst)
    }
}

impl Biometric for ScriptedBiometric {
    fn is_available(&self) -> bool {
        self.available
    }

    fn authenticate(&self, _reason: &str) -> bool {
        self.prompts.fetch_add(1, Ordering::SeqCst);
        self.accept
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unavailable() {
        assert!(!Unavailable.is_available());
        assert!(!Unavailable.authenticate("confirm"));
    }

    #[test]
    fn test_scripted_counts_prompts() {
        let device = ScriptedBiometric::rejecting();
        assert!(device.is_available());
        assert!(!device.authenticate("confirm"));
        assert!(!device.authenticate("confirm"));
        assert_eq!(device.prompts(), 2);
    }
}
