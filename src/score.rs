//! Local best-distance record
//!
//! One integer in LocalStorage, read once at startup and rewritten only when
//! a run sets a new record. The remote leaderboard lives in [`crate::api`].

/// Best floored distance achieved on this device
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct BestDistance(pub u32);

impl BestDistance {
    /// LocalStorage key (used only in wasm32)
    #[allow(dead_code)]
    const STORAGE_KEY: &'static str = "best_distance";

    /// Decode a stored value. Anything absent or unreadable counts as no
    /// record, never an error.
    pub fn decode(raw: Option<&str>) -> Self {
        Self(raw.and_then(|s| s.trim().parse().ok()).unwrap_or(0))
    }

    /// Encoding written back to storage
    pub fn encode(self) -> String {
        self.0.to_string()
    }

    /// Load the record from LocalStorage (WASM only)
    #[cfg(target_arch = "wasm32")]
    pub fn load() -> Self {
        let storage = web_sys::window()
            .and_then(|w| w.local_storage().ok())
            .flatten();

        if let Some(storage) = storage {
            if let Ok(raw) = storage.get_item(Self::STORAGE_KEY) {
                let best = Self::decode(raw.as_deref());
                log::info!("Loaded best distance: {}", best.0);
                return best;
            }
        }

        log::info!("No best distance found, starting fresh");
        Self(0)
    }

    /// Save the record to LocalStorage (WASM only)
    #[cfg(target_arch = "wasm32")]
    pub fn save(self) {
        let storage = web_sys::window()
            .and_then(|w| w.local_storage().ok())
            .flatten();

        if let Some(storage) = storage {
            let _ = storage.set_item(Self::STORAGE_KEY, &self.encode());
            log::info!("Best distance saved: {}", self.0);
        }
    }

    /// Native stubs
    #[cfg(not(target_arch = "wasm32"))]
    pub fn load() -> Self {
        Self(0)
    }

    #[cfg(not(target_arch = "wasm32"))]
    pub fn save(self) {
        // No-op for native
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_round_trip() {
        let best = BestDistance(357);
        assert_eq!(BestDistance::decode(Some(&best.encode())), best);
    }

    #[test]
    fn test_decode_absent_is_zero() {
        assert_eq!(BestDistance::decode(None), BestDistance(0));
    }

    #[test]
    fn test_decode_garbage_is_zero() {
        assert_eq!(BestDistance::decode(Some("not a number")), BestDistance(0));
        assert_eq!(BestDistance::decode(Some("-12")), BestDistance(0));
        assert_eq!(BestDistance::decode(Some("")), BestDistance(0));
    }

    #[test]
    fn test_decode_tolerates_whitespace() {
        assert_eq!(BestDistance::decode(Some(" 42\n")), BestDistance(42));
    }
}
