/// Options for [`super::TierBoard`].
#[derive(Clone, Debug)]
pub struct BoardOptions {
    /// Tiers a fresh board starts with, top to bottom.
    pub default_tier_titles: Vec<String>,

    /// If true, a pool tile released outside the pool region is deleted
    /// (the "drag tiles out of the grey zone to remove" affordance).
    ///
    /// If false, such a tile simply stays where it was.
    /// Tier tiles released outside every region always return to the pool.
    pub delete_pool_tiles_released_outside: bool,

    /// If true, record engine events (session starts, releases, transfers) in a small ring buffer,
    /// readable with [`super::TierBoard::debug_log_text`].
    pub debug_event_log: bool,

    /// Maximum number of debug log lines to keep (ring buffer).
    pub debug_event_log_capacity: usize,

    /// If true, check the board invariants after every mutation and log violations.
    pub debug_integrity: bool,

    /// If true, panic on integrity issues (debug-only).
    pub debug_integrity_panic: bool,
}

impl Default for BoardOptions {
    fn default() -> Self {
        Self {
            default_tier_titles: vec!["default".to_owned()],
            delete_pool_tiles_released_outside: true,
            debug_event_log: false,
            debug_event_log_capacity: 200,
            debug_integrity: cfg!(debug_assertions),
            debug_integrity_panic: false,
        }
    }
}

impl BoardOptions {
    /// Options for an initially empty board (no default tier).
    pub fn empty() -> Self {
        Self {
            default_tier_titles: Vec::new(),
            ..Default::default()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_start_with_one_tier_and_grey_zone_removal() {
        let opt = BoardOptions::default();
        assert_eq!(opt.default_tier_titles, ["default"]);
        assert!(opt.delete_pool_tiles_released_outside);
        assert!(!opt.debug_event_log);
    }

    #[test]
    fn empty_has_no_tiers_but_keeps_other_defaults() {
        let opt = BoardOptions::empty();
        assert!(opt.default_tier_titles.is_empty());
        assert_eq!(opt.debug_event_log_capacity, 200);
    }
}
