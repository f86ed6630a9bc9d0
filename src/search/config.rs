//! Search and strategy tuning parameters.

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// Depth policy for the heuristic alpha-beta strategy.
///
/// Depth counts plies including the strategy's own move.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AlphaBetaConfig {
    /// Base depth, scaled by board size: ×2 up to 4×4, ×3 up to 6×6.
    pub base_depth: u32,

    /// Depth used on boards larger than 6×6.
    pub large_board_depth: u32,

    /// Upper bound on any computed depth.
    pub depth_cap: u32,
}

impl Default for AlphaBetaConfig {
    fn default() -> Self {
        Self {
            base_depth: 4,
            large_board_depth: 7,
            depth_cap: 12,
        }
    }
}

impl AlphaBetaConfig {
    /// Search depth for an R×C board, going by the longer side.
    #[must_use]
    pub fn depth_for(&self, rows: usize, cols: usize) -> u32 {
        let depth = match rows.max(cols) {
            0..=4 => self.base_depth * 2,
            5..=6 => self.base_depth * 3,
            _ => self.large_board_depth,
        };
        depth.min(self.depth_cap)
    }

    pub fn with_base_depth(mut self, depth: u32) -> Self {
        self.base_depth = depth;
        self
    }

    pub fn with_large_board_depth(mut self, depth: u32) -> Self {
        self.large_board_depth = depth;
        self
    }

    pub fn with_depth_cap(mut self, cap: u32) -> Self {
        self.depth_cap = cap;
        self
    }

    /// Every depth must be at least one ply.
    pub fn validate(&self) -> Result<()> {
        if self.base_depth == 0 || self.large_board_depth == 0 || self.depth_cap == 0 {
            return Err(Error::invalid_config("search depths must be at least 1"));
        }
        Ok(())
    }
}

/// Exploration for the learned greedy strategy.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GreedyConfig {
    /// Upper bound of the random bonus added to each candidate's score
    /// (0 = purely greedy). Decays by 0.95 per mark on the board.
    pub balancer: f64,
}

impl Default for GreedyConfig {
    fn default() -> Self {
        Self { balancer: 0.25 }
    }
}

impl GreedyConfig {
    pub fn with_balancer(mut self, balancer: f64) -> Self {
        self.balancer = balancer;
        self
    }

    /// Bonus bound with `open` empty cells left on a 9-cell board.
    #[must_use]
    pub fn bound(&self, open: usize) -> f64 {
        let filled = 9_i32.saturating_sub(open as i32);
        self.balancer * 0.95_f64.powi(filled)
    }

    pub fn validate(&self) -> Result<()> {
        if !self.balancer.is_finite() || self.balancer < 0.0 {
            return Err(Error::invalid_config("balancer must be a non-negative number"));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_depths() {
        let config = AlphaBetaConfig::default();
        assert_eq!(config.depth_for(4, 4), 8);
        assert_eq!(config.depth_for(6, 6), 12);
        assert_eq!(config.depth_for(4, 6), 12);
        assert_eq!(config.depth_for(8, 8), 7);
        assert_eq!(config.depth_for(26, 26), 7);
    }

    #[test]
    fn test_depth_cap() {
        let config = AlphaBetaConfig::default().with_base_depth(5).with_depth_cap(9);
        assert_eq!(config.depth_for(4, 4), 9);
        assert_eq!(config.depth_for(8, 8), 7);
    }

    #[test]
    fn test_validate() {
        assert!(AlphaBetaConfig::default().validate().is_ok());
        assert!(AlphaBetaConfig::default().with_depth_cap(0).validate().is_err());
        assert!(GreedyConfig::default().with_balancer(-1.0).validate().is_err());
        assert!(GreedyConfig::default().with_balancer(f64::NAN).validate().is_err());
    }

    #[test]
    fn test_greedy_bound_decays() {
        let config = GreedyConfig::default().with_balancer(1.0);
        assert!((config.bound(9) - 1.0).abs() < 1e-12);
        assert!((config.bound(8) - 0.95).abs() < 1e-12);
        assert!(config.bound(0) < config.bound(1));
    }

    #[test]
    fn test_serialization() {
        let config = AlphaBetaConfig::default().with_large_board_depth(5);
        let json = serde_json::to_string(&config).unwrap();
        let back: AlphaBetaConfig = serde_json::from_str(&json).unwrap();
        assert_eq!(config, back);

        // Missing fields fall back to defaults.
        let partial: GreedyConfig = serde_json::from_str("{}").unwrap();
        assert_eq!(partial, GreedyConfig::default());
    }
}
