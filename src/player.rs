/// The single progression entity: cumulative experience and coins. The level
/// is always derived from `total_exp`, never stored.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Player {
    pub total_exp: i64,
    pub total_coins: i64,
}

impl Player {
    pub fn new(total_exp: i64, total_coins: i64) -> Self {
        Self {
            total_exp,
            total_coins,
        }
    }

    /// Credit the rewards of a completed quest.
    pub fn grant(&mut self, exp: i64, coins: i64) {
        self.total_exp += exp;
        self.total_coins += coins;
    }

    pub fn level(&self) -> i64 {
        level_for_exp(self.total_exp)
    }
}

/// Level thresholds grow geometrically: the increment starts at 100.0 and is
/// multiplied by 1.2 each step, truncated to an integer *before* being added
/// to the accumulator. The truncation order is part of the contract; changing
/// it shifts every boundary above the first.
pub fn level_for_exp(total_exp: i64) -> i64 {
    // i128 accumulation: the threshold may outgrow i64 before the loop exits
    // for inputs near i64::MAX.
    let total = total_exp as i128;
    let mut exp_needed: i128 = 0;
    let mut level: i64 = 0;
    let mut base = 100.0_f64;

    while total >= exp_needed {
        level += 1;
        exp_needed += base as i128;
        base *= 1.2;
    }
    level - 1
}
