use std::fmt;

use crate::item::{Item, Rarity};

/// Per-rarity item counts. All three tiers are always present.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct RarityBreakdown {
    common: u64,
    rare: u64,
    legendary: u64,
}

impl RarityBreakdown {
    pub fn get(&self, rarity: Rarity) -> u64 {
        match rarity {
            Rarity::Common => self.common,
            Rarity::Rare => self.rare,
            Rarity::Legendary => self.legendary,
        }
    }

    pub fn total(&self) -> u64 {
        Rarity::ALL.iter().map(|r| self.get(*r)).sum()
    }

    fn increment(&mut self, rarity: Rarity) {
        match rarity {
            Rarity::Common => self.common += 1,
            Rarity::Rare => self.rare += 1,
            Rarity::Legendary => self.legendary += 1,
        }
    }
}

impl fmt::Display for RarityBreakdown {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{{\"Common\":{},\"Rare\":{},\"Legendary\":{}}}",
            self.common, self.rare, self.legendary
        )
    }
}

/// Running totals of one session. Only the owning session mutates them.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct SessionStats {
    spin_count: u32,
    successful_spins: u32,
    total_items_received: u64,
    rarity_count: RarityBreakdown,
    total_spent: f64,
    total_earned: f64,
}

impl SessionStats {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn spin_count(&self) -> u32 {
        self.spin_count
    }

    pub fn successful_spins(&self) -> u32 {
        self.successful_spins
    }

    pub fn failed_spins(&self) -> u32 {
        self.spin_count - self.successful_spins
    }

    pub fn total_items_received(&self) -> u64 {
        self.total_items_received
    }

    pub fn rarity_count(&self) -> RarityBreakdown {
        self.rarity_count
    }

    pub fn total_spent(&self) -> f64 {
        self.total_spent
    }

    pub fn total_earned(&self) -> f64 {
        self.total_earned
    }

    pub(crate) fn begin_attempt(&mut self) -> u32 {
        self.spin_count += 1;
        self.spin_count
    }

    /// Every received item costs one spin `price`.
    pub(crate) fn record_success(&mut self, items: &[Item], price: u32) {
        debug_assert!(self.successful_spins < self.spin_count);
        self.successful_spins += 1;
        for item in items {
            self.total_items_received += 1;
            self.rarity_count.increment(item.rarity);
            self.total_spent += f64::from(price);
            self.total_earned += item.quick_sell_price;
        }
    }

    pub fn report(&self, wallet: &str) -> SessionReport {
        SessionReport {
            wallet: wallet.to_string(),
            spin_count: self.spin_count,
            successful_spins: self.successful_spins,
            failed_spins: self.failed_spins(),
            total_items: self.total_items_received,
            rarity: self.rarity_count,
            total_spent: self.total_spent,
            total_earned: self.total_earned,
            profit: self.total_earned - self.total_spent,
        }
    }
}

/// Immutable summary produced once a session stops.
#[derive(Debug, Clone, PartialEq)]
pub struct SessionReport {
    pub wallet: String,
    pub spin_count: u32,
    pub successful_spins: u32,
    pub failed_spins: u32,
    pub total_items: u64,
    pub rarity: RarityBreakdown,
    pub total_spent: f64,
    pub total_earned: f64,
    pub profit: f64,
}

impl fmt::Display for SessionReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "===== Wallet Report for {} =====", self.wallet)?;
        writeln!(f, "Total spin attempts: {}", self.spin_count)?;
        writeln!(f, "Successful spins: {}", self.successful_spins)?;
        writeln!(f, "Failed spins: {}", self.failed_spins)?;
        writeln!(f, "Total items received: {}", self.total_items)?;
        writeln!(f, "Rarity breakdown: {}", self.rarity)?;
        writeln!(f, "Total spent: {}", self.total_spent)?;
        writeln!(f, "Total earned (from auto-sell): {}", self.total_earned)?;
        write!(f, "Profit/Loss: {}", self.profit)
    }
}
