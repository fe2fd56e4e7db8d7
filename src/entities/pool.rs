use std::collections::{HashMap, HashSet};

use log::warn;

use super::enemy::{Enemy, EnemyId, EnemyTier};
use crate::config::{CapPolicy, PoolConfig};
use crate::error::PoolError;

/// Reuse store for enemies, one reserve per tier.
///
/// Enemies move out of the pool on [`EnemyPool::acquire`] and back in on
/// [`EnemyPool::release`]; the pool remembers which ids are checked out so a
/// double release is caught.
#[derive(Debug)]
pub struct EnemyPool {
    config: PoolConfig,
    reserves: HashMap<EnemyTier, Vec<Enemy>>,
    created: HashMap<EnemyTier, usize>,
    outstanding: HashSet<EnemyId>,
    next_id: u32,
}

impl EnemyPool {
    pub fn new(config: PoolConfig) -> Self {
        let mut pool = Self {
            config,
            reserves: HashMap::new(),
            created: HashMap::new(),
            outstanding: HashSet::new(),
            next_id: 0,
        };

        for tier in EnemyTier::ALL {
            let prewarmed: Vec<Enemy> = (0..config.soft_capacity)
                .map(|_| pool.create(tier))
                .collect();
            pool.reserves.insert(tier, prewarmed);
        }

        pool
    }

    fn create(&mut self, tier: EnemyTier) -> Enemy {
        let id = EnemyId(self.next_id);
        self.next_id += 1;
        *self.created.entry(tier).or_insert(0) += 1;
        Enemy::new(id, tier)
    }

    /// Hand out an active enemy of `tier`, creating one if the reserve is dry
    pub fn acquire(&mut self, tier: EnemyTier) -> Result<Enemy, PoolError> {
        let reused = self.reserves.get_mut(&tier).and_then(Vec::pop);
        let mut enemy = match reused {
            Some(enemy) => enemy,
            None => {
                if self.created(tier) >= self.config.hard_max {
                    match self.config.cap_policy {
                        CapPolicy::Fail => {
                            return Err(PoolError::Exhausted {
                                tier,
                                hard_max: self.config.hard_max,
                            });
                        }
                        CapPolicy::Grow => warn!(
                            "{:?} pool past its hard cap of {}, growing",
                            tier, self.config.hard_max
                        ),
                    }
                }
                self.create(tier)
            }
        };

        enemy.activate();
        self.outstanding.insert(enemy.id());
        Ok(enemy)
    }

    /// Take an enemy back. Rejected (and logged) if it is inactive or was not
    /// checked out of this pool.
    pub fn release(&mut self, mut enemy: Enemy) -> Result<(), PoolError> {
        if !enemy.is_active() {
            warn!("release of inactive enemy {:?} ignored", enemy.id());
            return Err(PoolError::AlreadyInactive(enemy.id()));
        }
        if !self.outstanding.remove(&enemy.id()) {
            warn!("release of untracked enemy {:?} ignored", enemy.id());
            return Err(PoolError::Untracked(enemy.id()));
        }

        enemy.deactivate();
        self.reserves.entry(enemy.tier()).or_default().push(enemy);
        Ok(())
    }

    pub fn reserve_len(&self, tier: EnemyTier) -> usize {
        self.reserves.get(&tier).map_or(0, Vec::len)
    }

    /// Total instances ever created for `tier`
    pub fn created(&self, tier: EnemyTier) -> usize {
        self.created.get(&tier).copied().unwrap_or(0)
    }

    /// Enemies currently checked out
    pub fn outstanding(&self) -> usize {
        self.outstanding.len()
    }
}
