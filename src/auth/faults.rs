//! Fault injection for the authentication endpoint.

use std::sync::Mutex;

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::config::FaultConfig;

/// Decides whether a login should fail with an internal server error.
pub trait FaultInjector: Send + Sync {
    fn should_fault(&self) -> bool;
}

/// Never injects a fault.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoFaults;

impl FaultInjector for NoFaults {
    fn should_fault(&self) -> bool {
        false
    }
}

/// Fails roughly one in `chance` logins.
///
/// A chance of 0 never faults; a chance of 1 always does.
#[derive(Debug)]
pub struct RandomFaults {
    chance: u32,
    rng: Mutex<StdRng>,
}

impl RandomFaults {
    pub fn new(chance: u32, seed: Option<u64>) -> Self {
        let rng = match seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        Self {
            chance,
            rng: Mutex::new(rng),
        }
    }

    pub fn from_config(config: &FaultConfig) -> Self {
        Self::new(config.random_fault_chance, config.seed)
    }

    pub fn chance(&self) -> u32 {
        self.chance
    }
}

impl FaultInjector for RandomFaults {
    fn should_fault(&self) -> bool {
        match self.chance {
            0 => false,
            1 => true,
            chance => {
                let mut rng = self.rng.lock().unwrap_or_else(|e| e.into_inner());
                rng.gen_range(0..chance) == 0
            }
        }
    }
}
