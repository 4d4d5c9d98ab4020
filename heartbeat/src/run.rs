//! Conditions that decide whether the control loop starts another cycle.
//!
//! Production firmware runs [`Forever`]. Tests bound the loop with
//! [`Cycles`] or stop it from outside with [`Cancel`].

use core::sync::atomic::{AtomicBool, Ordering};

/// Asked once before every full HIGH/LOW cycle.
pub trait RunCondition {
    /// Returns `false` to leave the loop.
    fn keep_running(&mut self) -> bool;
}

impl<T: RunCondition + ?Sized> RunCondition for &mut T {
    fn keep_running(&mut self) -> bool {
        T::keep_running(self)
    }
}

/// Never stops. The loop only ends on a fault.
#[derive(Debug, Clone, Copy, Default)]
pub struct Forever;

impl RunCondition for Forever {
    fn keep_running(&mut self) -> bool {
        true
    }
}

/// Runs a fixed number of full cycles.
#[derive(Debug, Clone, Copy)]
pub struct Cycles(pub u32);

impl Cycles {
    /// Cycles left to run
    pub fn remaining(&self) -> u32 {
        self.0
    }
}

impl RunCondition for Cycles {
    fn keep_running(&mut self) -> bool {
        match self.0.checked_sub(1) {
            Some(left) => {
                self.0 = left;
                true
            }
            None => false,
        }
    }
}

/// Stops once the flag is raised.
///
/// Only `load`/`store` are used, which thumbv6m supports without a CAS.
#[derive(Debug, Clone, Copy)]
pub struct Cancel<'a>(pub &'a AtomicBool);

impl Cancel<'_> {
    /// Raises the flag. The loop finishes its current cycle and returns.
    pub fn cancel(&self) {
        self.0.store(true, Ordering::Release);
    }
}

impl RunCondition for Cancel<'_> {
    fn keep_running(&mut self) -> bool {
        !self.0.load(Ordering::Acquire)
    }
}
