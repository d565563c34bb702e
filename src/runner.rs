//! Run orchestrator
//!
//! Drives every adapter for every (prompt, iteration) pair, one call at a
//! time, pausing for a fixed delay after each call. Failed calls are already
//! error records by the time they get here, so the run always completes.

use crate::adapters::{invoke, Adapter};
use crate::logging::{log_debug, log_info};
use crate::record::{MarkerTerm, ResultRecord};
use std::time::Duration;
use tokio::time::sleep;

/// Sequential driver for a fixed list of adapters
pub struct Runner {
    adapters: Vec<Box<dyn Adapter>>,
    marker: MarkerTerm,
    call_delay: Duration,
}

impl Runner {
    /// `adapters` are called in the given order for every prompt
    pub fn new(adapters: Vec<Box<dyn Adapter>>, marker: MarkerTerm, call_delay: Duration) -> Self {
        Self {
            adapters,
            marker,
            call_delay,
        }
    }

    pub fn adapter_count(&self) -> usize {
        self.adapters.len()
    }

    /// Send one prompt to every adapter
    pub async fn run_single(&self, prompt: &str, iteration: u32) -> Vec<ResultRecord> {
        let mut records = Vec::with_capacity(self.adapters.len());

        for adapter in &self.adapters {
            let record = invoke(adapter.as_ref(), prompt, iteration, &self.marker).await;
            records.push(record);

            if !self.call_delay.is_zero() {
                sleep(self.call_delay).await;
            }
        }

        records
    }

    /// Send every prompt `iterations` times to every adapter
    ///
    /// Records come back prompt-major, then iteration, then adapter order.
    pub async fn run_all(&self, prompts: &[String], iterations: u32) -> Vec<ResultRecord> {
        let mut all_results = Vec::new();

        for (index, prompt) in prompts.iter().enumerate() {
            log_info!(
                prompt_index = index + 1,
                prompt_count = prompts.len(),
                "Prompt {}/{}",
                index + 1,
                prompts.len()
            );

            for iteration in 1..=iterations {
                log_info!(iteration, iterations, "Iteration {}/{}", iteration, iterations);
                let results = self.run_single(prompt, iteration).await;
                all_results.extend(results);
            }
        }

        log_debug!(
            record_count = all_results.len(),
            failures = all_results.iter().filter(|r| !r.is_success()).count(),
            "Run finished"
        );

        all_results
    }
}
