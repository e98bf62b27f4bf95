// RELIA - IoT sensor fleet reliability
// Copyright (c) 2025 David Martin Venti
//
// Dual-licensed under AGPL-3.0 and Commercial License.
// See LICENSE file for details.

//! M/M/c maintenance queue
//!
//! Repair requests arrive as a Poisson stream and are served by `c`
//! identical technicians with exponential service times. Queue metrics only
//! exist while the queue is stable (ρ < 1); otherwise the backlog grows
//! without bound and every metric query returns `None`.

use serde::{Deserialize, Serialize};

use crate::error::{ModelError, Result};
use crate::model::positive_rate;

/// Parameters of a maintenance queue
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct QueueConfig {
    /// Repair requests per hour
    pub arrival_rate: f64,
    /// Repairs per hour per technician
    pub service_rate: f64,
    /// Number of technicians
    pub servers: u32,
}

impl Default for QueueConfig {
    fn default() -> Self {
        Self {
            arrival_rate: 0.05,
            service_rate: 0.15,
            servers: 3,
        }
    }
}

impl QueueConfig {
    /// Build the queue model for these parameters
    pub fn model(&self) -> Result<QueueingModel> {
        QueueingModel::new(self.arrival_rate, self.service_rate, self.servers)
    }
}

/// M/M/c queue with utilization ρ = λ / (c·μ)
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct QueueingModel {
    arrival_rate: f64,
    service_rate: f64,
    servers: u32,
    rho: f64,
}

impl QueueingModel {
    /// Create a queue model
    ///
    /// The arrival rate may be zero (idle queue). The service rate must be
    /// positive and there must be at least one server.
    pub fn new(arrival_rate: f64, service_rate: f64, servers: u32) -> Result<Self> {
        if !arrival_rate.is_finite() || arrival_rate < 0.0 {
            return Err(ModelError::negative("arrival rate", arrival_rate).into());
        }
        let service_rate = positive_rate("service rate", service_rate)?;
        if servers == 0 {
            return Err(ModelError::InvalidServerCount(servers).into());
        }

        let rho = arrival_rate / (servers as f64 * service_rate);

        Ok(Self {
            arrival_rate,
            service_rate,
            servers,
            rho,
        })
    }

    pub fn arrival_rate(&self) -> f64 {
        self.arrival_rate
    }

    pub fn service_rate(&self) -> f64 {
        self.service_rate
    }

    pub fn servers(&self) -> u32 {
        self.servers
    }

    /// Utilization ρ
    pub fn utilization(&self) -> f64 {
        self.rho
    }

    /// Offered load a = λ/μ, in busy servers
    pub fn offered_load(&self) -> f64 {
        self.arrival_rate / self.service_rate
    }

    /// True while arrivals stay below total service capacity
    pub fn is_stable(&self) -> bool {
        self.rho < 1.0
    }

    /// Probability that the system is empty
    ///
    /// Terms (λ/μ)^n / n! are built by recurrence. When their sum leaves
    /// the f64 range, P0 is zero to machine precision.
    pub fn p0(&self) -> Option<f64> {
        if !self.is_stable() {
            return None;
        }
        let a = self.offered_load();
        let mut term = 1.0;
        let mut head = 0.0;
        for n in 1..=self.servers {
            head += term;
            term *= a / n as f64;
        }
        let tail = term / (1.0 - self.rho);
        Some(1.0 / (head + tail))
    }

    /// Erlang B blocking probability for c servers
    ///
    /// B(0) = 1, B(n) = a·B(n−1) / (n + a·B(n−1)). Stays within [0, 1] for
    /// any crew size.
    fn erlang_b(&self) -> f64 {
        let a = self.offered_load();
        (1..=self.servers).fold(1.0, |b, n| a * b / (n as f64 + a * b))
    }

    /// Erlang C: probability that an arriving request has to wait
    pub fn probability_of_wait(&self) -> Option<f64> {
        if !self.is_stable() {
            return None;
        }
        let b = self.erlang_b();
        Some(b / (1.0 - self.rho * (1.0 - b)))
    }

    /// Mean number of requests waiting, Lq = C·ρ / (1 − ρ)
    pub fn avg_queue_length(&self) -> Option<f64> {
        let wait = self.probability_of_wait()?;
        Some(wait * self.rho / (1.0 - self.rho))
    }

    /// Mean wait before service starts, Wq = Lq / λ (Little's law)
    ///
    /// An idle queue (λ = 0) never makes anyone wait.
    pub fn avg_wait_time(&self) -> Option<f64> {
        let lq = self.avg_queue_length()?;
        if self.arrival_rate > 0.0 {
            Some(lq / self.arrival_rate)
        } else {
            Some(0.0)
        }
    }

    /// Mean number of requests in the system, L = Lq + λ/μ
    pub fn avg_system_length(&self) -> Option<f64> {
        Some(self.avg_queue_length()? + self.offered_load())
    }

    /// Mean time from arrival to repair completion, W = Wq + 1/μ
    pub fn avg_system_time(&self) -> Option<f64> {
        Some(self.avg_wait_time()? + 1.0 / self.service_rate)
    }

    /// Smallest crew size that keeps the queue stable
    ///
    /// Fails with `ModelError::CrewTooLarge` when no `u32` crew size is
    /// large enough.
    pub fn min_stable_servers(arrival_rate: f64, service_rate: f64) -> Result<u32> {
        let single = Self::new(arrival_rate, service_rate, 1)?;
        let load = single.offered_load();
        // c > λ/μ strictly
        let floor = load.floor();
        if floor >= u32::MAX as f64 {
            return Err(ModelError::CrewTooLarge(load).into());
        }
        Ok(floor as u32 + 1)
    }

    /// Smallest crew, up to `max_servers`, whose mean wait is at most `max_wait`
    ///
    /// Returns `Ok(None)` if even `max_servers` technicians cannot meet the
    /// target.
    pub fn staff_for_wait(
        arrival_rate: f64,
        service_rate: f64,
        max_wait: f64,
        max_servers: u32,
    ) -> Result<Option<Self>> {
        let first = Self::min_stable_servers(arrival_rate, service_rate)?;
        for servers in first..=max_servers {
            let model = Self::new(arrival_rate, service_rate, servers)?;
            if model.avg_wait_time().is_some_and(|wq| wq <= max_wait) {
                log::debug!("{} technicians meet a wait target of {}", servers, max_wait);
                return Ok(Some(model));
            }
        }
        Ok(None)
    }
}
