/*
 * Created on Sat Jan 13 2024
 *
 * This file is a part of Skytable
 * Skytable (formerly known as TerrabaseDB or Skybase) is a free and open-source
 * NoSQL database written by Sayan Nandan ("the Author") with the
 * vision to provide flexibility in data modelling without compromising
 * on performance, queryability or scalability.
 *
 * Copyright (c) 2024, Sayan Nandan <nandansayan@outlook.com>
 *
 * This program is free software: you can redistribute it and/or modify
 * it under the terms of the GNU Affero General Public License as published by
 * the Free Software Foundation, either version 3 of the License, or
 * (at your option) any later version.
 *
 * This program is distributed in the hope that it will be useful,
 * but WITHOUT ANY WARRANTY; without even the implied warranty of
 * MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE. See the
 * GNU Affero General Public License for more details.
 *
 * You should have received a copy of the GNU Affero General Public License
 * along with this program. If not, see <https://www.gnu.org/licenses/>.
 *
*/

use crate::error::{CheckResult, Error};

/// Networks below this size would otherwise produce wildly inflated scores; `total_nodes` is
/// clamped up to this floor before anything else is computed.
pub const MIN_TOTAL_NODES: f64 = 100.0;

/// Floor for `total_nodes * failure_rate`, bounding the magnitude of the returned score when
/// churn is vanishingly small.
pub const MIN_CHURN_PER_ROUND: f64 = 1e-10;

/// Segment health: a real-valued repair priority where lower means more urgent.
///
/// Pieces are lost independently at rate `failure_rate` per iteration. A segment survives so
/// long as fewer than `num_healthy - min_pieces + 1` losses occur; the number of iterations
/// until that many losses happen follows a negative-binomial distribution with
/// success-threshold `r = num_healthy - min_pieces + 1` and per-trial failure probability
/// `p = (total_nodes - num_healthy) / total_nodes`, whose mean is `r * p / (1 - p)`. Dividing
/// that mean by the expected per-iteration churn (`total_nodes * failure_rate`) converts
/// iterations into real time. Segments carrying forcing-repair pieces (out-of-placement) are
/// further penalized so they outrank merely-low-health segments.
///
/// # Errors
/// [`Error::InvalidParameter`] if `failure_rate` is not in `(0, 1)`, `total_nodes < 0`,
/// `min_pieces <= 0`, or `num_healthy < 0`.
pub fn health(
    num_healthy: i64,
    min_pieces: i64,
    total_nodes: i64,
    failure_rate: f64,
    forcing_repair_count: i64,
) -> CheckResult<f64> {
    if !(failure_rate > 0.0 && failure_rate < 1.0) {
        return Err(Error::InvalidParameter("failure_rate"));
    }
    if total_nodes < 0 {
        return Err(Error::InvalidParameter("total_nodes"));
    }
    if min_pieces <= 0 {
        return Err(Error::InvalidParameter("min_pieces"));
    }
    if num_healthy < 0 {
        return Err(Error::InvalidParameter("num_healthy"));
    }

    let total_nodes = (total_nodes as f64).max(MIN_TOTAL_NODES);
    let churn = (total_nodes * failure_rate).max(MIN_CHURN_PER_ROUND);

    if num_healthy < min_pieces {
        // already irrecoverable: maximally urgent.
        return Ok(0.0);
    }

    let p = (total_nodes - num_healthy as f64) / total_nodes;
    if p == 1.0 {
        return Ok(f64::INFINITY);
    }

    let r = (num_healthy - min_pieces + 1) as f64;
    let base = r * p / (1.0 - p) / churn;

    // forcing-repair penalty: strictly decreasing in forcing_repair_count, preserving the
    // ordering properties the checker loop relies on to rank out-of-placement segments above
    // merely low-health ones.
    let penalized = base / (forcing_repair_count as f64 + 1.0);

    Ok(penalized)
}
