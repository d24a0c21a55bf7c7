/*
 * Created on Fri Jan 12 2024
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

use std::{collections::HashSet, fmt};

use crate::{
    error::{CheckResult, Error},
    intset::IntSet,
    node::{CountryCode, NodeView, Piece},
    placement::PlacementContract,
};

/// The full output of [`classify`]: eight primary sets plus four derived sets, all bitsets
/// over the same capacity (`max(piece.number) + 1`). Nothing here is persisted; a result is
/// built, consumed by [`crate::health::health`] and/or logging, and discarded.
#[derive(Debug, Clone)]
pub struct ClassificationResult {
    pub missing: IntSet,
    pub retrievable: IntSet,
    pub suspended: IntSet,
    pub clumped: IntSet,
    pub exiting: IntSet,
    pub out_of_placement: IntSet,
    pub in_excluded_country: IntSet,
    pub forcing_repair: IntSet,
    pub unhealthy: IntSet,
    pub unhealthy_retrievable: IntSet,
    pub healthy: IntSet,
}

impl ClassificationResult {
    /// Project this result into the stable observability contract: one count per key. This
    /// is the only thing about a `ClassificationResult` that is meant to outlive the call,
    /// as a log line, not as stored state.
    pub fn log_fields(&self) -> LogFields {
        LogFields {
            missing: self.missing.count(),
            retrievable: self.retrievable.count(),
            suspended: self.suspended.count(),
            clumped: self.clumped.count(),
            exiting: self.exiting.count(),
            out_of_placement: self.out_of_placement.count(),
            in_excluded_country: self.in_excluded_country.count(),
            forcing_repair: self.forcing_repair.count(),
            unhealthy: self.unhealthy.count(),
            unhealthy_retrievable: self.unhealthy_retrievable.count(),
            healthy: self.healthy.count(),
        }
    }
}

/// Integer-counts-only projection of a [`ClassificationResult`], suitable for a single
/// structured log line (`log::info!("{}", result.log_fields())`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct LogFields {
    pub missing: usize,
    pub retrievable: usize,
    pub suspended: usize,
    pub clumped: usize,
    pub exiting: usize,
    pub out_of_placement: usize,
    pub in_excluded_country: usize,
    pub forcing_repair: usize,
    pub unhealthy: usize,
    pub unhealthy_retrievable: usize,
    pub healthy: usize,
}

impl fmt::Display for LogFields {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Missing={} Retrievable={} Suspended={} Clumped={} Exiting={} \
             OutOfPlacement={} InExcludedCountry={} ForcingRepair={} \
             Unhealthy={} UnhealthyRetrievable={} Healthy={}",
            self.missing,
            self.retrievable,
            self.suspended,
            self.clumped,
            self.exiting,
            self.out_of_placement,
            self.in_excluded_country,
            self.forcing_repair,
            self.unhealthy,
            self.unhealthy_retrievable,
            self.healthy,
        )
    }
}

/// Classify a segment's pieces against the current state of the nodes holding them.
///
/// `pieces[i]` and `nodes[i]` describe the same piece: `nodes[i]` is the snapshot of the
/// node holding `pieces[i]`. This is checked at entry (see the error variants below) and is
/// not re-validated per pass.
///
/// # Errors
/// - [`Error::LengthMismatch`] if `pieces.len() != nodes.len()`.
/// - [`Error::OrderMismatch`] if some `nodes[i].id` is non-nil and differs from
///   `pieces[i].node_id`.
pub fn classify(
    pieces: &[Piece],
    nodes: &[NodeView],
    excluded_countries: &HashSet<CountryCode>,
    do_placement_check: bool,
    do_declumping: bool,
    placement: &dyn PlacementContract,
) -> CheckResult<ClassificationResult> {
    if pieces.len() != nodes.len() {
        log::error!(
            "segment classification precondition violated: {} pieces but {} node views",
            pieces.len(),
            nodes.len()
        );
        return Err(Error::LengthMismatch {
            pieces: pieces.len(),
            nodes: nodes.len(),
        });
    }
    for (i, (piece, node)) in pieces.iter().zip(nodes.iter()).enumerate() {
        if !node.id.is_nil() && node.id != piece.node_id {
            log::error!("segment classification precondition violated: node/piece order mismatch at index {i}");
            return Err(Error::OrderMismatch { index: i });
        }
    }

    let capacity = pieces.iter().map(|p| p.number as usize + 1).max().unwrap_or(0);

    let mut missing = IntSet::new(capacity);
    let mut retrievable = IntSet::new(capacity);
    let mut suspended = IntSet::new(capacity);
    let mut exiting = IntSet::new(capacity);
    let mut in_excluded_country = IntSet::new(capacity);
    let mut out_of_placement = IntSet::new(capacity);

    // primary pass: one walk over every piece present in the segment.
    for (piece, node) in pieces.iter().zip(nodes.iter()) {
        let p = piece.number as usize;
        if node.is_disqualified() {
            missing.insert(p);
        } else {
            retrievable.insert(p);
        }
        if node.suspended {
            suspended.insert(p);
        }
        if node.exiting {
            exiting.insert(p);
        }
        if excluded_countries.contains(&node.country) {
            in_excluded_country.insert(p);
        }
    }
    log::trace!("classify: primary pass complete, capacity={capacity}");

    // clumping pass: delegated entirely to the placement contract's invariant.
    let clumped = if do_declumping {
        let raw: Vec<(u16, crate::node::NodeId)> =
            pieces.iter().map(|p| (p.number, p.node_id)).collect();
        match placement.invariant(&raw, nodes) {
            Some(set) => set,
            None => IntSet::new(capacity),
        }
    } else {
        IntSet::new(capacity)
    };
    log::trace!("classify: clumping pass complete, clumped={}", clumped.count());

    // placement pass: only nodes the overlay actually resolved are checked.
    if do_placement_check {
        for (piece, node) in pieces.iter().zip(nodes.iter()) {
            if node.id.is_nil() {
                continue;
            }
            if !placement.matches(node) {
                out_of_placement.insert(piece.number as usize);
            }
        }
    }
    log::trace!(
        "classify: placement pass complete, out_of_placement={}",
        out_of_placement.count()
    );

    // derivations
    let forcing_repair = out_of_placement.clone();

    let mut unhealthy = IntSet::new(capacity);
    unhealthy.union_with(&missing);
    unhealthy.union_with(&suspended);
    unhealthy.union_with(&clumped);
    unhealthy.union_with(&exiting);
    unhealthy.union_with(&out_of_placement);
    unhealthy.union_with(&in_excluded_country);

    let unhealthy_retrievable = unhealthy.intersection(&retrievable);

    let mut healthy = IntSet::new(capacity);
    for piece in pieces {
        let p = piece.number as usize;
        if !unhealthy.contains(p) {
            healthy.insert(p);
        }
    }

    Ok(ClassificationResult {
        missing,
        retrievable,
        suspended,
        clumped,
        exiting,
        out_of_placement,
        in_excluded_country,
        forcing_repair,
        unhealthy,
        unhealthy_retrievable,
        healthy,
    })
}
