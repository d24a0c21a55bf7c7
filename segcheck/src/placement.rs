/*
 * Created on Thu Jan 11 2024
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

use crate::{intset::IntSet, node::NodeView};

/// A compiled placement policy handed to the classifier by the placement subsystem. This
/// crate never parses placement rules; it only consumes the two capabilities below, which
/// the caller is expected to have already compiled from whatever rule language it uses.
pub trait PlacementContract {
    /// Whether `node` satisfies this segment's placement rule. A `None` match predicate
    /// (callers that don't supply one) should be modeled as a contract whose `matches`
    /// always returns `true`, so that `out_of_placement` naturally comes out empty.
    fn matches(&self, node: &NodeView) -> bool;

    /// The clumping rule, if this contract has one. Returning `None` disables clumping for
    /// this call even if the caller requested it via `do_declumping`.
    fn invariant(&self, pieces: &[(u16, crate::node::NodeId)], nodes: &[NodeView]) -> Option<IntSet>;
}

/// A contract with no match predicate and no clumping invariant: `out_of_placement` and
/// `clumped` both come out empty regardless of flags. Useful as a default for callers (and
/// tests) that don't care about placement.
pub struct NoPlacement;

impl PlacementContract for NoPlacement {
    fn matches(&self, _node: &NodeView) -> bool {
        true
    }

    fn invariant(&self, _pieces: &[(u16, crate::node::NodeId)], _nodes: &[NodeView]) -> Option<IntSet> {
        None
    }
}

/// The default clumping invariant: group pieces by `last_net` (their coarse network
/// neighborhood). For pieces sharing a non-empty `last_net`, the first one encountered is
/// kept and every subsequent one in the same group is marked clumped.
///
/// Online pieces are visited before offline ones, and within each of those two passes the
/// input order is preserved. This ordering is deliberate: if a clump must lose members, we
/// prefer the unhealthy (offline) ones to be the ones discarded rather than healthy online
/// capacity. Pieces with an empty `last_net` are never clumped: an empty key means
/// "unknown network", and grouping unknowns together would manufacture false clumps.
pub struct DefaultSubnetInvariant;

impl DefaultSubnetInvariant {
    fn invariant_impl(
        &self,
        pieces: &[(u16, crate::node::NodeId)],
        nodes: &[NodeView],
    ) -> IntSet {
        let capacity = pieces.iter().map(|(n, _)| *n as usize + 1).max().unwrap_or(0);
        let mut clumped = IntSet::new(capacity);
        let mut seen_nets: std::collections::HashSet<&str> = std::collections::HashSet::new();

        for online_pass in [true, false] {
            for (piece, node) in pieces.iter().zip(nodes.iter()) {
                if node.online != online_pass {
                    continue;
                }
                if node.last_net.is_empty() {
                    continue;
                }
                if !seen_nets.insert(node.last_net.as_str()) {
                    // already seen in this (or the prior) pass: clumped
                    let _ = clumped.try_insert(piece.0 as usize);
                }
            }
        }
        clumped
    }
}

impl PlacementContract for DefaultSubnetInvariant {
    fn matches(&self, _node: &NodeView) -> bool {
        true
    }

    fn invariant(&self, pieces: &[(u16, crate::node::NodeId)], nodes: &[NodeView]) -> Option<IntSet> {
        Some(self.invariant_impl(pieces, nodes))
    }
}
