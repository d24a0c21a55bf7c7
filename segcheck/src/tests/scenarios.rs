/*
 * Created on Sun Jan 14 2024
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

//! The six literal end-to-end scenarios from the segment-health classification spec (S1-S6).

use std::collections::HashSet;

use crate::{
    classify::classify,
    health::health,
    intset::IntSet,
    node::{CountryCode, NodeId, NodeView, Piece},
    placement::{DefaultSubnetInvariant, PlacementContract},
};

fn node(id: u8, online: bool, country: &str) -> NodeView {
    NodeView {
        id: NodeId::from_bytes([id; 16]),
        online,
        suspended: false,
        exiting: false,
        country: CountryCode::try_from(country).unwrap(),
        last_net: String::new(),
    }
}

struct OnlyMatches(CountryCode);

impl PlacementContract for OnlyMatches {
    fn matches(&self, node: &NodeView) -> bool {
        node.country == self.0
    }
    fn invariant(&self, _: &[(u16, NodeId)], _: &[NodeView]) -> Option<IntSet> {
        None
    }
}

struct NeverClumps;

impl PlacementContract for NeverClumps {
    fn matches(&self, _node: &NodeView) -> bool {
        true
    }
    fn invariant(&self, _: &[(u16, NodeId)], _: &[NodeView]) -> Option<IntSet> {
        None
    }
}

/// S1: all online, placement on but always matching, declumping off.
#[test]
fn s1_all_online() {
    let pieces: Vec<Piece> = (0..5).map(|n| Piece::new(n, NodeId::from_bytes([(n + 1) as u8; 16]))).collect();
    let nodes: Vec<NodeView> = (0..5).map(|i| node((i + 1) as u8, true, "US")).collect();
    let r = classify(&pieces, &nodes, &HashSet::new(), true, false, &NeverClumps).unwrap();
    assert_eq!(r.missing.count(), 0);
    assert_eq!(r.clumped.count(), 0);
    assert_eq!(r.out_of_placement.count(), 0);
    assert_eq!(r.unhealthy_retrievable.count(), 0);
    assert_eq!(r.healthy.count(), 5);
}

/// S2: out of placement, all nodes online, no missing pieces.
#[test]
fn s2_out_of_placement() {
    let present = [1u16, 2, 3, 4, 7, 8];
    let pieces: Vec<Piece> = present
        .iter()
        .map(|&n| Piece::new(n, NodeId::from_bytes([(n + 1) as u8; 16])))
        .collect();
    let nodes: Vec<NodeView> = present
        .iter()
        .map(|&n| {
            let country = if n < 4 { "DE" } else { "GB" };
            node((n + 1) as u8, true, country)
        })
        .collect();
    let gb = CountryCode::try_from("GB").unwrap();
    let r = classify(&pieces, &nodes, &HashSet::new(), true, false, &OnlyMatches(gb)).unwrap();
    assert_eq!(r.missing.count(), 0);
    assert_eq!(r.clumped.count(), 0);
    assert_eq!(r.out_of_placement.count(), 3);
    for p in [1u16, 2, 3] {
        assert!(r.out_of_placement.contains(p as usize));
    }
    assert_eq!(r.unhealthy_retrievable.count(), 3);
    assert_eq!(r.healthy.count(), 3);
}

/// S3: out of placement AND offline, first 5 of 10 nodes online, all country DE.
#[test]
fn s3_out_of_placement_and_offline() {
    let pieces: Vec<Piece> = (0..10u16).map(|n| Piece::new(n, NodeId::from_bytes([(n + 1) as u8; 16]))).collect();
    let nodes: Vec<NodeView> = (0..10)
        .map(|i| node((i + 1) as u8, i < 5, "DE"))
        .collect();
    let gb = CountryCode::try_from("GB").unwrap();
    let r = classify(&pieces, &nodes, &HashSet::new(), true, false, &OnlyMatches(gb)).unwrap();
    assert_eq!(r.missing.count(), 5);
    assert_eq!(r.clumped.count(), 0);
    assert_eq!(r.out_of_placement.count(), 10);
    assert_eq!(r.unhealthy_retrievable.count(), 5);
    assert_eq!(r.healthy.count(), 0);
}

fn subnet_for(i: u16) -> String {
    format!("127.0.{}.0", i / 2)
}

/// S4: declumping by subnet, first 5 of 10 nodes online.
#[test]
fn s4_declumping_by_subnet() {
    let pieces: Vec<Piece> = (0..7u16).map(|n| Piece::new(n, NodeId::from_bytes([(n + 1) as u8; 16]))).collect();
    let nodes: Vec<NodeView> = (0..7)
        .map(|i| {
            let mut v = node((i + 1) as u8, i < 5, "US");
            v.last_net = subnet_for(i);
            v
        })
        .collect();
    let r = classify(&pieces, &nodes, &HashSet::new(), true, true, &DefaultSubnetInvariant).unwrap();
    assert_eq!(r.missing.count(), 2);
    assert_eq!(r.clumped.count(), 3);
    for p in [1u16, 3, 5] {
        assert!(r.clumped.contains(p as usize));
    }
    assert_eq!(r.out_of_placement.count(), 0);
    assert_eq!(r.unhealthy_retrievable.count(), 2);
    assert_eq!(r.healthy.count(), 3);
}

/// S5: same topology as S4, but the placement invariant opts out of clumping entirely.
#[test]
fn s5_declumping_disabled_via_placement_annotation() {
    let pieces: Vec<Piece> = (0..7u16).map(|n| Piece::new(n, NodeId::from_bytes([(n + 1) as u8; 16]))).collect();
    let nodes: Vec<NodeView> = (0..7)
        .map(|i| {
            let mut v = node((i + 1) as u8, i < 5, "US");
            v.last_net = subnet_for(i);
            v
        })
        .collect();
    let r = classify(&pieces, &nodes, &HashSet::new(), true, true, &NeverClumps).unwrap();
    assert_eq!(r.missing.count(), 2);
    assert_eq!(r.clumped.count(), 0);
    assert_eq!(r.out_of_placement.count(), 0);
    assert_eq!(r.unhealthy_retrievable.count(), 0);
    assert_eq!(r.healthy.count(), 5);
}

/// S6: health ordering under a fixed failure rate and network size.
#[test]
fn s6_health_ordering() {
    const N: i64 = 10_000;
    const F: f64 = 0.01;
    assert!(health(11, 10, N, F, 0).unwrap() < health(10, 5, N, F, 0).unwrap());
    assert!(health(11, 10, N, F, 0).unwrap() < health(10, 9, N, F, 0).unwrap());
    assert!(health(10, 10, N, F, 0).unwrap() < health(9, 9, N, F, 0).unwrap());
    assert!(health(11, 10, N, F, 0).unwrap() > health(12, 11, N, F, 0).unwrap());
    assert_eq!(health(9, 10, N, F, 0).unwrap(), 0.0);
    assert!(
        health(45, 29, 100_000, 0.00005435, 1).unwrap()
            < health(45, 29, 100_000, 0.00005435, 0).unwrap()
    );
}
