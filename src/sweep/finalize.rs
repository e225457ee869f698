// Copyright 2025 Lars Brubaker
// License: MIT
//
// Finalization: close the convex gaps left along the final front, then label every
// triangle inside or outside by flood fill and drop the outside ones.

use std::collections::VecDeque;

use crate::error::Result;
use crate::geom::is_ccw;
use crate::mesh::{Triangle, TriIdx};

use super::Sweep;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum Region {
    Outside,
    Inside,
}

impl Region {
    fn flipped(self) -> Self {
        match self {
            Region::Outside => Region::Inside,
            Region::Inside => Region::Outside,
        }
    }
}

impl Sweep {
    /// Clip every counter-clockwise turn of the final front between the synthetic
    /// endpoints. After a clip the previous triple is checked again.
    pub(super) fn fill_hull(&mut self) -> Result<usize> {
        let mut added = 0;
        let mut k = 1;
        while k + 3 < self.front.len() {
            let f = self.front.as_slice();
            let (a, b, c) = (f[k], f[k + 1], f[k + 2]);
            if is_ccw(self.point(a), self.point(b), self.point(c)) {
                self.mesh.add_triangle(&self.points, a, b, c)?;
                self.front.remove(k + 1);
                added += 1;
                k = k.saturating_sub(1).max(1);
            } else {
                k += 1;
            }
        }
        tracing::debug!(added, front = self.front.len(), "hull filled");
        Ok(added)
    }

    /// Region label per triangle slot, `None` for free slots and for triangles the
    /// flood fill never reached.
    ///
    /// The fill starts outside at the first triangle touching a synthetic point and
    /// flips the label whenever it crosses a constraint edge.
    pub(crate) fn classify(&self) -> Vec<Option<Region>> {
        let mut labels: Vec<Option<Region>> = vec![None; self.mesh.slot_count()];
        let Some((seed, _)) = self
            .mesh
            .iter()
            .find(|(_, t)| t.contains(0) || t.contains(1))
        else {
            return labels;
        };

        labels[seed as usize] = Some(Region::Outside);
        let mut queue: VecDeque<TriIdx> = VecDeque::from([seed]);
        while let Some(slot) = queue.pop_front() {
            let (Some(tri), Some(region)) = (self.mesh.get(slot), labels[slot as usize]) else {
                continue;
            };
            for (a, b) in tri.edges() {
                let Some(c) = self.mesh.apex(b, a) else {
                    continue;
                };
                let Some(next) = self.mesh.locate(Triangle::new(b, a, c)) else {
                    continue;
                };
                if labels[next as usize].is_some() {
                    continue;
                }
                labels[next as usize] = Some(if self.is_constraint(a, b) {
                    region.flipped()
                } else {
                    region
                });
                queue.push_back(next);
            }
        }
        labels
    }

    /// Remove every triangle not labelled inside. Returns how many were removed.
    pub(super) fn discard_exterior(&mut self) -> Result<usize> {
        let labels = self.classify();
        let unreached = self
            .mesh
            .iter()
            .filter(|(slot, _)| labels[*slot as usize].is_none())
            .count();
        if unreached > 0 {
            tracing::warn!(unreached, "triangles unreachable from the exterior, dropping them");
        }

        let outside: Vec<Triangle> = self
            .mesh
            .iter()
            .filter(|(slot, _)| labels[*slot as usize] != Some(Region::Inside))
            .map(|(_, t)| t)
            .collect();
        for t in &outside {
            let [a, b, c] = t.vertices();
            self.mesh.remove_triangle(a, b, c)?;
        }
        tracing::debug!(
            removed = outside.len(),
            kept = self.mesh.len(),
            "discarded exterior"
        );
        Ok(outside.len())
    }
}
