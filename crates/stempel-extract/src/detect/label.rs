// SPDX-License-Identifier: PMPL-1.0-or-later
//
// Connected-component labeling over the occupancy grid. 8-connectivity keeps
// diagonal pen strokes in one cluster.

use std::collections::VecDeque;

use crate::detect::grid::OccupancyGrid;

/// Grid-space bounding box of one maximal 8-connected cluster of content
/// cells. Bounds are inclusive.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Cluster {
    pub min_x: u32,
    pub max_x: u32,
    pub min_y: u32,
    pub max_y: u32,
}

/// The eight neighbor offsets: four orthogonal, four diagonal.
const NEIGHBORS: [(i64, i64); 8] = [
    (1, 0),
    (-1, 0),
    (0, 1),
    (0, -1),
    (1, 1),
    (1, -1),
    (-1, 1),
    (-1, -1),
];

/// Partition the content cells of a grid into 8-connected clusters.
///
/// Cells are scanned in row-major order; each unvisited content cell seeds a
/// breadth-first traversal that marks every reachable content cell visited
/// and tracks the cluster's grid-space bounds. Every content cell lands in
/// exactly one cluster. The worklist is allocated once, sized from the grid,
/// so traversal never reallocates.
pub fn find_clusters(grid: &OccupancyGrid) -> Vec<Cluster> {
    let (gw, gh) = (grid.width(), grid.height());
    let mut visited = vec![false; grid.len()];
    let mut queue: VecDeque<(u32, u32)> = VecDeque::with_capacity(grid.len());
    let mut clusters = Vec::new();

    for y in 0..gh {
        for x in 0..gw {
            let idx = (y * gw + x) as usize;
            if !grid.is_content(x, y) || visited[idx] {
                continue;
            }

            visited[idx] = true;
            queue.push_back((x, y));
            let mut cluster = Cluster {
                min_x: x,
                max_x: x,
                min_y: y,
                max_y: y,
            };

            while let Some((cx, cy)) = queue.pop_front() {
                cluster.min_x = cluster.min_x.min(cx);
                cluster.max_x = cluster.max_x.max(cx);
                cluster.min_y = cluster.min_y.min(cy);
                cluster.max_y = cluster.max_y.max(cy);

                for (dx, dy) in NEIGHBORS {
                    let nx = cx as i64 + dx;
                    let ny = cy as i64 + dy;
                    if nx < 0 || ny < 0 || nx >= gw as i64 || ny >= gh as i64 {
                        continue;
                    }
                    let (nx, ny) = (nx as u32, ny as u32);
                    let nidx = (ny * gw + nx) as usize;
                    if grid.is_content(nx, ny) && !visited[nidx] {
                        visited[nidx] = true;
                        queue.push_back((nx, ny));
                    }
                }
            }

            clusters.push(cluster);
        }
    }

    clusters
}
