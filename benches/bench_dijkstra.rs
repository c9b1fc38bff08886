use std::collections::HashSet;
use std::ops::Index;

#[derive(Eq, PartialEq, Debug, Hash, Copy, Clone, Ord, PartialOrd)]
struct Position {
    row: usize,
    column: usize,
}

struct Field {
    rows: usize,
    columns: usize,
    costs: Box<[u32]>,
}

impl Index<Position> for Field {
    type Output = u32;

    fn index(&self, index: Position) -> &Self::Output {
        &self.costs[self.columns * index.row + index.column]
    }
}

struct Neighbours {
    len: usize,
    items: [Position; 4],
}

// From cell we can move upper, bottom, left and right
fn get_neighbors(pos: Position, field: &Field) -> Neighbours {
    let mut items = [pos; 4];
    let mut length = 0usize;
    if pos.row > 0 {
        items[length].row -= 1;
        length += 1;
    }
    if pos.row + 1 < field.rows {
        items[length].row += 1;
        length += 1;
    }
    if pos.column > 0 {
        items[length].column -= 1;
        length += 1;
    }
    if pos.column + 1 < field.columns {
        items[length].column += 1;
        length += 1;
    }
    Neighbours { len: length, items }
}

mod std_dijkstra {
    use super::*;
    use std::cmp::Reverse;
    use std::collections::{BinaryHeap, HashMap};

    pub(crate) fn shortest_distance(
        start: Position,
        target: Position,
        field: &Field,
    ) -> Option<usize> {
        // Already settled
        let mut closed_set: HashSet<Position> = HashSet::new();
        // Best known distance, used to skip pushing worse duplicates
        let mut best: HashMap<Position, usize> = HashMap::new();
        let mut available: BinaryHeap<Reverse<(usize, Position)>> = BinaryHeap::new();
        available.push(Reverse((0, start)));
        best.insert(start, 0);
        while let Some(Reverse((distance, current))) = available.pop() {
            if current == target {
                return Some(distance);
            }
            // Stale duplicate of already settled position
            if !closed_set.insert(current) {
                continue;
            }
            let neighbours = get_neighbors(current, field);
            for next in neighbours.items[..neighbours.len]
                .iter()
                .copied()
                .filter(|x| !closed_set.contains(x))
            {
                let candidate = distance + field[next] as usize;
                if best.get(&next).map_or(true, |&known| candidate < known) {
                    best.insert(next, candidate);
                    available.push(Reverse((candidate, next)));
                }
            }
        }
        None
    }
}

mod indexed_dijkstra {
    use super::*;
    use indexed_min_heap::IndexedMinHeap;

    pub(crate) fn shortest_distance(
        start: Position,
        target: Position,
        field: &Field,
    ) -> Option<usize> {
        let mut closed_set: HashSet<Position> = HashSet::new();
        let mut available = IndexedMinHeap::<Position, usize>::new();
        available.push(start, 0);
        while let Some((current, distance)) = available.pop_entry() {
            if current == target {
                return Some(distance);
            }
            closed_set.insert(current);
            let neighbours = get_neighbors(current, field);
            for next in neighbours.items[..neighbours.len]
                .iter()
                .copied()
                .filter(|x| !closed_set.contains(x))
            {
                available.push(next, distance + field[next] as usize);
            }
        }
        None
    }
}

use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion};

fn generate_field(size: usize) -> Field {
    const SEED: u64 = 546579634698731;
    use rand::prelude::{Rng, SeedableRng};
    use rand_chacha::ChaCha8Rng;
    let mut rng = ChaCha8Rng::seed_from_u64(SEED);
    let dist = rand::distributions::Uniform::new_inclusive(1u32, 10u32);
    let vec: Vec<u32> = (0..size * size).map(|_| rng.sample(dist)).collect();
    Field {
        columns: size,
        rows: size,
        costs: vec.into(),
    }
}

fn shortest_distance_benchmark(c: &mut Criterion) {
    let field = generate_field(100);
    let start = Position { row: 0, column: 0 };
    for &end in &[1, 25, 49, 99] {
        let stop_at = Position {
            row: end,
            column: end,
        };
        assert_eq!(
            std_dijkstra::shortest_distance(start, stop_at, &field),
            indexed_dijkstra::shortest_distance(start, stop_at, &field),
        );
    }

    let mut group = c.benchmark_group("Dijkstra");
    for &end in &[1, 5, 10, 25, 45, 49, 99] {
        let stop_at = Position {
            row: end,
            column: end,
        };
        group.bench_with_input(
            BenchmarkId::new("STD Dijkstra", end),
            &(start, stop_at, &field),
            |b, &i| b.iter(|| std_dijkstra::shortest_distance(i.0, i.1, i.2)),
        );
        group.bench_with_input(
            BenchmarkId::new("Indexed Dijkstra", end),
            &(start, stop_at, &field),
            |b, &i| b.iter(|| indexed_dijkstra::shortest_distance(i.0, i.1, i.2)),
        );
    }
    group.finish();
}

criterion_group!(benches, shortest_distance_benchmark);
criterion_main!(benches);
