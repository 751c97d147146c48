//! Seeded k-means with k-means++ initialisation.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct KMeansConfig {
    pub k: usize,
    /// Independent initialisations; the lowest-inertia run wins
    pub n_init: usize,
    pub max_iter: usize,
    /// Stop when no centroid moves further than this (squared)
    pub tolerance: f64,
    pub seed: u64,
}

impl Default for KMeansConfig {
    fn default() -> Self {
        Self {
            k: 2,
            n_init: 10,
            max_iter: 300,
            tolerance: 1e-8,
            seed: 42,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Clustering {
    pub centroids: Vec<Vec<f64>>,
    /// Cluster index per point
    pub labels: Vec<usize>,
    /// Sum of squared distances to the assigned centroid
    pub inertia: f64,
}

impl Clustering {
    pub fn members(&self, cluster: usize) -> impl Iterator<Item = usize> + '_ {
        self.labels
            .iter()
            .enumerate()
            .filter(move |(_, &l)| l == cluster)
            .map(|(i, _)| i)
    }

    pub fn size(&self, cluster: usize) -> usize {
        self.labels.iter().filter(|&&l| l == cluster).count()
    }
}

pub fn squared_distance(a: &[f64], b: &[f64]) -> f64 {
    a.iter().zip(b).map(|(x, y)| (x - y) * (x - y)).sum()
}

pub fn distance(a: &[f64], b: &[f64]) -> f64 {
    squared_distance(a, b).sqrt()
}

/// Cluster `points`. Returns `None` when there are fewer points than
/// clusters or no clusters were requested.
pub fn kmeans(points: &[Vec<f64>], config: &KMeansConfig) -> Option<Clustering> {
    if config.k == 0 || points.len() < config.k {
        return None;
    }

    let mut rng = StdRng::seed_from_u64(config.seed);
    let mut best: Option<Clustering> = None;
    for _ in 0..config.n_init.max(1) {
        let seeds = plus_plus_seeds(points, config.k, &mut rng);
        let run = lloyd(points, seeds, config);
        if best.as_ref().map_or(true, |b| run.inertia < b.inertia) {
            best = Some(run);
        }
    }
    best
}

/// k-means++: each next seed is drawn with probability proportional to its
/// squared distance from the nearest seed so far.
fn plus_plus_seeds(points: &[Vec<f64>], k: usize, rng: &mut StdRng) -> Vec<Vec<f64>> {
    let mut seeds = vec![points[rng.gen_range(0..points.len())].clone()];
    let mut nearest: Vec<f64> = points
        .iter()
        .map(|p| squared_distance(p, &seeds[0]))
        .collect();

    while seeds.len() < k {
        let total: f64 = nearest.iter().sum();
        let chosen = if total > 0.0 {
            let mut target = rng.gen::<f64>() * total;
            let mut pick = points.len() - 1;
            for (i, d) in nearest.iter().enumerate() {
                if target < *d {
                    pick = i;
                    break;
                }
                target -= d;
            }
            pick
        } else {
            rng.gen_range(0..points.len())
        };

        let seed = points[chosen].clone();
        for (n, p) in nearest.iter_mut().zip(points) {
            *n = n.min(squared_distance(p, &seed));
        }
        seeds.push(seed);
    }
    seeds
}

fn nearest_centroid(point: &[f64], centroids: &[Vec<f64>]) -> (usize, f64) {
    centroids
        .iter()
        .enumerate()
        .map(|(i, c)| (i, squared_distance(point, c)))
        .fold((0, f64::INFINITY), |best, cur| if cur.1 < best.1 { cur } else { best })
}

fn lloyd(points: &[Vec<f64>], mut centroids: Vec<Vec<f64>>, config: &KMeansConfig) -> Clustering {
    let dim = points[0].len();
    let mut labels = vec![0usize; points.len()];

    for _ in 0..config.max_iter {
        for (label, point) in labels.iter_mut().zip(points) {
            *label = nearest_centroid(point, &centroids).0;
        }

        let mut sums = vec![vec![0.0; dim]; centroids.len()];
        let mut counts = vec![0usize; centroids.len()];
        for (&label, point) in labels.iter().zip(points) {
            counts[label] += 1;
            for (s, v) in sums[label].iter_mut().zip(point) {
                *s += v;
            }
        }

        let mut shift: f64 = 0.0;
        for (c, (sum, count)) in centroids.iter_mut().zip(sums.into_iter().zip(counts)) {
            // an empty cluster keeps its previous centroid
            if count == 0 {
                continue;
            }
            let updated: Vec<f64> = sum.into_iter().map(|s| s / count as f64).collect();
            shift = shift.max(squared_distance(c, &updated));
            *c = updated;
        }
        if shift <= config.tolerance {
            break;
        }
    }

    let mut inertia = 0.0;
    for (label, point) in labels.iter_mut().zip(points) {
        let (nearest, d) = nearest_centroid(point, &centroids);
        *label = nearest;
        inertia += d;
    }

    Clustering {
        centroids,
        labels,
        inertia,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn blobs() -> Vec<Vec<f64>> {
        vec![
            vec![0.0, 0.0],
            vec![0.1, 0.0],
            vec![0.0, 0.1],
            vec![5.0, 5.0],
            vec![5.1, 5.0],
            vec![5.0, 5.1],
        ]
    }

    #[test]
    fn test_separates_blobs() {
        let result = kmeans(&blobs(), &KMeansConfig::default()).unwrap();
        assert_eq!(result.labels[0], result.labels[1]);
        assert_eq!(result.labels[1], result.labels[2]);
        assert_eq!(result.labels[3], result.labels[4]);
        assert_ne!(result.labels[0], result.labels[3]);
        assert!(result.inertia < 0.1);
        assert_eq!(result.size(0) + result.size(1), 6);
    }

    #[test]
    fn test_deterministic() {
        let config = KMeansConfig {
            k: 3,
            ..Default::default()
        };
        let a = kmeans(&blobs(), &config).unwrap();
        let b = kmeans(&blobs(), &config).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn test_too_few_points() {
        let config = KMeansConfig {
            k: 3,
            ..Default::default()
        };
        assert!(kmeans(&blobs()[..2], &config).is_none());
        assert!(kmeans(&[], &KMeansConfig::default()).is_none());
    }

    #[test]
    fn test_identical_points() {
        let points = vec![vec![1.0, 1.0]; 4];
        let result = kmeans(&points, &KMeansConfig::default()).unwrap();
        assert_eq!(result.inertia, 0.0);
        assert_eq!(result.labels.len(), 4);
    }

    #[test]
    fn test_members() {
        let result = kmeans(&blobs(), &KMeansConfig::default()).unwrap();
        let cluster = result.labels[3];
        assert_eq!(result.members(cluster).collect::<Vec<_>>(), vec![3, 4, 5]);
    }
}
