//! Integration tests exercising the metrics the way an embedding loop does.
//!
//! A tiny landmark embedding: each landmark has a known 2D position, every
//! point is projected onto landmark pairs and the interpolated positions
//! are averaged.

use somdist::{Metric, MetricKind, MetricVisitor, SquaredEuclidean};

struct Landmarks {
    high: Vec<Vec<f32>>,
    low: Vec<[f32; 2]>,
}

fn grid_landmarks() -> Landmarks {
    // 3x3 grid in the first two of 6 dimensions
    let mut high = Vec::new();
    let mut low = Vec::new();
    for y in 0..3 {
        for x in 0..3 {
            let mut v = vec![0.0_f32; 6];
            v[0] = x as f32;
            v[1] = y as f32;
            high.push(v);
            low.push([x as f32 * 10.0, y as f32 * 10.0]);
        }
    }
    Landmarks { high, low }
}

/// Embeds one point using its `k` nearest landmarks.
struct Embed<'a> {
    landmarks: &'a Landmarks,
    point: &'a [f32],
    k: usize,
}

impl MetricVisitor for Embed<'_> {
    type Output = [f32; 2];

    fn visit<M: Metric>(self, metric: M) -> [f32; 2] {
        let mut order: Vec<(usize, f32)> = self
            .landmarks
            .high
            .iter()
            .map(|l| metric.compare(self.point, l))
            .enumerate()
            .collect();
        order.sort_by(|a, b| a.1.total_cmp(&b.1));
        let nearest: Vec<usize> = order.iter().take(self.k).map(|(i, _)| *i).collect();

        let mut sum = [0.0_f32; 2];
        let mut count = 0.0_f32;
        let mut pos = [0.0_f32; 2];
        for (n, &i) in nearest.iter().enumerate() {
            for &j in &nearest[n + 1..] {
                let (hi, hj) = (&self.landmarks.high[i], &self.landmarks.high[j]);
                let proj = metric.project(hi, hj, self.point);
                proj.interpolate(&self.landmarks.low[i], &self.landmarks.low[j], &mut pos)
                    .expect("embedding positions share a dimension");
                sum[0] += pos[0];
                sum[1] += pos[1];
                count += 1.0;
            }
        }
        [sum[0] / count, sum[1] / count]
    }
}

#[test]
fn test_euclidean_embedding_recovers_grid_position() {
    let landmarks = grid_landmarks();
    let point = [1.0_f32, 1.0, 0.3, -0.2, 0.0, 0.1];
    let pos = MetricKind::SquaredEuclidean.dispatch(Embed {
        landmarks: &landmarks,
        point: &point,
        k: 5,
    });
    // centre landmark and its four neighbours; pairwise positions are symmetric about (10, 10)
    assert!((pos[0] - 10.0).abs() < 1e-4, "x = {}", pos[0]);
    assert!((pos[1] - 10.0).abs() < 1e-4, "y = {}", pos[1]);
}

#[test]
fn test_every_metric_embeds_finitely() {
    let landmarks = grid_landmarks();
    let point = [0.4_f32, 1.7, 0.1, 0.2, -0.3, 0.05];
    for kind in MetricKind::ALL {
        let pos = kind.dispatch(Embed {
            landmarks: &landmarks,
            point: &point,
            k: 4,
        });
        assert!(
            pos[0].is_finite() && pos[1].is_finite(),
            "{} produced {:?}",
            kind,
            pos
        );
    }
}

#[test]
fn test_concurrent_callers_share_a_metric() {
    let landmarks = grid_landmarks();
    let points: Vec<Vec<f32>> = (0..64)
        .map(|i| (0..6).map(|d| ((i * 7 + d) as f32 * 0.13).sin() * 2.0).collect())
        .collect();

    let serial: Vec<f32> = points
        .iter()
        .map(|p| SquaredEuclidean.compare(p, &landmarks.high[4]))
        .collect();

    let metric = SquaredEuclidean;
    let parallel: Vec<f32> = std::thread::scope(|s| {
        let handles: Vec<_> = points
            .chunks(16)
            .map(|chunk| {
                let target = &landmarks.high[4];
                s.spawn(move || {
                    chunk
                        .iter()
                        .map(|p| metric.compare(p, target))
                        .collect::<Vec<_>>()
                })
            })
            .collect();
        handles
            .into_iter()
            .flat_map(|h| h.join().expect("worker panicked"))
            .collect()
    });

    assert_eq!(serial, parallel);
}

#[cfg(feature = "serde")]
#[test]
fn test_config_selects_metric() {
    #[derive(serde::Deserialize)]
    struct RunConfig {
        metric: MetricKind,
    }

    let cfg: RunConfig = serde_json::from_str(r#"{ "metric": "manhattan" }"#).unwrap();
    assert_eq!(cfg.metric, MetricKind::Manhattan);
    assert_eq!(cfg.metric.compare(&[0.0, 0.0], &[3.0, 4.0]), 7.0);

    let err = "minkowski".parse::<MetricKind>().unwrap_err();
    assert_eq!(err.to_string(), "unknown metric: \"minkowski\"");
}
