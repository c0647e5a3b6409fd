//! Landmark Interpolation
//!
//! Places a handful of high-dimensional points in 2D by projecting each
//! onto the segment between its two nearest landmarks, for every metric.
//!
//! ```bash
//! cargo run --example landmark_interpolation --release
//! ```

use somdist::{Metric, MetricKind, MetricVisitor};

const LANDMARKS: [[f32; 4]; 3] = [
    [0.0, 0.0, 0.0, 0.0],
    [4.0, 0.0, 1.0, 0.0],
    [0.0, 4.0, 0.0, 1.0],
];
const POSITIONS: [[f32; 2]; 3] = [[0.0, 0.0], [1.0, 0.0], [0.0, 1.0]];

struct Place<'a> {
    point: &'a [f32],
}

impl MetricVisitor for Place<'_> {
    type Output = somdist::Result<[f32; 2]>;

    fn visit<M: Metric>(self, metric: M) -> Self::Output {
        let mut ranked: Vec<(usize, f32)> = Vec::with_capacity(LANDMARKS.len());
        for (i, l) in LANDMARKS.iter().enumerate() {
            ranked.push((i, metric.back(metric.try_compare(self.point, l)?)));
        }
        ranked.sort_by(|a, b| a.1.total_cmp(&b.1));
        let (i, j) = (ranked[0].0, ranked[1].0);

        let proj = metric.try_project(&LANDMARKS[i], &LANDMARKS[j], self.point)?;
        let mut pos = [0.0_f32; 2];
        proj.interpolate(&POSITIONS[i], &POSITIONS[j], &mut pos)?;
        Ok(pos)
    }
}

fn main() -> somdist::Result<()> {
    let points: [[f32; 4]; 3] = [
        [1.0, 0.2, 0.3, 0.0],
        [3.5, 0.5, 0.8, 0.1],
        [0.4, 2.0, 0.0, 0.6],
    ];

    println!("backend: {}", somdist::kernels::backend());
    for kind in MetricKind::ALL {
        println!("\n{kind} (approximate projection: {})", kind.is_projection_approximate());
        for point in &points {
            let pos = kind.dispatch(Place { point })?;
            println!("  {point:?} -> ({:.3}, {:.3})", pos[0], pos[1]);
        }
    }
    Ok(())
}
