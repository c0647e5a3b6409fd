//! Runtime selection of a metric.
//!
//! [`MetricKind`] is what a configuration file or command line names. It is
//! resolved once per embedding run, either by calling its `match`-dispatched
//! methods directly or, for hot loops, by handing the concrete metric to a
//! [`MetricVisitor`] so the loop is monomorphized.

use std::fmt;
use std::str::FromStr;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::error::{MetricError, Result};
use crate::metric::{Metric, MetricVisitor, Projection};
use crate::{Chebyshev, Cosine, Manhattan, SquaredEuclidean};

/// The closed set of supported metrics.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(try_from = "String", into = "String"))]
pub enum MetricKind {
    /// [`SquaredEuclidean`].
    #[default]
    SquaredEuclidean,
    /// [`Manhattan`].
    Manhattan,
    /// [`Chebyshev`].
    Chebyshev,
    /// [`Cosine`].
    Cosine,
}

/// Runs `$body` with `$m` bound to the concrete metric for `$kind`.
macro_rules! with_metric {
    ($kind:expr, $m:ident => $body:expr) => {
        match $kind {
            MetricKind::SquaredEuclidean => {
                let $m = SquaredEuclidean;
                $body
            }
            MetricKind::Manhattan => {
                let $m = Manhattan;
                $body
            }
            MetricKind::Chebyshev => {
                let $m = Chebyshev;
                $body
            }
            MetricKind::Cosine => {
                let $m = Cosine;
                $body
            }
        }
    };
}

impl MetricKind {
    /// Every supported metric, in declaration order.
    pub const ALL: [MetricKind; 4] = [
        MetricKind::SquaredEuclidean,
        MetricKind::Manhattan,
        MetricKind::Chebyshev,
        MetricKind::Cosine,
    ];

    /// Canonical name, as accepted by [`FromStr`] and serde.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::SquaredEuclidean => "squared_euclidean",
            Self::Manhattan => "manhattan",
            Self::Chebyshev => "chebyshev",
            Self::Cosine => "cosine",
        }
    }

    /// Whether `project` is an approximation rather than an exact projection.
    #[must_use]
    pub const fn is_projection_approximate(&self) -> bool {
        !matches!(self, Self::SquaredEuclidean)
    }

    /// Hands the concrete metric to `visitor`.
    ///
    /// # Example
    ///
    /// ```rust
    /// use somdist::{Metric, MetricKind, MetricVisitor};
    ///
    /// struct Nearest<'a> {
    ///     query: &'a [f32],
    ///     landmarks: &'a [Vec<f32>],
    /// }
    ///
    /// impl MetricVisitor for Nearest<'_> {
    ///     type Output = Option<usize>;
    ///
    ///     fn visit<M: Metric>(self, metric: M) -> Option<usize> {
    ///         self.landmarks
    ///             .iter()
    ///             .map(|l| metric.compare(self.query, l))
    ///             .enumerate()
    ///             .min_by(|a, b| a.1.total_cmp(&b.1))
    ///             .map(|(i, _)| i)
    ///     }
    /// }
    ///
    /// let landmarks = vec![vec![0.0, 0.0], vec![5.0, 5.0]];
    /// let kind: MetricKind = "manhattan".parse().unwrap();
    /// let nearest = kind.dispatch(Nearest { query: &[4.0, 4.0], landmarks: &landmarks });
    /// assert_eq!(nearest, Some(1));
    /// ```
    pub fn dispatch<V: MetricVisitor>(self, visitor: V) -> V::Output {
        tracing::debug!(
            metric = %self,
            backend = crate::kernels::backend(),
            "dispatching distance metric"
        );
        with_metric!(self, m => visitor.visit(m))
    }

    /// [`Metric::back`] for the selected metric.
    #[inline]
    #[must_use]
    pub fn back(&self, x: f32) -> f32 {
        with_metric!(self, m => m.back(x))
    }

    /// [`Metric::compare`] for the selected metric.
    ///
    /// # Panics
    ///
    /// Panics if either point is empty or their dimensions differ.
    #[inline]
    #[must_use]
    pub fn compare(&self, a: &[f32], b: &[f32]) -> f32 {
        with_metric!(self, m => m.compare(a, b))
    }

    /// [`Metric::try_compare`] for the selected metric.
    #[inline]
    pub fn try_compare(&self, a: &[f32], b: &[f32]) -> Result<f32> {
        with_metric!(self, m => m.try_compare(a, b))
    }

    /// [`Metric::project`] for the selected metric.
    ///
    /// # Panics
    ///
    /// Panics if any buffer is empty or their dimensions differ.
    #[inline]
    #[must_use]
    pub fn project(&self, la: &[f32], lb: &[f32], p: &[f32]) -> Projection {
        with_metric!(self, m => m.project(la, lb, p))
    }

    /// [`Metric::try_project`] for the selected metric.
    #[inline]
    pub fn try_project(&self, la: &[f32], lb: &[f32], p: &[f32]) -> Result<Projection> {
        with_metric!(self, m => m.try_project(la, lb, p))
    }
}

impl fmt::Display for MetricKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for MetricKind {
    type Err = MetricError;

    /// Case-insensitive; `-` and `_` are interchangeable.
    fn from_str(s: &str) -> Result<Self> {
        let name = s.trim().to_ascii_lowercase().replace('-', "_");
        match name.as_str() {
            "squared_euclidean" | "sqeuclidean" | "sqeucl" | "euclidean" => {
                Ok(Self::SquaredEuclidean)
            }
            "manhattan" | "l1" => Ok(Self::Manhattan),
            "chebyshev" | "linf" => Ok(Self::Chebyshev),
            "cosine" => Ok(Self::Cosine),
            _ => Err(MetricError::UnknownMetric(s.to_string())),
        }
    }
}

// serde goes through `FromStr` so config files accept the same spellings
impl TryFrom<String> for MetricKind {
    type Error = MetricError;

    fn try_from(s: String) -> Result<Self> {
        s.parse()
    }
}

impl From<MetricKind> for String {
    fn from(kind: MetricKind) -> Self {
        kind.as_str().to_owned()
    }
}
