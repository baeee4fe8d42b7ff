//! Real-root isolation for the degree-5 "closest point" equation.
//!
//! The stationary points of the squared distance between a point and a cubic
//! bezier are the roots of a quintic. [`SturmSequence`] counts how many of
//! them lie in a bracket so the nearest-point sweep can isolate each root
//! before refining it with [`bisection`] and [`newton`].

/// Maximum Newton iterations before giving up and returning the last iterate.
const NEWTON_MAX_ITERATIONS: usize = 64;

/// Relative size under which a remainder coefficient counts as zero.
const REMAINDER_EPSILON: f64 = 1e-12;

/// Degree-5 polynomial, coefficients ordered from `t^5` down to `t^0`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Quintic {
    pub coefficients: [f64; 6],
}

impl Quintic {
    /// Creates a quintic from its coefficients, highest degree first.
    #[must_use]
    pub fn new(coefficients: [f64; 6]) -> Self {
        Self { coefficients }
    }

    /// Evaluates the polynomial at `t` (Horner).
    #[must_use]
    pub fn eval(&self, t: f64) -> f64 {
        horner(&self.coefficients, t)
    }

    /// Evaluates the first derivative at `t`.
    #[must_use]
    pub fn eval_derivative(&self, t: f64) -> f64 {
        let a = &self.coefficients;
        (((5.0 * a[0] * t + 4.0 * a[1]) * t + 3.0 * a[2]) * t + 2.0 * a[3]) * t + a[4]
    }
}

/// Euclidean-remainder (Sturm) sequence of a polynomial.
///
/// `p0 = p`, `p1 = p'`, `p(k+1) = -rem(p(k-1), p(k))`, stopping at the first
/// vanishing remainder. Leading coefficients that vanish are stripped first,
/// so a degenerate quintic degrades to the matching lower-degree sequence.
#[derive(Debug, Clone)]
pub struct SturmSequence {
    polys: Vec<Vec<f64>>,
}

impl SturmSequence {
    /// Builds the sequence for `q`.
    #[must_use]
    pub fn new(q: &Quintic) -> Self {
        let scale = q
            .coefficients
            .iter()
            .fold(0.0_f64, |acc, c| acc.max(c.abs()));
        let p0 = trim_leading(q.coefficients.to_vec(), scale * REMAINDER_EPSILON);
        if p0.is_empty() {
            return Self { polys: Vec::new() };
        }

        let mut polys = vec![p0];
        let p1 = trim_leading(derivative(&polys[0]), scale * REMAINDER_EPSILON);
        if p1.is_empty() {
            return Self { polys };
        }
        polys.push(p1);

        while polys[polys.len() - 1].len() > 1 {
            let n = polys.len();
            let dividend_scale = polys[n - 2]
                .iter()
                .fold(0.0_f64, |acc, c| acc.max(c.abs()));
            let rem: Vec<f64> = remainder(&polys[n - 2], &polys[n - 1])
                .into_iter()
                .map(|c| -c)
                .collect();
            let rem = trim_leading(rem, dividend_scale * REMAINDER_EPSILON);
            if rem.is_empty() {
                break;
            }
            polys.push(rem);
        }

        Self { polys }
    }

    /// Number of sign changes of the sequence evaluated at `u`, zeros skipped.
    #[must_use]
    pub fn sign_changes(&self, u: f64) -> usize {
        let mut count = 0;
        let mut previous: Option<f64> = None;
        for p in &self.polys {
            let v = horner(p, u);
            if v == 0.0 || !v.is_finite() {
                continue;
            }
            if let Some(s) = previous {
                if s * v < 0.0 {
                    count += 1;
                }
            }
            previous = Some(v);
        }
        count
    }

    /// Number of distinct real roots in `(a, b]`.
    #[must_use]
    pub fn roots_between(&self, a: f64, b: f64) -> usize {
        self.sign_changes(a).saturating_sub(self.sign_changes(b))
    }
}

/// Narrows a sign-changing bracket `[t0, t1]` of `q` to width `eps` and
/// returns its midpoint.
#[must_use]
pub fn bisection(q: &Quintic, t0: f64, t1: f64, eps: f64) -> f64 {
    let (mut lo, mut hi) = (t0, t1);
    let lo_negative = q.eval(lo) < 0.0;
    loop {
        let mid = (lo + hi) / 2.0;
        if hi - lo < eps {
            return mid;
        }
        let v = q.eval(mid);
        if v == 0.0 {
            return mid;
        }
        if (v < 0.0) == lo_negative {
            lo = mid;
        } else {
            hi = mid;
        }
    }
}

/// Refines a root estimate of `q` with Newton iteration until two iterates
/// differ by less than `eps`.
#[must_use]
pub fn newton(q: &Quintic, t: f64, eps: f64) -> f64 {
    let mut t = t;
    for _ in 0..NEWTON_MAX_ITERATIONS {
        let slope = q.eval_derivative(t);
        if slope == 0.0 || !slope.is_finite() {
            return t;
        }
        let next = t - q.eval(t) / slope;
        if !next.is_finite() {
            return t;
        }
        if (next - t).abs() < eps {
            return next;
        }
        t = next;
    }
    t
}

fn horner(coefficients: &[f64], t: f64) -> f64 {
    coefficients.iter().fold(0.0, |acc, c| acc * t + c)
}

fn derivative(p: &[f64]) -> Vec<f64> {
    let degree = p.len().saturating_sub(1);
    p.iter()
        .take(degree)
        .enumerate()
        .map(|(i, c)| {
            #[allow(clippy::cast_precision_loss)]
            let power = (degree - i) as f64;
            power * c
        })
        .collect()
}

/// Remainder of the polynomial division `a / b`. `b[0]` must be non-zero.
fn remainder(a: &[f64], b: &[f64]) -> Vec<f64> {
    let mut r = a.to_vec();
    while r.len() >= b.len() {
        let factor = r[0] / b[0];
        for (ri, bi) in r.iter_mut().zip(b) {
            *ri -= factor * bi;
        }
        r.remove(0);
    }
    r
}

fn trim_leading(mut p: Vec<f64>, epsilon: f64) -> Vec<f64> {
    let first = p.iter().position(|c| c.abs() > epsilon).unwrap_or(p.len());
    p.drain(..first);
    p
}
