//! Control-point transforms
//!
//! A [`Transform`] maps an input signal (a progress fraction, a pixel offset,
//! a centered pointer coordinate) onto an output value by interpolating
//! between ordered control points. Inputs outside the table return the first
//! or last output exactly.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use super::easing::EasingType;
use super::timing::{inverse_lerp, lerp};
use crate::{Error, Result};

/// A declared (input, output) pair on an interpolation curve
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ControlPoint {
    pub input: f64,
    pub output: f64,
}

impl ControlPoint {
    pub const fn new(input: f64, output: f64) -> Self {
        Self { input, output }
    }
}

impl From<(f64, f64)> for ControlPoint {
    fn from((input, output): (f64, f64)) -> Self {
        Self { input, output }
    }
}

/// How values between two neighbouring control points are produced
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Interpolation {
    #[default]
    Linear,
    /// Each segment's local progress is passed through an easing curve
    Eased(EasingType),
}

impl Interpolation {
    #[inline]
    fn shape(&self, t: f64) -> f64 {
        match self {
            Interpolation::Linear => t,
            Interpolation::Eased(easing) => easing.apply(t),
        }
    }
}

/// Piecewise interpolation between ordered control points
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "TransformDef", into = "TransformDef")]
pub struct Transform {
    points: Vec<ControlPoint>,
    interpolation: Interpolation,
}

impl Transform {
    /// Build a transform from control points.
    ///
    /// Requires at least two finite points with non-decreasing inputs.
    pub fn new(points: Vec<ControlPoint>, interpolation: Interpolation) -> Result<Self> {
        if points.len() < 2 {
            return Err(Error::InvalidControlPoints(format!(
                "need at least 2 control points, got {}",
                points.len()
            )));
        }
        if let Some(p) = points
            .iter()
            .find(|p| !p.input.is_finite() || !p.output.is_finite())
        {
            return Err(Error::InvalidControlPoints(format!(
                "non-finite control point ({}, {})",
                p.input, p.output
            )));
        }
        if let Some(pair) = points.windows(2).find(|w| w[1].input < w[0].input) {
            return Err(Error::InvalidControlPoints(format!(
                "inputs must be non-decreasing: {} follows {}",
                pair[1].input, pair[0].input
            )));
        }
        Ok(Self {
            points,
            interpolation,
        })
    }

    /// Linear transform from (input, output) pairs
    pub fn from_pairs(pairs: &[(f64, f64)]) -> Result<Self> {
        Self::new(
            pairs.iter().copied().map(ControlPoint::from).collect(),
            Interpolation::Linear,
        )
    }

    /// Two-point linear transform, the common `[a, b] -> [c, d]` shape
    pub fn linear(input: (f64, f64), output: (f64, f64)) -> Result<Self> {
        Self::from_pairs(&[(input.0, output.0), (input.1, output.1)])
    }

    /// Same table with a different interpolation rule
    pub fn with_interpolation(mut self, interpolation: Interpolation) -> Self {
        self.interpolation = interpolation;
        self
    }

    /// Output values multiplied by -1
    pub fn negated(&self) -> Self {
        Self {
            points: self
                .points
                .iter()
                .map(|p| ControlPoint::new(p.input, -p.output))
                .collect(),
            interpolation: self.interpolation,
        }
    }

    pub fn points(&self) -> &[ControlPoint] {
        &self.points
    }

    pub fn interpolation(&self) -> Interpolation {
        self.interpolation
    }

    /// Input span covered by the table
    pub fn input_range(&self) -> (f64, f64) {
        (self.first().input, self.last().input)
    }

    fn first(&self) -> &ControlPoint {
        &self.points[0]
    }

    fn last(&self) -> &ControlPoint {
        &self.points[self.points.len() - 1]
    }

    /// Interpolated output for `input`.
    ///
    /// Never returns NaN: a NaN input is treated as below the table.
    pub fn sample(&self, input: f64) -> f64 {
        let first = self.first();
        let last = self.last();

        if input.is_nan() || input <= first.input {
            return first.output;
        }
        if input >= last.input {
            return last.output;
        }

        // First point whose input is strictly greater than `input`
        let upper = self.points.partition_point(|p| p.input <= input);
        let a = self.points[upper - 1];
        let b = self.points[upper];

        let t = inverse_lerp(a.input, b.input, input).clamp(0.0, 1.0);
        lerp(a.output, b.output, self.interpolation.shape(t))
    }
}

impl fmt::Display for Transform {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let pairs: Vec<String> = self
            .points
            .iter()
            .map(|p| format!("{}:{}", p.input, p.output))
            .collect();
        write!(f, "{}", pairs.join(","))
    }
}

/// Parses `"0:0,0.5:1,1:0"` into a linear transform
impl FromStr for Transform {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        let points = s
            .split(',')
            .map(str::trim)
            .filter(|part| !part.is_empty())
            .map(|part| {
                let (input, output) = part.split_once(':').ok_or_else(|| {
                    Error::InvalidControlPoints(format!(
                        "expected 'input:output', got '{}'",
                        part
                    ))
                })?;
                let parse = |v: &str| {
                    v.trim().parse::<f64>().map_err(|e| {
                        Error::InvalidControlPoints(format!("'{}': {}", v.trim(), e))
                    })
                };
                Ok(ControlPoint::new(parse(input)?, parse(output)?))
            })
            .collect::<Result<Vec<_>>>()?;
        Self::new(points, Interpolation::Linear)
    }
}

#[derive(Serialize, Deserialize)]
struct TransformDef {
    points: Vec<ControlPoint>,
    #[serde(default)]
    interpolation: Interpolation,
}

impl TryFrom<TransformDef> for Transform {
    type Error = Error;

    fn try_from(def: TransformDef) -> Result<Self> {
        Transform::new(def.points, def.interpolation)
    }
}

impl From<Transform> for TransformDef {
    fn from(t: Transform) -> Self {
        TransformDef {
            points: t.points,
            interpolation: t.interpolation,
        }
    }
}
