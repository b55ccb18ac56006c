use anyhow::{anyhow, bail, Result};
use serde::Serialize;

use kinetic_core::motion::{Interpolation, MotionPreset, StyleFrame, Transform};
use kinetic_core::EasingType;

pub struct SampleOptions {
    pub points: Option<String>,
    pub preset: Option<String>,
    pub at: Vec<f64>,
    pub steps: usize,
    pub easing: Option<EasingType>,
    pub json: bool,
}

#[derive(Debug, Serialize)]
struct CurveSample {
    input: f64,
    output: f64,
}

#[derive(Debug, Serialize)]
struct PresetSample {
    input: f64,
    style: StyleFrame,
}

pub fn run(opts: SampleOptions) -> Result<()> {
    match (&opts.points, &opts.preset) {
        (Some(points), None) => sample_curve(points, &opts),
        (None, Some(name)) => sample_preset(name, &opts),
        (Some(_), Some(_)) => bail!("use either --points or --preset, not both"),
        (None, None) => bail!("one of --points or --preset is required"),
    }
}

fn sample_curve(points: &str, opts: &SampleOptions) -> Result<()> {
    let interpolation = opts
        .easing
        .map(Interpolation::Eased)
        .unwrap_or_default();
    let transform = points.parse::<Transform>()?.with_interpolation(interpolation);

    let samples: Vec<CurveSample> = inputs(transform.input_range(), opts)
        .into_iter()
        .map(|input| CurveSample {
            input,
            output: transform.sample(input),
        })
        .collect();

    if opts.json {
        println!("{}", serde_json::to_string_pretty(&samples)?);
        return Ok(());
    }

    println!("{}", transform);
    println!("{:>12}  {:>12}", "input", "output");
    for sample in &samples {
        println!("{:>12.4}  {:>12.4}", sample.input, sample.output);
    }
    Ok(())
}

fn sample_preset(name: &str, opts: &SampleOptions) -> Result<()> {
    let preset = MotionPreset::by_name(name).ok_or_else(|| {
        let known: Vec<&str> = MotionPreset::all().iter().map(|p| p.name).collect();
        anyhow!("unknown preset '{}' (known: {})", name, known.join(", "))
    })?;
    let animator = preset.build()?;

    // union of every channel's input range
    let range = preset
        .channels
        .iter()
        .flat_map(|c| c.points.iter().map(|p| p.input))
        .fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), x| (lo.min(x), hi.max(x)));

    let samples: Vec<PresetSample> = inputs(range, opts)
        .into_iter()
        .map(|input| PresetSample {
            input,
            style: animator.style_at(input),
        })
        .collect();

    if opts.json {
        println!("{}", serde_json::to_string_pretty(&samples)?);
        return Ok(());
    }

    println!("{} ({:?})", preset.name, preset.input);
    let properties: Vec<_> = preset.channels.iter().map(|c| c.property).collect();
    let header: Vec<String> = properties.iter().map(|p| format!("{:>12}", p.name())).collect();
    println!("{:>12}  {}", "input", header.join("  "));
    for sample in &samples {
        let values: Vec<String> = properties
            .iter()
            .map(|p| format!("{:>12.4}", sample.style.get(*p)))
            .collect();
        println!("{:>12.4}  {}", sample.input, values.join("  "));
    }
    Ok(())
}

/// Explicit `--at` inputs, or `steps` even intervals across `range` inclusive
fn inputs((lo, hi): (f64, f64), opts: &SampleOptions) -> Vec<f64> {
    if !opts.at.is_empty() {
        return opts.at.clone();
    }
    let steps = opts.steps.max(1);
    (0..=steps)
        .map(|i| lo + (hi - lo) * i as f64 / steps as f64)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn opts() -> SampleOptions {
        SampleOptions {
            points: None,
            preset: None,
            at: Vec::new(),
            steps: 4,
            easing: None,
            json: false,
        }
    }

    #[test]
    fn test_inputs_even_steps() {
        assert_eq!(inputs((0.0, 1.0), &opts()), vec![0.0, 0.25, 0.5, 0.75, 1.0]);
    }

    #[test]
    fn test_inputs_explicit() {
        let opts = SampleOptions {
            at: vec![0.5, 1.3],
            ..opts()
        };
        assert_eq!(inputs((0.0, 1.0), &opts), vec![0.5, 1.3]);
    }

    #[test]
    fn test_requires_one_source() {
        assert!(run(opts()).is_err());
        let both = SampleOptions {
            points: Some("0:0,1:1".into()),
            preset: Some("hero".into()),
            ..opts()
        };
        assert!(run(both).is_err());
    }

    #[test]
    fn test_unknown_preset() {
        let err = run(SampleOptions {
            preset: Some("nope".into()),
            ..opts()
        })
        .unwrap_err();
        assert!(err.to_string().contains("progress-bar"));
    }
}
