use std::io::{self, Write};
use std::time::Duration;

use anyhow::{bail, Result};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use tokio::sync::watch;
use tokio::time::{self, Instant};

use kinetic_core::scramble::{Scramble, ScrambleDriver, ScrambleFrame, ScramblePhase};
use kinetic_core::{AppConfig, FrameLoop};

pub struct ScrambleOptions {
    pub text: String,
    pub alphabet: Option<String>,
    pub step: Option<f64>,
    pub interval_ms: Option<u64>,
    pub seed: Option<u64>,
    /// Redraw one line in place instead of printing every tick
    pub inline: bool,
}

pub async fn run(config: &AppConfig, opts: ScrambleOptions) -> Result<()> {
    let mut settings = config.scramble.clone();
    if let Some(alphabet) = opts.alphabet {
        settings.alphabet = alphabet;
    }
    if let Some(step) = opts.step {
        settings.step_per_tick = step;
    }
    if let Some(interval_ms) = opts.interval_ms {
        if interval_ms == 0 {
            bail!("--interval-ms must be greater than zero");
        }
        settings.tick_interval_ms = interval_ms;
    }

    let scramble = settings.build(&opts.text)?;
    let interval = Duration::from_millis(settings.tick_interval_ms);

    if !opts.inline {
        let mut rng = match opts.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        play_lines(scramble, &mut rng, interval, &mut io::stdout()).await?;
        return Ok(());
    }

    let mut driver = match opts.seed {
        Some(seed) => ScrambleDriver::with_seed(scramble, interval, seed),
        None => ScrambleDriver::new(scramble, interval),
    };
    let mut frames = driver.subscribe();
    driver.trigger_enter();
    play_inline(&mut frames, config.ui.animation_fps).await
}

/// One line per tick, ending with the target.
///
/// Ticks wait for the write, so a slow writer delays the run instead of
/// losing frames.
async fn play_lines<R: Rng + ?Sized, W: Write>(
    mut scramble: Scramble,
    rng: &mut R,
    period: Duration,
    out: &mut W,
) -> io::Result<()> {
    writeln!(out, "{}", scramble.trigger_enter(rng))?;
    if scramble.phase() != ScramblePhase::Scrambling {
        return Ok(());
    }

    let period = period.max(Duration::from_millis(1));
    let mut interval = time::interval_at(Instant::now() + period, period);
    loop {
        interval.tick().await;
        let more = scramble.tick(rng);
        writeln!(out, "{}", scramble.display())?;
        out.flush()?;
        if !more {
            return Ok(());
        }
    }
}

/// Redraw the current frame in place at the display frame rate
async fn play_inline(
    frames: &mut watch::Receiver<ScrambleFrame>,
    fps: u32,
) -> Result<()> {
    let (_visible_tx, visible_rx) = watch::channel(true);
    let latest = frames.clone();
    let frame_loop = FrameLoop::spawn(fps, visible_rx, move |_| {
        let text = latest.borrow().text.clone();
        let mut stdout = io::stdout().lock();
        let _ = write!(stdout, "\r{}", text);
        let _ = stdout.flush();
    });

    while frames.borrow_and_update().phase == ScramblePhase::Scrambling {
        if frames.changed().await.is_err() {
            break;
        }
    }
    frame_loop.stop().await;

    let mut stdout = io::stdout().lock();
    writeln!(stdout, "\r{}", frames.borrow().text)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use kinetic_core::scramble::Alphabet;

    #[tokio::test(start_paused = true)]
    async fn test_play_lines_prints_every_tick() {
        let scramble = Scramble::new("HELLO", Alphabet::new("XYZ123").unwrap(), 1.0).unwrap();
        let mut rng = StdRng::seed_from_u64(3);
        let mut out = Vec::new();
        play_lines(scramble, &mut rng, Duration::from_millis(30), &mut out)
            .await
            .unwrap();

        let text = String::from_utf8(out).unwrap();
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines.len(), 6);
        for (i, line) in lines.iter().enumerate() {
            assert_eq!(line.len(), 5);
            assert!(line.starts_with(&"HELLO"[..i]));
            assert!(line[i..].chars().all(|c| "XYZ123".contains(c)));
        }
        assert_eq!(lines[5], "HELLO");
    }

    #[tokio::test(start_paused = true)]
    async fn test_play_lines_empty_text() {
        let scramble = Scramble::new("", Alphabet::nav(), 0.4).unwrap();
        let mut rng = StdRng::seed_from_u64(3);
        let mut out = Vec::new();
        play_lines(scramble, &mut rng, Duration::from_millis(30), &mut out)
            .await
            .unwrap();
        assert_eq!(out, b"\n");
    }
}
