//! PNG renderers
//!
//! Every renderer draws shapes only. Panels are stacked vertically and share
//! the same dark background, so images from one session line up side by side.

use super::canvas::Canvas;
use super::geometry::{self, Point};
use super::palette::{self, GOLD, GRID, VIOLET, WHITE};
use crate::analysis::FeatureSet;
use crate::audio::AudioBuffer;
use crate::model::SacredGap;
use crate::stream::{ConsciousnessState, FrequencyAnalysis, SacredAnalysis, StreamSnapshot};
use crate::tables::STREAM_FREQUENCIES;
use anyhow::{bail, Result};
use image::Rgb;
use std::collections::BTreeMap;
use std::f32::consts::TAU;
use std::path::{Path, PathBuf};

pub const DEFAULT_WIDTH: u32 = 1200;
pub const DEFAULT_HEIGHT: u32 = 800;

const SPECTRUM_BINS: usize = 100;
const SPECTRUM_SIGMA: f32 = 2.0;
const MYSTERY_OPACITY: f32 = 0.3;
const MAX_UNITY_MARKERS: usize = 7;
const MARGIN: f32 = 40.0;
const PANEL_GAP: f32 = 24.0;

/// Rectangle inside a canvas with unit coordinates, y pointing up
#[derive(Debug, Clone, Copy)]
struct Panel {
    x: f32,
    y: f32,
    w: f32,
    h: f32,
}

impl Panel {
    /// Panel `index` of `count` stacked top to bottom
    fn stacked(canvas: &Canvas, count: usize, index: usize) -> Self {
        let w = canvas.width() as f32 - 2.0 * MARGIN;
        let total = canvas.height() as f32 - 2.0 * MARGIN - PANEL_GAP * (count as f32 - 1.0);
        let h = total / count as f32;
        Self {
            x: MARGIN,
            y: MARGIN + index as f32 * (h + PANEL_GAP),
            w,
            h,
        }
    }

    fn px(&self, fx: f32) -> f32 {
        self.x + fx.clamp(0.0, 1.0) * self.w
    }

    fn py(&self, fy: f32) -> f32 {
        self.y + (1.0 - fy.clamp(0.0, 1.0)) * self.h
    }

    fn point(&self, fx: f32, fy: f32) -> Point {
        (self.px(fx), self.py(fy))
    }

    fn frame(&self, canvas: &mut Canvas) {
        for i in 1..4 {
            let y = self.py(i as f32 / 4.0);
            canvas.line((self.x, y), (self.x + self.w, y), GRID, 0.3, 1.0);
        }
        let corners = [
            (self.x, self.y),
            (self.x + self.w, self.y),
            (self.x + self.w, self.y + self.h),
            (self.x, self.y + self.h),
        ];
        canvas.polyline(&corners, true, GRID, 0.8, 1.0);
    }

    /// Line plus translucent area down to the baseline
    fn area(&self, canvas: &mut Canvas, xs: &[f32], ys: &[f32], color: Rgb<u8>) {
        let line: Vec<Point> = xs.iter().zip(ys).map(|(&x, &y)| self.point(x, y)).collect();
        if line.len() > 1 {
            let mut shape = line.clone();
            shape.push((self.px(xs[xs.len() - 1]), self.py(0.0)));
            shape.push((self.px(xs[0]), self.py(0.0)));
            canvas.fill_polygon(&shape, color, 0.3);
        }
        canvas.polyline(&line, false, color, 0.8, 2.0);
    }
}

/// Scale values into 0..=1 by their maximum, all zeros when flat
fn normalize(values: &[f32]) -> Vec<f32> {
    let max = values.iter().cloned().fold(0.0f32, f32::max);
    if max <= 0.0 {
        return vec![0.0; values.len()];
    }
    values.iter().map(|v| v / max).collect()
}

/// Positions spread over 0..=1
fn unit_positions(values: &[f64]) -> Vec<f32> {
    let min = values.iter().cloned().fold(f64::INFINITY, f64::min);
    let max = values.iter().cloned().fold(f64::NEG_INFINITY, f64::max);
    let span = if max > min { max - min } else { 1.0 };
    values.iter().map(|v| ((v - min) / span) as f32).collect()
}

/// Gaussian smoothing with mirrored edges (`d c b a | a b c d | d c b a`)
pub fn gaussian_smooth(values: &[f32], sigma: f32) -> Vec<f32> {
    let n = values.len() as i64;
    if n == 0 || sigma <= 0.0 {
        return values.to_vec();
    }
    let radius = (4.0 * sigma + 0.5) as i64;
    let mut kernel: Vec<f32> = (-radius..=radius)
        .map(|k| (-0.5 * (k as f32 / sigma).powi(2)).exp())
        .collect();
    let total: f32 = kernel.iter().sum();
    kernel.iter_mut().for_each(|k| *k /= total);

    let reflect = |mut i: i64| -> usize {
        loop {
            if i < 0 {
                i = -i - 1;
            } else if i >= n {
                i = 2 * n - i - 1;
            } else {
                return i as usize;
            }
        }
    };

    (0..n)
        .map(|i| {
            kernel
                .iter()
                .enumerate()
                .map(|(j, w)| w * values[reflect(i + j as i64 - radius)])
                .sum()
        })
        .collect()
}

/// `(slope, intercept)` of the least-squares line, None for fewer than two points
fn linear_fit(xs: &[f32], ys: &[f32]) -> Option<(f32, f32)> {
    let n = xs.len().min(ys.len());
    if n < 2 {
        return None;
    }
    let mx = xs[..n].iter().sum::<f32>() / n as f32;
    let my = ys[..n].iter().sum::<f32>() / n as f32;
    let (mut sxy, mut sxx) = (0.0, 0.0);
    for (x, y) in xs.iter().zip(ys) {
        sxy += (x - mx) * (y - my);
        sxx += (x - mx) * (x - mx);
    }
    if sxx == 0.0 {
        return None;
    }
    let slope = sxy / sxx;
    Some((slope, my - slope * mx))
}

/// Horizontal position of `frequency` on the 10 Hz to 10 kHz log axis
fn log_axis(frequency: f32) -> f32 {
    (frequency.max(1e-3).log10() - 1.0) / 3.0
}

/// Everything a comprehensive report draws from one stream snapshot
#[derive(Debug, Clone, Copy)]
pub struct ReportInput<'a> {
    pub frequency: &'a FrequencyAnalysis,
    pub sacred: &'a SacredAnalysis,
    pub gap_detected: bool,
    pub history: &'a [ConsciousnessState],
}

impl<'a> From<&'a StreamSnapshot> for ReportInput<'a> {
    fn from(snapshot: &'a StreamSnapshot) -> Self {
        Self {
            frequency: &snapshot.frequency,
            sacred: &snapshot.sacred,
            gap_detected: snapshot.gap_detected,
            history: &snapshot.history,
        }
    }
}

pub struct SacredVisualizer {
    width: u32,
    height: u32,
}

impl Default for SacredVisualizer {
    fn default() -> Self {
        Self::new(DEFAULT_WIDTH, DEFAULT_HEIGHT)
    }
}

impl SacredVisualizer {
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width: width.max(200),
            height: height.max(200),
        }
    }

    fn center(&self) -> Point {
        (self.width as f32 / 2.0, self.height as f32 / 2.0)
    }

    fn short_side(&self) -> f32 {
        self.width.min(self.height) as f32
    }

    /// Layered polygons per prominent frequency with a golden spiral
    pub fn render_frequency_mandala(
        &self,
        frequency: &FrequencyAnalysis,
        sacred: &SacredAnalysis,
        gap_detected: bool,
        path: &Path,
    ) -> Result<()> {
        let mut canvas = Canvas::new(self.width, self.height);
        let center = self.center();
        let side = self.short_side();

        let frequencies = if frequency.prominent_frequencies.is_empty() {
            let dominant = if frequency.dominant_frequency > 0.0 {
                frequency.dominant_frequency
            } else {
                440.0
            };
            vec![dominant]
        } else {
            frequency.prominent_frequencies.clone()
        };

        for layer in geometry::frequency_mandala(center, &frequencies, side * 0.3) {
            let color = palette::frequency_to_color(layer.frequency, 1.0);
            canvas.fill_polygon(&layer.vertices, color, 0.7);
            canvas.polyline(&layer.vertices, true, WHITE, 0.7, 2.0);
        }

        let spiral = geometry::golden_spiral(center, side * 0.1);
        canvas.polyline(&spiral, false, GOLD, 0.8, 3.0);

        let count = sacred.detected.len();
        for (i, hit) in sacred.detected.iter().enumerate() {
            let angle = TAU * i as f32 / count as f32;
            let at = (
                center.0 + side * 0.4 * angle.cos(),
                center.1 - side * 0.4 * angle.sin(),
            );
            canvas.fill_circle(at, side * 0.025, palette::BACKGROUND, 0.7);
            canvas.fill_circle(at, side * 0.015, palette::frequency_to_color(hit.frequency, 1.0), 1.0);
        }

        if gap_detected {
            let radius = side * 0.1;
            canvas.fill_circle(center, radius, Rgb([0, 0, 0]), MYSTERY_OPACITY);
            let rim = geometry::circle(center, radius, 72);
            for pair in rim.chunks_exact(2) {
                canvas.line(pair[0], pair[1], VIOLET, 1.0, 3.0);
            }
        }

        canvas.save(path)
    }

    /// Presence, mystery and dominant frequency over time
    pub fn render_consciousness_flow(&self, history: &[ConsciousnessState], path: &Path) -> Result<()> {
        if history.is_empty() {
            return self.render_empty(path);
        }
        let mut canvas = Canvas::new(self.width, self.height + self.height / 4);

        let times: Vec<f64> = history.iter().map(|s| s.timestamp).collect();
        let xs = unit_positions(&times);

        let presence = Panel::stacked(&canvas, 3, 0);
        presence.frame(&mut canvas);
        let ys: Vec<f32> = history.iter().map(|s| s.sacred_presence).collect();
        presence.area(&mut canvas, &xs, &ys, GOLD);

        let mystery = Panel::stacked(&canvas, 3, 1);
        mystery.frame(&mut canvas);
        let ys: Vec<f32> = history.iter().map(|s| s.mystery_level).collect();
        mystery.area(&mut canvas, &xs, &ys, VIOLET);

        let dominant = Panel::stacked(&canvas, 3, 2);
        dominant.frame(&mut canvas);
        let freqs: Vec<f32> = history.iter().map(|s| s.dominant_frequency).collect();
        let low = freqs.iter().cloned().fold(f32::INFINITY, f32::min);
        let high = freqs.iter().cloned().fold(f32::NEG_INFINITY, f32::max);
        let pad = ((high - low) * 0.1).max(10.0);
        let (low, high) = (low - pad, high + pad);
        let fy = |f: f32| (f - low) / (high - low);

        for table in STREAM_FREQUENCIES.iter().filter(|t| t.hz >= low && t.hz <= high) {
            let y = dominant.py(fy(table.hz));
            canvas.dashed_line((dominant.px(0.0), y), (dominant.px(1.0), y), WHITE, 0.5, 3.0);
        }
        if let Some((slope, intercept)) = linear_fit(&xs, &freqs) {
            let a = dominant.point(0.0, fy(intercept));
            let b = dominant.point(1.0, fy(slope + intercept));
            canvas.dashed_line(a, b, WHITE, 0.7, 8.0);
        }
        for (&x, &f) in xs.iter().zip(&freqs) {
            canvas.fill_circle(dominant.point(x, fy(f)), 4.0, palette::frequency_to_color(f, 1.0), 0.8);
        }

        canvas.save(path)
    }

    /// Prominent frequencies binned on a log axis and smoothed
    pub fn render_sacred_spectrum(
        &self,
        frequency: &FrequencyAnalysis,
        sacred: &SacredAnalysis,
        path: &Path,
    ) -> Result<()> {
        if frequency.prominent_frequencies.is_empty() {
            return self.render_empty(path);
        }
        let spectrum = sacred_spectrum(&frequency.prominent_frequencies);
        let heights = normalize(&spectrum);

        let mut canvas = Canvas::new(self.width + self.width / 6, self.height);
        let panel = Panel::stacked(&canvas, 1, 0);
        panel.frame(&mut canvas);

        let bins = spectrum_bins();
        for i in 0..SPECTRUM_BINS - 1 {
            let (x0, x1) = (log_axis(bins[i]), log_axis(bins[i + 1]));
            let shape = [
                panel.point(x0, 0.0),
                panel.point(x1, 0.0),
                panel.point(x1, heights[i + 1] * 0.9),
                panel.point(x0, heights[i] * 0.9),
            ];
            canvas.fill_polygon(&shape, palette::frequency_to_color(bins[i], 0.8), 0.7);
        }

        for hit in &sacred.detected {
            let x = log_axis(hit.frequency);
            if (0.0..=1.0).contains(&x) {
                canvas.dashed_line(panel.point(x, 0.0), panel.point(x, 1.0), WHITE, 0.8, 6.0);
            }
        }

        canvas.save(path)
    }

    /// Flower of life with markers for up to seven detected frequencies
    pub fn render_unity_mandala(&self, sacred: &SacredAnalysis, path: &Path) -> Result<()> {
        let side = self.short_side();
        let mut canvas = Canvas::new(side as u32, side as u32);
        let center = (side / 2.0, side / 2.0);

        for (i, circle) in geometry::flower_of_life(center, side * 0.15).iter().enumerate() {
            let (color, alpha) = if i == 0 {
                (GOLD, 0.8)
            } else {
                let (r, g, b) = palette::hsv_to_rgb((i - 1) as f32 / 6.0, 0.8, 0.9);
                (Rgb([(r * 255.0) as u8, (g * 255.0) as u8, (b * 255.0) as u8]), 0.6)
            };
            canvas.fill_polygon(circle, color, alpha);
            canvas.polyline(circle, true, WHITE, alpha, 2.0);
        }

        let count = sacred.detected.len();
        for (i, hit) in sacred.detected.iter().take(MAX_UNITY_MARKERS).enumerate() {
            let angle = TAU * i as f32 / count as f32;
            let at = (
                center.0 + side * 0.4 * angle.cos(),
                center.1 - side * 0.4 * angle.sin(),
            );
            canvas.fill_circle(at, side * 0.035, GOLD, 0.8);
            canvas.fill_circle(at, side * 0.03, Rgb([0, 0, 0]), 0.8);
            canvas.fill_circle(at, side * 0.018, palette::frequency_to_color(hit.frequency, 1.0), 1.0);
        }

        canvas.save(path)
    }

    /// Background and frame only, for snapshots with nothing to draw
    pub fn render_empty(&self, path: &Path) -> Result<()> {
        let mut canvas = Canvas::new(self.width * 5 / 6, self.height * 3 / 4);
        Panel::stacked(&canvas, 1, 0).frame(&mut canvas);
        canvas.save(path)
    }

    /// Render every applicable image into `dir`
    ///
    /// Failures are logged and the image left out of the result.
    pub fn comprehensive_report(&self, input: &ReportInput<'_>, dir: &Path) -> BTreeMap<String, PathBuf> {
        let stamp = chrono::Local::now().format("%Y%m%d_%H%M%S").to_string();
        let path_for = |name: &str| dir.join(format!("{}_{}.png", name, stamp));
        let mut rendered = BTreeMap::new();

        let mut record = |key: &str, path: PathBuf, result: Result<()>| match result {
            Ok(()) => {
                log::info!("Rendered {} visualization: {:?}", key, path);
                rendered.insert(key.to_string(), path);
            }
            Err(e) => log::warn!("Error creating {} visualization: {:#}", key, e),
        };

        let path = path_for("consciousness_mandala");
        let result = self.render_frequency_mandala(input.frequency, input.sacred, input.gap_detected, &path);
        record("mandala", path, result);

        let path = path_for("sacred_spectrum");
        let result = self.render_sacred_spectrum(input.frequency, input.sacred, &path);
        record("spectrum", path, result);

        if !input.history.is_empty() {
            let path = path_for("consciousness_flow");
            let result = self.render_consciousness_flow(input.history, &path);
            record("flow", path, result);
        }

        let path = path_for("unity_consciousness");
        let result = self.render_unity_mandala(input.sacred, &path);
        record("unity", path, result);

        rendered
    }
}

/// 100 bin centres spaced logarithmically from 10 Hz to 10 kHz
pub fn spectrum_bins() -> Vec<f32> {
    (0..SPECTRUM_BINS)
        .map(|i| 10f32.powf(1.0 + 3.0 * i as f32 / (SPECTRUM_BINS - 1) as f32))
        .collect()
}

/// Count of frequencies nearest each bin, smoothed
pub fn sacred_spectrum(frequencies: &[f32]) -> Vec<f32> {
    let bins = spectrum_bins();
    let mut counts = vec![0.0f32; SPECTRUM_BINS];
    for &f in frequencies {
        let nearest = bins
            .iter()
            .enumerate()
            .min_by(|a, b| (a.1 - f).abs().total_cmp(&(b.1 - f).abs()))
            .map(|(i, _)| i);
        if let Some(i) = nearest {
            counts[i] += 1.0;
        }
    }
    gaussian_smooth(&counts, SPECTRUM_SIGMA)
}

/// Peak and RMS of one window
fn rms_and_peak(samples: &[f32]) -> (f32, f32) {
    if samples.is_empty() {
        return (0.0, 0.0);
    }
    let mut sum_sq = 0.0f32;
    let mut peak = 0.0f32;
    for s in samples {
        sum_sq += s * s;
        peak = peak.max(s.abs());
    }
    ((sum_sq / samples.len() as f32).sqrt(), peak)
}

/// Four panel overview of one file: waveform with gap markers, spectral
/// centroid, onset strength and a chroma heat-map
pub fn render_analysis_overview(
    audio: &AudioBuffer,
    features: &FeatureSet,
    gaps: &[SacredGap],
    path: &Path,
) -> Result<()> {
    if audio.is_empty() {
        bail!("No samples to draw for {:?}", path);
    }
    let mut canvas = Canvas::new(DEFAULT_WIDTH, DEFAULT_HEIGHT + DEFAULT_HEIGHT / 4);

    let wave = Panel::stacked(&canvas, 4, 0);
    wave.frame(&mut canvas);
    let columns = wave.w as usize;
    let per_column = (audio.samples.len() / columns).max(1);
    for (col, chunk) in audio.samples.chunks(per_column).take(columns).enumerate() {
        let (rms, peak) = rms_and_peak(chunk);
        let x = wave.x + col as f32 + 0.5;
        let half = wave.h / 2.0;
        let mid = wave.y + half;
        canvas.line((x, mid - peak.min(1.0) * half), (x, mid + peak.min(1.0) * half), Rgb([0x41, 0x69, 0xE1]), 0.6, 1.0);
        canvas.line((x, mid - rms.min(1.0) * half), (x, mid + rms.min(1.0) * half), Rgb([0x87, 0xCE, 0xFA]), 0.9, 1.0);
    }
    let duration = audio.duration_secs().max(f32::EPSILON);
    for gap in gaps {
        let x = wave.px(gap.timestamp / duration);
        canvas.line((x, wave.y), (x, wave.y + wave.h), VIOLET, 1.0, 2.0);
    }

    let frame_x = |i: usize, n: usize| if n > 1 { i as f32 / (n - 1) as f32 } else { 0.0 };

    let centroid = Panel::stacked(&canvas, 4, 1);
    centroid.frame(&mut canvas);
    let c = &features.frames.centroid;
    let xs: Vec<f32> = (0..c.len()).map(|i| frame_x(i, c.len())).collect();
    centroid.area(&mut canvas, &xs, &normalize(c), GOLD);

    let onset = Panel::stacked(&canvas, 4, 2);
    onset.frame(&mut canvas);
    let o = &features.frames.onset_envelope;
    let xs: Vec<f32> = (0..o.len()).map(|i| frame_x(i, o.len())).collect();
    onset.area(&mut canvas, &xs, &normalize(o), Rgb([0xFF, 0x45, 0x00]));

    let chroma = Panel::stacked(&canvas, 4, 3);
    let frames = &features.frames.chroma;
    if !frames.is_empty() {
        let row_h = chroma.h / 12.0;
        let columns = chroma.w as usize;
        for col in 0..columns {
            let frame = &frames[(col * frames.len() / columns).min(frames.len() - 1)];
            for (pitch, &energy) in frame.iter().enumerate() {
                let (r, g, b) = palette::hsv_to_rgb(pitch as f32 / 12.0, 0.8, energy.clamp(0.0, 1.0));
                let top = chroma.y + chroma.h - (pitch + 1) as f32 * row_h;
                let x = chroma.x + col as f32;
                canvas.fill_rect(
                    x,
                    top,
                    x + 1.0,
                    top + row_h,
                    Rgb([(r * 255.0) as u8, (g * 255.0) as u8, (b * 255.0) as u8]),
                    1.0,
                );
            }
        }
    }
    chroma.frame(&mut canvas);

    canvas.save(path)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::stream::{analyze_frequencies, detect_sacred_frequencies};

    fn tone(freqs: &[f32], seconds: f32, sr: u32) -> Vec<f32> {
        (0..(seconds * sr as f32) as usize)
            .map(|i| {
                let t = i as f32 / sr as f32;
                freqs.iter().map(|f| (TAU * f * t).sin()).sum::<f32>() / freqs.len() as f32
            })
            .collect()
    }

    #[test]
    fn test_gaussian_preserves_mass() {
        let mut impulse = vec![0.0; 40];
        impulse[20] = 1.0;
        let smooth = gaussian_smooth(&impulse, 2.0);
        assert!((smooth.iter().sum::<f32>() - 1.0).abs() < 1e-4);
        assert!((smooth[18] - smooth[22]).abs() < 1e-6);
        assert_eq!(crate::features::stats::argmax(&smooth), Some(20));

        // mirrored edge keeps mass near the boundary too
        let mut edge = vec![0.0; 10];
        edge[0] = 1.0;
        assert!((gaussian_smooth(&edge, 2.0).iter().sum::<f32>() - 1.0).abs() < 1e-4);
    }

    #[test]
    fn test_spectrum_bins() {
        let bins = spectrum_bins();
        assert_eq!(bins.len(), 100);
        assert!((bins[0] - 10.0).abs() < 1e-3);
        assert!((bins[99] - 10_000.0).abs() < 1.0);

        let spectrum = sacred_spectrum(&[528.0]);
        let peak = crate::features::stats::argmax(&spectrum).unwrap();
        assert!((bins[peak] - 528.0).abs() / 528.0 < 0.05);
    }

    #[test]
    fn test_linear_fit() {
        let (m, b) = linear_fit(&[0.0, 1.0, 2.0], &[1.0, 3.0, 5.0]).unwrap();
        assert!((m - 2.0).abs() < 1e-6 && (b - 1.0).abs() < 1e-6);
        assert!(linear_fit(&[1.0], &[1.0]).is_none());
    }

    #[test]
    fn test_comprehensive_report() {
        let dir = tempfile::tempdir().unwrap();
        let samples = tone(&[528.0, 741.0], 0.1, 44100);
        let frequency = analyze_frequencies(&samples[..4096], 44100);
        let sacred = detect_sacred_frequencies(&frequency);

        let visualizer = SacredVisualizer::new(400, 300);
        let input = ReportInput {
            frequency: &frequency,
            sacred: &sacred,
            gap_detected: true,
            history: &[],
        };
        let rendered = visualizer.comprehensive_report(&input, dir.path());

        let keys: Vec<&str> = rendered.keys().map(String::as_str).collect();
        assert_eq!(keys, vec!["mandala", "spectrum", "unity"]);
        assert!(rendered.values().all(|p| p.exists()));

        let unity = image::open(&rendered["unity"]).unwrap();
        assert_eq!((unity.width(), unity.height()), (300, 300));
    }

    #[test]
    fn test_empty_spectrum_still_renders() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("spectrum.png");
        SacredVisualizer::default()
            .render_sacred_spectrum(&FrequencyAnalysis::default(), &SacredAnalysis::default(), &path)
            .unwrap();
        assert!(path.exists());
    }

    #[test]
    fn test_analysis_overview_marks_gaps() {
        use crate::analysis::{AudioAnalyzer, FastAnalyzer};

        let dir = tempfile::tempdir().unwrap();
        let audio = AudioBuffer::new(tone(&[440.0], 3.0, 22050), 22050);
        let features = FastAnalyzer::new().analyze(&audio).unwrap();
        let gaps = vec![SacredGap {
            timestamp: 1.5,
            message: String::new(),
        }];
        let path = dir.path().join("overview.png");
        render_analysis_overview(&audio, &features, &gaps, &path).unwrap();

        let img = image::open(&path).unwrap().to_rgb8();
        assert_eq!(img.width(), DEFAULT_WIDTH);
        // gap marker sits halfway across the waveform panel
        let x = (MARGIN + 0.5 * (DEFAULT_WIDTH as f32 - 2.0 * MARGIN)) as u32;
        let top = MARGIN as u32 + 2;
        assert_eq!(img.get_pixel(x, top), &image::Rgb([0xEE, 0x82, 0xEE]));
    }

    #[test]
    fn test_empty_audio_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let audio = AudioBuffer::new(Vec::new(), 22050);
        let features = FeatureSet::new(&audio, Default::default(), 0.0, Vec::new(), None);
        assert!(render_analysis_overview(&audio, &features, &[], &dir.path().join("x.png")).is_err());
    }
}
