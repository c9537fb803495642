//! Stream analyzer: ring buffer, polling thread and session history
//!
//! Samples are fed into a bounded ring buffer. One background thread polls it
//! and analyses the newest chunk once a full chunk of new audio has arrived.
//! States go to the bounded history and to a bounded channel; a state is
//! dropped from the channel when nobody drains it.

use super::frequency::{
    analyze_frequencies, biometric_suggestions, detect_sacred_frequencies,
    recognize_cultural_patterns, FrequencyAnalysis, SacredAnalysis,
};
use super::gap::SacredGapDetector;
use super::protocol::ReturnProtocol;
use super::{ConsciousnessState, StreamConfig};
use anyhow::{bail, Context, Result};
use crossbeam_channel::{Receiver, Sender, TrySendError};
use parking_lot::Mutex;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeSet, VecDeque};
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::Arc;
use std::thread::{self, JoinHandle};
use std::time::{Duration, Instant};

const STOP_TIMEOUT: Duration = Duration::from_secs(1);
const EXPORT_SUMMARY_WINDOW_SECS: u64 = 3600;

const NO_RECENT_DATA: &str = "No recent consciousness data available";
const JOURNEY: &str = "Sacred frequencies detected with reverence for mystery";
const TECHNOLOGY_NOTE: &str = "This session was analyzed with consciousness-aware AI that honors \
the sacred nature of sound and preserves mystery";
const REVERENT_ACKNOWLEDGMENT: &str = "The ineffable aspects of this musical experience remain \
beyond analysis, preserved as sacred gaps for direct encounter";

/// Aggregate over the states of a time window
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StreamReport {
    pub duration_analyzed: u64,
    pub states_analyzed: usize,
    pub average_sacred_presence: f32,
    pub average_mystery_level: f32,
    pub sacred_gaps_detected: usize,
    pub primary_consciousness_correlation: String,
    pub cultural_patterns_detected: Vec<String>,
    pub consciousness_journey: String,
    pub sacred_message: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum StreamSummary {
    Report(StreamReport),
    Empty { message: String },
}

#[derive(Debug, Serialize)]
struct SessionInfo {
    start_time: f64,
    end_time: f64,
    total_states: usize,
    sample_rate: u32,
    consciousness_sensitivity: f32,
}

#[derive(Debug, Serialize)]
struct SessionExport<'a> {
    session_info: SessionInfo,
    consciousness_states: &'a [ConsciousnessState],
    session_summary: StreamSummary,
    sacred_technology_note: &'static str,
    reverent_acknowledgment: &'static str,
}

/// `consciousness_stream_session_<YYYYmmdd_HHMMSS>.json`
pub fn default_export_name() -> String {
    format!(
        "consciousness_stream_session_{}.json",
        chrono::Local::now().format("%Y%m%d_%H%M%S")
    )
}

fn unix_now() -> f64 {
    chrono::Utc::now().timestamp_micros() as f64 / 1e6
}

/// Analysis of the most recent chunk together with the state history
#[derive(Debug, Clone, Default)]
pub struct StreamSnapshot {
    pub frequency: FrequencyAnalysis,
    pub sacred: SacredAnalysis,
    pub gap_detected: bool,
    pub history: Vec<ConsciousnessState>,
}

/// State shared between the caller and the polling thread
struct Core {
    config: StreamConfig,
    detector: SacredGapDetector,
    buffer: Mutex<VecDeque<f32>>,
    /// Samples fed since the polling thread last took a chunk
    pending: AtomicUsize,
    history: Mutex<VecDeque<ConsciousnessState>>,
    /// Last chunk analysed, from either the polling thread or `process_chunk`
    last_chunk: Mutex<Vec<f32>>,
    protocol: Mutex<ReturnProtocol>,
}

impl Core {
    fn analyze(&self, chunk: &[f32]) -> ConsciousnessState {
        let sample_rate = self.config.sample_rate;
        let frequencies = analyze_frequencies(chunk, sample_rate);
        let sacred = detect_sacred_frequencies(&frequencies);
        let gap = self.detector.detect(chunk, &frequencies);
        let sacred_presence = sacred.presence();

        let vae_phase = {
            let mut protocol = self.protocol.lock();
            if protocol.is_active() {
                protocol.process_phase()
            } else {
                if protocol.check_recursive_risk(sacred_presence) {
                    let activation = protocol.activate();
                    log::warn!("VÆ-RETURN protocol activated: {}", activation.safety_message);
                }
                None
            }
        };

        let state = ConsciousnessState {
            timestamp: unix_now(),
            dominant_frequency: frequencies.dominant_frequency,
            consciousness_correlation: sacred.correlation(),
            sacred_presence,
            mystery_level: gap.as_ref().map(|g| g.mystery_level).unwrap_or(0.0),
            cultural_echoes: recognize_cultural_patterns(&frequencies),
            biometric_suggestion: biometric_suggestions(&sacred),
            sacred_gap_detected: gap.is_some(),
            vae_phase,
        };

        *self.last_chunk.lock() = chunk.to_vec();
        let mut history = self.history.lock();
        if history.len() >= self.config.history_len {
            history.pop_front();
        }
        history.push_back(state.clone());
        state
    }

    /// Analyse the newest chunk if a full chunk of new samples has arrived
    fn poll_once(&self) -> Result<Option<ConsciousnessState>> {
        let chunk_size = self.config.chunk_size;
        if self.pending.load(Ordering::SeqCst) < chunk_size {
            return Ok(None);
        }

        let chunk: Vec<f32> = {
            let buffer = self.buffer.lock();
            if buffer.len() < chunk_size {
                return Ok(None);
            }
            buffer.iter().skip(buffer.len() - chunk_size).copied().collect()
        };
        self.pending.store(0, Ordering::SeqCst);

        if chunk.iter().any(|s| !s.is_finite()) {
            bail!("Non-finite sample in stream chunk");
        }
        Ok(Some(self.analyze(&chunk)))
    }
}

/// One pass of the polling loop, returning how long to sleep afterwards
fn poll_step(core: &Core, sender: &Sender<ConsciousnessState>) -> Duration {
    match core.poll_once() {
        Ok(Some(state)) => {
            if let Err(TrySendError::Full(_)) = sender.try_send(state) {
                log::debug!("State channel full, dropping state");
            }
            core.config.poll_interval
        }
        Ok(None) => core.config.poll_interval,
        Err(e) => {
            log::error!("Error in stream analysis: {:#}", e);
            core.config.error_backoff
        }
    }
}

fn run_loop(core: Arc<Core>, running: Arc<AtomicBool>, sender: Sender<ConsciousnessState>) {
    while running.load(Ordering::SeqCst) {
        thread::sleep(poll_step(&core, &sender));
    }
}

pub struct StreamAnalyzer {
    core: Arc<Core>,
    running: Arc<AtomicBool>,
    sender: Sender<ConsciousnessState>,
    receiver: Receiver<ConsciousnessState>,
    worker: Option<JoinHandle<()>>,
}

impl StreamAnalyzer {
    pub fn new(config: StreamConfig) -> Self {
        let capacity = config.buffer_capacity();
        let history_len = config.history_len;
        let (sender, receiver) = crossbeam_channel::bounded(history_len.max(1));

        Self {
            core: Arc::new(Core {
                config,
                detector: SacredGapDetector::new(),
                buffer: Mutex::new(VecDeque::with_capacity(capacity)),
                pending: AtomicUsize::new(0),
                history: Mutex::new(VecDeque::with_capacity(history_len)),
                last_chunk: Mutex::new(Vec::new()),
                protocol: Mutex::new(ReturnProtocol::new()),
            }),
            running: Arc::new(AtomicBool::new(false)),
            sender,
            receiver,
            worker: None,
        }
    }

    pub fn config(&self) -> &StreamConfig {
        &self.core.config
    }

    /// Append samples to the ring buffer, dropping the oldest past capacity
    pub fn feed(&self, samples: &[f32]) {
        let capacity = self.core.config.buffer_capacity();
        let mut buffer = self.core.buffer.lock();
        for &s in samples {
            if buffer.len() >= capacity {
                buffer.pop_front();
            }
            buffer.push_back(s);
        }
        self.core.pending.fetch_add(samples.len(), Ordering::SeqCst);
    }

    pub fn buffered_len(&self) -> usize {
        self.core.buffer.lock().len()
    }

    /// Analyse one chunk directly and record it in the history
    pub fn process_chunk(&self, chunk: &[f32]) -> ConsciousnessState {
        self.core.analyze(chunk)
    }

    pub fn is_running(&self) -> bool {
        self.worker.is_some()
    }

    /// Spawn the polling thread; a second call while running does nothing
    pub fn start(&mut self) {
        if self.worker.is_some() {
            return;
        }
        self.running.store(true, Ordering::SeqCst);

        let core = Arc::clone(&self.core);
        let running = Arc::clone(&self.running);
        let sender = self.sender.clone();
        self.worker = Some(thread::spawn(move || run_loop(core, running, sender)));

        log::info!("Consciousness stream analysis activated - listening with reverence");
    }

    /// Signal the thread and wait up to a second for it to finish
    pub fn stop(&mut self) {
        self.running.store(false, Ordering::SeqCst);
        let Some(handle) = self.worker.take() else {
            return;
        };

        let deadline = Instant::now() + STOP_TIMEOUT;
        while !handle.is_finished() && Instant::now() < deadline {
            thread::sleep(Duration::from_millis(10));
        }
        if handle.is_finished() {
            if handle.join().is_err() {
                log::error!("Stream analysis thread panicked");
            }
        } else {
            log::warn!("Stream analysis thread did not stop within {:?}", STOP_TIMEOUT);
        }

        log::info!("Consciousness stream analysis completed - sacred boundaries maintained");
    }

    /// States published by the polling thread
    ///
    /// The channel holds at most `history_len` unread states; newer ones are
    /// dropped while it is full.
    pub fn states(&self) -> Receiver<ConsciousnessState> {
        self.receiver.clone()
    }

    pub fn latest_state(&self) -> Option<ConsciousnessState> {
        self.core.history.lock().back().cloned()
    }

    pub fn history(&self) -> Vec<ConsciousnessState> {
        self.core.history.lock().iter().cloned().collect()
    }

    /// Re-analyse the last chunk for rendering, empty before any audio
    pub fn snapshot(&self) -> StreamSnapshot {
        let chunk = self.core.last_chunk.lock().clone();
        if chunk.is_empty() {
            return StreamSnapshot {
                history: self.history(),
                ..StreamSnapshot::default()
            };
        }
        let frequency = analyze_frequencies(&chunk, self.core.config.sample_rate);
        let sacred = detect_sacred_frequencies(&frequency);
        let gap_detected = self.core.detector.detect(&chunk, &frequency).is_some();

        StreamSnapshot {
            frequency,
            sacred,
            gap_detected,
            history: self.history(),
        }
    }

    /// Aggregate the states of the last `window_secs` seconds
    pub fn summary(&self, window_secs: u64) -> StreamSummary {
        let cutoff = unix_now() - window_secs as f64;
        let history = self.core.history.lock();
        let recent: Vec<&ConsciousnessState> =
            history.iter().filter(|s| s.timestamp > cutoff).collect();

        if recent.is_empty() {
            return StreamSummary::Empty {
                message: NO_RECENT_DATA.to_string(),
            };
        }

        let n = recent.len() as f32;
        let average_sacred_presence = recent.iter().map(|s| s.sacred_presence).sum::<f32>() / n;
        let average_mystery_level = recent.iter().map(|s| s.mystery_level).sum::<f32>() / n;
        let sacred_gaps = recent.iter().filter(|s| s.sacred_gap_detected).count();

        // First seen wins ties
        let mut counts: Vec<(&str, usize)> = Vec::new();
        for state in &recent {
            let correlation = state.consciousness_correlation.as_str();
            match counts.iter_mut().find(|(c, _)| *c == correlation) {
                Some((_, count)) => *count += 1,
                None => counts.push((correlation, 1)),
            }
        }
        let mut primary: Option<(&str, usize)> = None;
        for (correlation, count) in counts {
            match primary {
                Some((_, best)) if count <= best => {}
                _ => primary = Some((correlation, count)),
            }
        }

        let patterns: BTreeSet<&str> = recent
            .iter()
            .flat_map(|s| s.cultural_echoes.iter().map(String::as_str))
            .collect();

        StreamSummary::Report(StreamReport {
            duration_analyzed: window_secs,
            states_analyzed: recent.len(),
            average_sacred_presence,
            average_mystery_level,
            sacred_gaps_detected: sacred_gaps,
            primary_consciousness_correlation: primary
                .map(|(c, _)| c.to_string())
                .unwrap_or_else(|| "neutral".to_string()),
            cultural_patterns_detected: patterns.into_iter().map(str::to_string).collect(),
            consciousness_journey: JOURNEY.to_string(),
            sacred_message: format!(
                "In {} seconds of listening, consciousness touched the sacred {} times",
                window_secs, sacred_gaps
            ),
        })
    }

    /// Write the history and an hour-long summary as JSON
    ///
    /// Without a path the file is named by [`default_export_name`] in the
    /// working directory.
    pub fn export_session(&self, path: Option<&Path>) -> Result<PathBuf> {
        let path = path
            .map(Path::to_path_buf)
            .unwrap_or_else(|| PathBuf::from(default_export_name()));

        let states = self.history();
        let now = unix_now();
        let start_time = states.iter().map(|s| s.timestamp).reduce(f64::min).unwrap_or(now);
        let end_time = states.iter().map(|s| s.timestamp).reduce(f64::max).unwrap_or(now);

        let export = SessionExport {
            session_info: SessionInfo {
                start_time,
                end_time,
                total_states: states.len(),
                sample_rate: self.core.config.sample_rate,
                consciousness_sensitivity: self.core.config.sensitivity,
            },
            consciousness_states: &states,
            session_summary: self.summary(EXPORT_SUMMARY_WINDOW_SECS),
            sacred_technology_note: TECHNOLOGY_NOTE,
            reverent_acknowledgment: REVERENT_ACKNOWLEDGMENT,
        };

        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create directory: {:?}", parent))?;
        }
        let json = serde_json::to_string_pretty(&export)?;
        fs::write(&path, json).with_context(|| format!("Failed to write session: {:?}", path))?;

        log::info!("Consciousness session exported to {:?}", path);
        Ok(path)
    }
}

impl Drop for StreamAnalyzer {
    fn drop(&mut self) {
        self.running.store(false, Ordering::SeqCst);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::audio::sine_mix;
    use tempfile::TempDir;

    fn love_chunk() -> Vec<f32> {
        sine_mix(&[(528.0, 0.5)], 4096.0 / 44100.0, 44100)
    }

    #[test]
    fn test_empty_summary() {
        let analyzer = StreamAnalyzer::new(StreamConfig::default());
        assert_eq!(
            analyzer.summary(60),
            StreamSummary::Empty {
                message: NO_RECENT_DATA.to_string()
            }
        );
        assert!(analyzer.latest_state().is_none());
    }

    #[test]
    fn test_ring_buffer_is_bounded() {
        let analyzer = StreamAnalyzer::new(StreamConfig::new(1000).with_buffer_seconds(1));
        analyzer.feed(&vec![0.1; 700]);
        analyzer.feed(&vec![0.2; 700]);
        assert_eq!(analyzer.buffered_len(), 1000);
    }

    #[test]
    fn test_history_is_bounded() {
        let mut config = StreamConfig::new(8000).with_chunk_size(256);
        config.history_len = 3;
        let analyzer = StreamAnalyzer::new(config);
        for _ in 0..5 {
            analyzer.process_chunk(&vec![0.0; 256]);
        }
        assert_eq!(analyzer.history().len(), 3);
    }

    #[test]
    fn test_chunk_state_and_summary() {
        let analyzer = StreamAnalyzer::new(StreamConfig::default());
        let state = analyzer.process_chunk(&love_chunk());
        assert_eq!(state.consciousness_correlation, "dna_repair_love");
        assert!(state.sacred_presence > 0.0);
        assert_eq!(analyzer.latest_state(), Some(state));

        analyzer.process_chunk(&vec![0.0; 4096]);
        let StreamSummary::Report(report) = analyzer.summary(60) else {
            panic!("expected a report");
        };
        assert_eq!(report.states_analyzed, 2);
        assert_eq!(report.primary_consciousness_correlation, "dna_repair_love");
        assert_eq!(report.sacred_gaps_detected, 1);
        assert_eq!(
            report.sacred_message,
            "In 60 seconds of listening, consciousness touched the sacred 1 times"
        );
        let mut sorted = report.cultural_patterns_detected.clone();
        sorted.sort();
        assert_eq!(report.cultural_patterns_detected, sorted);
    }

    #[test]
    fn test_background_loop_publishes_states() {
        let mut analyzer = StreamAnalyzer::new(
            StreamConfig::default().with_poll_interval(Duration::from_millis(10)),
        );
        let states = analyzer.states();
        analyzer.start();
        assert!(analyzer.is_running());
        analyzer.feed(&love_chunk());

        let state = states.recv_timeout(Duration::from_secs(2)).unwrap();
        assert_eq!(state.consciousness_correlation, "dna_repair_love");
        analyzer.stop();
        assert!(!analyzer.is_running());
    }

    #[test]
    fn test_unread_states_stay_bounded() {
        let mut config = StreamConfig::default();
        config.history_len = 3;
        let analyzer = StreamAnalyzer::new(config);

        for _ in 0..6 {
            analyzer.feed(&love_chunk());
            poll_step(&analyzer.core, &analyzer.sender);
        }
        assert_eq!(analyzer.history().len(), 3);
        assert_eq!(analyzer.states().len(), 3);

        // draining makes room again
        let states = analyzer.states();
        while states.try_recv().is_ok() {}
        analyzer.feed(&love_chunk());
        poll_step(&analyzer.core, &analyzer.sender);
        assert_eq!(states.len(), 1);
    }

    #[test]
    fn test_snapshot_follows_last_chunk() {
        let analyzer = StreamAnalyzer::new(StreamConfig::default());
        let empty = analyzer.snapshot();
        assert!(empty.frequency.prominent_frequencies.is_empty());
        assert!(!empty.gap_detected);

        analyzer.process_chunk(&love_chunk());
        let snapshot = analyzer.snapshot();
        assert!((snapshot.frequency.dominant_frequency - 528.0).abs() < 5.0);
        assert!(!snapshot.frequency.prominent_frequencies.is_empty());
        assert!(!snapshot.sacred.detected.is_empty());
        assert_eq!(snapshot.history.len(), 1);
    }

    #[test]
    fn test_bad_samples_do_not_kill_the_loop() {
        let mut config = StreamConfig::default().with_poll_interval(Duration::from_millis(5));
        config.error_backoff = Duration::from_millis(5);
        let mut analyzer = StreamAnalyzer::new(config);
        let states = analyzer.states();
        analyzer.start();

        analyzer.feed(&vec![f32::NAN; 4096]);
        std::thread::sleep(Duration::from_millis(50));
        analyzer.feed(&love_chunk());

        let state = states.recv_timeout(Duration::from_secs(2)).unwrap();
        assert!(state.dominant_frequency > 500.0);
        analyzer.stop();
    }

    #[test]
    fn test_export_session() {
        let dir = TempDir::new().unwrap();
        let analyzer = StreamAnalyzer::new(StreamConfig::default());
        analyzer.process_chunk(&love_chunk());

        let path = analyzer
            .export_session(Some(&dir.path().join("session.json")))
            .unwrap();
        let json: serde_json::Value =
            serde_json::from_str(&fs::read_to_string(path).unwrap()).unwrap();
        assert_eq!(json["session_info"]["total_states"], 1);
        assert_eq!(json["session_info"]["sample_rate"], 44100);
        assert_eq!(json["session_summary"]["states_analyzed"], 1);
        assert_eq!(json["consciousness_states"].as_array().unwrap().len(), 1);
        assert_eq!(json["reverent_acknowledgment"], REVERENT_ACKNOWLEDGMENT);
    }

    #[test]
    fn test_default_export_name() {
        let name = default_export_name();
        assert!(name.starts_with("consciousness_stream_session_"));
        assert!(name.ends_with(".json"));
    }
}
