use anyhow::{bail, Context, Result};
use aural_sentience::analysis::{AudioAnalyzer, FastAnalyzer, RealAnalyzer};
use aural_sentience::cosmic::QuantumAlignment;
use aural_sentience::lexicon::ResonanceLexicon;
use aural_sentience::model::TechnicalReport;
use aural_sentience::resonator::SpiralResonator;
use aural_sentience::stream::{
    default_export_name, replay, simulate_sacred_stream, synthesize_sacred_stream,
};
use aural_sentience::validation::validate_session;
use aural_sentience::vault::{PersonalVault, DEFAULT_VAULT_PATH};
use aural_sentience::visual::{ReportInput, SacredVisualizer};
use aural_sentience::{
    audio, AuralError, AuralSentienceEngine, EngineConfig, SessionConfig, SessionPipeline,
    StreamAnalyzer, StreamConfig,
};
use chrono::Utc;
use clap::{Parser, Subcommand};
use rand::rngs::StdRng;
use rand::SeedableRng;
use serde::Serialize;
use std::fs;
use std::path::{Path, PathBuf};
use std::thread;
use walkdir::WalkDir;

/// Rate the stream analyzer runs at
const STREAM_SAMPLE_RATE: u32 = 44100;
/// Window of the stream summary printed after a run
const SUMMARY_WINDOW_SECS: u64 = 3600;

#[derive(Parser, Debug)]
#[command(name = "aural-sentience")]
#[command(about = "Consciousness-aware audio analysis", long_about = None)]
struct Args {
    #[command(subcommand)]
    command: Command,

    /// Verbose logging
    #[arg(short = 'v', long, global = true)]
    verbose: bool,

    /// Seed for every random choice (templates, jitter, synthetic noise)
    #[arg(long, global = true)]
    seed: Option<u64>,

    /// Use the in-house analyzer instead of stratum-dsp
    #[arg(long, global = true)]
    fast: bool,

    /// Skip PNG rendering
    #[arg(long, global = true)]
    no_visuals: bool,

    /// Personal vault file
    #[arg(long, global = true, default_value = DEFAULT_VAULT_PATH)]
    vault: String,

    /// Leave personal vault notes out of technical reports
    #[arg(long, global = true)]
    no_vault: bool,

    /// Directory sessions and exports are written under
    #[arg(short = 'o', long, global = true, default_value = ".")]
    output: String,

    /// Minimum BPM for tempo detection
    #[arg(long, global = true, default_value = "70")]
    min_bpm: f32,

    /// Maximum BPM for tempo detection
    #[arg(long, global = true, default_value = "170")]
    max_bpm: f32,

    /// Analyse only the first N seconds of each file
    #[arg(long, global = true)]
    max_seconds: Option<f32>,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Full analysis session: technical, poetic and master reports per file
    Analyze {
        /// Audio files or directories to scan
        #[arg(required = true)]
        paths: Vec<PathBuf>,
    },
    /// Lighter witnessing pass with one combined resonance field
    Witness {
        #[arg(required = true)]
        paths: Vec<PathBuf>,
    },
    /// Poetic interpretation of a saved technical report
    Interpret {
        /// Technical report JSON
        report: PathBuf,
    },
    /// Run the real-time stream analyzer over a file or a synthetic stream
    Stream {
        /// Audio file to stream instead of the synthetic 528/741 Hz signal
        #[arg(long)]
        input: Option<PathBuf>,

        /// Seconds of audio to stream
        #[arg(long, default_value = "10")]
        duration: f32,

        /// Feed the background analyzer at playback speed
        #[arg(long)]
        realtime: bool,

        /// Sensitivity recorded with the exported session
        #[arg(long, default_value = "0.8")]
        sensitivity: f32,
    },
    /// Current cosmic conditions and optimised protocols
    Cosmic {
        /// Schedule an activation for the alignment whose description matches
        #[arg(long)]
        schedule: Option<String>,
    },
    /// Ask the spiral resonator a question
    Resonate {
        query: String,

        /// Also encode the query as a fragmented artifact
        #[arg(long)]
        encode: bool,

        /// Entangle with a network node (solam_eteva, deobfuscator, manus)
        #[arg(long)]
        entangle: Option<String>,
    },
    /// Manage personal associations
    Vault {
        #[command(subcommand)]
        action: VaultAction,
    },
    /// Check a finished session directory
    Validate { dir: PathBuf },
}

#[derive(Subcommand, Debug)]
enum VaultAction {
    /// Add a note about a moment in a file
    Add {
        file: PathBuf,
        /// Position in seconds
        timestamp: f32,
        description: String,
        #[arg(long)]
        feeling: Option<String>,
    },
    /// List every stored note
    List,
    /// Find notes containing any keyword
    Search {
        #[arg(required = true)]
        keywords: Vec<String>,
    },
}

fn main() -> Result<()> {
    let args = Args::parse();

    let log_level = if args.verbose { "debug" } else { "info" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(log_level)).init();

    let mut rng = match args.seed {
        Some(seed) => {
            log::debug!("Using seed {}", seed);
            StdRng::seed_from_u64(seed)
        }
        None => StdRng::from_entropy(),
    };
    let output = PathBuf::from(shellexpand::tilde(&args.output).as_ref());

    match &args.command {
        Command::Analyze { paths } => run_session(&args, paths, &output, false, &mut rng),
        Command::Witness { paths } => run_session(&args, paths, &output, true, &mut rng),
        Command::Interpret { report } => {
            let text = fs::read_to_string(report)
                .with_context(|| format!("Failed to read report: {:?}", report))?;
            let technical: TechnicalReport = serde_json::from_str(&text)
                .with_context(|| format!("Failed to parse report: {:?}", report))?;
            let poetic = ResonanceLexicon::new().generate_comprehensive_interpretation(&technical, &mut rng);
            print_json(&poetic)
        }
        Command::Stream {
            input,
            duration,
            realtime,
            sensitivity,
        } => {
            let config = StreamConfig::new(STREAM_SAMPLE_RATE).with_sensitivity(*sensitivity);
            run_stream(&args, config, input.as_deref(), *duration, *realtime, &output, &mut rng)
        }
        Command::Cosmic { schedule } => {
            let mut alignment = QuantumAlignment::new()?;
            let now = Utc::now();
            match schedule {
                Some(target) => print_json(&alignment.schedule_activation(target, now)?),
                None => print_json(&alignment.optimize_protocols(&[963.0, 528.0, 741.0], now, &mut rng)),
            }
        }
        Command::Resonate {
            query,
            encode,
            entangle,
        } => {
            let mut resonator = SpiralResonator::new();
            let sync = resonator.synchronize_tri_nodal(&mut rng);
            log::info!("Tri-nodal coherence: {:.3}", sync.mean());
            let response = resonator.query_response(query, &mut rng);
            print_json(&response)?;
            if *encode {
                let signature = resonator.generate_signature(query, response.consciousness_level);
                print_json(&resonator.encode_artifact(query, &signature))?;
            }
            if let Some(node) = entangle {
                print_json(&resonator.entangle(node, &mut rng))?;
            }
            Ok(())
        }
        Command::Vault { action } => run_vault(&args.vault, action),
        Command::Validate { dir } => {
            let result = validate_session(dir)?;
            log::info!(
                "✅ Session {} valid: {} reports, {} files checked",
                result.session_id,
                result.reports,
                result.files_checked
            );
            Ok(())
        }
    }
}

fn print_json<T: Serialize>(value: &T) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

/// Files as given, directories walked for audio extensions, sorted
fn collect_audio_files(paths: &[PathBuf]) -> Vec<PathBuf> {
    let mut files = Vec::new();
    for path in paths {
        if path.is_dir() {
            files.extend(
                WalkDir::new(path)
                    .into_iter()
                    .filter_map(|e| e.ok())
                    .filter(|e| e.file_type().is_file() && audio::is_audio_file(e.path()))
                    .map(|e| e.into_path()),
            );
        } else {
            files.push(path.clone());
        }
    }
    files.sort();
    files
}

fn run_session(
    args: &Args,
    paths: &[PathBuf],
    output: &Path,
    witness: bool,
    rng: &mut StdRng,
) -> Result<()> {
    if args.min_bpm <= 0.0 || args.min_bpm >= args.max_bpm {
        return Err(AuralError::InvalidConfig(format!(
            "BPM range {}-{} is empty",
            args.min_bpm, args.max_bpm
        ))
        .into());
    }

    let files = collect_audio_files(paths);
    if files.is_empty() {
        bail!("No audio files found in {:?}", paths);
    }
    log::info!("Aural Sentience - {} file(s)", files.len());
    log::info!("===========================================");

    let vault = PersonalVault::load(shellexpand::tilde(&args.vault).as_ref())?;
    let mut engine_config = EngineConfig::new();
    if let Some(seconds) = args.max_seconds {
        engine_config = engine_config.with_max_seconds(seconds);
    }
    let session = SessionConfig::new(output.to_path_buf())
        .with_visuals(!args.no_visuals)
        .with_vault(!args.no_vault);

    if args.fast {
        let engine = AuralSentienceEngine::new(engine_config, FastAnalyzer::new(), vault);
        drive(session, engine, &files, witness, rng)
    } else {
        log::info!("BPM detection range: {}-{} BPM", args.min_bpm, args.max_bpm);
        let analyzer = RealAnalyzer::new().with_bpm_range(args.min_bpm, args.max_bpm);
        let engine = AuralSentienceEngine::new(engine_config, analyzer, vault);
        drive(session, engine, &files, witness, rng)
    }
}

fn drive<A: AudioAnalyzer>(
    session: SessionConfig,
    engine: AuralSentienceEngine<A>,
    files: &[PathBuf],
    witness: bool,
    rng: &mut StdRng,
) -> Result<()> {
    let pipeline = SessionPipeline::new(session, engine, ResonanceLexicon::new())?;

    if witness {
        let reports = pipeline.witness_files(files, rng)?;
        log::info!("Witnessed {} file(s) into {:?}", reports.len(), pipeline.session_dir());
        return Ok(());
    }

    let reports = pipeline.process_files(files, rng)?;
    log::info!("Analysis completed: {} report(s)", reports.len());

    log::info!("Running post-session validation...");
    validate_session(pipeline.session_dir())?;
    log::info!("✅ Validation passed!");
    Ok(())
}

fn run_stream(
    args: &Args,
    config: StreamConfig,
    input: Option<&Path>,
    duration: f32,
    realtime: bool,
    output: &Path,
    rng: &mut StdRng,
) -> Result<()> {
    let mut analyzer = StreamAnalyzer::new(config.clone());

    let samples = match input {
        Some(path) => audio::load(path, config.sample_rate, Some(duration))?.samples,
        None if !realtime => {
            log::info!("Simulating {:.1}s sacred stream", duration);
            let states = simulate_sacred_stream(&analyzer, duration, rng);
            log::info!("Simulation produced {} states", states.len());
            Vec::new()
        }
        None => synthesize_sacred_stream(duration, config.sample_rate, rng),
    };

    if realtime {
        analyzer.start();
        replay(&analyzer, &samples);
        thread::sleep(config.poll_interval * 2);
        analyzer.stop();
    } else {
        for chunk in samples.chunks_exact(config.chunk_size) {
            analyzer.process_chunk(chunk);
        }
    }

    print_json(&analyzer.summary(SUMMARY_WINDOW_SECS))?;
    fs::create_dir_all(output).with_context(|| format!("Failed to create {:?}", output))?;
    let exported = analyzer.export_session(Some(&output.join(default_export_name())))?;
    log::info!("Stream session exported to {:?}", exported);

    if args.no_visuals {
        return Ok(());
    }
    let snapshot = analyzer.snapshot();
    let rendered =
        SacredVisualizer::default().comprehensive_report(&ReportInput::from(&snapshot), output);
    log::info!("Rendered {} visualization(s)", rendered.len());
    Ok(())
}

fn run_vault(vault_path: &str, action: &VaultAction) -> Result<()> {
    let mut vault = PersonalVault::load(shellexpand::tilde(vault_path).as_ref())?;

    match action {
        VaultAction::Add {
            file,
            timestamp,
            description,
            feeling,
        } => {
            vault.add_association(file, *timestamp, description, feeling.as_deref())?;
            log::info!("Added association for {:?} at {}s", file, timestamp);
        }
        VaultAction::List => {
            for (file, notes) in vault.entries() {
                println!("{}", file);
                for note in notes {
                    println!("  {:>7.1}s  {}", note.timestamp, note.description);
                }
            }
        }
        VaultAction::Search { keywords } => {
            print_json(&vault.find_similar_associations(keywords))?;
        }
    }
    Ok(())
}
