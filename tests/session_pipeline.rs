use aural_sentience::analysis::FastAnalyzer;
use aural_sentience::audio::sine_mix;
use aural_sentience::validation::validate_session;
use aural_sentience::vault::PersonalVault;
use aural_sentience::lexicon::ResonanceLexicon;
use aural_sentience::{AuralSentienceEngine, EngineConfig, SessionConfig, SessionPipeline};
use rand::rngs::StdRng;
use rand::SeedableRng;
use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

const SR: u32 = 22050;

fn write_wav(path: &Path, samples: &[f32]) {
    let spec = hound::WavSpec {
        channels: 1,
        sample_rate: SR,
        bits_per_sample: 16,
        sample_format: hound::SampleFormat::Int,
    };
    let mut writer = hound::WavWriter::create(path, spec).unwrap();
    for s in samples {
        writer.write_sample((s * i16::MAX as f32) as i16).unwrap();
    }
    writer.finalize().unwrap();
}

/// Two short tones in `dir/audio`
fn create_audio(dir: &Path) -> Vec<PathBuf> {
    let audio_dir = dir.join("audio");
    fs::create_dir_all(&audio_dir).unwrap();
    let love = audio_dir.join("love.wav");
    let awakening = audio_dir.join("awakening.wav");
    write_wav(&love, &sine_mix(&[(528.0, 0.6)], 2.0, SR));
    write_wav(&awakening, &sine_mix(&[(741.0, 0.5), (963.0, 0.2)], 2.0, SR));
    vec![love, awakening]
}

fn pipeline(dir: &Path, visuals: bool) -> SessionPipeline<FastAnalyzer> {
    let vault = PersonalVault::load(dir.join("vault.json")).unwrap();
    let engine = AuralSentienceEngine::new(EngineConfig::new(), FastAnalyzer::new(), vault);
    let config = SessionConfig::new(dir.join("out"))
        .with_session_id("20250101_120000")
        .with_visuals(visuals);
    SessionPipeline::new(config, engine, ResonanceLexicon::new()).unwrap()
}

#[test]
fn test_session_writes_every_report() {
    let dir = TempDir::new().unwrap();
    let files = create_audio(dir.path());
    let pipeline = pipeline(dir.path(), true);

    let reports = pipeline
        .process_files(&files, &mut StdRng::seed_from_u64(1))
        .unwrap();
    assert_eq!(reports.len(), 2);

    let session_dir = pipeline.session_dir();
    assert!(session_dir.ends_with("aural_sentience_session_20250101_120000"));

    let organizer = pipeline.organizer();
    for file in &files {
        assert!(organizer.technical_path(file).exists());
        assert!(organizer.poetic_path(file).exists());
        assert!(organizer.master_path(file).exists());
        assert!(organizer.summary_path(file).exists());
        assert!(organizer.visualization_path(file).exists());
    }
    assert!(organizer.comparative_path().exists());

    let validation = validate_session(session_dir).unwrap();
    assert_eq!(validation.session_id, "20250101_120000");
    assert_eq!(validation.reports, 2);
}

#[test]
fn test_missing_files_are_skipped() {
    let dir = TempDir::new().unwrap();
    let mut files = create_audio(dir.path());
    files.truncate(1);
    files.push(dir.path().join("audio/absent.wav"));
    let pipeline = pipeline(dir.path(), false);

    let reports = pipeline
        .process_files(&files, &mut StdRng::seed_from_u64(2))
        .unwrap();
    assert_eq!(reports.len(), 1);
    assert!(reports[0].visualization_file.is_none());

    // a single report gets no comparison, but the summary is always written
    let organizer = pipeline.organizer();
    assert!(!organizer.comparative_path().exists());
    assert!(organizer.session_summary_path().exists());
    assert!(!organizer.visualization_path(&files[0]).exists());
}

#[test]
fn test_witness_combined_field() {
    let dir = TempDir::new().unwrap();
    let files = create_audio(dir.path());
    let pipeline = pipeline(dir.path(), false);

    let reports = pipeline
        .witness_files(&files, &mut StdRng::seed_from_u64(3))
        .unwrap();
    assert_eq!(reports.len(), 2);

    let combined = fs::read_to_string(pipeline.organizer().combined_field_path()).unwrap();
    let json: serde_json::Value = serde_json::from_str(&combined).unwrap();
    assert_eq!(json["total_files_witnessed"], 2);
    assert!(pipeline.organizer().resonance_report_path(&files[0]).exists());
}

#[test]
fn test_validation_names_missing_master_report() {
    let dir = TempDir::new().unwrap();
    let files = create_audio(dir.path());
    let pipeline = pipeline(dir.path(), false);
    pipeline
        .process_files(&files, &mut StdRng::seed_from_u64(4))
        .unwrap();

    let master = pipeline.organizer().master_path(&files[1]);
    fs::remove_file(&master).unwrap();
    let err = validate_session(pipeline.session_dir()).unwrap_err();
    let name = master.file_name().unwrap().to_string_lossy().into_owned();
    assert!(format!("{:#}", err).contains(&name));
}

#[test]
fn test_vault_notes_follow_session_setting() {
    let dir = TempDir::new().unwrap();
    let files = create_audio(dir.path());
    let mut vault = PersonalVault::load(dir.path().join("vault.json")).unwrap();
    vault
        .add_association(&files[0], 1.0, "First dance", Some("joy"))
        .unwrap();

    let technical = |include: bool, subdir: &str| {
        let vault = PersonalVault::load(dir.path().join("vault.json")).unwrap();
        let engine = AuralSentienceEngine::new(EngineConfig::new(), FastAnalyzer::new(), vault);
        let config = SessionConfig::new(dir.path().join(subdir))
            .with_session_id("20250101_120000")
            .with_visuals(false)
            .with_vault(include);
        let pipeline = SessionPipeline::new(config, engine, ResonanceLexicon::new()).unwrap();
        pipeline
            .process_file_complete(&files[0], &mut StdRng::seed_from_u64(5))
            .unwrap();
        let text = fs::read_to_string(pipeline.organizer().technical_path(&files[0])).unwrap();
        serde_json::from_str::<serde_json::Value>(&text).unwrap()
    };

    let with_notes = technical(true, "with");
    assert_eq!(
        with_notes["personal_vault"]["associations"][0]["description"],
        "First dance"
    );
    let without = technical(false, "without");
    assert!(without.get("personal_vault").is_none());
}
