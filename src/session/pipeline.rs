//! Session orchestration

use super::config::SessionConfig;
use super::organizer::SessionOrganizer;
use super::summary::render_human_summary;
use super::synthesis::{compile_master_report, create_comparative_analysis, SESSION_PHILOSOPHY};
use crate::analysis::AudioAnalyzer;
use crate::engine::{now_iso, AuralSentienceEngine};
use crate::lexicon::ResonanceLexicon;
use crate::model::{CombinedResonanceField, MasterReport, ResonanceFieldReport, SessionSummary};
use crate::tables::{WITNESS_APPROACH, WITNESS_PHILOSOPHY};
use crate::visual;
use anyhow::{Context, Result};
use rand::Rng;
use std::fs;
use std::path::{Path, PathBuf};

/// Runs every file of a session through analysis, interpretation and reporting
pub struct SessionPipeline<A: AudioAnalyzer> {
    config: SessionConfig,
    organizer: SessionOrganizer,
    engine: AuralSentienceEngine<A>,
    lexicon: ResonanceLexicon,
}

impl<A: AudioAnalyzer> SessionPipeline<A> {
    pub fn new(
        config: SessionConfig,
        engine: AuralSentienceEngine<A>,
        lexicon: ResonanceLexicon,
    ) -> Result<Self> {
        let organizer = SessionOrganizer::new(config.session_dir());
        organizer.init()?;

        Ok(Self {
            config,
            organizer,
            engine,
            lexicon,
        })
    }

    pub fn session_dir(&self) -> &Path {
        self.organizer.session_dir()
    }

    pub fn organizer(&self) -> &SessionOrganizer {
        &self.organizer
    }

    /// Analyse, interpret, render and write every report for one file
    pub fn process_file_complete<R: Rng + ?Sized>(
        &self,
        path: &Path,
        rng: &mut R,
    ) -> Result<MasterReport> {
        log::info!("Step 1: Performing technical analysis...");
        let (audio, features) = self.engine.analyze_file(path)?;
        let technical =
            self.engine
                .build_report(path, &audio, &features, self.config.include_vault, rng);

        log::info!("Step 2: Generating poetic interpretation...");
        let poetic = self.lexicon.generate_comprehensive_interpretation(&technical, rng);

        let visualization_file = if self.config.render_visuals {
            log::info!("Step 3: Creating visualization...");
            let png = self.organizer.visualization_path(path);
            match visual::render_analysis_overview(&audio, &features, &technical.sacred_gaps, &png)
            {
                Ok(()) => Some(png.to_string_lossy().into_owned()),
                Err(e) => {
                    log::warn!("Visualization failed for {:?}: {:#}", path, e);
                    None
                }
            }
        } else {
            log::debug!("Step 3: Visualization disabled");
            None
        };

        log::info!("Step 4: Compiling master report...");
        let master = compile_master_report(
            path,
            &self.config.session_id,
            technical,
            poetic,
            visualization_file,
        );

        self.organizer
            .write_json(&self.organizer.technical_path(path), &master.technical_analysis)?;
        self.organizer
            .write_json(&self.organizer.poetic_path(path), &master.poetic_interpretation)?;
        self.organizer
            .write_json(&self.organizer.master_path(path), &master)?;

        let summary_path = self.organizer.summary_path(path);
        fs::write(&summary_path, render_human_summary(&master))
            .with_context(|| format!("Failed to write summary: {:?}", summary_path))?;

        log::info!("Complete analysis saved to: {:?}", self.organizer.session_dir());
        Ok(master)
    }

    /// Process every file, then write the comparison and session summary
    ///
    /// Missing or failing files are logged and skipped.
    pub fn process_files<R: Rng + ?Sized>(
        &self,
        paths: &[PathBuf],
        rng: &mut R,
    ) -> Result<Vec<MasterReport>> {
        let mut reports = Vec::new();

        for (i, path) in paths.iter().enumerate() {
            log::info!("[{}/{}] Processing: {:?}", i + 1, paths.len(), path);
            if !path.exists() {
                log::warn!("File not found: {:?}", path);
                continue;
            }
            match self.process_file_complete(path, rng) {
                Ok(report) => reports.push(report),
                Err(e) => log::warn!("Failed to analyze {:?}: {:#}", path, e),
            }
        }

        if reports.len() > 1 {
            let comparison = create_comparative_analysis(&reports);
            let comparative_path = self.organizer.comparative_path();
            self.organizer.write_json(&comparative_path, &comparison)?;
            log::info!("Comparative analysis saved to: {:?}", comparative_path);
        }

        let summary = SessionSummary {
            session_id: self.config.session_id.clone(),
            timestamp: now_iso(),
            total_files_processed: reports.len(),
            output_directory: self.organizer.session_dir().to_string_lossy().into_owned(),
            system_philosophy: SESSION_PHILOSOPHY.to_string(),
            reports,
        };
        let summary_path = self.organizer.session_summary_path();
        self.organizer.write_json(&summary_path, &summary)?;
        log::info!("Session summary: {:?}", summary_path);

        Ok(summary.reports)
    }

    /// Witnessing pass: one resonance report per file plus a combined field
    pub fn witness_files<R: Rng + ?Sized>(
        &self,
        paths: &[PathBuf],
        rng: &mut R,
    ) -> Result<Vec<ResonanceFieldReport>> {
        let mut reports = Vec::new();

        for (i, path) in paths.iter().enumerate() {
            log::info!("[{}/{}] Witnessing: {:?}", i + 1, paths.len(), path);
            if !path.exists() {
                log::warn!("File not found: {:?}", path);
                continue;
            }
            match self.engine.witness_file(path, None, rng) {
                Ok(report) => {
                    self.organizer
                        .write_json(&self.organizer.resonance_report_path(path), &report)?;
                    reports.push(report);
                }
                Err(e) => log::warn!("Failed to witness {:?}: {:#}", path, e),
            }
        }

        let combined = CombinedResonanceField {
            witnessing_timestamp: now_iso(),
            approach: WITNESS_APPROACH.to_string(),
            philosophy: WITNESS_PHILOSOPHY.to_string(),
            total_files_witnessed: reports.len(),
            resonance_fields: reports,
        };
        self.organizer
            .write_json(&self.organizer.combined_field_path(), &combined)?;

        Ok(combined.resonance_fields)
    }
}
