//! Progress reporting for council execution
//!
//! Both reporters implement the [`EventSink`] port and react to the
//! deliberation event stream; they never reach into the use case.

use colored::Colorize;
use council_application::ports::event_sink::EventSink;
use council_domain::core::string::truncate;
use council_domain::{DeliberationEvent, Stage};
use indicatif::{MultiProgress, ProgressBar, ProgressStyle};
use std::sync::Mutex;
use std::time::Duration;

/// Reports progress with a live spinner per stage
pub struct ProgressReporter {
    multi: MultiProgress,
    stage_bar: Mutex<Option<ProgressBar>>,
}

impl ProgressReporter {
    pub fn new() -> Self {
        Self {
            multi: MultiProgress::new(),
            stage_bar: Mutex::new(None),
        }
    }

    fn spinner_style() -> ProgressStyle {
        ProgressStyle::default_spinner()
            .template("{spinner:.green} {prefix:.bold.cyan} {msg}")
            .unwrap()
    }

    fn start_stage(&self, stage: Stage) {
        let pb = self.multi.add(ProgressBar::new_spinner());
        pb.set_style(Self::spinner_style());
        pb.set_prefix(stage.display_name().to_string());
        pb.set_message("running...");
        pb.enable_steady_tick(Duration::from_millis(100));

        *self.stage_bar.lock().unwrap() = Some(pb);
    }

    fn finish_stage(&self, message: String) {
        if let Some(pb) = self.stage_bar.lock().unwrap().take() {
            pb.finish_with_message(message);
        }
    }

    fn abandon_stage(&self, message: String) {
        if let Some(pb) = self.stage_bar.lock().unwrap().take() {
            pb.abandon_with_message(message);
        }
    }
}

impl Default for ProgressReporter {
    fn default() -> Self {
        Self::new()
    }
}

impl EventSink for ProgressReporter {
    fn emit(&self, event: &DeliberationEvent) {
        match event {
            DeliberationEvent::Stage1Start => self.start_stage(Stage::Collect),
            DeliberationEvent::Stage1Complete { responses } => {
                self.finish_stage(format!(
                    "{} ({}/{} models answered)",
                    "complete!".green(),
                    responses.success_count(),
                    responses.len()
                ));
            }
            DeliberationEvent::Stage2Start => self.start_stage(Stage::Rank),
            DeliberationEvent::Stage2Complete { evaluations, .. } => {
                self.finish_stage(format!(
                    "{} ({} rankings collected)",
                    "complete!".green(),
                    evaluations.len()
                ));
            }
            DeliberationEvent::Stage3Start => self.start_stage(Stage::Synthesize),
            DeliberationEvent::Stage3Complete { synthesis } => {
                self.finish_stage(format!(
                    "{} (by {})",
                    "complete!".green(),
                    synthesis.chairman
                ));
            }
            DeliberationEvent::Complete => {}
            DeliberationEvent::Error { message } => {
                self.abandon_stage(format!("{} {}", "failed:".red(), truncate(message, 80)));
            }
            DeliberationEvent::Cancelled => {
                self.abandon_stage("cancelled".yellow().to_string());
            }
        }
    }
}

/// Plain println progress, safe to interleave with log output.
pub struct SimpleProgress;

impl EventSink for SimpleProgress {
    fn emit(&self, event: &DeliberationEvent) {
        match event {
            DeliberationEvent::Stage1Start => {
                println!("{} {}", "->".cyan(), Stage::Collect.display_name().bold());
            }
            DeliberationEvent::Stage1Complete { responses } => {
                for response in responses.responses() {
                    if response.is_success() {
                        println!("  {} {}", "v".green(), response.model);
                    } else {
                        println!(
                            "  {} {} ({})",
                            "x".red(),
                            response.model,
                            truncate(response.error.as_deref().unwrap_or("cancelled"), 60)
                        );
                    }
                }
                println!();
            }
            DeliberationEvent::Stage2Start => {
                println!("{} {}", "->".cyan(), Stage::Rank.display_name().bold());
            }
            DeliberationEvent::Stage2Complete { evaluations, .. } => {
                for evaluation in evaluations {
                    if evaluation.ranking.is_empty() {
                        println!("  {} {} (no ranking parsed)", "x".red(), evaluation.evaluator);
                    } else {
                        println!("  {} {}", "v".green(), evaluation.evaluator);
                    }
                }
                println!();
            }
            DeliberationEvent::Stage3Start => {
                println!(
                    "{} {}",
                    "->".cyan(),
                    Stage::Synthesize.display_name().bold()
                );
            }
            DeliberationEvent::Stage3Complete { synthesis } => {
                println!("  {} {}", "v".green(), synthesis.chairman);
                println!();
            }
            DeliberationEvent::Complete => {}
            DeliberationEvent::Error { message } => {
                println!("{} {}", "x".red(), message);
            }
            DeliberationEvent::Cancelled => {
                println!("{}", "cancelled".yellow());
            }
        }
    }
}
