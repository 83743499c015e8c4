// Workflow module - wizard session state
//
// The front-end flow is a four-step linear progression: upload audio,
// analyze it, generate a track, show the result. The session is an
// explicit state struct with validated transitions and owned artifacts;
// out-of-order calls return a typed error instead of silently reordering
// the flow.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::analysis::FeatureReport;
use crate::audio::SampleBuffer;
use crate::generation::GeneratedTrack;

/// Steps of the wizard, in order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WizardStep {
    /// Waiting for audio
    Upload,
    /// Audio attached, waiting for feature extraction
    Analysis,
    /// Features attached, waiting for generation
    Generation,
    /// Track attached; the session is complete
    Done,
}

/// Errors from out-of-order session use.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum WorkflowError {
    #[error("session is at step {actual:?}, expected {expected:?}")]
    StepMismatch {
        expected: WizardStep,
        actual: WizardStep,
    },
}

/// One user's progression through the wizard.
#[derive(Debug)]
pub struct Session {
    step: WizardStep,
    buffer: Option<SampleBuffer>,
    report: Option<FeatureReport>,
    prompt: Option<String>,
    track: Option<GeneratedTrack>,
}

impl Default for Session {
    fn default() -> Self {
        Self::new()
    }
}

impl Session {
    /// Start a fresh session at the upload step.
    pub fn new() -> Self {
        Self {
            step: WizardStep::Upload,
            buffer: None,
            report: None,
            prompt: None,
            track: None,
        }
    }

    /// Current step.
    pub fn step(&self) -> WizardStep {
        self.step
    }

    fn expect_step(&self, expected: WizardStep) -> Result<(), WorkflowError> {
        if self.step != expected {
            return Err(WorkflowError::StepMismatch {
                expected,
                actual: self.step,
            });
        }
        Ok(())
    }

    /// Attach decoded audio; Upload → Analysis.
    pub fn attach_audio(&mut self, buffer: SampleBuffer) -> Result<(), WorkflowError> {
        self.expect_step(WizardStep::Upload)?;
        self.buffer = Some(buffer);
        self.step = WizardStep::Analysis;
        Ok(())
    }

    /// Attach the feature report and drafted prompt; Analysis → Generation.
    pub fn attach_report(
        &mut self,
        report: FeatureReport,
        prompt: String,
    ) -> Result<(), WorkflowError> {
        self.expect_step(WizardStep::Analysis)?;
        self.report = Some(report);
        self.prompt = Some(prompt);
        self.step = WizardStep::Generation;
        Ok(())
    }

    /// Attach the generated track; Generation → Done.
    pub fn attach_track(&mut self, track: GeneratedTrack) -> Result<(), WorkflowError> {
        self.expect_step(WizardStep::Generation)?;
        self.track = Some(track);
        self.step = WizardStep::Done;
        Ok(())
    }

    /// Decoded audio, present from the Analysis step onward.
    pub fn buffer(&self) -> Option<&SampleBuffer> {
        self.buffer.as_ref()
    }

    /// Feature report, present from the Generation step onward.
    pub fn report(&self) -> Option<&FeatureReport> {
        self.report.as_ref()
    }

    /// Drafted prompt, present from the Generation step onward.
    pub fn prompt(&self) -> Option<&str> {
        self.prompt.as_deref()
    }

    /// Generated track, present once Done.
    pub fn track(&self) -> Option<&GeneratedTrack> {
        self.track.as_ref()
    }
}
