//! Run orchestration: validate, bind, materialize
//!
//! A run moves through `Unstarted -> Validating -> Binding -> Materializing`
//! and ends in `Completed` or `Aborted`. Nothing touches the filesystem
//! before `Materializing`, and there is no way back from a terminal state.

use crate::binder::{SubstitutionContext, VariableBinder};
use crate::config::GeneratorConfig;
use crate::error::ScaffoldError;
use crate::input::{InputSource, RawInput};
use crate::materializer::{GeneratedFile, ProjectMaterializer};
use crate::project::{ProjectSpec, StackVariant};
use crate::templates::catalog;
use std::fmt;
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RunState {
    Unstarted,
    Validating,
    Binding,
    Materializing,
    Completed,
    Aborted(String),
}

impl RunState {
    pub fn is_terminal(&self) -> bool {
        matches!(self, RunState::Completed | RunState::Aborted(_))
    }

    fn can_advance_to(&self, next: &RunState) -> bool {
        match (self, next) {
            (RunState::Unstarted, RunState::Validating)
            | (RunState::Validating, RunState::Binding)
            | (RunState::Binding, RunState::Materializing)
            | (RunState::Materializing, RunState::Completed) => true,
            (state, RunState::Aborted(_)) => !state.is_terminal(),
            _ => false,
        }
    }
}

impl fmt::Display for RunState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RunState::Unstarted => write!(f, "unstarted"),
            RunState::Validating => write!(f, "validating"),
            RunState::Binding => write!(f, "binding"),
            RunState::Materializing => write!(f, "materializing"),
            RunState::Completed => write!(f, "completed"),
            RunState::Aborted(reason) => write!(f, "aborted: {}", reason),
        }
    }
}

/// Outcome of a completed run
#[derive(Debug, Clone)]
pub struct GenerationReport {
    pub variant: StackVariant,
    pub root: PathBuf,
    pub files: Vec<GeneratedFile>,
}

impl GenerationReport {
    /// Files that replaced an existing file
    pub fn overwritten(&self) -> usize {
        self.files.iter().filter(|f| f.overwritten).count()
    }
}

/// Drives one generation run.
///
/// The steps are public so a front-end can act between them (report the
/// destination, warn about an existing project); [`Pipeline::run`] chains
/// them for callers that don't need to. A pipeline drives a single run:
/// once it is `Completed` or `Aborted`, every step fails with
/// [`ScaffoldError::IllegalTransition`] and the state is left unchanged.
pub struct Pipeline {
    config: GeneratorConfig,
    state: RunState,
}

impl Pipeline {
    pub fn new(config: GeneratorConfig) -> Self {
        Self {
            config,
            state: RunState::Unstarted,
        }
    }

    pub fn state(&self) -> &RunState {
        &self.state
    }

    pub fn config(&self) -> &GeneratorConfig {
        &self.config
    }

    /// Where a project for `spec` is generated under `parent`
    pub fn destination(spec: &ProjectSpec, parent: &Path) -> PathBuf {
        parent.join(spec.project_dir())
    }

    /// Ask `source` for the variant's fields, then run every step
    pub async fn run_with_source(
        &mut self,
        source: &mut impl InputSource,
        variant: StackVariant,
        parent: &Path,
    ) -> anyhow::Result<GenerationReport> {
        let raw = RawInput::collect(source, variant)?;
        Ok(self.run(raw, variant, parent).await?)
    }

    pub async fn run(
        &mut self,
        raw: RawInput,
        variant: StackVariant,
        parent: &Path,
    ) -> Result<GenerationReport, ScaffoldError> {
        let spec = self.validate(raw, variant)?;
        let ctx = self.bind(&spec)?;
        let root = Self::destination(&spec, parent);
        self.materialize(&spec, &ctx, &root).await
    }

    pub fn validate(
        &mut self,
        raw: RawInput,
        variant: StackVariant,
    ) -> Result<ProjectSpec, ScaffoldError> {
        self.advance(RunState::Validating)?;
        let result = ProjectSpec::from_input(raw, variant).map_err(ScaffoldError::from);
        self.settle(result)
    }

    pub fn bind(&mut self, spec: &ProjectSpec) -> Result<SubstitutionContext, ScaffoldError> {
        self.advance(RunState::Binding)?;
        let result = catalog::verified()
            .and_then(|catalog| VariableBinder::new(catalog, &self.config).bind(spec))
            .map_err(ScaffoldError::from);
        self.settle(result)
    }

    pub async fn materialize(
        &mut self,
        spec: &ProjectSpec,
        ctx: &SubstitutionContext,
        root: &Path,
    ) -> Result<GenerationReport, ScaffoldError> {
        self.advance(RunState::Materializing)?;

        let result = match catalog::verified() {
            Ok(catalog) => {
                ProjectMaterializer::new(catalog)
                    .materialize(spec.variant(), ctx, root)
                    .await
            }
            Err(err) => Err(err.into()),
        };

        let report = self.settle(result.map(|files| GenerationReport {
            variant: spec.variant(),
            root: root.to_path_buf(),
            files,
        }))?;
        self.advance(RunState::Completed)?;
        Ok(report)
    }

    /// End a run that failed outside the pipeline's own steps.
    ///
    /// Does nothing once the run is already `Completed` or `Aborted`.
    pub fn abort(&mut self, reason: impl fmt::Display) {
        let _ = self.advance(RunState::Aborted(reason.to_string()));
    }

    fn advance(&mut self, next: RunState) -> Result<(), ScaffoldError> {
        if !self.state.can_advance_to(&next) {
            return Err(ScaffoldError::IllegalTransition {
                from: self.state.clone(),
                to: next,
            });
        }
        self.state = next;
        Ok(())
    }

    fn settle<T>(&mut self, result: Result<T, ScaffoldError>) -> Result<T, ScaffoldError> {
        if let Err(err) = &result {
            self.abort(err);
        }
        result
    }
}
