//! Ordered transformation pipelines.
//!
//! A [`Pipeline`] is plain data: a list of named [`Step`]s, each a function
//! of `(record, config)`. The driver runs the steps in order for every file
//! of a tree, which keeps per-step behavior testable in isolation.

use tracing::trace;

use crate::config::ChainConfig;
use crate::error::Result;
use crate::file::FileRecord;
use crate::removal;
use crate::replace;

/// A single transformation applied to every file of a tree.
pub type StepFn = fn(&mut FileRecord, &ChainConfig) -> Result<()>;

#[derive(Debug, Clone, Copy)]
pub struct Step {
    pub name: &'static str,
    pub run: StepFn,
}

impl Step {
    pub const fn new(name: &'static str, run: StepFn) -> Self {
        Self { name, run }
    }
}

#[derive(Debug, Clone, Default)]
pub struct Pipeline {
    steps: Vec<Step>,
}

impl Pipeline {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a step (builder style).
    pub fn with_step(mut self, name: &'static str, run: StepFn) -> Self {
        self.push(Step::new(name, run));
        self
    }

    pub fn push(&mut self, step: Step) {
        self.steps.push(step);
    }

    pub fn steps(&self) -> &[Step] {
        &self.steps
    }

    pub fn step_names(&self) -> Vec<&'static str> {
        self.steps.iter().map(|s| s.name).collect()
    }

    /// Run every step in order, stopping at the first failure.
    pub fn run(&self, f: &mut FileRecord, cfg: &ChainConfig) -> Result<()> {
        for step in &self.steps {
            trace!(path = %f.relative_path(), step = step.name, "running step");
            (step.run)(f, cfg)?;
        }
        Ok(())
    }

    /// Steps for the main reference tree.
    pub fn main_app() -> Self {
        Self::new()
            .with_step("workflows", replace::replace_github_actions)
            .with_step("dockerfile", replace::replace_dockerfile)
            .with_step("test-node-script", replace::replace_test_node_script)
            .with_step("app", replace::replace_app)
            .with_step("makefile", replace::replace_makefile)
            .with_step("everywhere", replace::replace_everywhere)
            .with_step("remove-disabled-features", removal::remove_disabled_features)
    }

    /// Steps for the end-to-end test tree.
    pub fn interchaintest() -> Self {
        Self::new()
            .with_step("interchaintest-setup", replace::replace_interchaintest_setup)
            .with_step("everywhere", replace::replace_everywhere)
            .with_step("remove-disabled-features", removal::remove_disabled_features)
    }
}
