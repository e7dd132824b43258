use rand::seq::SliceRandom;

use crate::config::Config;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Assignment {
    /// Each participant draws a label independently.
    Random,
    /// Labels are handed out round robin in enrolment order, so groups stay
    /// balanced.
    Complete,
}

/// The treatment labels of an experiment and how participants get one.
#[derive(Clone, Debug)]
pub struct Treatments {
    labels: Vec<String>,
    assignment: Assignment,
}

impl Treatments {
    pub fn new(labels: Vec<String>, assignment: Assignment) -> Treatments {
        Treatments { labels, assignment }
    }

    pub fn from_config(config: &Config) -> Treatments {
        Treatments::new(config.treatments.clone(), config.assignment)
    }

    /// Picks a label for the participant enrolled after `enrolled` others.
    /// `None` when the experiment has no treatments.
    pub fn assign(&self, enrolled: usize) -> Option<String> {
        if self.labels.is_empty() {
            return None;
        }
        match self.assignment {
            Assignment::Random => self.labels.choose(&mut rand::thread_rng()).cloned(),
            Assignment::Complete => Some(self.labels[enrolled % self.labels.len()].clone()),
        }
    }
}
