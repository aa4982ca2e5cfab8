use std::collections::HashMap;
use std::sync::Arc;
use tracing::debug;

use pagia_core::{PagiaError, Result};

use crate::skill::Skill;

/// Holds skills behind the [`Skill`] trait, keyed by name.
///
/// Registered once at startup and read-only afterwards. A second
/// registration under the same name replaces the first.
#[derive(Default)]
pub struct SkillRegistry {
    skills: HashMap<String, Arc<dyn Skill>>,
}

impl SkillRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a skill. Last registration for a given name wins.
    pub fn register(&mut self, skill: Arc<dyn Skill>) {
        debug!(skill = %skill.name(), "registered skill");
        self.skills.insert(skill.name().to_string(), skill);
    }

    /// Look up a skill by name. A miss reports the available skills.
    pub fn get(&self, name: &str) -> Result<Arc<dyn Skill>> {
        self.skills.get(name).cloned().ok_or_else(|| {
            let mut available: Vec<String> = self.skills.keys().cloned().collect();
            available.sort();
            PagiaError::SkillNotFound {
                name: name.to_string(),
                available,
            }
        })
    }

    /// All registered skills, sorted by name.
    pub fn list(&self) -> Vec<Arc<dyn Skill>> {
        let mut skills: Vec<_> = self.skills.values().cloned().collect();
        skills.sort_by(|a, b| a.name().cmp(b.name()));
        skills
    }

    pub fn count(&self) -> usize {
        self.skills.len()
    }

    pub fn is_empty(&self) -> bool {
        self.skills.is_empty()
    }
}
