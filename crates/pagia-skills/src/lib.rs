//! # pagia-skills
//!
//! A skill is a named, described unit of behavior that turns a
//! [`SessionContext`](pagia_core::SessionContext) into AI-generated text.
//! Skills are stateless: invocations share nothing except what the caller
//! supplies through the context.
//!
//! The [`SkillRunner`] sits between a skill and its caller as the single
//! seam for cross-cutting concerns (timing today; audit logging or
//! circuit-breaking later) and propagates skill failures untouched.

pub mod builtin;
pub mod registry;
pub mod runner;
pub mod skill;

pub use builtin::{CopywriterSkill, EchoSkill, ReverseSkill, builtin_skills};
pub use registry::SkillRegistry;
pub use runner::SkillRunner;
pub use skill::Skill;
