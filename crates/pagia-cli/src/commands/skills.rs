use pagia_core::{Result, SessionContext};
use pagia_skills::{SkillRegistry, SkillRunner, builtin_skills};

use super::SkillAction;

pub(super) async fn cmd_skill(
    config: pagia_config::PagiaConfig,
    action: SkillAction,
) -> Result<()> {
    let provider = super::build_provider(&config)?;

    let mut registry = SkillRegistry::new();
    for skill in builtin_skills(provider) {
        registry.register(skill);
    }

    match action {
        SkillAction::List => {
            let skills = registry.list();
            println!("\x1b[1mAvailable Skills ({}):\x1b[0m\n", skills.len());
            for skill in skills {
                println!("  \x1b[36m{}\x1b[0m", skill.name());
                println!("    {}", skill.description());
                println!();
            }
        }
        SkillAction::Show { name } => match registry.get(&name) {
            Ok(skill) => {
                println!("\x1b[1m{}\x1b[0m", skill.name());
                println!("  {}", skill.description());
            }
            Err(e) => {
                println!("{e}");
            }
        },
        SkillAction::Run {
            name,
            prompt,
            session,
        } => {
            let session_id = session.unwrap_or_else(|| config.session.default_session.clone());
            let skill = registry.get(&name)?;
            let ctx = SessionContext::new(session_id, prompt);
            let output = SkillRunner::new().run(skill.as_ref(), &ctx).await?;
            println!("{output}");
        }
    }

    Ok(())
}
