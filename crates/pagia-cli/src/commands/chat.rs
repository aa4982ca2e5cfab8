use async_trait::async_trait;
use parking_lot::RwLock;
use std::sync::{Arc, Weak};
use tokio::io::AsyncBufReadExt;

use pagia_core::{Result, SessionContext};
use pagia_llm::{GenerationOptions, TextProvider};
use pagia_skills::{SkillRegistry, SkillRunner, builtin_skills};

use crate::registry::{Command, CommandRegistry};

/// Shared, append-only conversation history. Maintained here, by the
/// caller — skills and the runner never touch it.
type History = Arc<RwLock<Vec<String>>>;

pub(super) async fn cmd_chat(
    config: pagia_config::PagiaConfig,
    session: Option<String>,
) -> Result<()> {
    let provider = super::build_provider(&config)?;
    let opts = super::generation_options(&config);

    let mut skills = SkillRegistry::new();
    for skill in builtin_skills(provider.clone()) {
        skills.register(skill);
    }
    let skills = Arc::new(skills);

    let session_id = session.unwrap_or_else(|| config.session.default_session.clone());
    let history: History = Arc::new(RwLock::new(Vec::new()));

    let registry = Arc::new(CommandRegistry::new());
    registry.register(Arc::new(HelpCommand {
        registry: Arc::downgrade(&registry),
    }));
    registry.register(Arc::new(SkillsCommand {
        skills: skills.clone(),
    }));
    registry.register(Arc::new(SkillCommand {
        skills: skills.clone(),
        runner: SkillRunner::new(),
        history: history.clone(),
        session_id: session_id.clone(),
    }));
    registry.register(Arc::new(HistoryCommand {
        history: history.clone(),
    }));
    registry.register(Arc::new(ClearCommand {
        history: history.clone(),
    }));

    // Unmatched input is a chat turn.
    registry.set_default_handler(chat_handler(
        provider,
        opts,
        history,
        config.session.max_history,
    ));

    println!("┌─ PAGIA ──────────────────────────────────┐");
    println!("│ Session: {session_id:<31} │");
    println!("│ Type 'help' for commands, 'exit' to quit │");
    println!("└──────────────────────────────────────────┘");

    let stdin = tokio::io::stdin();
    let reader = tokio::io::BufReader::new(stdin);
    let mut lines = reader.lines();

    loop {
        eprint!("\x1b[36mpagia>\x1b[0m ");
        use std::io::Write;
        std::io::stderr().flush().ok();

        let line = match lines.next_line().await {
            Ok(Some(line)) => line,
            Ok(None) => break, // EOF
            Err(_) => break,
        };

        let trimmed = line.trim();
        if trimmed.is_empty() {
            continue;
        }
        if trimmed == "exit" || trimmed == "quit" || trimmed == "/exit" {
            println!("Goodbye!");
            break;
        }

        // Accept the slash-command convention; bare words work the same.
        let input = trimmed.strip_prefix('/').unwrap_or(trimmed);

        // Serialized on purpose: the dispatched command finishes before
        // the next prompt, so console output never interleaves.
        registry.execute(input).await;
    }

    Ok(())
}

/// Build the default chat handler: append the user turn, send the full
/// transcript to the provider, print and record the reply.
fn chat_handler(
    provider: Arc<dyn TextProvider>,
    opts: GenerationOptions,
    history: History,
    max_history: usize,
) -> crate::registry::DefaultHandler {
    Arc::new(move |input: String| {
        let provider = provider.clone();
        let opts = opts.clone();
        let history = history.clone();
        Box::pin(async move {
            let prompt = {
                let mut h = history.write();
                h.push(format!("User: {input}"));
                format!("{}\nAssistant:", h.join("\n"))
            };

            let response = provider.generate(&prompt, &opts).await?;
            println!("{response}");

            let mut h = history.write();
            h.push(format!("Assistant: {response}"));
            if max_history > 0 {
                while h.len() > max_history {
                    h.remove(0);
                }
            }
            Ok(())
        })
    })
}

// ── Interactive commands ───────────────────────────────────────

struct HelpCommand {
    registry: Weak<CommandRegistry>,
}

#[async_trait]
impl Command for HelpCommand {
    fn name(&self) -> &str {
        "help"
    }

    fn description(&self) -> &str {
        "List available commands"
    }

    async fn run(&self, _args: &[String]) -> Result<()> {
        let Some(registry) = self.registry.upgrade() else {
            return Ok(());
        };
        println!("Commands:");
        for command in registry.list() {
            println!("  {:<10} {}", command.name(), command.description());
        }
        println!("Anything else is sent to the assistant as chat.");
        Ok(())
    }
}

struct SkillsCommand {
    skills: Arc<SkillRegistry>,
}

#[async_trait]
impl Command for SkillsCommand {
    fn name(&self) -> &str {
        "skills"
    }

    fn description(&self) -> &str {
        "List available skills"
    }

    async fn run(&self, _args: &[String]) -> Result<()> {
        println!("Available Skills:");
        for skill in self.skills.list() {
            println!("  {:<12} {}", skill.name(), skill.description());
        }
        Ok(())
    }
}

struct SkillCommand {
    skills: Arc<SkillRegistry>,
    runner: SkillRunner,
    history: History,
    session_id: String,
}

#[async_trait]
impl Command for SkillCommand {
    fn name(&self) -> &str {
        "skill"
    }

    fn description(&self) -> &str {
        "Run a skill: skill <name> <input...>"
    }

    async fn run(&self, args: &[String]) -> Result<()> {
        let Some(name) = args.first() else {
            println!("usage: skill <name> <input...>");
            return Ok(());
        };
        let input = args[1..].join(" ");

        let skill = self.skills.get(name)?;
        let ctx = SessionContext {
            session_id: self.session_id.clone(),
            history: self.history.read().clone(),
            input,
        };
        let output = self.runner.run(skill.as_ref(), &ctx).await?;
        println!("{output}");
        Ok(())
    }
}

struct HistoryCommand {
    history: History,
}

#[async_trait]
impl Command for HistoryCommand {
    fn name(&self) -> &str {
        "history"
    }

    fn description(&self) -> &str {
        "Show the conversation so far"
    }

    async fn run(&self, _args: &[String]) -> Result<()> {
        let history = self.history.read();
        if history.is_empty() {
            println!("(no history yet)");
        } else {
            for (i, turn) in history.iter().enumerate() {
                println!("{:>3}  {turn}", i + 1);
            }
        }
        Ok(())
    }
}

struct ClearCommand {
    history: History,
}

#[async_trait]
impl Command for ClearCommand {
    fn name(&self) -> &str {
        "clear"
    }

    fn description(&self) -> &str {
        "Clear the conversation history"
    }

    async fn run(&self, _args: &[String]) -> Result<()> {
        self.history.write().clear();
        println!("History cleared.");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pagia_llm::MockProvider;

    fn test_history() -> History {
        Arc::new(RwLock::new(Vec::new()))
    }

    #[tokio::test]
    async fn chat_handler_appends_both_turns() {
        let provider = Arc::new(MockProvider::new().with_response("Hi there"));
        let history = test_history();
        let handler = chat_handler(provider, GenerationOptions::default(), history.clone(), 0);

        handler("hello".to_string()).await.unwrap();

        let h = history.read();
        assert_eq!(h.as_slice(), ["User: hello", "Assistant: Hi there"]);
    }

    #[tokio::test]
    async fn chat_handler_sends_transcript_to_provider() {
        let provider = Arc::new(MockProvider::new().with_response("a").with_response("b"));
        let history = test_history();
        let handler = chat_handler(
            provider.clone(),
            GenerationOptions::default(),
            history.clone(),
            0,
        );

        handler("first".to_string()).await.unwrap();
        handler("second".to_string()).await.unwrap();

        let prompts = provider.recorded_prompts();
        assert!(prompts[1].contains("User: first"));
        assert!(prompts[1].contains("Assistant: a"));
        assert!(prompts[1].contains("User: second"));
        assert!(prompts[1].ends_with("Assistant:"));
    }

    #[tokio::test]
    async fn chat_handler_propagates_provider_failure() {
        let provider = Arc::new(MockProvider::new().with_error("rate limited"));
        let history = test_history();
        let handler = chat_handler(provider, GenerationOptions::default(), history.clone(), 0);

        let err = handler("hello".to_string()).await.unwrap_err();
        assert!(err.to_string().contains("rate limited"));
        // The failed turn stays in history; the user can retry.
        assert_eq!(history.read().len(), 1);
    }

    #[tokio::test]
    async fn chat_handler_caps_history() {
        let provider = Arc::new(
            MockProvider::new()
                .with_response("1")
                .with_response("2")
                .with_response("3"),
        );
        let history = test_history();
        let handler = chat_handler(provider, GenerationOptions::default(), history.clone(), 4);

        for input in ["a", "b", "c"] {
            handler(input.to_string()).await.unwrap();
        }

        let h = history.read();
        assert_eq!(h.len(), 4);
        assert_eq!(h[0], "User: b");
    }

    #[tokio::test]
    async fn skill_command_runs_against_session_history() {
        let history = test_history();
        history.write().push("User: earlier".into());

        let mut skills = SkillRegistry::new();
        for skill in builtin_skills(Arc::new(MockProvider::echoing())) {
            skills.register(skill);
        }

        let cmd = SkillCommand {
            skills: Arc::new(skills),
            runner: SkillRunner::new(),
            history: history.clone(),
            session_id: "s1".into(),
        };

        cmd.run(&["echo".to_string(), "hello".to_string(), "world".to_string()])
            .await
            .unwrap();
        // History is read, never written, by skill dispatch.
        assert_eq!(history.read().len(), 1);
    }

    #[tokio::test]
    async fn skill_command_unknown_skill_errors() {
        let cmd = SkillCommand {
            skills: Arc::new(SkillRegistry::new()),
            runner: SkillRunner::new(),
            history: test_history(),
            session_id: "s1".into(),
        };

        let err = cmd.run(&["nope".to_string()]).await.unwrap_err();
        assert!(err.to_string().contains("nope"));
    }

    #[tokio::test]
    async fn clear_command_empties_history() {
        let history = test_history();
        history.write().push("User: x".into());

        let cmd = ClearCommand {
            history: history.clone(),
        };
        cmd.run(&[]).await.unwrap();
        assert!(history.read().is_empty());
    }
}
