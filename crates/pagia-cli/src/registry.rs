//! Command registry: maps interactive verbs to handlers and dispatches
//! raw input lines.

use async_trait::async_trait;
use futures::future::BoxFuture;
use parking_lot::RwLock;
use std::collections::HashMap;
use std::sync::Arc;
use tracing::error;

use pagia_core::Result;

/// A named CLI verb mapped to an executable handler.
#[async_trait]
pub trait Command: Send + Sync {
    /// Unique key within a registry.
    fn name(&self) -> &str;

    /// One-line description shown by `help`.
    fn description(&self) -> &str;

    /// Execute with the whitespace-split arguments that followed the name.
    async fn run(&self, args: &[String]) -> Result<()>;
}

/// Fallback invoked with the full raw input when no command matches.
pub type DefaultHandler =
    Arc<dyn Fn(String) -> BoxFuture<'static, Result<()>> + Send + Sync>;

struct Inner {
    commands: HashMap<String, Arc<dyn Command>>,
    /// Registration order, for reproducible `help` output.
    order: Vec<String>,
    default_handler: Option<DefaultHandler>,
}

/// Owns the name → command mapping plus one optional default handler.
///
/// Populated once at startup and read-only in steady state; the interior
/// lock exists so the registry can be shared by reference between the
/// prompt loop and commands like `help` that list it.
pub struct CommandRegistry {
    inner: RwLock<Inner>,
}

impl Default for CommandRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl CommandRegistry {
    pub fn new() -> Self {
        Self {
            inner: RwLock::new(Inner {
                commands: HashMap::new(),
                order: Vec::new(),
                default_handler: None,
            }),
        }
    }

    /// Register a command. The last registration for a given name wins;
    /// a replacement keeps the original position in the listing.
    pub fn register(&self, command: Arc<dyn Command>) {
        let mut inner = self.inner.write();
        let name = command.name().to_string();
        if inner.commands.insert(name.clone(), command).is_none() {
            inner.order.push(name);
        }
    }

    /// Store the fallback for unmatched input. Overwrites any previous
    /// handler; handlers do not compose.
    pub fn set_default_handler(&self, handler: DefaultHandler) {
        self.inner.write().default_handler = Some(handler);
    }

    /// Dispatch one raw input line.
    ///
    /// Tokenization: `split_whitespace`, first token is the command name,
    /// the rest are positional arguments. Quoting is intentionally not
    /// interpreted. An unmatched name goes to the default handler with
    /// the full raw input unmodified; with no default handler registered
    /// a hint is printed. Handler failures are reported to the console
    /// and never propagate — a bad command must not take down the loop.
    pub async fn execute(&self, input: &str) {
        let input = input.trim();
        if input.is_empty() {
            return;
        }

        let mut tokens = input.split_whitespace();
        let name = match tokens.next() {
            Some(name) => name,
            None => return,
        };
        let args: Vec<String> = tokens.map(String::from).collect();

        // Clone the handler out so the lock is not held across the await.
        let (command, default_handler) = {
            let inner = self.inner.read();
            (
                inner.commands.get(name).cloned(),
                inner.default_handler.clone(),
            )
        };

        if let Some(command) = command {
            if let Err(e) = command.run(&args).await {
                error!(command = name, error = %e, "command failed");
                eprintln!("error: {e}");
            }
        } else if let Some(handler) = default_handler {
            if let Err(e) = handler(input.to_string()).await {
                error!(error = %e, "default handler failed");
                eprintln!("error: {e}");
            }
        } else {
            println!("unknown command: {name} (type 'help' for commands)");
        }
    }

    /// All registered commands in registration order.
    pub fn list(&self) -> Vec<Arc<dyn Command>> {
        let inner = self.inner.read();
        inner
            .order
            .iter()
            .filter_map(|name| inner.commands.get(name).cloned())
            .collect()
    }
}
