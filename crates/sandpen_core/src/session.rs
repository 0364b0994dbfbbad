//! One editing session: raw fragments in, sandboxed documents out.
//!
//! Edits land in the raw state immediately and are debounced per fragment
//! by a single background task. That task is the only writer of the settled
//! state, so a bulk replacement (generation, import) can never interleave
//! with a fragment settling halfway through it.

use log::{debug, info};
use std::sync::RwLock;
use std::time::Duration;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tokio::time::{Instant, sleep_until};

use crate::bridge::MessageBridge;
use crate::debounce::Debouncer;
use crate::error::GenerateError;
use crate::fragment::{FragmentKind, Fragments};
use crate::generate::CodeGenerator;
use crate::log_store::LogStore;
use crate::project::{Appearance, Project, ProjectPatch};
use crate::sandbox::SandboxHost;
use crate::snapshot::{Libraries, SettledSnapshot};

#[derive(Debug)]
enum Command {
    Edit(FragmentKind, String),
    Replace {
        fragments: Fragments,
        libraries: Option<Libraries>,
        /// Clear the log once the old document is gone
        clear_logs: bool,
    },
    Libraries(Libraries),
}

/// Editor state plus the sandbox it drives
pub struct Session {
    fragments: RwLock<Fragments>,
    libraries: RwLock<Libraries>,
    appearance: RwLock<Appearance>,
    commands: mpsc::UnboundedSender<Command>,
    host: SandboxHost,
    logs: LogStore,
    bridge: MessageBridge,
    task: JoinHandle<()>,
}

impl Session {
    /// Start a session; the initial fragments count as settled and are loaded
    /// right away.
    ///
    /// # Panics
    ///
    /// Panics if called outside of a tokio runtime
    pub fn new(fragments: Fragments, libraries: Libraries, quiet: Duration) -> Self {
        let host = SandboxHost::new();
        let logs = LogStore::new();
        let bridge = MessageBridge::new(host.clone(), logs.clone());

        let assembler = Assembler {
            host: host.clone(),
            logs: logs.clone(),
            settled: fragments.clone(),
            libraries: libraries.clone(),
            markup: Debouncer::new(quiet),
            style: Debouncer::new(quiet),
            script: Debouncer::new(quiet),
        };
        assembler.load();

        let (commands, rx) = mpsc::unbounded_channel();
        let task = tokio::spawn(assembler.run(rx));

        Self {
            fragments: RwLock::new(fragments),
            libraries: RwLock::new(libraries),
            appearance: RwLock::new(Appearance::default()),
            commands,
            host,
            logs,
            bridge,
            task,
        }
    }

    /// Record a raw edit; the sandbox follows once the fragment is quiet
    ///
    /// # Panics
    ///
    /// Panics if the internal lock is poisoned (i.e., a thread panicked while holding the lock)
    pub fn on_change(&self, kind: FragmentKind, text: String) {
        let mut fragments = self.fragments.write().expect("Session lock poisoned");
        fragments.set(kind, text.clone());
        // sent under the lock so the task sees edits in the same order as the raw state
        let _ = self.commands.send(Command::Edit(kind, text));
    }

    /// Current raw text of one fragment
    ///
    /// # Panics
    ///
    /// Panics if the internal lock is poisoned (i.e., a thread panicked while holding the lock)
    pub fn value(&self, kind: FragmentKind) -> String {
        self.fragments
            .read()
            .expect("Session lock poisoned")
            .get(kind)
            .to_string()
    }

    /// # Panics
    ///
    /// Panics if the internal lock is poisoned (i.e., a thread panicked while holding the lock)
    pub fn fragments(&self) -> Fragments {
        self.fragments.read().expect("Session lock poisoned").clone()
    }

    /// Replace all three fragments at once, skipping the quiet period.
    ///
    /// Pending edits are discarded so they cannot settle over the new values.
    pub fn replace_all(&self, fragments: Fragments) {
        self.replace(fragments, None, false);
    }

    /// # Panics
    ///
    /// Panics if the internal lock is poisoned (i.e., a thread panicked while holding the lock)
    pub fn libraries(&self) -> Libraries {
        self.libraries.read().expect("Session lock poisoned").clone()
    }

    /// Library changes are not debounced
    ///
    /// # Panics
    ///
    /// Panics if the internal lock is poisoned (i.e., a thread panicked while holding the lock)
    pub fn set_libraries(&self, libraries: Libraries) {
        let mut current = self.libraries.write().expect("Session lock poisoned");
        *current = libraries.clone();
        let _ = self.commands.send(Command::Libraries(libraries));
    }

    /// # Panics
    ///
    /// Panics if the internal lock is poisoned (i.e., a thread panicked while holding the lock)
    pub fn appearance(&self) -> Appearance {
        *self.appearance.read().expect("Session lock poisoned")
    }

    /// # Panics
    ///
    /// Panics if the internal lock is poisoned (i.e., a thread panicked while holding the lock)
    pub fn set_appearance(&self, appearance: Appearance) {
        *self.appearance.write().expect("Session lock poisoned") = appearance;
    }

    /// Ask `generator` for a new set of fragments.
    ///
    /// The diagnostic log is cleared before the request goes out, and again
    /// once the new document has replaced the old one, so nothing the old
    /// document logs meanwhile survives. On success every fragment is
    /// replaced together; on failure nothing but the log changes.
    ///
    /// # Errors
    ///
    /// Fails on an empty prompt or when the generator fails
    pub async fn generate(
        &self,
        generator: &dyn CodeGenerator,
        prompt: &str,
    ) -> Result<Fragments, GenerateError> {
        let prompt = prompt.trim();
        if prompt.is_empty() {
            return Err(GenerateError::EmptyPrompt);
        }

        self.logs.clear();
        let fragments = generator.generate(prompt).await?;
        info!("Generated new fragments from prompt");
        self.replace(fragments.clone(), None, true);
        Ok(fragments)
    }

    /// Everything needed to restore this session later, using raw fragments
    pub fn export_project(&self) -> Project {
        Project::new(&self.fragments(), &self.libraries(), self.appearance())
    }

    /// Apply an imported project; fragments and libraries load as one document
    ///
    /// # Panics
    ///
    /// Panics if the internal lock is poisoned (i.e., a thread panicked while holding the lock)
    pub fn import_project(&self, patch: ProjectPatch) -> Project {
        let mut project = self.export_project();
        project.apply(patch);

        *self.libraries.write().expect("Session lock poisoned") = project.libraries();
        self.set_appearance(project.appearance());
        self.replace(project.fragments(), Some(project.libraries()), false);
        project
    }

    /// The snapshot behind the currently loaded document
    pub fn settled(&self) -> Option<SettledSnapshot> {
        self.host
            .current()
            .map(|loaded| loaded.snapshot.as_ref().clone())
    }

    pub fn host(&self) -> &SandboxHost {
        &self.host
    }

    pub fn logs(&self) -> &LogStore {
        &self.logs
    }

    pub fn bridge(&self) -> &MessageBridge {
        &self.bridge
    }

    fn replace(&self, fragments: Fragments, libraries: Option<Libraries>, clear_logs: bool) {
        let mut current = self.fragments.write().expect("Session lock poisoned");
        *current = fragments.clone();
        let _ = self.commands.send(Command::Replace {
            fragments,
            libraries,
            clear_logs,
        });
    }
}

impl Drop for Session {
    fn drop(&mut self) {
        // pending fires die with the task
        self.task.abort();
        self.host.teardown();
    }
}

/// Sole owner of the settled state
struct Assembler {
    host: SandboxHost,
    logs: LogStore,
    settled: Fragments,
    libraries: Libraries,
    markup: Debouncer<String>,
    style: Debouncer<String>,
    script: Debouncer<String>,
}

impl Assembler {
    async fn run(mut self, mut commands: mpsc::UnboundedReceiver<Command>) {
        loop {
            let command = match self.next_deadline() {
                Some(deadline) => tokio::select! {
                    command = commands.recv() => command,
                    () = sleep_until(deadline) => {
                        self.settle(Instant::now());
                        continue;
                    }
                },
                None => commands.recv().await,
            };

            let Some(command) = command else {
                debug!("Session closed, stopping assembler");
                return;
            };

            match command {
                Command::Edit(kind, text) => self.timer(kind).push(text, Instant::now()),
                Command::Replace {
                    fragments,
                    libraries,
                    clear_logs,
                } => {
                    for kind in FragmentKind::ALL {
                        self.timer(kind).cancel();
                    }
                    self.settled = fragments;
                    if let Some(libraries) = libraries {
                        self.libraries = libraries;
                    }
                    self.load();
                    // after the load, so the old generation is already stale
                    if clear_logs {
                        self.logs.clear();
                    }
                }
                Command::Libraries(libraries) => {
                    self.libraries = libraries;
                    self.load();
                }
            }
        }
    }

    fn timer(&mut self, kind: FragmentKind) -> &mut Debouncer<String> {
        match kind {
            FragmentKind::Markup => &mut self.markup,
            FragmentKind::Style => &mut self.style,
            FragmentKind::Script => &mut self.script,
        }
    }

    fn next_deadline(&self) -> Option<Instant> {
        [&self.markup, &self.style, &self.script]
            .into_iter()
            .filter_map(Debouncer::deadline)
            .min()
    }

    /// Settle every fragment whose quiet period is over; one reload for all of them
    fn settle(&mut self, now: Instant) {
        let mut changed = false;
        for kind in FragmentKind::ALL {
            if let Some(text) = self.timer(kind).poll(now) {
                debug!("{kind} fragment settled");
                self.settled.set(kind, text);
                changed = true;
            }
        }
        if changed {
            self.load();
        }
    }

    fn load(&self) {
        self.host.load(SettledSnapshot::new(
            self.settled.clone(),
            self.libraries.clone(),
        ));
    }
}
