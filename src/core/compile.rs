//! Background recompilation of project messages after extraction.

use std::{
    path::PathBuf,
    process::Command,
    sync::{
        Arc, Mutex, PoisonError,
        atomic::{AtomicBool, Ordering},
    },
    thread::{self, JoinHandle},
};

use crate::diagnostics::DiagnosticSink;

/// Requests a message recompile without waiting for it.
pub trait BuildTrigger: Send + Sync {
    /// Whether the request was accepted.
    fn trigger(&self) -> bool;
}

/// Runs the paraglide compiler on a background thread, one run at a time.
pub struct ParaglideCompiler {
    command: Vec<String>,
    project: PathBuf,
    out_dir: PathBuf,
    working_dir: PathBuf,
    sink: Arc<dyn DiagnosticSink>,
    in_flight: Arc<AtomicBool>,
    handle: Mutex<Option<JoinHandle<bool>>>,
}

impl ParaglideCompiler {
    pub fn new(
        command: Vec<String>,
        project: PathBuf,
        out_dir: PathBuf,
        working_dir: PathBuf,
        sink: Arc<dyn DiagnosticSink>,
    ) -> Self {
        Self {
            command,
            project,
            out_dir,
            working_dir,
            sink,
            in_flight: Arc::new(AtomicBool::new(false)),
            handle: Mutex::new(None),
        }
    }

    pub fn is_running(&self) -> bool {
        self.in_flight.load(Ordering::SeqCst)
    }

    /// Wait for the last accepted compile. `None` if none was started.
    pub fn wait(&self) -> Option<bool> {
        let handle = self
            .handle
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .take()?;
        Some(handle.join().unwrap_or(false))
    }

    fn build_command(&self) -> Option<Command> {
        let (program, args) = self.command.split_first()?;
        let mut command = Command::new(program);
        command
            .args(args)
            .arg("--project")
            .arg(&self.project)
            .arg("--outdir")
            .arg(&self.out_dir)
            .current_dir(&self.working_dir);
        Some(command)
    }
}

impl BuildTrigger for ParaglideCompiler {
    fn trigger(&self) -> bool {
        let Some(mut command) = self.build_command() else {
            self.sink.warn("compile command is empty, skipping message compile");
            return false;
        };
        if self
            .in_flight
            .compare_exchange(false, true, Ordering::SeqCst, Ordering::SeqCst)
            .is_err()
        {
            self.sink.info("message compile already running");
            return false;
        }

        let sink = Arc::clone(&self.sink);
        let in_flight = Arc::clone(&self.in_flight);
        let program = self.command.join(" ");
        let handle = thread::spawn(move || {
            let succeeded = match command.output() {
                Ok(output) if output.status.success() => {
                    sink.info("compiled project messages");
                    true
                }
                Ok(output) => {
                    let stderr = String::from_utf8_lossy(&output.stderr);
                    sink.error(&format!(
                        "message compile failed ({}): {}",
                        output.status,
                        stderr.trim()
                    ));
                    false
                }
                Err(err) => {
                    sink.error(&format!("failed to run `{}`: {}", program, err));
                    false
                }
            };
            in_flight.store(false, Ordering::SeqCst);
            succeeded
        });

        *self.handle.lock().unwrap_or_else(PoisonError::into_inner) = Some(handle);
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::diagnostics::{CollectingSink, Level};
    use tempfile::tempdir;

    fn compiler(command: &[&str], sink: Arc<CollectingSink>) -> (tempfile::TempDir, ParaglideCompiler) {
        let dir = tempdir().unwrap();
        let compiler = ParaglideCompiler::new(
            command.iter().map(|s| s.to_string()).collect(),
            PathBuf::from("./project.inlang"),
            PathBuf::from("./src/lib/paraglide"),
            dir.path().to_path_buf(),
            sink,
        );
        (dir, compiler)
    }

    #[test]
    fn test_empty_command_is_rejected() {
        let sink = Arc::new(CollectingSink::new());
        let (_dir, compiler) = compiler(&[], sink.clone());
        assert!(!compiler.trigger());
        assert_eq!(compiler.wait(), None);
        assert_eq!(sink.texts(Level::Warning).len(), 1);
    }

    #[test]
    fn test_missing_program_reports_error() {
        let sink = Arc::new(CollectingSink::new());
        let (_dir, compiler) = compiler(&["paraglot-no-such-compiler"], sink.clone());
        assert!(compiler.trigger());
        assert_eq!(compiler.wait(), Some(false));
        assert!(!compiler.is_running());
        let errors = sink.texts(Level::Error);
        assert_eq!(errors.len(), 1);
        assert!(errors[0].contains("paraglot-no-such-compiler"));
    }

    #[cfg(unix)]
    #[test]
    fn test_successful_compile() {
        let sink = Arc::new(CollectingSink::new());
        let (_dir, compiler) = compiler(&["sh", "-c", "exit 0", "sh"], sink.clone());
        assert!(compiler.trigger());
        assert_eq!(compiler.wait(), Some(true));
        assert!(sink.texts(Level::Info).iter().any(|t| t.contains("compiled")));
        assert!(sink.texts(Level::Error).is_empty());
    }
}
