use crate::config::SetupPrompt;
use crate::services::{BundleRequest, OverridePrompt};
use camino::{Utf8Path, Utf8PathBuf};
use console::{style, Term};
use dialoguer::Input;
use std::io::{self, BufRead, IsTerminal};

/// Terminal implementation of the interactive collaborators.
///
/// Questions and notes go to stderr so stdout carries only the synthesized
/// arguments. When stdin is not a terminal (piped answers), lines are read
/// directly and end of input is reported as exhaustion.
pub struct ConsolePrompt {
    term: Term,
    interactive: bool,
    /// Directory whose bundle list was last printed, to avoid repeating it on re-prompts
    last_directory: Option<Utf8PathBuf>,
}

impl ConsolePrompt {
    pub fn new() -> Self {
        Self {
            term: Term::stderr(),
            interactive: io::stdin().is_terminal(),
            last_directory: None,
        }
    }

    fn line(&self, text: &str) {
        // Nothing useful to do if stderr is gone
        let _ = self.term.write_line(text);
    }

    fn read_answer(&mut self, question: &str) -> Option<String> {
        if self.interactive {
            let prompt = question.trim_end().trim_end_matches(':');
            return match Input::<String>::new()
                .with_prompt(prompt)
                .allow_empty(true)
                .interact_text_on(&self.term)
            {
                Ok(answer) => Some(answer),
                Err(e) => {
                    tracing::info!("Prompt closed: {}", e);
                    None
                }
            };
        }

        let _ = self.term.write_str(question);
        let mut answer = String::new();
        match io::stdin().lock().read_line(&mut answer) {
            Ok(0) => None,
            Ok(_) => Some(answer.trim_end_matches(['\r', '\n']).to_string()),
            Err(e) => {
                tracing::warn!("Failed to read answer: {}", e);
                None
            }
        }
    }
}

impl Default for ConsolePrompt {
    fn default() -> Self {
        Self::new()
    }
}

impl OverridePrompt for ConsolePrompt {
    fn request_directory_override(
        &mut self,
        directory: &Utf8Path,
        candidates: &[Utf8PathBuf],
        request: BundleRequest,
    ) -> Option<String> {
        if self.last_directory.as_deref() != Some(directory) {
            for bundle in candidates {
                self.line(bundle.as_str());
            }
            self.line("");
            match request {
                BundleRequest::Single => {
                    self.line("Note: ESD files from multiple different bnd files can all be decompiled to the same directory. When the directory is recompiled, it automatically updates all of the bnds containing those files.");
                    self.line("");
                    self.line("Enter a directory name to enable editing multiple bnds, or else enter nothing to create a directory limited to only this bnd file.");
                }
                BundleRequest::Multiple => {
                    self.line("You've selected multiple bnd files in the same directory. Decompiled files from different bnds can be added to a single directory. When the directory is recompiled, it updates all of the bnds containing those files.");
                    self.line("");
                    self.line("Enter a directory name for all decompiled files, or else enter nothing to create separate directories limited to only their bnd files.");
                }
            }
            self.line("");
            self.last_directory = Some(directory.to_path_buf());
        }

        self.read_answer("Single directory to write to: ")
    }

    fn report_errors(&mut self, messages: &[String]) {
        self.line(&style("Error:").red().bold().to_string());
        for message in messages {
            self.line(message);
        }
        self.line("");
    }
}

impl SetupPrompt for ConsolePrompt {
    fn ask(&mut self, question: &str) -> Option<String> {
        self.read_answer(question)
    }

    fn notify(&mut self, message: &str) {
        if message.starts_with("Error:") {
            self.line(&style(message).yellow().to_string());
        } else {
            self.line(message);
        }
    }
}
