use crate::models::OptionsConfig;
use anyhow::{Context, Result};
use camino::{Utf8Path, Utf8PathBuf};
use indexmap::IndexMap;
use std::fs;

/// File name of the drag-and-drop configuration
pub const CONFIG_FILE_NAME: &str = "esdtoolconfig.json";

/// Game flags accepted by the converter
pub const SUPPORTED_GAMES: &[&str] = &["des", "ds1", "ds1r", "bb", "ds3", "sdt", "er"];

/// Question-and-answer capability used by the guided first-run setup.
pub trait SetupPrompt {
    /// Ask a question and return the raw answer, or `None` once input is exhausted.
    fn ask(&mut self, question: &str) -> Option<String>;

    /// Show an informational or error line.
    fn notify(&mut self, message: &str);
}

/// Configuration manager for `esdtoolconfig.json`.
///
/// The file normally lives next to the executable so that drag-and-drop runs
/// started from any working directory find the same settings.
#[derive(Debug, Clone)]
pub struct ConfigManager {
    config_dir: Utf8PathBuf,
    config_path: Utf8PathBuf,
}

impl ConfigManager {
    /// Create a new ConfigManager with the specified configuration directory.
    ///
    /// # Arguments
    /// * `config_dir` - Directory holding `esdtoolconfig.json`; created if missing
    pub fn new<P: AsRef<Utf8Path>>(config_dir: P) -> Result<Self> {
        let config_dir = config_dir.as_ref().to_path_buf();

        if !config_dir.exists() {
            fs::create_dir_all(&config_dir)
                .with_context(|| format!("Failed to create config directory: {}", config_dir))?;
        }

        Ok(Self {
            config_path: config_dir.join(CONFIG_FILE_NAME),
            config_dir,
        })
    }

    /// Load the configuration file.
    ///
    /// # Returns
    /// `None` if the file doesn't exist yet
    pub fn load(&self) -> Result<Option<OptionsConfig>> {
        if !self.config_path.exists() {
            tracing::info!("No config at {}", self.config_path);
            return Ok(None);
        }

        let file_contents = fs::read_to_string(&self.config_path)
            .with_context(|| format!("Failed to read config: {}", self.config_path))?;

        let config: OptionsConfig = serde_json::from_str(&file_contents).with_context(|| {
            format!(
                "Failed to parse {}. Please either fix it or delete it so it can be recreated.",
                self.config_path
            )
        })?;

        tracing::info!("Loaded config from {}", self.config_path);
        Ok(Some(config))
    }

    /// Save the configuration file as indented JSON.
    pub fn save(&self, config: &OptionsConfig) -> Result<()> {
        let mut json =
            serde_json::to_string_pretty(config).context("Failed to serialize config to JSON")?;
        json.push('\n');

        fs::write(&self.config_path, json)
            .with_context(|| format!("Failed to write config: {}", self.config_path))?;

        tracing::info!("Saved config to {}", self.config_path);
        Ok(())
    }

    /// Load the configuration, running the guided setup if there is none yet.
    ///
    /// # Returns
    /// `None` if the prompt ran out of input during setup
    pub fn load_or_create(&self, prompt: &mut dyn SetupPrompt) -> Result<Option<OptionsConfig>> {
        if let Some(config) = self.load()? {
            prompt.notify(&format!("Using config {}", self.config_path));
            return Ok(Some(config));
        }

        prompt.notify(&format!("Creating {}", self.config_path));
        let Some(config) = guided_setup(prompt) else {
            tracing::info!("Setup abandoned, no config written");
            return Ok(None);
        };

        prompt.notify(&format!("Writing config {}", self.config_path));
        self.save(&config)?;
        prompt.notify(
            "Use the command line interface directly for advanced functionality. You can also edit the config.",
        );
        Ok(Some(config))
    }

    /// Get the configuration directory path.
    pub fn config_dir(&self) -> &Utf8Path {
        &self.config_dir
    }

    /// Get the configuration file path.
    pub fn config_path(&self) -> &Utf8Path {
        &self.config_path
    }
}

/// Ask for game, game directory and backup preference.
fn guided_setup(prompt: &mut dyn SetupPrompt) -> Option<OptionsConfig> {
    let game = ask_game(prompt)?;
    let base_dir = ask_base_dir(prompt, &game)?;

    let backup = prompt
        .ask("Create backups of overwritten files [y/n]? ")?
        .trim()
        .to_lowercase()
        .starts_with('y');

    Some(OptionsConfig {
        game: Some(game),
        base_dir: Some(base_dir),
        backup,
        extra: IndexMap::new(),
        other_options: String::new(),
    })
}

fn ask_game(prompt: &mut dyn SetupPrompt) -> Option<String> {
    loop {
        prompt.notify(&format!("Supported games: [{}]", SUPPORTED_GAMES.join(", ")));
        let answer = prompt.ask("Select a game type: ")?.trim().to_lowercase();
        if SUPPORTED_GAMES.contains(&answer.as_str()) {
            return Some(answer);
        }
        prompt.notify(&format!("Error: Unrecognized game type \"{}\"", answer));
    }
}

fn ask_base_dir(prompt: &mut dyn SetupPrompt, game: &str) -> Option<String> {
    prompt.notify("Unpack your game with UXM/UDSFM and paste the game directory here.");
    loop {
        let answer = prompt.ask(&format!("Enter {} game directory: ", game))?;
        let answer = answer.trim();
        if answer.is_empty() {
            continue;
        }

        let dir = Utf8Path::new(answer);
        if !dir.is_absolute() {
            prompt.notify("Error: Provide an absolute directory, not a relative one");
        } else if !dir.is_dir() {
            prompt.notify(&format!("Error: Directory \"{}\" not found", dir));
        } else {
            return Some(dir.to_string());
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::VecDeque;
    use tempfile::TempDir;

    struct ScriptedSetup {
        answers: VecDeque<&'static str>,
        notes: Vec<String>,
    }

    impl ScriptedSetup {
        fn new(answers: &[&'static str]) -> Self {
            Self {
                answers: answers.iter().copied().collect(),
                notes: Vec::new(),
            }
        }
    }

    impl SetupPrompt for ScriptedSetup {
        fn ask(&mut self, _question: &str) -> Option<String> {
            self.answers.pop_front().map(str::to_string)
        }

        fn notify(&mut self, message: &str) {
            self.notes.push(message.to_string());
        }
    }

    fn create_test_config_manager() -> (ConfigManager, TempDir) {
        let temp_dir = TempDir::new().unwrap();
        let config_path = Utf8PathBuf::try_from(temp_dir.path().to_path_buf()).unwrap();
        let manager = ConfigManager::new(&config_path).unwrap();
        (manager, temp_dir)
    }

    #[test]
    fn test_load_missing_config() {
        let (manager, _temp_dir) = create_test_config_manager();
        assert!(manager.load().unwrap().is_none());
    }

    #[test]
    fn test_guided_setup_retries_game() {
        let (manager, temp_dir) = create_test_config_manager();
        let game_dir = temp_dir.path().to_str().unwrap().to_string();
        let game_dir: &'static str = Box::leak(game_dir.into_boxed_str());

        let mut prompt = ScriptedSetup::new(&["skyrim", " DS3 ", "relative/dir", game_dir, "Yes"]);
        let config = manager.load_or_create(&mut prompt).unwrap().unwrap();

        assert_eq!(config.game(), Some("ds3"));
        assert_eq!(config.base_dir(), Some(game_dir));
        assert!(config.backup);
        assert!(prompt.notes.iter().any(|n| n.contains("Unrecognized game type \"skyrim\"")));
        assert!(prompt.notes.iter().any(|n| n.contains("absolute directory")));
        assert!(manager.config_path().exists());
    }

    #[test]
    fn test_guided_setup_exhausted() {
        let (manager, _temp_dir) = create_test_config_manager();

        let mut prompt = ScriptedSetup::new(&["er"]);
        assert!(manager.load_or_create(&mut prompt).unwrap().is_none());
        assert!(!manager.config_path().exists());
    }
}
