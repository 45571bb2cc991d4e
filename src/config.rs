/// External configuration loader.
///
/// Reads `config.toml` from the executable's directory (or CWD).
/// Falls back to sensible defaults if the file is missing or incomplete.
/// Every key is a playtesting tunable.

use serde::Deserialize;
use std::path::PathBuf;

// ── Public Config Struct ──

#[derive(Clone, Debug)]
pub struct GameConfig {
    pub rules: RulesConfig,
}

#[derive(Clone, Debug)]
pub struct RulesConfig {
    /// Countdown seconds at score 0.
    pub start_secs: u32,
    /// Countdown never shrinks below this.
    pub floor_secs: u32,
    /// One second is shaved off the limit per this many points.
    pub ramp_step: u32,
    /// Points for a correct answer.
    pub base_points: u32,
    /// Extra points on a combo hit.
    pub combo_bonus: u32,
    /// Combo fires when streak is a positive multiple of this.
    pub combo_interval: u32,
    /// Urgency cue plays while time remaining is in (1, urgency_from].
    pub urgency_from: u32,
    /// How long the combo toast stays on screen.
    pub combo_msg_ms: u64,
}

impl Default for RulesConfig {
    fn default() -> Self {
        RulesConfig {
            start_secs: default_start_secs(),
            floor_secs: default_floor_secs(),
            ramp_step: default_ramp_step(),
            base_points: default_base_points(),
            combo_bonus: default_combo_bonus(),
            combo_interval: default_combo_interval(),
            urgency_from: default_urgency_from(),
            combo_msg_ms: default_combo_msg_ms(),
        }
    }
}

// ── TOML Schema (with serde defaults) ──

#[derive(Deserialize, Debug, Default)]
struct TomlConfig {
    #[serde(default)]
    rules: TomlRules,
}

#[derive(Deserialize, Debug)]
struct TomlRules {
    #[serde(default = "default_start_secs")]
    start_secs: u32,
    #[serde(default = "default_floor_secs")]
    floor_secs: u32,
    #[serde(default = "default_ramp_step")]
    ramp_step: u32,
    #[serde(default = "default_base_points")]
    base_points: u32,
    #[serde(default = "default_combo_bonus")]
    combo_bonus: u32,
    #[serde(default = "default_combo_interval")]
    combo_interval: u32,
    #[serde(default = "default_urgency_from")]
    urgency_from: u32,
    #[serde(default = "default_combo_msg_ms")]
    combo_msg_ms: u64,
}

// ── Defaults ──

fn default_start_secs() -> u32 { 10 }
fn default_floor_secs() -> u32 { 4 }
fn default_ramp_step() -> u32 { 5 }
fn default_base_points() -> u32 { 5 }
fn default_combo_bonus() -> u32 { 10 }
fn default_combo_interval() -> u32 { 3 }
fn default_urgency_from() -> u32 { 6 }
fn default_combo_msg_ms() -> u64 { 900 }

impl Default for TomlRules {
    fn default() -> Self {
        TomlRules {
            start_secs: default_start_secs(),
            floor_secs: default_floor_secs(),
            ramp_step: default_ramp_step(),
            base_points: default_base_points(),
            combo_bonus: default_combo_bonus(),
            combo_interval: default_combo_interval(),
            urgency_from: default_urgency_from(),
            combo_msg_ms: default_combo_msg_ms(),
        }
    }
}

// ── Loading ──

impl GameConfig {
    /// Load config from `config.toml`.
    /// Search order: (1) exe directory, (2) current working directory.
    /// Missing file or missing keys gracefully fall back to defaults.
    pub fn load() -> Self {
        let toml_cfg = load_toml(&candidate_dirs());

        GameConfig {
            rules: RulesConfig {
                start_secs: toml_cfg.rules.start_secs.max(1),
                floor_secs: toml_cfg.rules.floor_secs.max(1),
                // Clamped so the time-limit formula never divides by zero.
                ramp_step: toml_cfg.rules.ramp_step.max(1),
                base_points: toml_cfg.rules.base_points,
                combo_bonus: toml_cfg.rules.combo_bonus,
                combo_interval: toml_cfg.rules.combo_interval.max(1),
                urgency_from: toml_cfg.rules.urgency_from,
                combo_msg_ms: toml_cfg.rules.combo_msg_ms,
            },
        }
    }
}

/// Candidate directories to search: exe dir + CWD (deduplicated).
fn candidate_dirs() -> Vec<PathBuf> {
    let mut dirs = vec![];

    if let Ok(exe) = std::env::current_exe() {
        let resolved = exe.canonicalize().unwrap_or(exe);
        if let Some(parent) = resolved.parent() {
            dirs.push(parent.to_path_buf());
        }
    }

    if let Ok(cwd) = std::env::current_dir() {
        if !dirs.iter().any(|d| d == &cwd) {
            dirs.push(cwd);
        }
    }

    if dirs.is_empty() {
        dirs.push(PathBuf::from("."));
    }

    dirs
}

/// Search for config.toml in candidate directories.
fn load_toml(search_dirs: &[PathBuf]) -> TomlConfig {
    for dir in search_dirs {
        let path = dir.join("config.toml");
        if path.exists() {
            match std::fs::read_to_string(&path) {
                Ok(text) => match toml::from_str::<TomlConfig>(&text) {
                    Ok(cfg) => return cfg,
                    Err(e) => {
                        eprintln!("Warning: config.toml parse error: {e}");
                        eprintln!("Using default settings.");
                        return TomlConfig::default();
                    }
                },
                Err(e) => {
                    eprintln!("Warning: could not read {}: {e}", path.display());
                }
            }
        }
    }
    TomlConfig::default()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_keys_fall_back_per_key() {
        let cfg: TomlConfig = toml::from_str("[rules]\nstart_secs = 12\n").unwrap();
        assert_eq!(cfg.rules.start_secs, 12);
        assert_eq!(cfg.rules.floor_secs, 4);
        assert_eq!(cfg.rules.combo_interval, 3);
    }

    #[test]
    fn malformed_file_falls_back_to_defaults() {
        let dir = std::env::temp_dir().join("stroopclash-bad-config-test");
        std::fs::create_dir_all(&dir).unwrap();
        std::fs::write(dir.join("config.toml"), "rules = [").unwrap();

        let cfg = load_toml(&[dir.clone()]);
        assert_eq!(cfg.rules.start_secs, 10);
        assert_eq!(cfg.rules.floor_secs, 4);
        assert_eq!(cfg.rules.combo_interval, 3);

        let _ = std::fs::remove_dir_all(&dir);
    }

    #[test]
    fn empty_file_is_all_defaults() {
        let cfg: TomlConfig = toml::from_str("").unwrap();
        assert_eq!(cfg.rules.start_secs, 10);
        assert_eq!(cfg.rules.urgency_from, 6);
        assert_eq!(cfg.rules.combo_msg_ms, 900);
    }
}
