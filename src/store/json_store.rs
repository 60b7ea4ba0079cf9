use std::fs;
use std::io::Write;
use std::path::PathBuf;

use anyhow::Result;
use serde::{Serialize, de::DeserializeOwned};

use crate::store::schema::{Attempt, AttemptLogData, CapabilityProfile, ProfileBookData};

/// File-backed persistence for the attempt log and capability profiles.
///
/// Attempts are append-only: records are never rewritten or removed once
/// inserted, and file order is insertion order. Profiles are a per-learner
/// map, upserted whole. Both files are replaced atomically on save
/// (write-to-tmp then rename), so a crash mid-write never leaves a torn file.
pub struct JsonStore {
    base_dir: PathBuf,
}

impl JsonStore {
    pub fn new() -> Result<Self> {
        let base_dir = dirs::data_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("readrill");
        fs::create_dir_all(&base_dir)?;
        Ok(Self { base_dir })
    }

    pub fn with_base_dir(base_dir: PathBuf) -> Result<Self> {
        fs::create_dir_all(&base_dir)?;
        Ok(Self { base_dir })
    }

    fn file_path(&self, name: &str) -> PathBuf {
        self.base_dir.join(name)
    }

    fn load<T: DeserializeOwned + Default>(&self, name: &str) -> T {
        let path = self.file_path(name);
        if path.exists() {
            match fs::read_to_string(&path) {
                Ok(content) => serde_json::from_str(&content).unwrap_or_default(),
                Err(_) => T::default(),
            }
        } else {
            T::default()
        }
    }

    fn save<T: Serialize>(&self, name: &str, data: &T) -> Result<()> {
        let path = self.file_path(name);
        let tmp_path = path.with_extension("tmp");

        let json = serde_json::to_string_pretty(data)?;
        let mut file = fs::File::create(&tmp_path)?;
        file.write_all(json.as_bytes())?;
        file.sync_all()?;

        fs::rename(&tmp_path, &path)?;
        Ok(())
    }

    /// Append one attempt record. Existing records are never touched.
    pub fn append_attempt(&self, attempt: Attempt) -> Result<()> {
        let mut log: AttemptLogData = self.load("attempts.json");
        log.attempts.push(attempt);
        self.save("attempts.json", &log)
    }

    /// Most recently appended attempt for the learner, by insertion order
    /// (not sequence index — a submit record appended after an issuance is
    /// the latest even though it reuses the issuance's index).
    pub fn latest_attempt(&self, learner_id: &str) -> Option<Attempt> {
        let log: AttemptLogData = self.load("attempts.json");
        log.attempts
            .into_iter()
            .rev()
            .find(|a| a.learner_id == learner_id)
    }

    /// Full history for the learner, sorted by sequence index ascending.
    /// The sort is stable, so records sharing an index keep insertion order.
    pub fn all_attempts(&self, learner_id: &str) -> Vec<Attempt> {
        let log: AttemptLogData = self.load("attempts.json");
        let mut attempts: Vec<Attempt> = log
            .attempts
            .into_iter()
            .filter(|a| a.learner_id == learner_id)
            .collect();
        attempts.sort_by_key(|a| a.sequence_index);
        attempts
    }

    /// Profile for the learner, or a fresh default (score 1.0, zero history)
    /// when none has been persisted yet.
    pub fn load_profile(&self, learner_id: &str) -> CapabilityProfile {
        let book: ProfileBookData = self.load("profiles.json");
        book.profiles
            .get(learner_id)
            .cloned()
            .unwrap_or_else(|| CapabilityProfile::fresh(learner_id))
    }

    /// Upsert one learner's profile.
    pub fn save_profile(&self, profile: &CapabilityProfile) -> Result<()> {
        let mut book: ProfileBookData = self.load("profiles.json");
        book.profiles
            .insert(profile.learner_id.clone(), profile.clone());
        self.save("profiles.json", &book)
    }
}
