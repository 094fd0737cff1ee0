//! Stadium image bookkeeping: reads a scraped schedule and reports which
//! stadium photos exist on disk and which still need to be collected.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use slog::Logger;

use crate::output::{self, SchedulePayload};

const IMAGE_EXTS: [&str; 3] = ["jpg", "png", "webp"];

#[derive(serde::Deserialize, Debug)]
#[serde(default)]
pub struct Config {
    /// Schedule written by the scraper binary.
    pub data: PathBuf,
    /// Where stadium images get dropped.
    pub stadium_dir: PathBuf,
    pub manifest_out: PathBuf,
    pub status_md: PathBuf,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            data: PathBuf::from("data/huskers_schedule.json"),
            stadium_dir: PathBuf::from("stadiums"),
            manifest_out: PathBuf::from("data/stadium_manifest.json"),
            status_md: PathBuf::from("STADIUMS.md"),
        }
    }
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
pub struct StadiumRecord {
    pub slug: String,
    pub location_raw: String,
    pub city: String,
    pub stadium: Option<String>,
    pub example_game: String,
    pub files_present: Vec<String>,
    pub suggested_filenames: Vec<String>,
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
pub struct ManifestNotes {
    pub naming_rule: String,
    pub slug_source: String,
    pub slug_rules: String,
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
pub struct Manifest {
    pub generated_from: String,
    pub stadium_dir: String,
    pub found: Vec<StadiumRecord>,
    pub missing: Vec<StadiumRecord>,
    pub notes: ManifestNotes,
}

pub fn slugify(text: &str) -> String {
    let lowered = text.to_lowercase().replace('&', "and");

    let mut slug = String::with_capacity(lowered.len());
    let mut dash = false;
    for ch in lowered.chars() {
        if ch.is_alphanumeric() {
            slug.push(ch);
            dash = false;
        } else if !dash {
            slug.push('-');
            dash = true;
        }
    }

    slug.trim_matches('-').to_owned()
}

/// Splits `"Lincoln, Neb. / Memorial Stadium"` into city, stadium and a
/// filename slug. `None` when the location can't produce a usable slug.
pub fn parse_location(location: &str) -> Option<(String, Option<String>, String)> {
    if location.trim().is_empty() {
        return None;
    }

    let mut parts = location.split('/').map(str::trim);
    let city = parts.next().unwrap_or_default().to_owned();
    let stadium = parts
        .next()
        .filter(|part| !part.is_empty())
        .map(str::to_owned);

    let base = match &stadium {
        Some(stadium) => format!("{stadium}-{city}"),
        None => city.clone(),
    };
    let slug = slugify(&base);
    if slug.is_empty() {
        return None;
    }

    Some((city, stadium, slug))
}

/// One record per distinct stadium, first game wins, ordered by slug.
pub fn collect_stadiums(payload: &SchedulePayload) -> Vec<StadiumRecord> {
    let mut by_slug = BTreeMap::new();

    for game in &payload.games {
        let Some((city, stadium, slug)) = parse_location(&game.location) else {
            continue;
        };

        by_slug.entry(slug.clone()).or_insert_with(|| StadiumRecord {
            suggested_filenames: IMAGE_EXTS
                .iter()
                .map(|ext| format!("{slug}.{ext}"))
                .collect(),
            slug,
            location_raw: game.location.clone(),
            city,
            stadium,
            example_game: game.opponent_name.clone(),
            files_present: Vec::new(),
        });
    }

    by_slug.into_values().collect()
}

fn scan_files(records: &mut [StadiumRecord], stadium_dir: &Path) {
    for record in records {
        for ext in IMAGE_EXTS {
            let path = stadium_dir.join(format!("{}.{ext}", record.slug));
            if path.exists() {
                record.files_present.push(path.display().to_string());
            }
        }
    }
}

pub fn build_manifest(payload: &SchedulePayload, config: &Config) -> Manifest {
    let mut records = collect_stadiums(payload);
    scan_files(&mut records, &config.stadium_dir);

    let (found, missing): (Vec<_>, Vec<_>) = records
        .into_iter()
        .partition(|record| !record.files_present.is_empty());

    let stadium_dir = config.stadium_dir.display().to_string();
    Manifest {
        generated_from: config.data.display().to_string(),
        notes: ManifestNotes {
            naming_rule: format!("{stadium_dir}/<slug>.jpg|.png|.webp"),
            slug_source: "Prefer <stadium> + <city>. If no stadium, use <city>.".to_owned(),
            slug_rules: "lowercase; non-alphanumerics -> '-'; '&' -> 'and'; collapse repeats."
                .to_owned(),
        },
        stadium_dir,
        found,
        missing,
    }
}

pub fn render_status_md(manifest: &Manifest) -> String {
    let mut md = String::new();

    md.push_str("# Stadium Images Status\n");
    md.push_str(&format!(
        "Drop images in `{}/` named by the **slug** below. Any of `.jpg`, `.png`, `.webp` works.\n",
        manifest.stadium_dir
    ));

    md.push_str("## Missing\n");
    if manifest.missing.is_empty() {
        md.push_str("_None — you have them all!_\n");
    } else {
        md.push_str("| Opponent (example) | City / Stadium | File to add |\n|---|---|---|\n");
        for record in &manifest.missing {
            let want = record
                .suggested_filenames
                .first()
                .map(String::as_str)
                .unwrap_or_default();
            md.push_str(&format!(
                "| {} | {} | `{}/{want}` |\n",
                record.example_game, record.location_raw, manifest.stadium_dir
            ));
        }
    }

    md.push_str("\n## Found\n");
    if manifest.found.is_empty() {
        md.push_str("_No stadium images found yet._\n");
    } else {
        md.push_str("| Opponent (example) | City / Stadium | Files present |\n|---|---|---|\n");
        for record in &manifest.found {
            let have = record
                .files_present
                .iter()
                .map(|file| format!("`{file}`"))
                .collect::<Vec<_>>()
                .join(", ");
            md.push_str(&format!(
                "| {} | {} | {have} |\n",
                record.example_game, record.location_raw
            ));
        }
    }

    md
}

pub fn run(config: &Config, logger: &Logger) -> eyre::Result<()> {
    let logger = logger.new(slog::o!("subsystem" => "stadiums"));

    if !config.data.exists() {
        eyre::bail!("missing {}; run the scraper first", config.data.display());
    }

    let payload = output::read(&config.data)?;
    let manifest = build_manifest(&payload, config);

    if let Some(parent) = config
        .manifest_out
        .parent()
        .filter(|dir| !dir.as_os_str().is_empty())
    {
        std::fs::create_dir_all(parent)?;
    }
    std::fs::write(&config.manifest_out, serde_json::to_string_pretty(&manifest)?)?;
    slog::info!(logger, "manifest.written";
        "path" => config.manifest_out.display().to_string(),
        "found" => manifest.found.len(),
        "missing" => manifest.missing.len(),
    );

    std::fs::write(&config.status_md, render_status_md(&manifest))?;
    slog::info!(logger, "status.written"; "path" => config.status_md.display().to_string());

    Ok(())
}
