//! Test fixtures: a small reference index and a job around it.

use super::constants::*;
use anyhow::Result;
use chrono::NaiveDate;
use film_resolver::film::FilmInput;
use film_resolver::pipeline::FilmJob;
use film_resolver::reference_index::{
    FilmEntry, FilmographyCredit, IdentityDetail, IndexFilm, IndexPerson, IndexSnapshot,
    MemoryReferenceIndex, PersonEntry,
};
use serde_json::json;
use std::collections::BTreeMap;
use std::path::PathBuf;
use tempfile::TempDir;

fn detail_url(name: &str) -> String {
    format!("/people/{}", name.to_lowercase().replace(' ', "-"))
}

fn person(name: &str, aliases: &[&str], career: (i32, i32)) -> IndexPerson {
    IndexPerson {
        name: name.to_string(),
        aliases: aliases.iter().map(|a| a.to_string()).collect(),
        career_start: Some(career.0),
        career_end: Some(career.1),
        detail_url: Some(detail_url(name)),
        role: None,
    }
}

fn entry(person: IndexPerson, nationality: &str, qualifying: bool) -> PersonEntry {
    PersonEntry {
        detail: IdentityDetail {
            biography: BTreeMap::from([("Hair".to_string(), "Brown".to_string())]),
            nationality: Some(nationality.to_string()),
            photo_url: Some(format!("https://img.local{}.jpg", detail_url(&person.name))),
            filmography: vec![FilmographyCredit {
                title: SUMMER_HEAT.to_string(),
                year: Some(1994),
                qualifying,
            }],
        },
        person,
    }
}

/// Reference index contents shared by the end-to-end tests.
pub fn test_snapshot() -> IndexSnapshot {
    let mut credited_zak = person(ZAK_SPEARS, &["Spears", "Zack Spears"], (1990, 1995));
    credited_zak.role = Some("Top".to_string());

    IndexSnapshot {
        cast: vec![
            entry(
                person(ZAK_SPEARS, &["Spears", "Zack Spears"], (1990, 1995)),
                "American",
                true,
            ),
            entry(person(ZAK_SPEARMAN, &["Zak S"], (2008, 2014)), "Canadian", true),
            entry(person(LEO_ROCHA, &[], (1992, 1999)), "Brazilian", true),
            entry(person(AARON_LAWRENCE, &[], (1993, 1998)), "American", true),
            entry(person(STEVE_SOLO, &[], (1990, 2000)), "American", false),
        ],
        directors: vec![entry(
            person(CHI_CHI_LARUE, &["Taylor Whitney"], (1988, 2020)),
            "American",
            true,
        )],
        films: vec![FilmEntry {
            detail_url: SUMMER_HEAT_URL.to_string(),
            aka_title: None,
            film: IndexFilm {
                title: SUMMER_HEAT.to_string(),
                studio: Some(STUDIO_FULL.to_string()),
                release_date: NaiveDate::from_ymd_opt(1994, 6, 1),
                duration_secs: Some(90 * 60),
                is_compilation: false,
                cast: vec![credited_zak, person(LEO_ROCHA, &[], (1992, 1999))],
                directors: vec![person(CHI_CHI_LARUE, &["Taylor Whitney"], (1988, 2020))],
            },
        }],
    }
}

pub fn test_index() -> MemoryReferenceIndex {
    MemoryReferenceIndex::new(test_snapshot())
}

/// Writes the test snapshot to a temporary JSON file.
/// Returns (temp_dir, index_file_path)
pub fn write_index_file() -> Result<(TempDir, PathBuf)> {
    let dir = TempDir::new()?;
    let path = dir.path().join("index.json");
    std::fs::write(&path, serde_json::to_string_pretty(&test_snapshot())?)?;
    Ok((dir, path))
}

pub fn film_input(title: &str, year: Option<i32>) -> FilmInput {
    FilmInput {
        studio: STUDIO.to_string(),
        title: title.to_string(),
        year,
        duration_secs: Some(91 * 60),
        ..Default::default()
    }
}

/// "Summer Heat" with a wrong page first and a matching page second.
pub fn summer_heat_job() -> FilmJob {
    FilmJob {
        film: film_input(SUMMER_HEAT, Some(1994)),
        pages: vec![
            json!({
                "title": "Summer Heat 2",
                "studio": STUDIO_FULL,
                "release_date": "1995-03-01"
            }),
            json!({
                "title": "Summer Heat",
                "studio": STUDIO_FULL,
                "release_date": "June 1st, 1994",
                "duration": "1:31:00",
                "genres": ["Outdoor", "HD"],
                "countries": ["Brazilian"],
                "cast": ["Zack Spears", "Leo", "Leo Rocha", "Aaron Lawrance"],
                "directors": ["Chi Chi La Rue"],
                "synopsis": "A summer at the beach in Rio de Janeiro."
            }),
        ],
    }
}
