// src/bin/seed.rs
// Seeds a running school-admin service with grade levels and a school year
use anyhow::{bail, Context, Result};
use chrono::{Datelike, NaiveDate, Utc};
use dotenv::dotenv;
use reqwest::{Client, StatusCode};
use serde::Serialize;
use serde_json::Value;
use std::env;
use std::process;
use std::time::{Duration, Instant};

// --- ANSI colors ---
const RESET: &str = "\x1b[0m";
const BOLD: &str = "\x1b[1m";
const RED: &str = "\x1b[31m";
const GREEN: &str = "\x1b[32m";
const YELLOW: &str = "\x1b[33m";
const CYAN: &str = "\x1b[36m";

#[derive(Serialize)]
struct GradeLevelPayload {
    level_name: String,
    description: Option<String>,
    sort_order: i32,
}

#[derive(Serialize)]
struct SchoolYearPayload {
    year_label: String,
    start_date: NaiveDate,
    end_date: NaiveDate,
    is_active: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Outcome {
    Created,
    Skipped,
    Failed,
}

#[derive(Debug)]
struct SeedResult {
    item: String,
    outcome: Outcome,
    duration_secs: f64,
}

/// Grade levels created on a fresh database, in display order
fn default_grade_levels() -> Vec<GradeLevelPayload> {
    let mut levels = vec![GradeLevelPayload {
        level_name: "Kindergarten".to_string(),
        description: Some("Pre-primary level".to_string()),
        sort_order: 0,
    }];

    for grade in 1..=12 {
        let stage = match grade {
            1..=6 => "Elementary",
            7..=10 => "Junior High School",
            _ => "Senior High School",
        };
        levels.push(GradeLevelPayload {
            level_name: format!("Grade {}", grade),
            description: Some(stage.to_string()),
            sort_order: grade,
        });
    }

    levels
}

/// School year starting in June of the current calendar year
fn current_school_year(today: NaiveDate) -> Option<SchoolYearPayload> {
    let start_year = if today.month() >= 6 {
        today.year()
    } else {
        today.year() - 1
    };

    Some(SchoolYearPayload {
        year_label: format!("{}-{}", start_year, start_year + 1),
        start_date: NaiveDate::from_ymd_opt(start_year, 6, 1)?,
        end_date: NaiveDate::from_ymd_opt(start_year + 1, 3, 31)?,
        is_active: true,
    })
}

struct Seeder {
    base_url: String,
    actor: String,
    client: Client,
    results: Vec<SeedResult>,
}

impl Seeder {
    fn new(base_url: String, actor: String) -> Result<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(30))
            .build()
            .context("Failed to create HTTP client")?;

        Ok(Self {
            base_url,
            actor,
            client,
            results: Vec::new(),
        })
    }

    async fn check_service_health(&self) -> bool {
        match self.client.get(format!("{}/health", self.base_url)).send().await {
            Ok(resp) => resp.status().is_success(),
            Err(_) => false,
        }
    }

    /// POST a payload; 409 means the record already exists
    async fn post<T: Serialize>(&self, path: &str, payload: &T) -> Result<Outcome> {
        let response = self
            .client
            .post(format!("{}{}", self.base_url, path))
            .header("X-Actor", &self.actor)
            .json(payload)
            .send()
            .await
            .with_context(|| format!("POST {} failed", path))?;

        match response.status() {
            status if status.is_success() => Ok(Outcome::Created),
            StatusCode::CONFLICT => Ok(Outcome::Skipped),
            status => {
                let body: Value = response.json().await.unwrap_or(Value::Null);
                let message = body["error"]["message"].as_str().unwrap_or("unknown error");
                bail!("HTTP {} - {}", status, message)
            }
        }
    }

    async fn seed<T: Serialize>(&mut self, item: String, path: &str, payload: &T) {
        let start_time = Instant::now();
        let outcome = match self.post(path, payload).await {
            Ok(outcome) => outcome,
            Err(e) => {
                println!("{}❌ {}: {:#}{}", RED, item, e, RESET);
                Outcome::Failed
            }
        };

        match outcome {
            Outcome::Created => println!("{}✅ {}{}", GREEN, item, RESET),
            Outcome::Skipped => println!("{}⏭️  {} already exists{}", YELLOW, item, RESET),
            Outcome::Failed => {}
        }

        self.results.push(SeedResult {
            item,
            outcome,
            duration_secs: start_time.elapsed().as_secs_f64(),
        });
    }

    async fn run(&mut self) -> Result<()> {
        println!("\n{}🔍 Checking service status...{}", CYAN, RESET);
        if !self.check_service_health().await {
            bail!("service unavailable at {}", self.base_url);
        }
        println!("{}✅ Service available{}\n", GREEN, RESET);

        println!("{}🏫 Seeding grade levels...{}", BOLD, RESET);
        for level in default_grade_levels() {
            let item = format!("Grade level {}", level.level_name);
            self.seed(item, "/api/grade-levels", &level).await;
        }

        println!("\n{}📅 Seeding school year...{}", BOLD, RESET);
        let year = current_school_year(Utc::now().date_naive())
            .context("could not compute the current school year")?;
        let item = format!("School year {}", year.year_label);
        self.seed(item, "/api/school-years", &year).await;

        self.print_summary();
        Ok(())
    }

    fn print_summary(&self) {
        println!("\n{}📋 Seed Summary{}", BOLD, RESET);
        println!("──────────────────────────────────────────────────────────");
        println!("{:<40} {:<10} {:>8}", "Item", "Status", "Duration");
        println!("──────────────────────────────────────────────────────────");

        for res in &self.results {
            let status = match res.outcome {
                Outcome::Created => "created",
                Outcome::Skipped => "skipped",
                Outcome::Failed => "failed",
            };
            println!("{:<40} {:<10} {:>7.2}s", res.item, status, res.duration_secs);
        }

        let count = |outcome| self.results.iter().filter(|r| r.outcome == outcome).count();
        println!("──────────────────────────────────────────────────────────");
        println!("  • Created: {}{}{}", GREEN, count(Outcome::Created), RESET);
        println!("  • Skipped: {}{}{}", YELLOW, count(Outcome::Skipped), RESET);
        println!("  • Failed:  {}{}{}", RED, count(Outcome::Failed), RESET);
    }
}

#[tokio::main]
async fn main() {
    dotenv().ok();

    let base_url =
        env::var("SCHOOL_API_URL").unwrap_or_else(|_| "http://localhost:3000".to_string());
    let actor = env::var("SEED_ACTOR").unwrap_or_else(|_| "Seeder".to_string());

    let result = match Seeder::new(base_url, actor) {
        Ok(mut seeder) => seeder.run().await,
        Err(e) => Err(e),
    };

    if let Err(e) = result {
        println!("{}❌ {:#}{}", RED, e, RESET);
        println!("{}Please ensure school-admin is running (cargo run){}", YELLOW, RESET);
        process::exit(1);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_grade_levels_are_ordered() {
        let levels = default_grade_levels();
        assert_eq!(levels.len(), 13);
        assert_eq!(levels[0].level_name, "Kindergarten");
        assert_eq!(levels[12].level_name, "Grade 12");
        assert!(levels.windows(2).all(|w| w[0].sort_order < w[1].sort_order));
    }

    #[test]
    fn test_current_school_year_rolls_over_in_june() {
        let may = NaiveDate::from_ymd_opt(2025, 5, 20).unwrap();
        assert_eq!(current_school_year(may).unwrap().year_label, "2024-2025");

        let july = NaiveDate::from_ymd_opt(2025, 7, 1).unwrap();
        let year = current_school_year(july).unwrap();
        assert_eq!(year.year_label, "2025-2026");
        assert_eq!(year.start_date, NaiveDate::from_ymd_opt(2025, 6, 1).unwrap());
    }
}
