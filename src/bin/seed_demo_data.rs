// ABOUTME: Demo data seeding utility for the RehabFlow server
// ABOUTME: Loads the doctor roster, demo feed posts, and starter notifications
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 RehabFlow Health

//! # Demo Data Seeder
//!
//! This binary loads the doctor roster and demo community content into the
//! database. Doctors and posts are upserted by fixed ids, so re-running the
//! seeder refreshes them without duplicates.
//!
//! ## Usage
//!
//! ```bash
//! # Seed the default database
//! cargo run --bin seed-demo-data
//!
//! # Override database URL
//! cargo run --bin seed-demo-data -- --database-url sqlite:./data/rehabflow.db
//!
//! # Seed notifications for a specific user
//! cargo run --bin seed-demo-data -- --user patient-42
//!
//! # Dry run (show what would be done)
//! cargo run --bin seed-demo-data -- --dry-run
//! ```

use std::env;

use chrono::Utc;
use clap::Parser;
use tracing::info;

use rehabflow_server::database::Database;
use rehabflow_server::errors::AppResult;
use rehabflow_server::models::{Doctor, NotificationType, Post, PostCategory};

#[derive(Parser)]
#[command(
    name = "seed-demo-data",
    about = "RehabFlow demo data seeder",
    long_about = "Load the doctor roster and demo community content into the database"
)]
struct SeedArgs {
    /// Database URL override
    #[arg(long)]
    database_url: Option<String>,

    /// User id that receives the starter notifications
    #[arg(long, default_value = "demo-user")]
    user: String,

    /// Dry run - show what would be done without making changes
    #[arg(long)]
    dry_run: bool,

    /// Enable verbose logging
    #[arg(long, short = 'v')]
    verbose: bool,
}

#[tokio::main]
async fn main() -> AppResult<()> {
    let args = SeedArgs::parse();

    let log_level = if args.verbose { "debug" } else { "info" };
    tracing_subscriber::fmt().with_env_filter(log_level).init();

    info!("=== RehabFlow Demo Data Seeder ===");

    if args.dry_run {
        info!("DRY RUN - no changes will be made");
    }

    let database_url = args
        .database_url
        .or_else(|| env::var("DATABASE_URL").ok())
        .unwrap_or_else(|| "sqlite:./data/rehabflow.db".into());

    info!("Connecting to database: {}", database_url);
    let database = Database::new(&database_url).await?;

    seed_doctors(&database, args.dry_run).await?;
    seed_posts(&database, args.dry_run).await?;
    seed_notifications(&database, &args.user, args.dry_run).await?;

    info!("");
    info!("=== Seeding Complete ===");

    Ok(())
}

/// Upsert the doctor roster
async fn seed_doctors(database: &Database, dry_run: bool) -> AppResult<()> {
    info!("");
    info!("=== Seeding Doctors ===");
    let manager = database.doctors();

    for doctor in doctor_roster() {
        if dry_run {
            info!("  Would seed: {} ({})", doctor.name, doctor.specialty);
            continue;
        }
        manager.upsert(&doctor).await?;
        info!("  + {} ({})", doctor.name, doctor.specialty);
    }

    Ok(())
}

/// Upsert the demo feed posts
async fn seed_posts(database: &Database, dry_run: bool) -> AppResult<()> {
    info!("");
    info!("=== Seeding Feed Posts ===");
    let manager = database.posts();

    for post in demo_posts() {
        if dry_run {
            info!("  Would seed: {} by {}", post.id, post.author_name);
            continue;
        }
        manager.upsert(&post).await?;
        info!("  + {} by {}", post.id, post.author_name);
    }

    Ok(())
}

/// Create the starter notifications for the demo user
///
/// Notifications have no natural key, so a user that already has any is
/// skipped instead of accumulating duplicates on every run.
async fn seed_notifications(database: &Database, user_id: &str, dry_run: bool) -> AppResult<()> {
    info!("");
    info!("=== Seeding Notifications ===");
    let manager = database.notifications();

    if !manager.list(user_id).await?.is_empty() {
        info!("  = {user_id} already has notifications (skipped)");
        return Ok(());
    }

    let notifications = [
        (
            NotificationType::Achievement,
            "Welcome to RehabFlow",
            "Your recovery space is ready. Open a chat with any doctor to get started.",
        ),
        (
            NotificationType::Exercise,
            "Daily mobility reminder",
            "A short session today keeps your recovery plan on track.",
        ),
        (
            NotificationType::Chat,
            "Your care team is available",
            "Dr. Sarah Chen and four other specialists are ready to chat.",
        ),
    ];

    for (kind, title, message) in notifications {
        if dry_run {
            info!("  Would create: {title}");
            continue;
        }
        manager.create(user_id, kind, title, message, None).await?;
        info!("  + {title}");
    }

    Ok(())
}

/// The fixed doctor roster shown in the app
fn doctor_roster() -> Vec<Doctor> {
    vec![
        demo_doctor(
            "doctor-sarah-chen",
            "Dr. Sarah Chen",
            "Physical Therapy",
            15,
            4.9,
        ),
        demo_doctor(
            "doctor-michael-torres",
            "Dr. Michael Torres",
            "Sports Medicine",
            12,
            4.8,
        ),
        demo_doctor(
            "doctor-emily-rodriguez",
            "Dr. Emily Rodriguez",
            "Orthopedic Surgery",
            18,
            4.9,
        ),
        demo_doctor(
            "doctor-james-park",
            "Dr. James Park",
            "Pain Management",
            10,
            4.7,
        ),
        demo_doctor(
            "doctor-aisha-patel",
            "Dr. Aisha Patel",
            "Neurological Rehabilitation",
            14,
            4.8,
        ),
    ]
}

fn demo_doctor(id: &str, name: &str, specialty: &str, years: i64, rating: f64) -> Doctor {
    Doctor {
        id: id.to_owned(),
        name: name.to_owned(),
        specialty: specialty.to_owned(),
        years_experience: years,
        rating,
        profile_picture: None,
        created_at: Utc::now().to_rfc3339(),
    }
}

/// Demo feed content authored by the roster doctors
fn demo_posts() -> Vec<Post> {
    vec![
        demo_post(
            "post-mobility-habits",
            Some("doctor-sarah-chen"),
            "Dr. Sarah Chen",
            Some("Physical Therapy"),
            PostCategory::ExerciseTips,
            "Consistency beats intensity. Three short mobility sessions a day will do \
             more for your recovery than one exhausting workout a week. Start small \
             and build from there.",
            &["mobility", "habits"],
        ),
        demo_post(
            "post-setback-weeks",
            Some("doctor-michael-torres"),
            "Dr. Michael Torres",
            Some("Sports Medicine"),
            PostCategory::Inspiration,
            "Recovery is not linear. A setback week does not erase the progress you \
             have already made. Keep showing up, adjust the plan, and trust the \
             process.",
            &["mindset"],
        ),
        demo_post(
            "post-ice-or-heat",
            Some("doctor-james-park"),
            "Dr. James Park",
            Some("Pain Management"),
            PostCategory::General,
            "Ice or heat? A useful rule of thumb: ice for fresh swelling in the first \
             couple of days, heat for stiff muscles before activity. When in doubt, \
             ask your care team in chat.",
            &["pain-relief", "basics"],
        ),
    ]
}

fn demo_post(
    id: &str,
    author_id: Option<&str>,
    author_name: &str,
    author_title: Option<&str>,
    category: PostCategory,
    content: &str,
    tags: &[&str],
) -> Post {
    Post {
        id: id.to_owned(),
        author_id: author_id.map(str::to_owned),
        author_name: author_name.to_owned(),
        author_avatar: None,
        author_title: author_title.map(str::to_owned),
        author_verified: true,
        category: category.as_str().to_owned(),
        content: content.to_owned(),
        image_url: None,
        likes: 0,
        comments: 0,
        tags: tags.iter().map(|t| (*t).to_owned()).collect(),
        created_at: Utc::now().to_rfc3339(),
    }
}
