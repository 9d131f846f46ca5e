//! Output Formatting
//!
//! Utilities for formatting CLI output in various formats.

use crate::commands::OutputFormat;
use quejas_client::UploadOutcome;
use quejas_core::{
    Branch, Complaint, ComplaintStats, Instructor, Manager, NpsBreakdown, Pagination, Rating,
    RatingAnalytics, RatingStats,
};
use serde::Serialize;
use serde_json::json;

/// Format and print data based on output format
pub fn print_output<T: Serialize>(data: &T, format: OutputFormat) {
    match format {
        OutputFormat::Json => print_json(data),
        OutputFormat::Table | OutputFormat::Plain => print_json(data),
    }
}

/// Print as JSON
fn print_json<T: Serialize>(data: &T) {
    match serde_json::to_string_pretty(data) {
        Ok(json) => println!("{}", json),
        Err(e) => eprintln!("Error formatting JSON: {}", e),
    }
}

/// Cut a string to `width` characters, marking the cut
fn truncate(value: &str, width: usize) -> String {
    if value.chars().count() <= width {
        return value.to_string();
    }
    let mut cut: String = value.chars().take(width.saturating_sub(1)).collect();
    cut.push('…');
    cut
}

fn print_page_footer(pagination: &Pagination) {
    println!();
    println!(
        "Page {} of {} ({} total)",
        pagination.page, pagination.total_pages, pagination.total
    );
}

/// Print a page of complaints
pub fn print_complaints(items: &[Complaint], pagination: &Pagination, format: OutputFormat) {
    match format {
        OutputFormat::Json => print_json(&json!({"data": items, "pagination": pagination})),
        OutputFormat::Plain => {
            for c in items {
                println!("{}\t{}\t{}\t{}\t{}", c.id, c.status, c.priority, c.branch_name(), c.full_name);
            }
        }
        OutputFormat::Table => {
            println!(
                "{:<8} {:<12} {:<8} {:<16} {:<20} {}",
                "ID", "STATUS", "PRIORITY", "BRANCH", "SUBMITTED BY", "CREATED"
            );
            print_separator();
            for c in items {
                println!(
                    "{:<8} {:<12} {:<8} {:<16} {:<20} {}",
                    truncate(&c.id, 8),
                    c.status,
                    c.priority,
                    truncate(c.branch_name(), 16),
                    truncate(&c.full_name, 20),
                    c.created_at.format("%Y-%m-%d %H:%M")
                );
            }
            print_page_footer(pagination);
        }
    }
}

/// Print one complaint
pub fn print_complaint(c: &Complaint, format: OutputFormat) {
    match format {
        OutputFormat::Json => print_json(c),
        OutputFormat::Table | OutputFormat::Plain => {
            println!("Complaint {}", c.id);
            print_separator();
            print_row("Status:", c.status.as_str());
            print_row("Priority:", c.priority.as_str());
            print_row("Branch:", c.branch_name());
            print_row("Submitted by:", &format!("{} <{}>", c.full_name, c.email));
            if let Some(phone) = &c.phone {
                print_row("Phone:", phone);
            }
            print_row("Type:", &c.observation_type);
            print_row("Created:", &c.created_at.to_rfc3339());
            println!();
            println!("{}", c.detail);
            if let Some(resolution) = &c.resolution {
                println!();
                print_row("Resolution:", resolution);
            }
            for url in &c.attachments {
                print_row("Attachment:", url);
            }
        }
    }
}

/// Print complaint statistics
pub fn print_complaint_stats(stats: &ComplaintStats, format: OutputFormat) {
    match format {
        OutputFormat::Json => print_json(stats),
        OutputFormat::Table | OutputFormat::Plain => {
            println!("Complaint Statistics");
            println!("====================");
            print_row("Total:", &stats.total.to_string());
            print_row("Pending:", &stats.pending.to_string());
            print_row("In progress:", &stats.in_progress.to_string());
            print_row("Resolved:", &stats.resolved.to_string());
            print_row("Rejected:", &stats.rejected.to_string());
            print_row("Resolution rate:", &format!("{:.1}%", stats.resolution_rate()));
            println!();
            println!("By priority:");
            print_row("  High:", &stats.by_priority.high.to_string());
            print_row("  Medium:", &stats.by_priority.medium.to_string());
            print_row("  Low:", &stats.by_priority.low.to_string());
            if !stats.by_branch.is_empty() {
                println!();
                println!("By branch:");
                for branch in &stats.by_branch {
                    print_row(&format!("  {}", branch.branch_name), &branch.count.to_string());
                }
            }
        }
    }
}

/// Print a page of ratings
pub fn print_ratings(items: &[Rating], pagination: &Pagination, format: OutputFormat) {
    match format {
        OutputFormat::Json => print_json(&json!({"data": items, "pagination": pagination})),
        OutputFormat::Plain => {
            for r in items {
                println!("{}\t{}\t{}\t{:.1}\t{}", r.id, r.branch_id, r.instructor_id, r.average_score(), r.nps_score);
            }
        }
        OutputFormat::Table => {
            println!(
                "{:<8} {:<16} {:<16} {:>7} {:>4} {:<10}",
                "ID", "BRANCH", "INSTRUCTOR", "AVERAGE", "NPS", "CATEGORY"
            );
            print_separator();
            for r in items {
                let branch = r.branch.as_ref().map(|b| b.name.as_str()).unwrap_or(r.branch_id.as_str());
                let instructor = r
                    .instructor
                    .as_ref()
                    .map(|i| i.name.as_str())
                    .unwrap_or(r.instructor_id.as_str());
                println!(
                    "{:<8} {:<16} {:<16} {:>7.1} {:>4} {:<10}",
                    truncate(&r.id, 8),
                    truncate(branch, 16),
                    truncate(instructor, 16),
                    r.average_score(),
                    r.nps_score,
                    r.nps_category().label()
                );
            }
            print_page_footer(pagination);
        }
    }
}

/// Print rating statistics
pub fn print_rating_stats(stats: &RatingStats, format: OutputFormat) {
    match format {
        OutputFormat::Json => print_json(stats),
        OutputFormat::Table | OutputFormat::Plain => {
            println!("Rating Statistics");
            println!("=================");
            print_row("Ratings:", &stats.total_ratings.to_string());
            println!();
            println!("Averages:");
            let a = &stats.averages;
            print_row("  Instructor:", &format!("{:.2}", a.instructor));
            print_row("  Cleanliness:", &format!("{:.2}", a.cleanliness));
            print_row("  Audio:", &format!("{:.2}", a.audio));
            print_row("  Attention:", &format!("{:.2}", a.attention_quality));
            print_row("  Amenities:", &format!("{:.2}", a.amenities));
            print_row("  Punctuality:", &format!("{:.2}", a.punctuality));
            println!();
            println!("NPS:");
            print_row("  Promoters:", &stats.nps.promoters.to_string());
            print_row("  Passives:", &stats.nps.passives.to_string());
            print_row("  Detractors:", &stats.nps.detractors.to_string());
            print_row("  Score:", &format!("{:.1}", stats.nps.score));
            if !stats.by_instructor.is_empty() {
                println!();
                println!("By instructor:");
                for i in &stats.by_instructor {
                    print_row(
                        &format!("  {}", i.instructor_name),
                        &format!("{:.2} ({} ratings)", i.average, i.count),
                    );
                }
            }
        }
    }
}

/// Print rating analytics
pub fn print_analytics(analytics: &RatingAnalytics, format: OutputFormat) {
    match format {
        OutputFormat::Json => print_json(analytics),
        OutputFormat::Table | OutputFormat::Plain => {
            println!("{:<12} {:>8} {:>8} {:>6}", "PERIOD", "AVERAGE", "NPS", "COUNT");
            print_separator();
            for t in &analytics.trends {
                println!("{:<12} {:>8.2} {:>8.1} {:>6}", t.period, t.average_score, t.nps_score, t.count);
            }
            if !analytics.by_branch.is_empty() {
                println!();
                println!("{:<20} {:>8} {:>6}", "BRANCH", "AVERAGE", "COUNT");
                print_separator();
                for b in &analytics.by_branch {
                    println!("{:<20} {:>8.2} {:>6}", truncate(&b.branch_name, 20), b.average, b.count);
                }
            }
        }
    }
}

/// Print an NPS breakdown
pub fn print_nps(nps: &NpsBreakdown, format: OutputFormat) {
    match format {
        OutputFormat::Json => print_json(&json!({
            "promoters": nps.promoters,
            "passives": nps.passives,
            "detractors": nps.detractors,
            "total": nps.total(),
            "score": nps.score(),
        })),
        OutputFormat::Plain => println!("{:.1}", nps.score()),
        OutputFormat::Table => {
            println!("Net Promoter Score");
            println!("==================");
            print_row("Promoters:", &nps.promoters.to_string());
            print_row("Passives:", &nps.passives.to_string());
            print_row("Detractors:", &nps.detractors.to_string());
            print_row("Score:", &format!("{:.1}", nps.score()));
        }
    }
}

/// Print a page of branches
pub fn print_branches(items: &[Branch], pagination: &Pagination, format: OutputFormat) {
    match format {
        OutputFormat::Json => print_json(&json!({"data": items, "pagination": pagination})),
        OutputFormat::Plain => {
            for b in items {
                println!("{}\t{}", b.id, b.name);
            }
        }
        OutputFormat::Table => {
            println!("{:<8} {:<24} {:<7} {}", "ID", "NAME", "ACTIVE", "ADDRESS");
            print_separator();
            for b in items {
                println!(
                    "{:<8} {:<24} {:<7} {}",
                    truncate(&b.id, 8),
                    truncate(&b.name, 24),
                    if b.is_active { "yes" } else { "no" },
                    b.address.as_deref().unwrap_or("-")
                );
            }
            print_page_footer(pagination);
        }
    }
}

/// Print a page of instructors
pub fn print_instructors(items: &[Instructor], pagination: &Pagination, format: OutputFormat) {
    match format {
        OutputFormat::Json => print_json(&json!({"data": items, "pagination": pagination})),
        OutputFormat::Plain => {
            for i in items {
                println!("{}\t{}", i.id, i.name);
            }
        }
        OutputFormat::Table => {
            println!("{:<8} {:<24} {:<24} {}", "ID", "NAME", "DISCIPLINES", "BRANCHES");
            print_separator();
            for i in items {
                let branches: Vec<&str> = i.branches.iter().map(|b| b.name.as_str()).collect();
                println!(
                    "{:<8} {:<24} {:<24} {}",
                    truncate(&i.id, 8),
                    truncate(&i.name, 24),
                    truncate(&i.disciplines.join(", "), 24),
                    branches.join(", ")
                );
            }
            print_page_footer(pagination);
        }
    }
}

/// Print a page of back-office users
pub fn print_managers(items: &[Manager], pagination: &Pagination, format: OutputFormat) {
    match format {
        OutputFormat::Json => print_json(&json!({"data": items, "pagination": pagination})),
        OutputFormat::Plain => {
            for m in items {
                println!("{}\t{}\t{}", m.id, m.email, m.role);
            }
        }
        OutputFormat::Table => {
            println!("{:<8} {:<20} {:<28} {:<8} {}", "ID", "NAME", "EMAIL", "ROLE", "BRANCH");
            print_separator();
            for m in items {
                let branch = m
                    .branch
                    .as_ref()
                    .map(|b| b.name.clone())
                    .or_else(|| m.branch_id.clone())
                    .unwrap_or_else(|| "-".to_string());
                println!(
                    "{:<8} {:<20} {:<28} {:<8} {}",
                    truncate(&m.id, 8),
                    truncate(&m.name, 20),
                    truncate(&m.email, 28),
                    m.role,
                    branch
                );
            }
            print_page_footer(pagination);
        }
    }
}

/// Print the result of a batch upload
pub fn print_upload_outcomes(outcomes: &[UploadOutcome], format: OutputFormat) {
    match format {
        OutputFormat::Json => {
            let rows: Vec<_> = outcomes
                .iter()
                .map(|o| match &o.result {
                    Ok(url) => json!({"file": o.file_name, "url": url}),
                    Err(e) => json!({"file": o.file_name, "error": e.message()}),
                })
                .collect();
            print_json(&rows);
        }
        OutputFormat::Table | OutputFormat::Plain => {
            for o in outcomes {
                match &o.result {
                    Ok(url) => println!("OK    {} -> {}", o.file_name, url),
                    Err(e) => println!("FAIL  {}: {}", o.file_name, e.message()),
                }
            }
        }
    }
}

/// Print a progress line for an upload
pub fn print_upload_progress(file_name: &str, progress: u8) {
    eprintln!("[{:>3}%] {}", progress, file_name);
}

/// Print success message
pub fn print_success(message: &str) {
    println!("{}", message);
}

/// Print warning message
pub fn print_warning(message: &str) {
    eprintln!("Warning: {}", message);
}

/// Print info message
pub fn print_info(message: &str) {
    println!("{}", message);
}

/// Print a table row
pub fn print_row(key: &str, value: &str) {
    println!("{:<20} {}", key, value);
}

/// Print a separator line
pub fn print_separator() {
    println!("{}", "-".repeat(40));
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_truncate() {
        assert_eq!(truncate("Polanco", 16), "Polanco");
        assert_eq!(truncate("Santa Fe Zedec Plaza", 10), "Santa Fe …");
        assert_eq!(truncate("Ñuñoa", 5), "Ñuñoa");
    }

    #[test]
    fn test_print_row_format() {
        print_row("Key", "Value");
    }
}
