use anyhow::Result;

use studydeck_core::format::{format_date, format_f64};
use studydeck_core::ApiClient;

pub async fn run(api: &ApiClient) -> Result<()> {
    let report = api.recommendations().await?;

    if !report.is_ready() {
        let hint = report
            .message
            .unwrap_or_else(|| "No recommendations available yet".to_string());
        println!("{hint}");
        return Ok(());
    }

    if let Some(name) = &report.cluster_name {
        println!("Study profile: {name}");
    }
    if let Some(description) = &report.cluster_description {
        println!("  {description}");
    }
    if let Some(method) = &report.suggested_method {
        println!("Suggested method: {method}");
    }
    if let Some(hours) = report.recommended_hours {
        println!("Recommended daily hours: {}", format_f64(hours, 1));
    }
    if let Some(minutes) = report.break_interval {
        println!("Break every: {minutes} min");
    }
    if let Some(time) = &report.preferred_time {
        println!("Best time: {time}");
    }

    if !report.recommended_tools.is_empty() {
        println!("\nRecommended tools:");
        for tool in &report.recommended_tools {
            println!("  - {tool}");
        }
    }

    if !report.weekly_schedule.is_empty() {
        println!("\nWeekly schedule:");
        for day in &report.weekly_schedule {
            println!("  {:<4} {}h", day.day, format_f64(day.hours, 1));
        }
    }

    if let Some(perf) = &report.performance_data {
        if !perf.dates.is_empty() {
            println!("\nRecent sessions:");
            for (i, date) in perf.dates.iter().enumerate() {
                let hours = perf
                    .study_hours
                    .get(i)
                    .map_or_else(|| "-".to_string(), |h| format_f64(*h, 1));
                let score = perf
                    .quiz_scores
                    .get(i)
                    .map_or_else(|| "-".to_string(), |s| format_f64(*s, 0));
                println!("  {:<13} {hours}h, quiz {score}", format_date(date));
            }
        }
    }

    Ok(())
}
