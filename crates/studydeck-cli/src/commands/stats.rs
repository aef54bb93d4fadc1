use anyhow::Result;

use studydeck_core::format::format_f64;
use studydeck_core::ApiClient;

pub async fn run(api: &ApiClient) -> Result<()> {
    let stats = api.student_stats().await?;

    if !stats.has_sessions() {
        println!("No study sessions logged yet. Try: studydeck log --hours 1.5");
        return Ok(());
    }

    println!("Sessions:       {}", stats.total_sessions);
    println!("Total hours:    {}", format_f64(stats.total_hours, 1));
    println!("Average score:  {}", format_f64(stats.avg_score, 1));
    println!("Current streak: {} day(s)", stats.current_streak);

    Ok(())
}
