use anyhow::{bail, Result};

use studydeck_core::api::models::StudySession;
use studydeck_core::ApiClient;

pub struct SessionArgs {
    pub hours: f64,
    pub subject: Option<String>,
    pub study_time: Option<String>,
    pub method: Option<String>,
    pub distractions: Option<String>,
    pub score: Option<u32>,
    pub date: Option<String>,
}

pub async fn run(api: &ApiClient, args: SessionArgs) -> Result<()> {
    if args.hours <= 0.0 {
        bail!("--hours must be positive");
    }
    if let Some(score) = args.score {
        if score > 100 {
            bail!("--score must be between 0 and 100");
        }
    }

    let session = StudySession {
        date: args.date,
        study_hours: args.hours,
        subject: args.subject.unwrap_or_default(),
        study_time: args.study_time.unwrap_or_default(),
        method_used: args.method.unwrap_or_default(),
        distractions: args.distractions.unwrap_or_else(|| "None".to_string()),
        quiz_score: args.score,
    };

    let ack = api.log_study(&session).await?;
    if ack.success {
        match ack.log_id {
            Some(id) => println!("Logged study session #{id}"),
            None => println!("Logged study session"),
        }
    } else {
        bail!(
            "Server rejected the session: {}",
            ack.message.unwrap_or_else(|| "no reason given".to_string())
        );
    }

    Ok(())
}
