//! Serde models for the recommender service's JSON API.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// Body of `POST /api/log-study`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct StudySession {
    /// Session date as YYYY-MM-DD; the server fills in today when omitted
    #[serde(skip_serializing_if = "Option::is_none")]
    pub date: Option<String>,
    pub study_hours: f64,
    #[serde(default)]
    pub subject: String,
    /// Time of day bucket, e.g. "Morning"
    #[serde(default)]
    pub study_time: String,
    /// Study method, e.g. "Pomodoro"
    #[serde(default)]
    pub method_used: String,
    #[serde(default = "default_distractions")]
    pub distractions: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub quiz_score: Option<u32>,
}

fn default_distractions() -> String {
    "None".to_string()
}

/// Response of `POST /api/log-study`.
#[derive(Debug, Clone, Deserialize)]
pub struct LogStudyAck {
    pub success: bool,
    #[serde(default)]
    pub log_id: Option<u64>,
    #[serde(default)]
    pub message: Option<String>,
}

/// Response of `GET /api/get-recommendations`.
///
/// The service answers with `has_recommendations: false` and a hint message
/// until at least three sessions have been logged.
#[derive(Debug, Clone, Deserialize)]
pub struct RecommendationReport {
    pub success: bool,
    #[serde(default)]
    pub has_recommendations: bool,
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default)]
    pub cluster_name: Option<String>,
    #[serde(default)]
    pub cluster_description: Option<String>,
    #[serde(default)]
    pub recommended_hours: Option<f64>,
    /// Suggested minutes between breaks
    #[serde(default)]
    pub break_interval: Option<u32>,
    #[serde(default)]
    pub suggested_method: Option<String>,
    #[serde(default)]
    pub recommended_tools: Vec<String>,
    #[serde(default)]
    pub preferred_time: Option<String>,
    #[serde(default)]
    pub performance_data: Option<PerformanceData>,
    #[serde(default)]
    pub weekly_schedule: Vec<ScheduleDay>,
}

impl RecommendationReport {
    pub fn is_ready(&self) -> bool {
        self.success && self.has_recommendations
    }
}

/// Recent-session series for the performance charts.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct PerformanceData {
    #[serde(default)]
    pub dates: Vec<String>,
    #[serde(default)]
    pub study_hours: Vec<f64>,
    #[serde(default)]
    pub quiz_scores: Vec<f64>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ScheduleDay {
    pub day: String,
    pub hours: f64,
}

/// Response of `GET /api/student-stats`.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct StudentStats {
    #[serde(default)]
    pub total_sessions: u64,
    #[serde(default)]
    pub total_hours: f64,
    #[serde(default)]
    pub avg_score: f64,
    #[serde(default)]
    pub current_streak: u32,
}

impl StudentStats {
    pub fn has_sessions(&self) -> bool {
        self.total_sessions > 0
    }
}

/// One behavioral cluster profile from the clustering model.
#[derive(Debug, Clone, Deserialize)]
pub struct ClusterProfile {
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub avg_study_duration: f64,
    #[serde(default)]
    pub preferred_time: String,
    #[serde(default)]
    pub distraction_level: String,
    #[serde(default)]
    pub quiz_performance: f64,
    #[serde(default)]
    pub common_tools: Vec<String>,
    #[serde(default)]
    pub recommended_hours: f64,
    #[serde(default)]
    pub break_interval: u32,
    #[serde(default)]
    pub suggested_method: String,
    #[serde(default)]
    pub recommended_tools: Vec<String>,
}

/// Response of `GET /api/clustering-insights`.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ClusteringInsights {
    /// Keyed by cluster id ("0".."3"); BTreeMap keeps iteration stable
    #[serde(default)]
    pub cluster_profiles: BTreeMap<String, ClusterProfile>,
    #[serde(default)]
    pub total_students: u64,
    #[serde(default)]
    pub data_quality: f64,
}
