pub mod client;
pub mod result;

pub use client::{AnalysisBackend, AnalysisClient, AnalysisError};
pub use result::{
    AnalysisResult, Categories, CategoryInsight, ChartData, EmotionInfo, FillerInfo, GraphData,
    HistoryEntry, PauseInfo, Probability, WpmInfo,
};
