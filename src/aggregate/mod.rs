pub mod aggregator;
pub mod emotion;
pub mod series;

pub use aggregator::ResultAggregator;
pub use emotion::{EmotionScore, EmotionView, EMOTION_LABELS};
pub use series::ProgressSeries;
