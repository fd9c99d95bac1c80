//! Jugo Analysis - perceptual juiciness metrics
//!
//! Streaming extraction of block-wise "juiciness" metrics: punch,
//! richness, clarity, width, mono safety, and a composite 0-100 score,
//! plus slow-moving experiential trackers (emphasis, coherence,
//! synesthesia, fatigue risk, repetition density).
//!
//! [`JuicinessAnalyzer`] runs on the audio thread; [`MetricsBridge`]
//! hands the resulting [`JuicinessMetrics`] to observer threads without
//! locks.
//!
//! ```
//! use jugo_analysis::JuicinessAnalyzer;
//!
//! let mut analyzer = JuicinessAnalyzer::new(48000.0);
//! let block = vec![0.0f32; 512];
//! let metrics = analyzer.analyze(&block, Some(&block));
//! assert!(metrics.score <= 100.0);
//! ```

pub mod analyzer;
pub mod bridge;
pub mod metrics;

pub use analyzer::JuicinessAnalyzer;
pub use bridge::MetricsBridge;
pub use metrics::JuicinessMetrics;
